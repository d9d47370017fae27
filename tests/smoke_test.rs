use std::sync::Arc;

use finlit::init;
use finlit_core::{
    compound_interest, compute_emi, Advisor, BudgetDraft, BudgetLedger, CoreError, CreditFactors,
    LoanDraft, LoanLedger, MemoryStore, Persistence, QuizSession, ScoreBand, SystemClock,
    ADVISOR_FALLBACK,
};
use finlit_domain::RecordKind;

#[test]
fn calculators_smoke() {
    init();

    assert_eq!(compute_emi(120_000.0, 10.0, 12).unwrap(), 10_550.0);
    assert_eq!(compute_emi(1_000.0, 0.0, 2).unwrap(), 500.0);

    let growth = compound_interest(1_000.0, 5.0, 10.0, 12.0).unwrap();
    assert!((growth.future_value - 1_647.01).abs() < 0.01);

    let factors = CreditFactors::default();
    assert_eq!(factors.score(), 690);
    assert_eq!(factors.band(), ScoreBand::Good);
}

#[test]
fn ledgers_over_memory_store_smoke() {
    init();

    let store = Arc::new(MemoryStore::new());
    let mut budget = BudgetLedger::load(Persistence::new(store.clone()), Arc::new(SystemClock));
    budget
        .add(&mut BudgetDraft::new("250", "Freelance", RecordKind::Income))
        .unwrap();
    budget
        .add(&mut BudgetDraft::new("75", "Utilities", RecordKind::Expense))
        .unwrap();
    assert_eq!(budget.aggregates().balance, 175.0);

    let mut loans = LoanLedger::load(Persistence::new(store.clone()));
    loans
        .add(&mut LoanDraft::new("Laptop", "1200", "0", "12"))
        .unwrap();
    assert_eq!(loans.total_monthly_emi(), 100.0);
    assert_eq!(store.write_count(), 3);
}

#[test]
fn quiz_and_advisor_smoke() {
    init();

    let mut quiz = QuizSession::default();
    while let Some(question) = quiz.current() {
        let correct = question.answer;
        quiz.answer(correct).unwrap();
        quiz.advance().unwrap();
    }
    assert!(quiz.is_finished());
    assert!(quiz.is_perfect());
    assert_eq!(quiz.score(), quiz.total());

    let mut advisor = Advisor::new(|_: &str| -> Result<String, CoreError> {
        Err(CoreError::ExternalService("offline".into()))
    });
    let reply = advisor.send("How do I start saving?").unwrap();
    assert_eq!(reply.text, ADVISOR_FALLBACK);
    assert_eq!(advisor.transcript().len(), 3);
}
