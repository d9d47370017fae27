//! Loan tracker ledger: fixed installments and payment progress.

use finlit_domain::{Displayable, LoanRecord, SchemaCheck};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    budget_ledger::MISSING_FIELDS_MESSAGE,
    calculators::{compute_emi, parse_count, parse_number},
    CoreError, Persistence,
};

/// Text inputs of the add-loan form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanDraft {
    pub name: String,
    pub amount: String,
    pub rate: String,
    pub months: String,
}

impl LoanDraft {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        rate: impl Into<String>,
        months: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            rate: rate.into(),
            months: months.into(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.amount.clear();
        self.rate.clear();
        self.months.clear();
    }

    fn has_empty_field(&self) -> bool {
        [&self.name, &self.amount, &self.rate, &self.months]
            .iter()
            .any(|field| field.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Recorded { paid: u32, remaining: u32 },
    AlreadyPaidOff,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanSummary {
    pub loan_count: usize,
    pub active_count: usize,
    /// Monthly outgoings for loans that still have installments due.
    pub active_monthly_emi: f64,
    pub total_outstanding: f64,
}

/// Insertion-ordered list of loans, persisted under [`LoanLedger::STORE_KEY`].
pub struct LoanLedger {
    loans: Vec<LoanRecord>,
    persistence: Persistence,
}

impl LoanLedger {
    pub const STORE_KEY: &'static str = "loans";

    pub fn load(persistence: Persistence) -> Self {
        let loans = persistence.load_list::<LoanRecord>(Self::STORE_KEY);
        info!(count = loans.len(), "loan ledger loaded");
        Self { loans, persistence }
    }

    pub fn loans(&self) -> &[LoanRecord] {
        &self.loans
    }

    pub fn get(&self, id: Uuid) -> Option<&LoanRecord> {
        self.loans.iter().find(|loan| loan.id == id)
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    /// Validates the draft, computes the installment, appends the loan,
    /// persists, and clears the draft.
    pub fn add(&mut self, draft: &mut LoanDraft) -> Result<Uuid, CoreError> {
        if draft.has_empty_field() {
            return Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.into()));
        }
        let principal = parse_number("loan amount", &draft.amount)?;
        let rate = parse_number("interest rate", &draft.rate)?;
        let months = parse_count("duration", &draft.months)?;
        let emi = compute_emi(principal, rate, months)?;

        let loan = LoanRecord::new(draft.name.trim(), principal, rate, months, emi);
        loan.check().map_err(CoreError::Validation)?;
        let id = loan.id;
        self.loans.push(loan);
        self.persist();
        draft.clear();
        Ok(id)
    }

    /// Counts one installment as paid. Fully paid loans are left untouched.
    pub fn mark_paid(&mut self, id: Uuid) -> PaymentOutcome {
        let Some(loan) = self.loans.iter_mut().find(|loan| loan.id == id) else {
            return PaymentOutcome::NotFound;
        };
        if !loan.mark_paid() {
            return PaymentOutcome::AlreadyPaidOff;
        }
        let outcome = PaymentOutcome::Recorded {
            paid: loan.paid_installments,
            remaining: loan.remaining_installments(),
        };
        self.persist();
        outcome
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let Some(index) = self.loans.iter().position(|loan| loan.id == id) else {
            return false;
        };
        let removed = self.loans.remove(index);
        info!(loan = %removed.display_label(), "loan deleted");
        self.persist();
        true
    }

    pub fn total_monthly_emi(&self) -> f64 {
        self.loans.iter().map(|loan| loan.emi).sum()
    }

    pub fn summary(&self) -> LoanSummary {
        let active: Vec<&LoanRecord> = self.loans.iter().filter(|l| !l.is_paid_off()).collect();
        LoanSummary {
            loan_count: self.loans.len(),
            active_count: active.len(),
            active_monthly_emi: active.iter().map(|loan| loan.emi).sum(),
            total_outstanding: active.iter().map(|loan| loan.outstanding()).sum(),
        }
    }

    fn persist(&self) {
        self.persistence.save_list(Self::STORE_KEY, &self.loans);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::MemoryStore;

    fn ledger() -> (LoanLedger, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (LoanLedger::load(Persistence::new(store.clone())), store)
    }

    fn add(ledger: &mut LoanLedger, name: &str, amount: &str, rate: &str, months: &str) -> Uuid {
        let mut draft = LoanDraft::new(name, amount, rate, months);
        ledger.add(&mut draft).expect("add loan")
    }

    #[test]
    fn add_computes_emi_and_appends() {
        let (mut ledger, store) = ledger();
        let first = add(&mut ledger, "Car", "120000", "10", "12");
        let second = add(&mut ledger, "Phone", "1200", "0", "12");

        assert_eq!(ledger.loans()[0].id, first);
        assert_eq!(ledger.loans()[1].id, second);
        assert_eq!(ledger.loans()[0].emi, 10_550.0);
        assert_eq!(ledger.loans()[1].emi, 100.0);
        assert_eq!(ledger.loans()[0].paid_installments, 0);
        assert_eq!(ledger.total_monthly_emi(), 10_650.0);
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn add_requires_every_field() {
        let (mut ledger, store) = ledger();
        let mut draft = LoanDraft::new("Car", "5000", "", "12");
        let err = ledger.add(&mut draft).unwrap_err();
        assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
        assert_eq!(draft.amount, "5000");
        assert!(ledger.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn add_reports_unparseable_and_zero_term() {
        let (mut ledger, _) = ledger();
        let mut draft = LoanDraft::new("Car", "5k", "5", "12");
        assert!(matches!(
            ledger.add(&mut draft),
            Err(CoreError::Parse {
                field: "loan amount",
                ..
            })
        ));
        let mut draft = LoanDraft::new("Car", "5000", "5", "0");
        assert!(matches!(ledger.add(&mut draft), Err(CoreError::Validation(_))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn add_rejects_oversized_terms_and_keeps_ledger_loadable() {
        let (mut ledger, store) = ledger();
        for months in ["2000000000", "3000000000"] {
            let mut draft = LoanDraft::new("X", "1000", "5", months);
            assert!(matches!(ledger.add(&mut draft), Err(CoreError::Validation(_))));
            assert_eq!(draft.months, months);
        }
        assert!(ledger.is_empty());
        assert_eq!(store.write_count(), 0);

        add(&mut ledger, "Mortgage", "200000", "6", "360");
        let reloaded = LoanLedger::load(Persistence::new(store.clone()));
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.loans()[0].emi.is_finite());
    }

    #[test]
    fn mark_paid_saturates_without_writing() {
        let (mut ledger, store) = ledger();
        let id = add(&mut ledger, "Laptop", "900", "12", "2");

        assert_eq!(
            ledger.mark_paid(id),
            PaymentOutcome::Recorded {
                paid: 1,
                remaining: 1
            }
        );
        assert_eq!(
            ledger.mark_paid(id),
            PaymentOutcome::Recorded {
                paid: 2,
                remaining: 0
            }
        );
        let writes = store.write_count();
        let snapshot = ledger.get(id).cloned();

        assert_eq!(ledger.mark_paid(id), PaymentOutcome::AlreadyPaidOff);
        assert_eq!(ledger.mark_paid(id), PaymentOutcome::AlreadyPaidOff);
        assert_eq!(ledger.get(id).cloned(), snapshot);
        assert_eq!(store.write_count(), writes);
        assert_eq!(ledger.mark_paid(Uuid::now_v7()), PaymentOutcome::NotFound);
    }

    #[test]
    fn delete_removes_and_persists() {
        let (mut ledger, store) = ledger();
        let id = add(&mut ledger, "Car", "5000", "5", "12");
        assert!(!ledger.delete(Uuid::now_v7()));
        assert!(ledger.delete(id));
        assert!(ledger.is_empty());
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn summary_ignores_paid_off_loans() {
        let (mut ledger, _) = ledger();
        let done = add(&mut ledger, "Phone", "200", "0", "1");
        add(&mut ledger, "Car", "1200", "0", "12");
        ledger.mark_paid(done);

        let summary = ledger.summary();
        assert_eq!(summary.loan_count, 2);
        assert_eq!(summary.active_count, 1);
        assert_eq!(summary.active_monthly_emi, 100.0);
        assert_eq!(summary.total_outstanding, 1_200.0);
        assert_eq!(ledger.total_monthly_emi(), 300.0);
    }
}
