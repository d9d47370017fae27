use std::{fs, sync::Arc};

use chrono::NaiveDate;
use finlit_core::{
    BudgetDraft, BudgetLedger, FixedClock, KeyValueStore, LoanDraft, LoanLedger, Persistence,
};
use finlit_domain::RecordKind;
use finlit_storage_json::JsonFileStore;
use tempfile::tempdir;

#[test]
fn json_store_round_trips_values() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("store")).expect("create store");

    assert_eq!(store.get("records").expect("read missing"), None);
    store.set("records", "[1,2,3]").expect("write");
    assert_eq!(
        store.get("records").expect("read").as_deref(),
        Some("[1,2,3]")
    );

    let path = store.value_path("records");
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_store_lists_and_removes_keys() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    store.set("loans", "[]").unwrap();
    store.set("records", "[]").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    assert_eq!(store.keys().unwrap(), vec!["loans", "records"]);
    store.remove("loans").unwrap();
    store.remove("loans").unwrap();
    assert_eq!(store.keys().unwrap(), vec!["records"]);
}

#[test]
fn keys_round_trip_exactly_as_written() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    for key in ["records", "User Settings", "../escape", "budget.2025"] {
        store.set(key, "[]").unwrap();
    }

    let mut keys = store.keys().unwrap();
    keys.sort();
    assert_eq!(
        keys,
        vec!["../escape", "User Settings", "budget.2025", "records"]
    );
    assert_eq!(store.get("User Settings").unwrap().as_deref(), Some("[]"));
    assert!(store.value_path("../escape").starts_with(dir.path()));
    assert!(store.set("", "[]").is_err());
}

#[test]
fn failed_write_keeps_previous_value() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    store.set("records", "[\"original\"]").unwrap();

    // A directory where the temp file should go makes File::create fail.
    let tmp = store.value_path("records").with_extension("json.tmp");
    fs::create_dir_all(&tmp).unwrap();

    assert!(store.set("records", "[\"replacement\"]").is_err());
    assert_eq!(
        store.get("records").unwrap().as_deref(),
        Some("[\"original\"]")
    );
}

#[test]
fn ledgers_persist_across_store_instances() {
    let dir = tempdir().expect("tempdir");
    let clock = Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()));

    {
        let store = Arc::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap());
        let persistence = Persistence::new(store);
        let mut budget = BudgetLedger::load(persistence.clone(), clock.clone());
        let mut loans = LoanLedger::load(persistence);
        budget
            .add(&mut BudgetDraft::new("42", "Groceries", RecordKind::Expense))
            .unwrap();
        let id = loans
            .add(&mut LoanDraft::new("Car", "120000", "10", "12"))
            .unwrap();
        loans.mark_paid(id);
    }

    let store = Arc::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap());
    let persistence = Persistence::new(store);
    let budget = BudgetLedger::load(persistence.clone(), clock);
    let loans = LoanLedger::load(persistence);

    assert_eq!(budget.len(), 1);
    assert_eq!(budget.records()[0].amount, 42.0);
    assert_eq!(
        budget.records()[0].date,
        NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()
    );
    assert_eq!(loans.len(), 1);
    assert_eq!(loans.loans()[0].paid_installments, 1);
    assert_eq!(loans.loans()[0].emi, 10_550.0);
}
