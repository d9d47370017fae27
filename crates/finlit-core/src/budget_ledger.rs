//! Income/expense ledger backing the budget tracker.

use std::sync::Arc;

use finlit_domain::{Amounted, BudgetRecord, Displayable, RecordKind};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{calculators::parse_number, time::Clock, CoreError, Persistence};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill all fields!";

/// Answer to a two-choice destructive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteChoice {
    Cancel,
    Delete,
}

/// Asks the user to confirm a destructive action.
pub trait DeletePrompt {
    fn ask(&self, title: &str, message: &str) -> DeleteChoice;
}

impl<F> DeletePrompt for F
where
    F: Fn(&str, &str) -> DeleteChoice,
{
    fn ask(&self, title: &str, message: &str) -> DeleteChoice {
        self(title, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    Cancelled,
    NotFound,
}

/// Text inputs of the add-entry form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetDraft {
    pub amount: String,
    pub category: String,
    pub kind: RecordKind,
}

impl BudgetDraft {
    pub fn new(amount: impl Into<String>, category: impl Into<String>, kind: RecordKind) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            kind,
        }
    }

    /// Empties the text fields; the selected kind is kept.
    pub fn clear(&mut self) {
        self.amount.clear();
        self.category.clear();
    }
}

/// One slice of the income/expense chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSlice {
    pub kind: RecordKind,
    pub label: &'static str,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAggregates {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub breakdown: Vec<BreakdownSlice>,
}

/// Newest-first list of budget entries, persisted under [`BudgetLedger::STORE_KEY`].
pub struct BudgetLedger {
    records: Vec<BudgetRecord>,
    persistence: Persistence,
    clock: Arc<dyn Clock>,
}

impl BudgetLedger {
    pub const STORE_KEY: &'static str = "records";
    pub const DELETE_TITLE: &'static str = "Delete Record";
    pub const DELETE_MESSAGE: &'static str = "Are you sure you want to delete this entry?";

    /// Loads the persisted entries. Storage problems leave the ledger empty.
    pub fn load(persistence: Persistence, clock: Arc<dyn Clock>) -> Self {
        let records = persistence.load_list::<BudgetRecord>(Self::STORE_KEY);
        info!(count = records.len(), "budget ledger loaded");
        Self {
            records,
            persistence,
            clock,
        }
    }

    pub fn records(&self) -> &[BudgetRecord] {
        &self.records
    }

    pub fn get(&self, id: Uuid) -> Option<&BudgetRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validates the draft, prepends a new entry, persists, and clears the draft.
    pub fn add(&mut self, draft: &mut BudgetDraft) -> Result<Uuid, CoreError> {
        let category = draft.category.trim();
        if draft.amount.trim().is_empty() || category.is_empty() {
            return Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.into()));
        }
        let amount = parse_number("amount", &draft.amount)?;
        if amount <= 0.0 {
            return Err(CoreError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }

        let record = BudgetRecord::new(amount, category, draft.kind, self.clock.today());
        let id = record.id;
        self.records.insert(0, record);
        self.persist();
        draft.clear();
        Ok(id)
    }

    /// Removes the entry after the prompt confirms. Unknown ids never prompt.
    pub fn delete(&mut self, id: Uuid, prompt: &dyn DeletePrompt) -> DeleteOutcome {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return DeleteOutcome::NotFound;
        };
        match prompt.ask(Self::DELETE_TITLE, Self::DELETE_MESSAGE) {
            DeleteChoice::Cancel => DeleteOutcome::Cancelled,
            DeleteChoice::Delete => {
                let removed = self.records.remove(index);
                info!(entry = %removed.display_label(), "budget entry deleted");
                self.persist();
                DeleteOutcome::Removed
            }
        }
    }

    pub fn aggregates(&self) -> BudgetAggregates {
        let total_income = self.total_for(RecordKind::Income);
        let total_expense = self.total_for(RecordKind::Expense);
        let breakdown = RecordKind::ALL
            .iter()
            .map(|&kind| BreakdownSlice {
                kind,
                label: kind.label(),
                amount: match kind {
                    RecordKind::Income => total_income,
                    RecordKind::Expense => total_expense,
                },
            })
            .filter(|slice| slice.amount > 0.0)
            .collect();
        BudgetAggregates {
            total_income,
            total_expense,
            balance: total_income - total_expense,
            breakdown,
        }
    }

    /// Per-category totals for one kind, largest first.
    pub fn category_totals(&self, kind: RecordKind) -> Vec<(String, f64)> {
        let mut totals: Vec<(String, f64)> = Vec::new();
        for record in self.records.iter().filter(|record| record.kind == kind) {
            match totals
                .iter_mut()
                .find(|(name, _)| name.eq_ignore_ascii_case(&record.category))
            {
                Some((_, total)) => *total += record.amount,
                None => totals.push((record.category.clone(), record.amount)),
            }
        }
        totals.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        totals
    }

    fn total_for(&self, kind: RecordKind) -> f64 {
        self.records
            .iter()
            .filter(|record| record.kind == kind)
            .map(Amounted::amount)
            .sum()
    }

    fn persist(&self) {
        self.persistence.save_list(Self::STORE_KEY, &self.records);
    }
}
