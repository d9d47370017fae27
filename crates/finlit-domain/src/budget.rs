//! Domain model for budget tracker entries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
/// Direction of money for a budget entry.
pub enum RecordKind {
    Income,
    #[default]
    Expense,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Income, RecordKind::Expense];

    /// Parses user input such as `income`, `Expense`, `in`, `out`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" | "+" => Some(RecordKind::Income),
            "expense" | "out" | "-" => Some(RecordKind::Expense),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Income => "Income",
            RecordKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetRecord {
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    pub kind: RecordKind,
    pub date: NaiveDate,
}

impl BudgetRecord {
    pub fn new(amount: f64, category: impl Into<String>, kind: RecordKind, date: NaiveDate) -> Self {
        Self {
            id: new_record_id(),
            amount,
            category: category.into(),
            kind,
            date,
        }
    }

    /// Amount with the sign applied: income positive, expense negative.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            RecordKind::Income => self.amount,
            RecordKind::Expense => -self.amount,
        }
    }
}

impl Identifiable for BudgetRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for BudgetRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for BudgetRecord {
    fn display_label(&self) -> String {
        format!("{} {} [{}]", self.kind, self.category, self.date)
    }
}

impl SchemaCheck for BudgetRecord {
    fn check(&self) -> Result<(), String> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(format!("amount must be positive, got {}", self.amount));
        }
        if self.category.trim().is_empty() {
            return Err("category is empty".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn kind_parse_accepts_aliases() {
        assert_eq!(RecordKind::parse(" Income "), Some(RecordKind::Income));
        assert_eq!(RecordKind::parse("out"), Some(RecordKind::Expense));
        assert_eq!(RecordKind::parse("savings"), None);
    }

    #[test]
    fn signed_amount_negates_expenses() {
        let income = BudgetRecord::new(100.0, "Salary", RecordKind::Income, date());
        let expense = BudgetRecord::new(40.0, "Food", RecordKind::Expense, date());
        assert_eq!(income.signed_amount(), 100.0);
        assert_eq!(expense.signed_amount(), -40.0);
    }

    #[test]
    fn schema_check_rejects_bad_records() {
        let mut record = BudgetRecord::new(10.0, "Food", RecordKind::Expense, date());
        assert!(record.check().is_ok());

        record.amount = 0.0;
        assert!(record.check().is_err());

        record.amount = 10.0;
        record.category = "   ".into();
        assert!(record.check().is_err());
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let record = BudgetRecord::new(12.5, "Coffee", RecordKind::Expense, date());
        let json = serde_json::to_value(&record).expect("serialize record");
        assert_eq!(json["kind"], "Expense");
        assert_eq!(json["date"], "2025-03-14");
        assert_eq!(json["category"], "Coffee");
    }
}
