//! Domain model for tracked loans and their installment progress.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Longest accepted loan term: fifty years.
pub const MAX_TERM_MONTHS: u32 = 600;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub id: Uuid,
    pub name: String,
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
    /// Fixed monthly installment, set once when the loan is created.
    pub emi: f64,
    #[serde(default)]
    pub paid_installments: u32,
}

impl LoanRecord {
    pub fn new(
        name: impl Into<String>,
        principal: f64,
        annual_rate_percent: f64,
        term_months: u32,
        emi: f64,
    ) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            principal,
            annual_rate_percent,
            term_months,
            emi,
            paid_installments: 0,
        }
    }

    /// Records one more paid installment. Returns `false` once the loan is
    /// already fully paid, leaving the record untouched.
    pub fn mark_paid(&mut self) -> bool {
        if self.paid_installments >= self.term_months {
            return false;
        }
        self.paid_installments += 1;
        true
    }

    pub fn is_paid_off(&self) -> bool {
        self.paid_installments >= self.term_months
    }

    pub fn remaining_installments(&self) -> u32 {
        self.term_months.saturating_sub(self.paid_installments)
    }

    /// Sum of the installments still due.
    pub fn outstanding(&self) -> f64 {
        self.emi * self.remaining_installments() as f64
    }

    /// Every installment over the full term.
    pub fn total_payable(&self) -> f64 {
        self.emi * self.term_months as f64
    }

    pub fn progress_percent(&self) -> f64 {
        if self.term_months == 0 {
            return 0.0;
        }
        self.paid_installments as f64 / self.term_months as f64 * 100.0
    }
}

impl Identifiable for LoanRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for LoanRecord {
    fn amount(&self) -> f64 {
        self.principal
    }
}

impl Displayable for LoanRecord {
    fn display_label(&self) -> String {
        format!(
            "{} [{}/{} paid]",
            self.name, self.paid_installments, self.term_months
        )
    }
}

impl SchemaCheck for LoanRecord {
    fn check(&self) -> Result<(), String> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(format!("principal must be positive, got {}", self.principal));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(format!(
                "rate must be non-negative, got {}",
                self.annual_rate_percent
            ));
        }
        if self.term_months == 0 || self.term_months > MAX_TERM_MONTHS {
            return Err(format!(
                "term must be between 1 and {MAX_TERM_MONTHS} months, got {}",
                self.term_months
            ));
        }
        if self.paid_installments > self.term_months {
            return Err(format!(
                "{} installments paid on a {}-month term",
                self.paid_installments, self.term_months
            ));
        }
        if !self.emi.is_finite() || self.emi <= 0.0 {
            return Err(format!("installment is invalid: {}", self.emi));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(term: u32) -> LoanRecord {
        LoanRecord::new("Car", 120_000.0, 10.0, term, 10_550.0)
    }

    #[test]
    fn progress_is_paid_over_term() {
        let mut record = loan(12);
        record.paid_installments = 3;
        assert_eq!(record.progress_percent(), 25.0);
        assert_eq!(record.remaining_installments(), 9);
        assert_eq!(record.outstanding(), 9.0 * 10_550.0);
    }

    #[test]
    fn mark_paid_saturates_at_term() {
        let mut record = loan(2);
        assert!(record.mark_paid());
        assert!(record.mark_paid());
        assert!(record.is_paid_off());

        let snapshot = record.clone();
        assert!(!record.mark_paid());
        assert!(!record.mark_paid());
        assert_eq!(record, snapshot);
    }

    #[test]
    fn schema_check_rejects_overpaid_loans() {
        let mut record = loan(6);
        record.paid_installments = 7;
        assert!(record.check().is_err());
    }

    #[test]
    fn schema_check_bounds_term_and_installment() {
        assert!(loan(MAX_TERM_MONTHS).check().is_ok());
        assert!(loan(MAX_TERM_MONTHS + 1).check().is_err());
        assert!(loan(0).check().is_err());

        let mut record = loan(12);
        record.emi = f64::NAN;
        assert!(record.check().is_err());
        record.emi = 0.0;
        assert!(record.check().is_err());
    }

    #[test]
    fn total_payable_covers_full_term() {
        let mut record = loan(12);
        record.paid_installments = 5;
        assert_eq!(record.total_payable(), 126_600.0);
        assert_eq!(record.outstanding(), 7.0 * 10_550.0);
    }

    #[test]
    fn serializes_camel_case_fields() {
        let record = loan(12);
        let json = serde_json::to_value(&record).expect("serialize loan");
        assert_eq!(json["termMonths"], 12);
        assert_eq!(json["annualRatePercent"], 10.0);
        assert_eq!(json["paidInstallments"], 0);
    }
}
