//! Equal monthly installment (EMI) maths.

pub use finlit_domain::MAX_TERM_MONTHS;
use serde::Serialize;

use crate::CoreError;

/// Converts an annual percentage rate into the monthly fractional rate.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 1200.0
}

/// Computes the fixed monthly installment that repays `principal` over
/// `term_months` at `annual_rate_percent`, rounded to whole currency units.
///
/// A zero rate degenerates to an even split of the principal.
pub fn compute_emi(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<f64, CoreError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(CoreError::Validation(
            "Loan amount must be greater than zero".into(),
        ));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(CoreError::Validation(
            "Interest rate cannot be negative".into(),
        ));
    }
    if term_months == 0 {
        return Err(CoreError::Validation(
            "Duration must be at least one month".into(),
        ));
    }
    if term_months > MAX_TERM_MONTHS {
        return Err(CoreError::Validation(format!(
            "Duration cannot exceed {MAX_TERM_MONTHS} months"
        )));
    }

    let rate = monthly_rate(annual_rate_percent);
    let emi = if rate == 0.0 {
        (principal / f64::from(term_months)).round()
    } else {
        let exponent = i32::try_from(term_months)
            .map_err(|_| CoreError::Validation("Duration is out of range".into()))?;
        let growth = (1.0 + rate).powi(exponent);
        (principal * rate * growth / (growth - 1.0)).round()
    };
    if !emi.is_finite() || emi <= 0.0 {
        return Err(CoreError::Validation(
            "These loan terms do not give a payable installment".into(),
        ));
    }
    Ok(emi)
}

/// One month of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: f64,
    pub interest: f64,
    pub principal_part: f64,
    pub closing_balance: f64,
}

/// Expands a loan into its month-by-month schedule for a given installment.
///
/// The closing balance of the last row is the rounding residue left by the
/// whole-unit installment; it is not forced to zero.
pub fn amortization_schedule(
    principal: f64,
    annual_rate_percent: f64,
    installment: f64,
    term_months: u32,
) -> Vec<AmortizationRow> {
    let rate = monthly_rate(annual_rate_percent);
    let mut balance = principal;
    let mut rows = Vec::new();
    for month in 1..=term_months {
        let interest = balance * rate;
        let principal_part = installment - interest;
        let closing = balance - principal_part;
        rows.push(AmortizationRow {
            month,
            opening_balance: balance,
            interest,
            principal_part,
            closing_balance: closing,
        });
        balance = closing;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_loan_installment() {
        // 120,000 at 10% over a year: 10,549.91 before rounding.
        assert_eq!(compute_emi(120_000.0, 10.0, 12).unwrap(), 10_550.0);
        assert_eq!(compute_emi(100_000.0, 9.0, 36).unwrap(), 3_180.0);
    }

    #[test]
    fn installment_amortizes_principal_within_rounding() {
        for &(principal, rate, term) in &[
            (120_000.0, 10.0, 12u32),
            (5_000.0, 4.5, 24),
            (250_000.0, 7.25, 240),
            (900.0, 19.99, 6),
        ] {
            let emi = compute_emi(principal, rate, term).unwrap();
            let schedule = amortization_schedule(principal, rate, emi, term);
            let residue = schedule.last().unwrap().closing_balance;
            // Rounding moves each installment by at most 0.5; compounded over the
            // term that bounds the residue by 0.5 * term * (1 + r)^term.
            let bound = 0.5 * term as f64 * (1.0 + monthly_rate(rate)).powi(term as i32);
            assert!(
                residue.abs() <= bound,
                "residue {residue} exceeds {bound} for {principal}/{rate}/{term}"
            );
        }
    }

    #[test]
    fn zero_rate_splits_principal_evenly() {
        assert_eq!(compute_emi(1_200.0, 0.0, 12).unwrap(), 100.0);
        assert_eq!(compute_emi(1_000.0, 0.0, 3).unwrap(), 333.0);
    }

    #[test]
    fn rejects_out_of_range_inputs() {
        assert!(compute_emi(0.0, 5.0, 12).is_err());
        assert!(compute_emi(1_000.0, -1.0, 12).is_err());
        assert!(compute_emi(1_000.0, 5.0, 0).is_err());
    }

    #[test]
    fn rejects_terms_beyond_the_maximum() {
        let longest = compute_emi(10_000.0, 5.0, MAX_TERM_MONTHS).unwrap();
        assert!(longest > 0.0);
        for term in [MAX_TERM_MONTHS + 1, 2_000_000_000, 3_000_000_000] {
            assert!(
                matches!(compute_emi(1_000.0, 5.0, term), Err(CoreError::Validation(_))),
                "term {term} accepted"
            );
        }
    }

    #[test]
    fn rejects_installments_that_are_not_finite() {
        assert!(matches!(
            compute_emi(1_000.0, 1e308, 12),
            Err(CoreError::Validation(_))
        ));
        // Tiny principals round down to a zero installment.
        assert!(matches!(
            compute_emi(0.001, 0.0, 600),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn schedule_interest_shrinks_each_month() {
        let schedule = amortization_schedule(120_000.0, 10.0, 10_550.0, 12);
        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].opening_balance, 120_000.0);
        assert!((schedule[0].interest - 1_000.0).abs() < 1e-9);
        assert!(schedule
            .windows(2)
            .all(|pair| pair[1].interest < pair[0].interest));
    }
}
