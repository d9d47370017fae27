//! Compound-interest future value.

use serde::Serialize;

use super::parse_number;
use crate::CoreError;

/// Compounding periods per year used when the caller does not pick one.
pub const DEFAULT_COMPOUNDING_FREQUENCY: u32 = 12;

pub const COMPOUNDING_TIPS: [&str; 3] = [
    "Start investing early to maximize compounding.",
    "Increase principal gradually for higher returns.",
    "Reinvest dividends and interest for exponential growth.",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundInputs {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
    pub periods_per_year: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompoundResult {
    pub future_value: f64,
    pub total_interest: f64,
}

impl CompoundInputs {
    pub fn new(principal: f64, annual_rate_percent: f64, years: f64, periods_per_year: f64) -> Self {
        Self {
            principal,
            annual_rate_percent,
            years,
            periods_per_year,
        }
    }

    /// Builds inputs from the four text fields of the calculator form.
    ///
    /// Every field must parse; the first one that does not is reported.
    pub fn parse(
        principal: &str,
        annual_rate_percent: &str,
        years: &str,
        periods_per_year: &str,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            principal: parse_number("principal", principal)?,
            annual_rate_percent: parse_number("interest rate", annual_rate_percent)?,
            years: parse_number("years", years)?,
            periods_per_year: parse_number("compounding frequency", periods_per_year)?,
        })
    }

    /// `A = P·(1 + r/(100n))^(n·t)`.
    pub fn compute(&self) -> Result<CompoundResult, CoreError> {
        if self.periods_per_year <= 0.0 {
            return Err(CoreError::Validation(
                "Compounding frequency must be greater than zero".into(),
            ));
        }
        let n = self.periods_per_year;
        let future_value = self.principal
            * (1.0 + self.annual_rate_percent / (100.0 * n)).powf(n * self.years);
        Ok(CompoundResult {
            future_value,
            total_interest: future_value - self.principal,
        })
    }
}

/// Convenience wrapper over [`CompoundInputs::compute`].
pub fn compound_interest(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    periods_per_year: f64,
) -> Result<CompoundResult, CoreError> {
    CompoundInputs::new(principal, annual_rate_percent, years, periods_per_year).compute()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interest(p: f64, r: f64, t: f64, n: f64) -> f64 {
        compound_interest(p, r, t, n).unwrap().total_interest
    }

    #[test]
    fn monthly_compounding_over_ten_years() {
        let result = compound_interest(1_000.0, 5.0, 10.0, 12.0).unwrap();
        assert!((result.future_value - 1_647.009_497_690_28).abs() < 1e-6);
        assert!((result.total_interest - 647.009_497_690_28).abs() < 1e-6);
    }

    #[test]
    fn interest_increases_with_every_input() {
        let base = interest(1_000.0, 5.0, 10.0, 4.0);
        assert!(interest(2_000.0, 5.0, 10.0, 4.0) > base);
        assert!(interest(1_000.0, 6.0, 10.0, 4.0) > base);
        assert!(interest(1_000.0, 5.0, 11.0, 4.0) > base);
        assert!(interest(1_000.0, 5.0, 10.0, 12.0) > base);
    }

    #[test]
    fn parse_reports_the_offending_field() {
        let err = CompoundInputs::parse("1000", "five", "10", "12").unwrap_err();
        match err {
            CoreError::Parse { field, value } => {
                assert_eq!(field, "interest rate");
                assert_eq!(value, "five");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_frequency_is_rejected() {
        let inputs = CompoundInputs::parse("1000", "5", "10", "0").unwrap();
        assert!(matches!(inputs.compute(), Err(CoreError::Validation(_))));
    }
}
