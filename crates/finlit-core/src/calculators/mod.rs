//! Closed-form financial calculators. All functions here are pure.

pub mod compound;
pub mod credit_score;
pub mod emi;

pub use compound::*;
pub use credit_score::*;
pub use emi::*;

use crate::CoreError;

/// Parses a numeric text field, naming the field in the error.
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoreError::parse(field, trimmed)),
    }
}

/// Parses a whole-number text field such as a month count.
pub fn parse_count(field: &'static str, raw: &str) -> Result<u32, CoreError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| CoreError::parse(field, trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_trims_and_rejects_garbage() {
        assert_eq!(parse_number("amount", " 12.5 ").unwrap(), 12.5);
        let err = parse_number("amount", "12,5x").unwrap_err();
        assert_eq!(err.to_string(), "`12,5x` is not a valid number for amount");
        assert!(parse_number("amount", "NaN").is_err());
    }

    #[test]
    fn parse_count_rejects_fractions() {
        assert_eq!(parse_count("months", "12").unwrap(), 12);
        assert!(parse_count("months", "12.5").is_err());
        assert!(parse_count("months", "-3").is_err());
    }
}
