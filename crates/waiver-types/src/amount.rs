//! Payment amount parsing and currency formatting
//!
//! Users type amounts freely ("$12,500", "12500.5", "12 500"); everything
//! except digits, decimal points and minus signs is stripped before parsing.
//! A minus anywhere but the front then fails to parse, and a leading one
//! yields a negative value, which is rejected.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::ValidationError;

lazy_static! {
    static ref NON_NUMERIC: Regex = Regex::new(r"[^\d.\-]").unwrap();
}

/// Parse a user-entered amount into a positive value rounded to cents
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let cleaned = NON_NUMERIC.replace_all(raw, "");
    if cleaned.is_empty() {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }

    let value = Decimal::from_str(&cleaned)
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;

    if value <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }

    Ok(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Format as US currency, e.g. `$12,500.00`
pub fn format_currency(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_amount_strips_symbols() {
        assert_eq!(parse_amount("$12,500").unwrap(), Decimal::new(1250000, 2));
        assert_eq!(parse_amount(" 99.999 ").unwrap(), Decimal::new(10000, 2));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("twelve").is_err());
        assert!(parse_amount("1.2.3").is_err());
        assert!(parse_amount("12-500").is_err());
        assert!(parse_amount("555-1234").is_err());
    }

    #[test]
    fn test_parse_amount_rejects_non_positive() {
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-50").is_err());
        assert!(parse_amount("$-50").is_err());
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(Decimal::new(123456789, 2)), "$1,234,567.89");
        assert_eq!(format_currency(Decimal::new(5, 0)), "$5.00");
        assert_eq!(format_currency(Decimal::new(100000, 0)), "$100,000.00");
    }

    proptest! {
        #[test]
        fn formatted_amounts_reparse_to_same_value(cents in 1i64..10_000_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let formatted = format_currency(amount);
            prop_assert!(formatted.starts_with('$'));
            prop_assert_eq!(parse_amount(&formatted).unwrap(), amount);
        }
    }
}
