//! Coercion of submitted price and stock values.
//!
//! Form fields arrive as text. Prices become `f64` and stock counts become
//! `i64`; anything that does not parse is a [`QuantityError`]. Sign is not
//! checked here.

use thiserror::Error;

/// A price or stock value that could not be coerced to a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// The price is not a finite decimal number.
    #[error("{field} must be a number (got {value:?})")]
    NotANumber { field: &'static str, value: String },

    /// The stock count is not an integer.
    #[error("{field} must be a whole number (got {value:?})")]
    NotAnInteger { field: &'static str, value: String },
}

/// Parse a price such as `"12.5"`.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected.
///
/// # Errors
///
/// Returns `QuantityError::NotANumber` if the value is not a finite number.
pub fn parse_price(field: &'static str, raw: &str) -> Result<f64, QuantityError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(QuantityError::NotANumber {
            field,
            value: raw.to_owned(),
        }),
    }
}

/// Parse a stock count such as `"12"`.
///
/// # Errors
///
/// Returns `QuantityError::NotAnInteger` if the value is not an integer.
pub fn parse_stock(field: &'static str, raw: &str) -> Result<i64, QuantityError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| QuantityError::NotAnInteger {
            field,
            value: raw.to_owned(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_accepts_decimals_and_whitespace() {
        assert!((parse_price("sell_price", "12.5").unwrap() - 12.5).abs() < f64::EPSILON);
        assert!((parse_price("sell_price", " 3 ").unwrap() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_price_rejects_text_and_non_finite() {
        assert!(matches!(
            parse_price("buy_price", "ten"),
            Err(QuantityError::NotANumber { field: "buy_price", .. })
        ));
        assert!(parse_price("buy_price", "").is_err());
        assert!(parse_price("buy_price", "NaN").is_err());
        assert!(parse_price("buy_price", "inf").is_err());
    }

    #[test]
    fn test_parse_stock() {
        assert_eq!(parse_stock("nr_in_stock", "7").unwrap(), 7);
        assert_eq!(parse_stock("nr_in_stock", " 0 ").unwrap(), 0);
        assert!(matches!(
            parse_stock("nr_in_stock", "2.5"),
            Err(QuantityError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn test_error_message_names_field() {
        let err = parse_stock("nr_in_stock", "lots").unwrap_err();
        assert_eq!(
            err.to_string(),
            "nr_in_stock must be a whole number (got \"lots\")"
        );
    }
}
