//! Monetary amounts extracted from model output
//!
//! Amounts are carried as `rust_decimal::Decimal` so comparisons such as
//! "approved amount must not exceed the claimed amount" are exact. The
//! completion service is free-form, so amounts arrive as JSON numbers or as
//! strings like `"$5,000.00"`; both are accepted here.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Currency markers stripped before a string amount is parsed
const CURRENCY_MARKERS: &[&str] = &["USD", "EUR", "GBP", "INR", "$", "€", "£", "₹", "Rs."];

/// Parses a monetary amount from a JSON value
///
/// Returns `None` for `null`, non-numeric strings, non-finite numbers and
/// every other JSON type. The sign is preserved; use [`positive_amount`] to
/// enforce the claim-amount invariant.
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                Some(Decimal::from(integer))
            } else {
                number
                    .as_f64()
                    .filter(|float| float.is_finite())
                    .and_then(|float| Decimal::try_from(float).ok())
            }
        }
        Value::String(text) => parse_amount_str(text),
        _ => None,
    }
    .map(|amount| amount.normalize())
}

fn parse_amount_str(text: &str) -> Option<Decimal> {
    let mut cleaned = text.trim().to_string();
    for marker in CURRENCY_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    let cleaned: String = cleaned
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Keeps an amount only if it is strictly positive
pub fn positive_amount(amount: Option<Decimal>) -> Option<Decimal> {
    amount.filter(|value| value.is_sign_positive() && !value.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_integer_and_float() {
        assert_eq!(parse_amount(&json!(5000)), Some(dec!(5000)));
        assert_eq!(parse_amount(&json!(1250.5)), Some(dec!(1250.5)));
    }

    #[test]
    fn test_parse_formatted_string() {
        assert_eq!(parse_amount(&json!("$5,000")), Some(dec!(5000)));
        assert_eq!(parse_amount(&json!(" 12 500.75 USD ")), Some(dec!(12500.75)));
        assert_eq!(parse_amount(&json!("£300")), Some(dec!(300)));
    }

    #[test]
    fn test_parse_rejects_non_amounts() {
        assert_eq!(parse_amount(&Value::Null), None);
        assert_eq!(parse_amount(&json!("unknown")), None);
        assert_eq!(parse_amount(&json!("")), None);
        assert_eq!(parse_amount(&json!(true)), None);
        assert_eq!(parse_amount(&json!([100])), None);
    }

    #[test]
    fn test_positive_amount() {
        assert_eq!(positive_amount(Some(dec!(10))), Some(dec!(10)));
        assert_eq!(positive_amount(Some(dec!(0))), None);
        assert_eq!(positive_amount(Some(dec!(-5))), None);
        assert_eq!(positive_amount(None), None);
    }
}
