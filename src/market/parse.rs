//! Numeric field parsing shared by the marketplace adapters.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;

/// Plain (`1234.56`), comma-grouped (`1,234.56`) or bare-fraction (`.50`)
/// non-negative number.
static AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?|\.\d+)$").expect("valid regex")
});

/// Characters that belong to the amount itself and are never stripped.
fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+')
}

/// Parse a formatted currency string such as `"$1,234.56"` or `"1,234.56 USD"`.
///
/// The currency symbol or code around the amount and the thousands separators
/// are stripped. Signs and decimal points are part of the amount, so a
/// negative price such as `"-$5.25"` is rejected. Returns `None` for anything
/// that is not a single non-negative amount.
pub fn parse_formatted_price(raw: &str) -> Option<Decimal> {
    let amount = raw.trim_matches(|c: char| !is_amount_char(c));
    if !AMOUNT.is_match(amount) {
        return None;
    }
    let plain = amount.replace(',', "");
    if plain.starts_with('.') {
        Decimal::from_str(&format!("0{}", plain)).ok()
    } else {
        Decimal::from_str(&plain).ok()
    }
}

/// Parse a volume that may arrive as an integer or a formatted string (`"1,024"`).
pub fn parse_volume(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => {
            let s = s.trim();
            if !AMOUNT.is_match(s) || s.contains('.') {
                return None;
            }
            s.replace(',', "").parse().ok()
        }
        _ => None,
    }
}

/// Parse a plain decimal that may arrive as a JSON string or number.
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn formatted_price_strips_symbol_and_separators() {
        assert_eq!(parse_formatted_price("$1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_formatted_price("$0.03"), Some(dec!(0.03)));
        assert_eq!(parse_formatted_price("$12"), Some(dec!(12)));
        assert_eq!(parse_formatted_price("1,234,567.89 USD"), Some(dec!(1234567.89)));
        assert_eq!(parse_formatted_price(" $ 7.50 "), Some(dec!(7.50)));
    }

    #[test]
    fn formatted_price_rejects_garbage() {
        assert_eq!(parse_formatted_price(""), None);
        assert_eq!(parse_formatted_price("$"), None);
        assert_eq!(parse_formatted_price("N/A"), None);
        assert_eq!(parse_formatted_price("$1.2.3"), None);
        assert_eq!(parse_formatted_price("$12,34.00"), None);
        assert_eq!(parse_formatted_price("$1 234.00"), None);
    }

    #[test]
    fn formatted_price_keeps_leading_fraction_point() {
        assert_eq!(parse_formatted_price("$.50"), Some(dec!(0.50)));
        assert_eq!(parse_formatted_price(".05 USD"), Some(dec!(0.05)));
    }

    #[test]
    fn formatted_price_rejects_signed_amounts() {
        assert_eq!(parse_formatted_price("-$5.25"), None);
        assert_eq!(parse_formatted_price("$-5.25"), None);
        assert_eq!(parse_formatted_price("-5.25 USD"), None);
        assert_eq!(parse_formatted_price("+$5.25"), None);
        assert_eq!(parse_formatted_price("$5."), None);
    }

    #[test]
    fn formatted_price_matches_embedded_amount() {
        for (raw, expected) in [
            ("$0.00", dec!(0.00)),
            ("$5.25", dec!(5.25)),
            ("$.99", dec!(0.99)),
            ("$999,999.99", dec!(999999.99)),
            ("12.00 USD", dec!(12.00)),
        ] {
            assert_eq!(parse_formatted_price(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn volume_from_number_or_string() {
        assert_eq!(parse_volume(&json!(42)), Some(42));
        assert_eq!(parse_volume(&json!("1,024")), Some(1024));
        assert_eq!(parse_volume(&json!(" 7 ")), Some(7));
        assert_eq!(parse_volume(&json!("0")), Some(0));
    }

    #[test]
    fn volume_rejects_invalid_values() {
        assert_eq!(parse_volume(&json!(-1)), None);
        assert_eq!(parse_volume(&json!("1.5")), None);
        assert_eq!(parse_volume(&json!("many")), None);
        assert_eq!(parse_volume(&Value::Null), None);
    }

    #[test]
    fn decimal_from_string_or_number() {
        assert_eq!(parse_decimal(&json!("123.5")), Some(dec!(123.5)));
        assert_eq!(parse_decimal(&json!(88)), Some(dec!(88)));
        assert_eq!(parse_decimal(&json!(0.25)), Some(dec!(0.25)));
        assert_eq!(parse_decimal(&json!("abc")), None);
        assert_eq!(parse_decimal(&json!(true)), None);
    }
}
