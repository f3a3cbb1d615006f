//! Monetary amount normalization

use regex::Regex;
use std::sync::OnceLock;

use crate::audit::record::NO_AMOUNT;

fn currency_noise() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| Regex::new(r"[$€£¥,]").expect("static currency pattern"))
}

fn leading_number() -> &'static Regex {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    NUMBER.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("static number pattern")
    })
}

/// Parse a display amount such as `$1,250,000` into a number.
///
/// Currency symbols and thousands separators are dropped, then the longest
/// leading number is taken, so `$150,000 USD` is 150000. Returns `None` for
/// the `-` sentinel and for anything without a finite leading number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NO_AMOUNT {
        return None;
    }

    let cleaned = currency_noise().replace_all(trimmed, "");
    let number = leading_number().find(cleaned.trim_start())?;
    number
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formatted_amounts() {
        assert_eq!(parse_amount("$150,000"), Some(150_000.0));
        assert_eq!(parse_amount("$2,000,000"), Some(2_000_000.0));
        assert_eq!(parse_amount("€1,234.50"), Some(1_234.5));
        assert_eq!(parse_amount(" 42 "), Some(42.0));
        assert_eq!(parse_amount("1.5e6"), Some(1_500_000.0));
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(parse_amount("$150,000 USD"), Some(150_000.0));
        assert_eq!(parse_amount("12abc"), Some(12.0));
        assert_eq!(parse_amount("7e"), Some(7.0));
    }

    #[test]
    fn test_sentinel_and_garbage() {
        assert_eq!(parse_amount("-"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount("USD 150"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
    }
}
