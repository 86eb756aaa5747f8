//! Currency amount parsing for report rows.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a currency-formatted amount ("$1,234.56"). Dollar signs, commas
/// and whitespace are stripped; anything that still fails to parse as a
/// decimal coerces to 0.
pub fn parse_amount(s: &str) -> Decimal {
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();

    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56"), Decimal::from_str("1234.56").unwrap());
        assert_eq!(parse_amount("1,000,000"), Decimal::from_str("1000000").unwrap());
        assert_eq!(parse_amount("$ 500"), Decimal::from_str("500").unwrap());
        assert_eq!(parse_amount("2500.5"), Decimal::from_str("2500.5").unwrap());
    }

    #[test]
    fn test_parse_amount_coerces_to_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("$"), Decimal::ZERO);
    }
}
