//! Flexible date parsing for report rows and period fallbacks.

use chrono::NaiveDate;

/// Supported date formats, in matching order. The two-digit-year variant
/// must come before the four-digit one (chrono's `%Y` accepts short years)
/// and the US slash formats take precedence over the day-first variant.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
];

/// Parse a loosely-formatted date string; the first format that parses
/// wins. Returns None when nothing matches.
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Fiscal quarter-end date: Q1 -> 03-31, Q2 -> 06-30, Q3 -> 09-30,
/// Q4 -> 12-31. None for a quarter outside 1-4.
pub fn quarter_end_date(year: i32, quarter: u8) -> Option<NaiveDate> {
    let (month, day) = match quarter {
        1 => (3, 31),
        2 => (6, 30),
        3 => (9, 30),
        4 => (12, 31),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Month name (full or common abbreviation) to its number.
pub(crate) fn month_number(name: &str) -> Option<u32> {
    let number = match name.to_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sep" | "sept" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_iso_format() {
        assert_eq!(parse_flexible_date("2024-03-05"), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_us_slash_formats() {
        assert_eq!(parse_flexible_date("01/15/2022"), Some(date(2022, 1, 15)));
        assert_eq!(parse_flexible_date("1/5/2022"), Some(date(2022, 1, 5)));
        assert_eq!(parse_flexible_date("03/05/24"), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_european_slash_format() {
        // Day-first only kicks in when the US interpretation is impossible
        assert_eq!(parse_flexible_date("25/12/2022"), Some(date(2022, 12, 25)));
    }

    #[test]
    fn test_month_name_formats() {
        assert_eq!(parse_flexible_date("March 5, 2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_flexible_date("March 5 2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_flexible_date("Mar 15, 2024"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_dash_format() {
        assert_eq!(parse_flexible_date("03-05-2024"), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_canonical_rendering() {
        let parsed = parse_flexible_date("March 5, 2024").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2024-03-05");
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("   "), None);
        assert_eq!(parse_flexible_date("not a date"), None);
        assert_eq!(parse_flexible_date("13/45/2022"), None);
    }

    #[test]
    fn test_quarter_end_dates() {
        assert_eq!(quarter_end_date(2024, 1), Some(date(2024, 3, 31)));
        assert_eq!(quarter_end_date(2024, 2), Some(date(2024, 6, 30)));
        assert_eq!(quarter_end_date(2024, 3), Some(date(2024, 9, 30)));
        assert_eq!(quarter_end_date(2024, 4), Some(date(2024, 12, 31)));
        assert_eq!(
            quarter_end_date(2024, 1).unwrap().to_string(),
            "2024-03-31"
        );
    }

    #[test]
    fn test_quarter_end_invalid_quarter() {
        assert_eq!(quarter_end_date(2024, 0), None);
        assert_eq!(quarter_end_date(2024, 5), None);
    }

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("March"), Some(3));
        assert_eq!(month_number("SEPTEMBER"), Some(9));
        assert_eq!(month_number("sept"), Some(9));
        assert_eq!(month_number("Smarch"), None);
    }
}
