//! Fund name and reporting period detection from report text.

use regex::Captures;
use tracing::debug;

use super::dates::month_number;
use super::patterns::{
    FUND_KEYWORD, FUND_NAME_PATTERNS, PERIOD_TEMPLATES, PeriodShape, REPORT_BOILERPLATE,
    WHITESPACE_RUN,
};
use crate::models::report::{DetectedMetadata, ReportingPeriod};

/// Recover the fund name from report text. Labeled/header patterns are
/// tried in order; a match wins when its normalized length is strictly
/// between 5 and 100 characters. Failing that, the first 50 lines are
/// scanned for a fund-like line without report boilerplate.
pub fn extract_fund_name(text: &str) -> Option<String> {
    for pattern in FUND_NAME_PATTERNS.iter() {
        let Some(m) = pattern.captures(text).and_then(|caps| caps.get(1)) else {
            continue;
        };

        let name = WHITESPACE_RUN.replace_all(m.as_str().trim(), " ").to_string();
        if name.len() > 5 && name.len() < 100 {
            return Some(name);
        }
    }

    for line in text.lines().take(50) {
        let trimmed = line.trim();
        if FUND_KEYWORD.is_match(trimmed)
            && trimmed.len() > 5
            && trimmed.len() < 100
            && !REPORT_BOILERPLATE.is_match(trimmed)
        {
            return Some(trimmed.to_string());
        }
    }

    None
}

/// Recover the reporting period (year + quarter) from report text.
/// Templates are tried in order; the first whose captures resolve to a
/// valid quarter wins.
pub fn extract_period(text: &str) -> Option<ReportingPeriod> {
    for template in PERIOD_TEMPLATES.iter() {
        let Some(caps) = template.pattern.captures(text) else {
            continue;
        };

        if let Some(period) = resolve_period(&caps, template.shape) {
            debug!("Detected reporting period Q{} {}", period.quarter, period.year);
            return Some(period);
        }
    }

    None
}

fn resolve_period(caps: &Captures<'_>, shape: PeriodShape) -> Option<ReportingPeriod> {
    match shape {
        PeriodShape::QuarterThenYear => {
            let quarter: u8 = caps.get(1)?.as_str().parse().ok()?;
            let year: i32 = caps.get(2)?.as_str().parse().ok()?;
            validated(year, quarter)
        }
        PeriodShape::YearThenQuarter => {
            let year: i32 = caps.get(1)?.as_str().parse().ok()?;
            let quarter: u8 = caps.get(2)?.as_str().parse().ok()?;
            validated(year, quarter)
        }
        PeriodShape::MonthDayYear => {
            let month: u32 = caps.get(1)?.as_str().parse().ok()?;
            let year: i32 = caps.get(3)?.as_str().parse().ok()?;
            if !(1..=12).contains(&month) {
                return None;
            }
            validated(year, quarter_of_month(month))
        }
        PeriodShape::MonthNameDayYear => {
            let month = month_number(caps.get(1)?.as_str())?;
            let year: i32 = caps.get(3)?.as_str().parse().ok()?;
            validated(year, quarter_of_month(month))
        }
        PeriodShape::QuarterEnd(quarter) => {
            let year: i32 = caps.get(1)?.as_str().parse().ok()?;
            validated(year, quarter)
        }
    }
}

fn quarter_of_month(month: u32) -> u8 {
    month.div_ceil(3) as u8
}

fn validated(year: i32, quarter: u8) -> Option<ReportingPeriod> {
    (1..=4)
        .contains(&quarter)
        .then_some(ReportingPeriod { year, quarter })
}

/// Detect fund name and reporting period together. Any field may come
/// back empty; the result is advisory.
pub fn detect_metadata(text: &str) -> DetectedMetadata {
    let fund_name = extract_fund_name(text);
    let period = extract_period(text);

    DetectedMetadata {
        fund_name,
        year: period.map(|p| p.year),
        quarter: period.map(|p| p.quarter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fund_name_label() {
        assert_eq!(
            extract_fund_name("Fund Name: Innovation Capital LP\n"),
            Some("Innovation Capital LP".to_string())
        );
    }

    #[test]
    fn test_fund_name_from_report_header() {
        let text = "Quarterly Report – Tech Ventures Fund I\nQ2 2023";
        assert_eq!(extract_fund_name(text), Some("Tech Ventures Fund I".to_string()));
    }

    #[test]
    fn test_fund_name_standalone_line() {
        let text = "Growth Equity Partners\nPage 1";
        assert_eq!(extract_fund_name(text), Some("Growth Equity Partners".to_string()));
    }

    #[test]
    fn test_fund_name_line_scan_skips_boilerplate() {
        let text = "Report date for the fund period\nSummit Ventures holdings overview\n";
        // First line has fund-ish words but also boilerplate; second wins
        assert_eq!(
            extract_fund_name(text),
            Some("Summit Ventures holdings overview".to_string())
        );
    }

    #[test]
    fn test_fund_name_absent() {
        assert_eq!(extract_fund_name("Nothing relevant here\n123 456"), None);
    }

    #[test]
    fn test_period_quarter_then_year() {
        let period = extract_period("Quarter 3, 2024").unwrap();
        assert_eq!((period.year, period.quarter), (2024, 3));

        let period = extract_period("Q2 2023").unwrap();
        assert_eq!((period.year, period.quarter), (2023, 2));
    }

    #[test]
    fn test_period_year_then_quarter() {
        let period = extract_period("2024 Q1").unwrap();
        assert_eq!((period.year, period.quarter), (2024, 1));
    }

    #[test]
    fn test_period_from_quarter_ended_date() {
        let period = extract_period("Quarter Ended: 06/30/2023").unwrap();
        assert_eq!((period.year, period.quarter), (2023, 2));

        let period = extract_period("As of 11/15/2022").unwrap();
        assert_eq!((period.year, period.quarter), (2022, 4));
    }

    #[test]
    fn test_period_from_month_name() {
        let period = extract_period("For the Quarter Ended September 30, 2023").unwrap();
        assert_eq!((period.year, period.quarter), (2023, 3));
    }

    #[test]
    fn test_period_from_quarter_end_literal() {
        let period = extract_period("Statement of assets as at March 31, 2024").unwrap();
        assert_eq!((period.year, period.quarter), (2024, 1));
    }

    #[test]
    fn test_period_rejects_bad_quarter() {
        assert_eq!(extract_period("Q7 2023"), None);
    }

    #[test]
    fn test_period_absent() {
        assert_eq!(extract_period("no period markers here"), None);
    }

    #[test]
    fn test_detect_metadata_complete() {
        let metadata = detect_metadata("Quarterly Report – Tech Ventures Fund I\nQ2 2023");
        assert_eq!(metadata.fund_name.as_deref(), Some("Tech Ventures Fund I"));
        assert_eq!(metadata.year, Some(2023));
        assert_eq!(metadata.quarter, Some(2));
        assert!(metadata.detected());
    }

    #[test]
    fn test_detect_metadata_empty() {
        let metadata = detect_metadata("plain text");
        assert_eq!(metadata, DetectedMetadata::default());
    }
}
