//! Regex templates for fund report extraction.
//!
//! Row and period templates are tagged descriptors: each pattern carries a
//! shape tag that selects how its capture groups are interpreted, so the
//! matching code never inspects the pattern text itself.

use lazy_static::lazy_static;
use regex::Regex;

/// How a row template's capture groups map to investment fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// Groups: company, optional date, cost, value.
    CompanyDateCostValue,
    /// Groups: company, cost, value.
    CompanyCostValue,
}

/// An investment-row pattern paired with its capture-group shape.
pub struct RowTemplate {
    pub name: &'static str,
    pub pattern: Regex,
    pub shape: RowShape,
}

/// How a period template's capture groups map to (year, quarter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodShape {
    /// Groups: quarter digit, year.
    QuarterThenYear,
    /// Groups: year, quarter digit.
    YearThenQuarter,
    /// Groups: month, day, year; quarter derived from the month.
    MonthDayYear,
    /// Groups: month name, day, year; quarter derived from the month.
    MonthNameDayYear,
    /// Literal quarter-end month; only the year is captured.
    QuarterEnd(u8),
}

/// A reporting-period pattern paired with its capture-group shape.
pub struct PeriodTemplate {
    pub pattern: Regex,
    pub shape: PeriodShape,
}

lazy_static! {
    /// Investment row templates, in processing order. The currency and
    /// plain variants overlap on many rows; dedup keeps the first hit.
    pub static ref ROW_TEMPLATES: Vec<RowTemplate> = vec![
        RowTemplate {
            name: "currency_row",
            pattern: Regex::new(
                r"(?i)([A-Za-z][A-Za-z0-9\s&.,'-]+?)\s+(\d{1,2}/\d{1,2}/\d{2,4}|\d{4}-\d{2}-\d{2}|[A-Z][a-z]+\s+\d{1,2},?\s+\d{4})?\s+\$?\s*([\d,]+\.?\d*)\s+\$?\s*([\d,]+\.?\d*)"
            ).unwrap(),
            shape: RowShape::CompanyDateCostValue,
        },
        RowTemplate {
            name: "plain_row",
            pattern: Regex::new(
                r"([A-Za-z][A-Za-z0-9\s&.,'-]+?)\s+(\d{1,2}/\d{1,2}/\d{2,4}|\d{4}-\d{2}-\d{2})?\s+([0-9,]+(?:\.[0-9]{1,2})?)\s+([0-9,]+(?:\.[0-9]{1,2})?)"
            ).unwrap(),
            shape: RowShape::CompanyDateCostValue,
        },
        RowTemplate {
            name: "labeled_cost_value",
            pattern: Regex::new(
                r"(?i)([A-Za-z][A-Za-z0-9\s&.,'-]{2,40})\s+(?:Cost|Investment):\s*\$?\s*([\d,]+\.?\d*)\s+(?:Value|Current\s+Value):\s*\$?\s*([\d,]+\.?\d*)"
            ).unwrap(),
            shape: RowShape::CompanyCostValue,
        },
    ];

    /// Structural words that mark a table header/footer, not a company.
    pub static ref STRUCTURAL_NAME: Regex = Regex::new(
        r"(?i)^(Total|Subtotal|Page|Date|Quarter|Fund|Report|Portfolio|Summary)"
    ).unwrap();

    /// Fund name patterns, tried in order.
    pub static ref FUND_NAME_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)Fund Name:\s*(.+)").unwrap(),
        Regex::new(r"(?i)Fund:\s*([A-Za-z0-9\s&,.-]+(?:Fund|Capital|Ventures|Partners|LP|L\.P\.))").unwrap(),
        Regex::new(r"(?im)^([A-Za-z0-9\s&,.-]+(?:Fund|Capital|Ventures|Partners|LP|L\.P\.))\s*$").unwrap(),
        Regex::new(r"(?i)Portfolio Report\s*[-–—]\s*(.+?)(?:\n|Quarter|Report|Date)").unwrap(),
        Regex::new(r"(?i)Quarterly Report\s*[-–—]\s*(.+?)(?:\n|Quarter|Q\d)").unwrap(),
    ];

    /// Keyword marking a line as fund-like for the fallback scan.
    pub static ref FUND_KEYWORD: Regex = Regex::new(
        r"(?i)(?:Fund|Capital|Ventures|Partners|LP|L\.P\.)"
    ).unwrap();

    /// Boilerplate words disqualifying a line from being a fund name.
    pub static ref REPORT_BOILERPLATE: Regex = Regex::new(
        r"(?i)page|date|report|quarter|period|ended|as of"
    ).unwrap();

    /// Reporting period templates, tried in order.
    pub static ref PERIOD_TEMPLATES: Vec<PeriodTemplate> = vec![
        PeriodTemplate {
            pattern: Regex::new(r"(?i)Quarter\s+(\d)\s*,?\s*(\d{4})").unwrap(),
            shape: PeriodShape::QuarterThenYear,
        },
        PeriodTemplate {
            pattern: Regex::new(r"(?i)Q(\d)\s*(\d{4})").unwrap(),
            shape: PeriodShape::QuarterThenYear,
        },
        PeriodTemplate {
            pattern: Regex::new(r"(?i)(\d{4})\s*Q(\d)").unwrap(),
            shape: PeriodShape::YearThenQuarter,
        },
        PeriodTemplate {
            pattern: Regex::new(r"(?i)Quarter\s+Ended?\s*:?\s*(\d{1,2})/(\d{1,2})/(\d{4})").unwrap(),
            shape: PeriodShape::MonthDayYear,
        },
        PeriodTemplate {
            pattern: Regex::new(r"(?i)Period\s+Ended?\s*:?\s*(\d{1,2})/(\d{1,2})/(\d{4})").unwrap(),
            shape: PeriodShape::MonthDayYear,
        },
        PeriodTemplate {
            pattern: Regex::new(r"(?i)As\s+of\s+(\d{1,2})/(\d{1,2})/(\d{4})").unwrap(),
            shape: PeriodShape::MonthDayYear,
        },
        PeriodTemplate {
            pattern: Regex::new(r"(?i)For\s+the\s+Quarter\s+Ended\s+(\w+)\s+(\d{1,2}),?\s+(\d{4})").unwrap(),
            shape: PeriodShape::MonthNameDayYear,
        },
        PeriodTemplate {
            pattern: Regex::new(r"(?i)March\s+31,?\s+(\d{4})").unwrap(),
            shape: PeriodShape::QuarterEnd(1),
        },
        PeriodTemplate {
            pattern: Regex::new(r"(?i)June\s+30,?\s+(\d{4})").unwrap(),
            shape: PeriodShape::QuarterEnd(2),
        },
        PeriodTemplate {
            pattern: Regex::new(r"(?i)September\s+30,?\s+(\d{4})").unwrap(),
            shape: PeriodShape::QuarterEnd(3),
        },
        PeriodTemplate {
            pattern: Regex::new(r"(?i)December\s+31,?\s+(\d{4})").unwrap(),
            shape: PeriodShape::QuarterEnd(4),
        },
    ];

    /// Whitespace runs, for name normalization.
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}
