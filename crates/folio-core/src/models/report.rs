//! Models for extracted fund report data.
//!
//! Everything here is transient: extraction output is handed to the caller
//! for human review and is never persisted by this crate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single portfolio investment recovered from report text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedInvestment {
    /// Portfolio company name.
    pub company_name: String,

    /// Investment date, if one could be recovered or derived.
    pub investment_date: Option<NaiveDate>,

    /// Invested cost basis.
    pub cost: Decimal,

    /// Current (fair) value.
    pub current_value: Decimal,
}

/// Fund name and reporting period inferred from free text. Best-effort;
/// any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedMetadata {
    /// Fund name (e.g. "Tech Ventures Fund I").
    pub fund_name: Option<String>,

    /// Reporting year.
    pub year: Option<i32>,

    /// Reporting quarter (1-4).
    pub quarter: Option<u8>,
}

impl DetectedMetadata {
    /// All three fields were recovered.
    pub fn detected(&self) -> bool {
        self.fund_name.is_some() && self.year.is_some() && self.quarter.is_some()
    }

    /// The reporting period, when both year and quarter are known.
    pub fn period(&self) -> Option<ReportingPeriod> {
        match (self.year, self.quarter) {
            (Some(year), Some(quarter)) => Some(ReportingPeriod { year, quarter }),
            _ => None,
        }
    }
}

/// Fund-level financials from the notes/expenses sections of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundFinancials {
    /// Total capital commitments (fund size).
    pub capital_commitments: Decimal,

    /// Management fees for the reporting quarter.
    pub management_fees: Decimal,

    /// Operating/administrative expenses for the reporting quarter.
    pub operating_costs: Decimal,

    /// One-time formation/organizational costs.
    pub formation_costs: Decimal,
}

/// The unit returned by an extraction strategy. Has no lifecycle beyond
/// the request that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Whether the strategy produced usable data. The heuristic strategy
    /// reports `false` with an empty list when nothing matched; that is a
    /// valid outcome, not a hard failure.
    pub success: bool,

    /// Detected fund name and reporting period.
    pub metadata: DetectedMetadata,

    /// Fund-level financials (zeroed when not found).
    pub financials: FundFinancials,

    /// Candidate investments for human review.
    pub investments: Vec<ExtractedInvestment>,

    /// Number of candidate investments.
    pub count: usize,

    /// Error message for failed extractions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// A structurally complete failure value: empty investments, zeroed
    /// financials, no metadata, populated error message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            metadata: DetectedMetadata::default(),
            financials: FundFinancials::default(),
            investments: Vec::new(),
            count: 0,
            error: Some(error.into()),
        }
    }
}

/// A fiscal reporting period used for quarter-end date fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub year: i32,
    pub quarter: u8,
}

impl ReportingPeriod {
    /// Last calendar day of the period (Q1 -> 03-31, Q2 -> 06-30,
    /// Q3 -> 09-30, Q4 -> 12-31). None for a quarter outside 1-4.
    pub fn quarter_end(&self) -> Option<NaiveDate> {
        crate::report::rules::dates::quarter_end_date(self.year, self.quarter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_investment_serializes_iso_date() {
        let inv = ExtractedInvestment {
            company_name: "Acme Corp".to_string(),
            investment_date: NaiveDate::from_ymd_opt(2022, 1, 15),
            cost: Decimal::from_str("1000000").unwrap(),
            current_value: Decimal::from_str("1500000").unwrap(),
        };

        let json = serde_json::to_value(&inv).unwrap();
        assert_eq!(json["investment_date"], "2022-01-15");
        assert_eq!(json["company_name"], "Acme Corp");
    }

    #[test]
    fn test_investment_date_null() {
        let inv = ExtractedInvestment {
            company_name: "Beta LLC".to_string(),
            investment_date: None,
            cost: Decimal::ONE,
            current_value: Decimal::ONE,
        };

        let json = serde_json::to_value(&inv).unwrap();
        assert!(json["investment_date"].is_null());
    }

    #[test]
    fn test_metadata_period() {
        let metadata = DetectedMetadata {
            fund_name: None,
            year: Some(2024),
            quarter: Some(2),
        };
        assert!(!metadata.detected());
        assert_eq!(
            metadata.period(),
            Some(ReportingPeriod { year: 2024, quarter: 2 })
        );

        assert_eq!(DetectedMetadata::default().period(), None);
    }

    #[test]
    fn test_failure_result_is_structurally_complete() {
        let result = ExtractionResult::failure("boom");
        assert!(!result.success);
        assert_eq!(result.count, 0);
        assert!(result.investments.is_empty());
        assert_eq!(result.financials, FundFinancials::default());
        assert_eq!(result.metadata, DetectedMetadata::default());
        assert_eq!(result.error.as_deref(), Some("boom"));
    }
}
