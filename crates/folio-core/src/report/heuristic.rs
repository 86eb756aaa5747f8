//! Regex-driven investment extraction from report text.

use std::collections::HashSet;

use chrono::NaiveDate;
use regex::Captures;
use rust_decimal::Decimal;
use tracing::debug;

use super::rules::amounts::parse_amount;
use super::rules::dates::parse_flexible_date;
use super::rules::metadata::detect_metadata;
use super::rules::patterns::{ROW_TEMPLATES, RowShape, STRUCTURAL_NAME};
use crate::models::config::ExtractionConfig;
use crate::models::report::{
    ExtractedInvestment, ExtractionResult, FundFinancials, ReportingPeriod,
};

/// Regex-based extraction strategy for investment rows.
///
/// Independent of the AI strategy; callers may run it directly or wire it
/// as the pipeline's fallback.
pub struct HeuristicExtractor {
    min_name_len: usize,
    max_amount: Decimal,
}

impl HeuristicExtractor {
    /// Create an extractor with default thresholds.
    pub fn new() -> Self {
        Self {
            min_name_len: 2,
            max_amount: Decimal::from(10_000_000_000u64),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_name_len: config.min_company_name_len,
            max_amount: Decimal::from(config.max_amount),
        }
    }

    /// Set the implausible-amount ceiling.
    pub fn with_max_amount(mut self, max_amount: Decimal) -> Self {
        self.max_amount = max_amount;
        self
    }

    /// Run every row template over the text and assemble the result,
    /// including detected metadata. Zero matches is a reportable outcome
    /// (`success: false`), not an error.
    pub fn extract(&self, text: &str, period: Option<ReportingPeriod>) -> ExtractionResult {
        let metadata = detect_metadata(text);
        let period = period.or_else(|| metadata.period());
        let investments = self.extract_investments(text, period);
        let count = investments.len();

        ExtractionResult {
            success: count > 0,
            metadata,
            financials: FundFinancials::default(),
            investments,
            count,
            error: None,
        }
    }

    /// Extract deduplicated candidate investments. Rows without a date
    /// get the quarter-end date of the given period, when one is known.
    pub fn extract_investments(
        &self,
        text: &str,
        period: Option<ReportingPeriod>,
    ) -> Vec<ExtractedInvestment> {
        let fallback_date = period.and_then(|p| p.quarter_end());
        let mut candidates = Vec::new();

        for template in ROW_TEMPLATES.iter() {
            let before = candidates.len();
            for caps in template.pattern.captures_iter(text) {
                if let Some(investment) = self.parse_row(&caps, template.shape, fallback_date) {
                    candidates.push(investment);
                }
            }

            let found = candidates.len() - before;
            if found > 0 {
                debug!("Template {} matched {} rows", template.name, found);
            }
        }

        // Overlapping templates produce duplicates; first seen wins
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|inv| {
                seen.insert((inv.company_name.to_lowercase(), inv.cost, inv.current_value))
            })
            .collect()
    }

    fn parse_row(
        &self,
        caps: &Captures<'_>,
        shape: RowShape,
        fallback_date: Option<NaiveDate>,
    ) -> Option<ExtractedInvestment> {
        let (name, date_str, cost_str, value_str) = match shape {
            RowShape::CompanyDateCostValue => (
                caps.get(1)?.as_str(),
                caps.get(2).map(|m| m.as_str()),
                caps.get(3)?.as_str(),
                caps.get(4)?.as_str(),
            ),
            RowShape::CompanyCostValue => (
                caps.get(1)?.as_str(),
                None,
                caps.get(2)?.as_str(),
                caps.get(3)?.as_str(),
            ),
        };

        let company_name = name.trim();
        if company_name.len() < self.min_name_len || STRUCTURAL_NAME.is_match(company_name) {
            return None;
        }

        let cost = parse_amount(cost_str);
        let current_value = parse_amount(value_str);

        // Zero amounts are header/footer noise; huge ones are totals
        if cost.is_zero() || current_value.is_zero() {
            return None;
        }
        if cost > self.max_amount || current_value > self.max_amount {
            return None;
        }

        let investment_date = date_str.and_then(parse_flexible_date).or(fallback_date);

        Some(ExtractedInvestment {
            company_name: company_name.to_string(),
            investment_date,
            cost,
            current_value,
        })
    }
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_tabular_row_with_date() {
        let extractor = HeuristicExtractor::new();
        let text = "Acme Corp 01/15/2022 $1,000,000 $1,500,000";

        let investments = extractor.extract_investments(text, None);

        assert_eq!(investments.len(), 1);
        let inv = &investments[0];
        assert_eq!(inv.company_name, "Acme Corp");
        assert_eq!(
            inv.investment_date,
            NaiveDate::from_ymd_opt(2022, 1, 15)
        );
        assert_eq!(inv.cost, dec("1000000"));
        assert_eq!(inv.current_value, dec("1500000"));
    }

    #[test]
    fn test_row_without_date_uses_quarter_end() {
        let extractor = HeuristicExtractor::new();
        let period = ReportingPeriod { year: 2024, quarter: 2 };

        let investments =
            extractor.extract_investments("Beta Systems 2,000,000 2,600,000", Some(period));

        assert_eq!(investments.len(), 1);
        assert_eq!(
            investments[0].investment_date,
            NaiveDate::from_ymd_opt(2024, 6, 30)
        );
    }

    #[test]
    fn test_row_without_date_or_period() {
        let extractor = HeuristicExtractor::new();

        let investments = extractor.extract_investments("Beta Systems 2,000,000 2,600,000", None);

        assert_eq!(investments.len(), 1);
        assert_eq!(investments[0].investment_date, None);
    }

    #[test]
    fn test_labeled_cost_value_row() {
        let extractor = HeuristicExtractor::new();

        let investments = extractor
            .extract_investments("Gamma Robotics Cost: $500,000 Value: $750,000", None);

        assert_eq!(investments.len(), 1);
        assert_eq!(investments[0].company_name, "Gamma Robotics");
        assert_eq!(investments[0].cost, dec("500000"));
        assert_eq!(investments[0].current_value, dec("750000"));
    }

    #[test]
    fn test_rejects_structural_names() {
        let extractor = HeuristicExtractor::new();
        let text = "Total Portfolio Value $5,000,000 $6,000,000\nSubtotal $1,000 $2,000";

        assert!(extractor.extract_investments(text, None).is_empty());
    }

    #[test]
    fn test_rejects_zero_amounts() {
        let extractor = HeuristicExtractor::new();

        assert!(extractor.extract_investments("Acme Corp $0 $1,000", None).is_empty());
        assert!(extractor.extract_investments("Acme Corp $1,000 $0", None).is_empty());
    }

    #[test]
    fn test_rejects_implausible_amounts() {
        let extractor = HeuristicExtractor::new();
        let text = "Acme Corp $20,000,000,000 $30,000,000,000";

        assert!(extractor.extract_investments(text, None).is_empty());
    }

    #[test]
    fn test_deduplicates_across_templates() {
        let extractor = HeuristicExtractor::new();
        // The tabular row and the labeled row agree on (name, cost, value)
        let text = "Acme Corp 01/15/2022 $1,000,000 $1,500,000\n\
                    Acme Corp Cost: $1,000,000 Value: $1,500,000";

        let investments = extractor.extract_investments(text, None);

        assert_eq!(investments.len(), 1);
        assert!(investments[0].investment_date.is_some());
    }

    #[test]
    fn test_dedup_ignores_name_case() {
        let extractor = HeuristicExtractor::new();
        let text = "Acme Corp 1,000,000 1,500,000\nACME CORP 1,000,000 1,500,000";

        let investments = extractor.extract_investments(text, None);

        assert_eq!(investments.len(), 1);
        assert_eq!(investments[0].company_name, "Acme Corp");
    }

    #[test]
    fn test_idempotent() {
        let extractor = HeuristicExtractor::new();
        let text = "Acme Corp 01/15/2022 $1,000,000 $1,500,000\n\
                    Beta Systems 2,000,000 2,600,000";

        let first = extractor.extract_investments(text, None);
        let second = extractor.extract_investments(text, None);

        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_reports_zero_matches_as_non_success() {
        let extractor = HeuristicExtractor::new();

        let result = extractor.extract("no investment rows in here", None);

        assert!(!result.success);
        assert_eq!(result.count, 0);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_extract_derives_period_from_metadata() {
        let extractor = HeuristicExtractor::new();
        let text = "Quarterly Report – Tech Ventures Fund I\nQ2 2023\n\
                    Acme Corp 1,000,000 1,500,000";

        let result = extractor.extract(text, None);

        assert!(result.success);
        assert_eq!(result.metadata.fund_name.as_deref(), Some("Tech Ventures Fund I"));
        assert_eq!(
            result.investments[0].investment_date,
            NaiveDate::from_ymd_opt(2023, 6, 30)
        );
    }
}
