//! Adapter from raw model output to structured extraction results.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use super::{CompletionClient, prompt::build_prompt};
use crate::error::AiError;
use crate::models::report::{
    DetectedMetadata, ExtractedInvestment, ExtractionResult, FundFinancials,
};
use crate::report::rules::amounts::parse_amount;
use crate::report::rules::dates::parse_flexible_date;

lazy_static! {
    // Models sometimes wrap the JSON in a markdown fence despite instructions
    static ref CODE_FENCE: Regex = Regex::new(r"```(?:json)?\s*(\{[\s\S]*\})\s*```").unwrap();
}

const RETRY_BASE_DELAY_MS: u64 = 500;

/// AI extraction strategy. Failures never escape [`AiExtractor::extract`]:
/// every error is converted into a structurally complete failure result at
/// this boundary.
pub struct AiExtractor<C> {
    client: C,
    max_retries: u32,
}

impl<C: CompletionClient> AiExtractor<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            max_retries: 0,
        }
    }

    /// Bound retries for transient API failures (0 = single shot).
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Extract structured data from cleaned report text.
    pub async fn extract(&self, report_text: &str) -> ExtractionResult {
        match self.try_extract(report_text).await {
            Ok(result) => result,
            Err(err) => {
                warn!("AI extraction failed: {}", err);
                ExtractionResult::failure(err.to_string())
            }
        }
    }

    async fn try_extract(&self, report_text: &str) -> Result<ExtractionResult, AiError> {
        let prompt = build_prompt(report_text);
        let response = self.complete_with_retry(&prompt).await?;
        parse_response(&response)
    }

    async fn complete_with_retry(&self, prompt: &str) -> Result<String, AiError> {
        let mut attempt = 0u32;
        loop {
            match self.client.complete(prompt).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    let delay = Duration::from_millis(RETRY_BASE_DELAY_MS << attempt);
                    warn!("Model call failed ({}), retrying in {:?}", err, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Parse a model response into an extraction result.
fn parse_response(raw: &str) -> Result<ExtractionResult, AiError> {
    let trimmed = raw.trim();
    let json_text = CODE_FENCE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed);

    let value: Value =
        serde_json::from_str(json_text).map_err(|e| AiError::InvalidJson(e.to_string()))?;

    let rows = value
        .get("investments")
        .and_then(Value::as_array)
        .ok_or_else(|| AiError::InvalidResponseShape("missing `investments` array".to_string()))?;

    let investments: Vec<ExtractedInvestment> = rows
        .iter()
        .map(|row| ExtractedInvestment {
            company_name: row
                .get("company_name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string(),
            investment_date: row
                .get("investment_date")
                .and_then(Value::as_str)
                .and_then(parse_flexible_date),
            cost: coerce_decimal(row.get("cost")),
            current_value: coerce_decimal(row.get("current_value")),
        })
        .collect();

    let metadata = DetectedMetadata {
        fund_name: value
            .get("fund_name")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        year: value.get("year").and_then(Value::as_i64).map(|y| y as i32),
        quarter: value
            .get("quarter")
            .and_then(Value::as_i64)
            .and_then(|q| u8::try_from(q).ok())
            .filter(|q| (1..=4).contains(q)),
    };

    let financials = FundFinancials {
        capital_commitments: coerce_decimal(value.get("capital_commitments")),
        management_fees: coerce_decimal(value.get("management_fees")),
        operating_costs: coerce_decimal(value.get("operating_costs")),
        formation_costs: coerce_decimal(value.get("formation_costs")),
    };

    let count = investments.len();
    debug!("Model returned {} investment rows", count);

    Ok(ExtractionResult {
        success: true,
        metadata,
        financials,
        investments,
        count,
        error: None,
    })
}

/// Coerce a JSON field to a decimal with a 0 fallback, accepting plain
/// numbers or formatted strings.
fn coerce_decimal(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => {
            let rendered = n.to_string();
            rendered
                .parse()
                .or_else(|_| Decimal::from_scientific(&rendered))
                .unwrap_or(Decimal::ZERO)
        }
        Some(Value::String(s)) => parse_amount(s),
        _ => Decimal::ZERO,
    }
}
