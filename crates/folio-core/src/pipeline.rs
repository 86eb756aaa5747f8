//! Report analysis pipeline: PDF text, cleanup, then extraction strategies.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai::{AiExtractor, CompletionClient};
use crate::error::{FolioError, PdfError};
use crate::models::config::FolioConfig;
use crate::models::report::{
    DetectedMetadata, ExtractedInvestment, ExtractionResult, FundFinancials, ReportingPeriod,
};
use crate::pdf::{PdfExtractor, PdfProcessor};
use crate::report::HeuristicExtractor;
use crate::text::clean_text;

/// Pipeline output shaped for upload-review callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub success: bool,
    pub metadata: DetectedMetadata,
    pub financials: FundFinancials,
    pub investments: Vec<ExtractedInvestment>,
    pub count: usize,
    /// Human-readable summary of what was auto-detected.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisReport {
    fn from_result(result: ExtractionResult) -> Self {
        let message = if !result.success {
            "Extraction failed. Please enter fund and quarter details manually.".to_string()
        } else if let (Some(fund), Some(year), Some(quarter)) = (
            result.metadata.fund_name.as_deref(),
            result.metadata.year,
            result.metadata.quarter,
        ) {
            format!("Auto-detected: {fund}, Q{quarter} {year}")
        } else {
            "Data extracted. Please review and enter fund and quarter details.".to_string()
        };

        Self {
            success: result.success,
            metadata: result.metadata,
            financials: result.financials,
            investments: result.investments,
            count: result.count,
            message,
            error: result.error,
        }
    }
}

/// Orchestrates extraction for one uploaded report. The model client is
/// injected; the AI-to-heuristic fallback is a configuration choice.
pub struct ExtractionPipeline<C> {
    ai: AiExtractor<C>,
    config: FolioConfig,
}

impl<C: CompletionClient> ExtractionPipeline<C> {
    pub fn new(client: C, config: FolioConfig) -> Self {
        let ai = AiExtractor::new(client).with_max_retries(config.ai.max_retries);
        Self { ai, config }
    }

    /// Analyze a report PDF on disk with the AI strategy (plus the
    /// configured fallback). A text-extraction failure aborts before any
    /// model call and surfaces as a failure report; only I/O faults on
    /// the path itself propagate as errors.
    pub async fn analyze_file(&self, path: &Path) -> Result<AnalysisReport, FolioError> {
        let data = std::fs::read(path)?;
        info!("Analyzing report {}", path.display());

        let text = match self.extract_pdf_text(&data) {
            Ok(text) => text,
            Err(err) => {
                warn!("Text extraction failed for {}: {}", path.display(), err);
                return Ok(AnalysisReport::from_result(ExtractionResult::failure(
                    format!("Failed to extract text from PDF: {err}"),
                )));
            }
        };

        Ok(self.analyze_text(&text).await)
    }

    /// Analyze already-extracted report text.
    pub async fn analyze_text(&self, text: &str) -> AnalysisReport {
        let cleaned = clean_text(text);
        let mut result = self.ai.extract(&cleaned).await;

        if !result.success && self.config.extraction.fallback_to_heuristics {
            info!("AI extraction failed, trying heuristic matching");
            let ai_error = result.error.take();

            let heuristic = HeuristicExtractor::from_config(&self.config.extraction);
            result = heuristic.extract(&cleaned, None);
            if !result.success {
                result.error = ai_error;
            }
        }

        AnalysisReport::from_result(result)
    }

    /// Analyze a report PDF with only the heuristic strategy. The period
    /// feeds quarter-end date fallbacks for undated rows; when absent it
    /// is derived from detected metadata.
    pub fn analyze_file_heuristic(
        &self,
        path: &Path,
        period: Option<ReportingPeriod>,
    ) -> Result<AnalysisReport, FolioError> {
        let data = std::fs::read(path)?;
        info!("Analyzing report {} with heuristic matching", path.display());

        let text = match self.extract_pdf_text(&data) {
            Ok(text) => text,
            Err(err) => {
                warn!("Text extraction failed for {}: {}", path.display(), err);
                return Ok(AnalysisReport::from_result(ExtractionResult::failure(
                    format!("Failed to extract text from PDF: {err}"),
                )));
            }
        };

        let cleaned = clean_text(&text);
        let heuristic = HeuristicExtractor::from_config(&self.config.extraction);
        Ok(AnalysisReport::from_result(heuristic.extract(&cleaned, period)))
    }

    fn extract_pdf_text(&self, data: &[u8]) -> Result<String, PdfError> {
        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;
        let content = extractor.extract_content()?;

        if content.text.trim().len() < self.config.pdf.min_text_length {
            warn!(
                "Only {} chars extracted from {} pages, extraction quality is suspect",
                content.text.trim().len(),
                content.page_count
            );
        }

        Ok(content.text)
    }
}
