//! Core library for VC fund portfolio report extraction.
//!
//! This crate provides:
//! - PDF processing (text extraction and page counting)
//! - Heuristic investment extraction (regex row templates, date and amount
//!   parsing, fund/period metadata detection)
//! - AI-assisted extraction via the Anthropic Messages API
//! - The extraction pipeline used by upload/review tooling

pub mod ai;
pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod report;
pub mod text;

pub use error::{AiError, FolioError, PdfError, Result};
pub use models::config::{AiConfig, ExtractionConfig, FolioConfig, PdfConfig};
pub use models::report::{
    DetectedMetadata, ExtractedInvestment, ExtractionResult, FundFinancials, ReportingPeriod,
};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor};
pub use pipeline::{AnalysisReport, ExtractionPipeline};
pub use report::HeuristicExtractor;
pub use ai::{AiExtractor, AnthropicClient, CompletionClient};
pub use text::clean_text;
