//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the folio pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Heuristic extraction configuration.
    pub extraction: ExtractionConfig,

    /// AI extraction configuration.
    pub ai: AiConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum extracted text length to consider the document usable.
    /// Shorter extractions are still processed but logged as suspect.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

/// Heuristic (regex) extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Run the heuristic matcher when AI extraction fails.
    pub fallback_to_heuristics: bool,

    /// Amounts above this are treated as table-footer noise and rejected.
    pub max_amount: u64,

    /// Minimum accepted company name length.
    pub min_company_name_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fallback_to_heuristics: false,
            max_amount: 10_000_000_000,
            min_company_name_len: 2,
        }
    }
}

/// AI extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Model identifier.
    pub model: String,

    /// Maximum tokens in the model response.
    pub max_tokens: u32,

    /// API base URL.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// Retries for transient API failures (0 = single shot).
    pub max_retries: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-haiku-20240307".to_string(),
            max_tokens: 4096,
            base_url: "https://api.anthropic.com".to_string(),
            timeout_seconds: 120,
            max_retries: 0,
        }
    }
}

impl FolioConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
