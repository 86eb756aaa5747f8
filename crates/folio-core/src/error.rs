//! Error types for the folio-core library.

use thiserror::Error;

/// Main error type for the folio library.
#[derive(Error, Debug)]
pub enum FolioError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// AI extraction error.
    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to AI-assisted extraction.
#[derive(Error, Debug)]
pub enum AiError {
    /// No API credential configured; checked before any network call.
    #[error("no API credential configured, set ANTHROPIC_API_KEY")]
    MissingCredentials,

    /// HTTP transport failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the model API.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The model response was not valid JSON.
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    /// The parsed response is missing required structure.
    #[error("invalid response shape: {0}")]
    InvalidResponseShape(String),
}

impl AiError {
    /// Whether a retry could plausibly succeed. Credential and response
    /// shape errors are permanent for a given request.
    pub fn is_transient(&self) -> bool {
        match self {
            AiError::Http(_) => true,
            AiError::Api { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Result type for the folio library.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(AiError::Api { status: 500, body: String::new() }.is_transient());
        assert!(AiError::Api { status: 429, body: String::new() }.is_transient());
        assert!(!AiError::Api { status: 400, body: String::new() }.is_transient());
        assert!(!AiError::MissingCredentials.is_transient());
        assert!(!AiError::InvalidJson("x".into()).is_transient());
    }
}
