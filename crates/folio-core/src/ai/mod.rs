//! AI-assisted extraction via a hosted language model.

mod anthropic;
mod extractor;
mod prompt;

pub use anthropic::AnthropicClient;
pub use extractor::AiExtractor;

use crate::error::AiError;

/// Seam between the extraction adapter and the hosted model, so tests can
/// drive the adapter with canned responses.
pub trait CompletionClient: Send + Sync {
    /// Send one prompt and return the model's text response.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, AiError>> + Send;
}
