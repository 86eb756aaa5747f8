//! Anthropic Messages API client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CompletionClient;
use crate::error::AiError;
use crate::models::config::AiConfig;

/// Messages API request format.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Messages API response format.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

/// Hosted-model client. Constructed once per process with an explicit
/// credential and injected into the pipeline.
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: Option<String>,
    config: AiConfig,
}

impl AnthropicClient {
    pub fn new(api_key: Option<String>, config: AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            config,
        }
    }

    /// Read the credential from `ANTHROPIC_API_KEY`.
    pub fn from_env(config: AiConfig) -> Self {
        Self::new(std::env::var("ANTHROPIC_API_KEY").ok(), config)
    }

    /// The configured credential, rejecting empty and placeholder values.
    fn credential(&self) -> Result<&str, AiError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != "your_api_key_here")
            .ok_or(AiError::MissingCredentials)
    }
}

impl CompletionClient for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        let key = self.credential()?;

        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));
        debug!("Requesting completion from {} ({})", url, self.config.model);

        let response = self
            .http
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .header("x-api-key", key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api { status, body });
        }

        let body: MessagesResponse = response.json().await?;

        body.content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| AiError::InvalidResponseShape("empty response content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_rejects_missing_and_placeholder() {
        let config = AiConfig::default();

        let client = AnthropicClient::new(None, config.clone());
        assert!(matches!(client.credential(), Err(AiError::MissingCredentials)));

        let client = AnthropicClient::new(Some("".to_string()), config.clone());
        assert!(matches!(client.credential(), Err(AiError::MissingCredentials)));

        let client = AnthropicClient::new(Some("your_api_key_here".to_string()), config.clone());
        assert!(matches!(client.credential(), Err(AiError::MissingCredentials)));

        let client = AnthropicClient::new(Some("sk-test".to_string()), config);
        assert_eq!(client.credential().unwrap(), "sk-test");
    }
}
