//! Provider implementations
//!
//! - `openai` - OpenAI-compatible chat completions (OpenAI, Gemini, DeepSeek, OpenRouter, Grok)
//! - `anthropic` - Anthropic messages API (Claude)
//! - `ollama` - Ollama chat API (local models)

pub mod anthropic;
pub mod ollama;
pub mod openai;

use crate::error::{error_message, ProviderError};
use reqwest::Client;
use std::time::Duration;

/// Max tokens requested from remote chat APIs
pub const DEFAULT_MAX_TOKENS: u32 = 100;

/// Request timeout for remote chat APIs
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to build HTTP client with timeout: {}", e);
            Client::new()
        })
}

/// Turn a non-success response into a classified error
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::from_http_status(
        status.as_u16(),
        &error_message(&body),
    ))
}
