//! OpenAI-compatible chat completions provider
//!
//! Serves every backend that speaks the `/chat/completions` dialect:
//! OpenAI, Gemini (OpenAI endpoint), DeepSeek, OpenRouter and Grok.

use super::{ensure_success, http_client, DEFAULT_MAX_TOKENS, DEFAULT_TIMEOUT_SECS};
use crate::{
    error::ProviderError,
    r#trait::{Provider, ProviderMetadata},
    Message,
};
use async_trait::async_trait;
use commitai_foundation::ProviderType;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const OPENROUTER_REFERER: &str = "https://github.com/commit-ai/commit-ai";
const OPENROUTER_TITLE: &str = "Commit-AI";

/// OpenAI-compatible provider
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    metadata: ProviderMetadata,
    max_tokens: u32,
}

impl OpenAiProvider {
    /// Create a provider for one of the OpenAI-compatible backends
    pub fn new(provider_type: ProviderType, api_key: impl Into<String>) -> Self {
        Self {
            client: http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            api_key: api_key.into(),
            metadata: ProviderMetadata::new(provider_type),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the full request URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.metadata.endpoint = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.metadata.model = model.into();
        self
    }

    /// Set custom timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    fn build_request(&self, messages: Vec<Message>, system_prompt: Option<String>) -> ChatRequest {
        let mut api_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = system_prompt {
            api_messages.push(Message::system(system));
        }
        api_messages.extend(messages);

        ChatRequest {
            model: self.metadata.model.clone(),
            messages: api_messages,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        system_prompt: Option<String>,
    ) -> Result<String, ProviderError> {
        let request = self.build_request(messages, system_prompt);

        let mut builder = self
            .client
            .post(&self.metadata.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request);

        if self.metadata.provider_type == ProviderType::Openrouter {
            builder = builder
                .header("HTTP-Referer", OPENROUTER_REFERER)
                .header("X-Title", OPENROUTER_TITLE);
        }

        let response = builder.send().await.map_err(ProviderError::from_transport)?;
        let response = ensure_success(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse(self.metadata.display_name.clone()))
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
