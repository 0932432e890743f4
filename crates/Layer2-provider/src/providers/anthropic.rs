//! Anthropic (Claude) messages API provider

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
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Claude provider
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    metadata: ProviderMetadata,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            api_key: api_key.into(),
            metadata: ProviderMetadata::new(ProviderType::Claude),
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

    fn build_request(
        &self,
        messages: Vec<Message>,
        system_prompt: Option<String>,
    ) -> AnthropicRequest {
        AnthropicRequest {
            model: self.metadata.model.clone(),
            max_tokens: self.max_tokens,
            system: system_prompt,
            messages,
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        system_prompt: Option<String>,
    ) -> Result<String, ProviderError> {
        let request = self.build_request(messages, system_prompt);

        let response = self
            .client
            .post(&self.metadata.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;
        let response = ensure_success(response).await?;

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        debug!("Anthropic stop_reason: {:?}", api_response.stop_reason);

        let content: String = api_response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();

        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse(
                self.metadata.display_name.clone(),
            ));
        }
        Ok(content)
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete_sends_system_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(json!({
                "model": "claude-3-haiku-20240307",
                "system": "sys",
                "messages": [{"role": "user", "content": "changes"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    {"type": "text", "text": "refactor: split "},
                    {"type": "text", "text": "watcher module"}
                ],
                "stop_reason": "end_turn"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = AnthropicProvider::new("sk-ant")
            .with_base_url(format!("{}/v1/messages", server.uri()));
        let text = provider
            .complete(vec![Message::user("changes")], Some("sys".into()))
            .await
            .unwrap();
        assert_eq!(text, "refactor: split watcher module");
    }

    #[tokio::test]
    async fn test_empty_content_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [],
                "stop_reason": "end_turn"
            })))
            .mount(&server)
            .await;

        let provider = AnthropicProvider::new("sk-ant").with_base_url(server.uri());
        let err = provider
            .complete(vec![Message::user("x")], None)
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::EmptyResponse("Claude".into()));
    }

    #[tokio::test]
    async fn test_overloaded_is_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_json(json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })))
            .mount(&server)
            .await;

        let provider = AnthropicProvider::new("sk-ant").with_base_url(server.uri());
        let err = provider
            .complete(vec![Message::user("x")], None)
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::ServerError("Overloaded".into()));
    }
}
