//! Ollama provider for local models

use super::{ensure_success, http_client};
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

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Ollama provider
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    metadata: ProviderMetadata,
}

impl OllamaProvider {
    /// Create a new Ollama provider (`base_url` like `http://localhost:11434`)
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();

        let mut metadata = ProviderMetadata::new(ProviderType::Ollama);
        metadata.endpoint = format!("{}/api/chat", base_url);
        if !model.trim().is_empty() {
            metadata.model = model;
        }

        Self {
            client: http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            base_url,
            metadata,
        }
    }

    /// Set custom timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn metadata(&self) -> &ProviderMetadata {
        &self.metadata
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        system_prompt: Option<String>,
    ) -> Result<String, ProviderError> {
        let mut api_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = system_prompt {
            api_messages.push(Message::system(system));
        }
        api_messages.extend(messages);

        let request = OllamaRequest {
            model: self.metadata.model.clone(),
            messages: api_messages,
            stream: false,
        };

        let response = self
            .client
            .post(&self.metadata.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;
        let response = ensure_success(response).await?;

        let body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        body.message
            .map(|m| m.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse(self.metadata.display_name.clone()))
    }

    fn is_available(&self) -> bool {
        !self.base_url.is_empty()
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: Option<OllamaMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_endpoint_and_default_model() {
        let provider = OllamaProvider::new("http://localhost:11434/", "");
        assert_eq!(provider.metadata().endpoint, "http://localhost:11434/api/chat");
        assert_eq!(provider.model(), "llama3");
        assert!(provider.is_available());
    }

    #[tokio::test]
    async fn test_complete_non_streaming() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({"model": "codellama", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "codellama",
                "message": {"role": "assistant", "content": "docs: describe flags"},
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri(), "codellama");
        let text = provider
            .complete(vec![Message::user("x")], Some("sys".into()))
            .await
            .unwrap();
        assert_eq!(text, "docs: describe flags");
    }

    #[tokio::test]
    async fn test_missing_model_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"error": "model 'nope' not found"})),
            )
            .mount(&server)
            .await;

        let provider = OllamaProvider::new(server.uri(), "nope");
        let err = provider
            .complete(vec![Message::user("x")], None)
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::ModelNotFound("model 'nope' not found".into()));
    }
}
