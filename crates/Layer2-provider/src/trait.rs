//! Provider trait and common types

use crate::error::ProviderError;
use crate::Message;
use async_trait::async_trait;
use commitai_foundation::ProviderType;

/// Provider metadata
#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    /// Provider kind
    pub provider_type: ProviderType,

    /// Display name (e.g., "OpenRouter")
    pub display_name: String,

    /// Model ID sent with every request
    pub model: String,

    /// Full request URL
    pub endpoint: String,
}

impl ProviderMetadata {
    pub fn new(provider_type: ProviderType) -> Self {
        Self {
            provider_type,
            display_name: provider_type.name().to_string(),
            model: provider_type.default_model().to_string(),
            endpoint: provider_type.default_endpoint().to_string(),
        }
    }
}

/// Message generation backend
///
/// Implement this trait to add support for a new completion service.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get provider metadata
    fn metadata(&self) -> &ProviderMetadata;

    /// Current model ID
    fn model(&self) -> &str {
        &self.metadata().model
    }

    /// Send messages and get the complete text response (non-streaming).
    ///
    /// An answer without any text is `ProviderError::EmptyResponse`.
    async fn complete(
        &self,
        messages: Vec<Message>,
        system_prompt: Option<String>,
    ) -> Result<String, ProviderError>;

    /// Check if the provider is usable (e.g., API key is set)
    fn is_available(&self) -> bool;
}
