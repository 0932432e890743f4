//! Provider Gateway - routes a provider identifier to its backend
//!
//! The Gateway owns one adapter per provider type, built from `AppConfig`.
//! Identifiers are resolved with the same rules as the configuration file.

use crate::{
    providers::{anthropic::AnthropicProvider, ollama::OllamaProvider, openai::OpenAiProvider},
    CommitMessageGenerator, MessageGenerator, Provider,
};
use commitai_foundation::{AppConfig, ProviderType};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Gateway that manages every message generation backend
pub struct Gateway {
    providers: HashMap<ProviderType, Arc<dyn Provider>>,
}

impl Gateway {
    /// Create a gateway from the user configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let mut gateway = Self::new();

        for provider_type in ProviderType::ALL {
            let key = config.api_key_for(provider_type).unwrap_or_default();
            let provider: Arc<dyn Provider> = match provider_type {
                ProviderType::Claude => Arc::new(AnthropicProvider::new(key)),
                ProviderType::Ollama => Arc::new(OllamaProvider::new(
                    config.ollama_url.clone(),
                    config.ollama_model.clone(),
                )),
                ProviderType::Openai
                | ProviderType::Gemini
                | ProviderType::Deepseek
                | ProviderType::Openrouter
                | ProviderType::Grok => Arc::new(OpenAiProvider::new(provider_type, key)),
            };
            gateway.add_provider(provider_type, provider);
        }

        gateway
    }

    /// Create an empty gateway (for testing or manual provider setup)
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Add or replace a provider
    pub fn add_provider(&mut self, provider_type: ProviderType, provider: Arc<dyn Provider>) {
        self.providers.insert(provider_type, provider);
    }

    /// Get a provider by type
    pub fn get_provider(&self, provider_type: ProviderType) -> Option<Arc<dyn Provider>> {
        self.providers.get(&provider_type).cloned()
    }

    /// Resolve a provider identifier. Unknown ids fall back to gemini.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Provider>> {
        let provider_type = ProviderType::from_id_or_default(id);
        let provider = self.get_provider(provider_type);
        if provider.is_none() {
            warn!("Provider '{}' is not registered", provider_type);
        }
        provider
    }

    /// Message generator for a provider identifier
    pub fn generator(&self, id: &str) -> Option<Arc<dyn CommitMessageGenerator>> {
        self.get(id)
            .map(|provider| Arc::new(MessageGenerator::new(provider)) as Arc<dyn CommitMessageGenerator>)
    }

    /// Registered provider types
    pub fn list_providers(&self) -> Vec<ProviderType> {
        let mut list: Vec<_> = self.providers.keys().copied().collect();
        list.sort_by_key(|p| p.id());
        list
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new()
    }
}
