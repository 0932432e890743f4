//! # commitai-provider
//!
//! Commit message generation for Commit-AI.
//! One capability, many interchangeable backends.
//!
//! ## Features
//! - OpenAI-compatible chat completions (OpenAI, Gemini, DeepSeek, OpenRouter, Grok)
//! - Anthropic messages API
//! - Local models through Ollama
//! - Shared prompt construction per message language

pub mod error;
pub mod gateway;
pub mod generator;
pub mod message;
pub mod prompt;
pub mod providers;
pub mod r#trait;

// Core traits and types
pub use gateway::Gateway;
pub use generator::{sanitize_message, CommitMessageGenerator, MessageGenerator};
pub use message::{Message, MessageRole};
pub use r#trait::{Provider, ProviderMetadata};

// Error
pub use error::ProviderError;

// Provider implementations
pub use providers::anthropic::AnthropicProvider;
pub use providers::ollama::OllamaProvider;
pub use providers::openai::OpenAiProvider;
