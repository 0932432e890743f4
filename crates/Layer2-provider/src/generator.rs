//! Commit message generation capability
//!
//! `CommitMessageGenerator` is what the watcher depends on. `MessageGenerator`
//! adapts any [`Provider`] to it: placeholder when the credential is missing,
//! shared prompts, and response clean-up.

use crate::error::ProviderError;
use crate::prompt;
use crate::{Message, Provider};
use async_trait::async_trait;
use commitai_foundation::Language;
use std::sync::Arc;
use tracing::debug;

/// Turns a change summary into a commit message
#[async_trait]
pub trait CommitMessageGenerator: Send + Sync {
    async fn generate_commit_message(
        &self,
        changes: &str,
        language: Language,
    ) -> Result<String, ProviderError>;
}

/// [`CommitMessageGenerator`] backed by a [`Provider`]
#[derive(Clone)]
pub struct MessageGenerator {
    provider: Arc<dyn Provider>,
}

impl MessageGenerator {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn Provider> {
        &self.provider
    }

    /// Message returned when the provider has no credential
    pub fn placeholder(&self) -> String {
        format!(
            "feat: initial implementation ({} API key not configured)",
            self.provider.metadata().display_name
        )
    }
}

#[async_trait]
impl CommitMessageGenerator for MessageGenerator {
    async fn generate_commit_message(
        &self,
        changes: &str,
        language: Language,
    ) -> Result<String, ProviderError> {
        if !self.provider.is_available() {
            return Ok(self.placeholder());
        }

        let metadata = self.provider.metadata();
        debug!(
            "Requesting commit message from {} ({})",
            metadata.display_name,
            self.provider.model()
        );

        let raw = self
            .provider
            .complete(
                vec![Message::user(prompt::user_prompt(changes, language))],
                Some(prompt::system_prompt(language).to_string()),
            )
            .await?;

        let message = sanitize_message(&raw);
        if message.is_empty() {
            return Err(ProviderError::EmptyResponse(metadata.display_name.clone()));
        }
        Ok(message)
    }
}

/// Trim the model output and strip a surrounding code fence or quotes
pub fn sanitize_message(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(inner) = text.strip_prefix("```") {
        // drop the optional language tag on the opening fence
        let inner = match inner.find('\n') {
            Some(idx) => &inner[idx + 1..],
            None => inner,
        };
        text = inner.strip_suffix("```").unwrap_or(inner).trim();
    }

    for quote in ['"', '\'', '`'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            text = text[1..text.len() - 1].trim();
            break;
        }
    }

    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderMetadata;
    use commitai_foundation::ProviderType;
    use std::sync::Mutex;

    struct FakeProvider {
        metadata: ProviderMetadata,
        available: bool,
        reply: Result<String, ProviderError>,
        seen: Mutex<Vec<(Vec<Message>, Option<String>)>>,
    }

    impl FakeProvider {
        fn new(available: bool, reply: Result<String, ProviderError>) -> Self {
            Self {
                metadata: ProviderMetadata::new(ProviderType::Openai),
                available,
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Provider for FakeProvider {
        fn metadata(&self) -> &ProviderMetadata {
            &self.metadata
        }

        async fn complete(
            &self,
            messages: Vec<Message>,
            system_prompt: Option<String>,
        ) -> Result<String, ProviderError> {
            self.seen.lock().unwrap().push((messages, system_prompt));
            self.reply.clone()
        }

        fn is_available(&self) -> bool {
            self.available
        }
    }

    #[tokio::test]
    async fn test_placeholder_without_credential() {
        let provider = Arc::new(FakeProvider::new(false, Ok("unused".into())));
        let generator = MessageGenerator::new(provider.clone());

        let message = generator
            .generate_commit_message("diff", Language::En)
            .await
            .unwrap();

        assert_eq!(
            message,
            "feat: initial implementation (OpenAI API key not configured)"
        );
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prompts_are_sent() {
        let provider = Arc::new(FakeProvider::new(true, Ok("fix: handle empty input".into())));
        let generator = MessageGenerator::new(provider.clone());

        let message = generator
            .generate_commit_message("a.go changed", Language::De)
            .await
            .unwrap();
        assert_eq!(message, "fix: handle empty input");

        let seen = provider.seen.lock().unwrap();
        let (messages, system) = &seen[0];
        assert_eq!(system.as_deref(), Some(prompt::system_prompt(Language::De)));
        assert!(messages[0].content.contains("a.go changed"));
    }

    #[tokio::test]
    async fn test_blank_reply_is_error() {
        let generator = MessageGenerator::new(Arc::new(FakeProvider::new(true, Ok("  \n ".into()))));
        let err = generator
            .generate_commit_message("diff", Language::En)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let generator = MessageGenerator::new(Arc::new(FakeProvider::new(
            true,
            Err(ProviderError::ServerError("boom".into())),
        )));
        let err = generator
            .generate_commit_message("diff", Language::En)
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::ServerError("boom".into()));
    }

    #[test]
    fn test_sanitize_message() {
        assert_eq!(sanitize_message("  feat: x \n"), "feat: x");
        assert_eq!(sanitize_message("\"feat: quoted\""), "feat: quoted");
        assert_eq!(
            sanitize_message("```text\nfeat: fenced\n\nbody line\n```"),
            "feat: fenced\n\nbody line"
        );
        assert_eq!(sanitize_message("```feat: one line```"), "feat: one line");
        assert_eq!(sanitize_message("```\n```"), "");
    }
}
