use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 프로바이더 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Openai,
    Gemini,
    #[serde(alias = "anthropic")]
    Claude,
    Deepseek,
    Openrouter,
    Grok,
    Ollama,
}

impl ProviderType {
    /// 전체 목록
    pub const ALL: [ProviderType; 7] = [
        Self::Openai,
        Self::Gemini,
        Self::Claude,
        Self::Deepseek,
        Self::Openrouter,
        Self::Grok,
        Self::Ollama,
    ];

    /// 설정 파일 / CLI 에서 쓰는 식별자
    pub fn id(&self) -> &'static str {
        match self {
            Self::Openai => "openai",
            Self::Gemini => "gemini",
            Self::Claude => "claude",
            Self::Deepseek => "deepseek",
            Self::Openrouter => "openrouter",
            Self::Grok => "grok",
            Self::Ollama => "ollama",
        }
    }

    /// 표시 이름
    pub fn name(&self) -> &'static str {
        match self {
            Self::Openai => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Claude => "Claude",
            Self::Deepseek => "DeepSeek",
            Self::Openrouter => "OpenRouter",
            Self::Grok => "Grok",
            Self::Ollama => "Ollama",
        }
    }

    /// API Key 필요 여부
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }

    /// 로컬 서비스 여부
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Ollama)
    }

    /// 기본 endpoint (Ollama 는 설정된 서버 URL 기준 `/api/chat`)
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Openai => "https://api.openai.com/v1/chat/completions",
            Self::Gemini => {
                "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
            }
            Self::Claude => "https://api.anthropic.com/v1/messages",
            Self::Deepseek => "https://api.deepseek.com/v1/chat/completions",
            Self::Openrouter => "https://openrouter.ai/api/v1/chat/completions",
            Self::Grok => "https://api.x.ai/v1/chat/completions",
            Self::Ollama => "http://localhost:11434/api/chat",
        }
    }

    /// 기본 모델
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Openai => "gpt-3.5-turbo",
            Self::Gemini => "gemini-2.0-flash",
            Self::Claude => "claude-3-haiku-20240307",
            Self::Deepseek => "deepseek-coder",
            Self::Openrouter => "openai/gpt-4-turbo",
            Self::Grok => "grok-1",
            Self::Ollama => "llama3",
        }
    }

    /// 자격 증명을 덮어쓰는 환경변수
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Openai => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
            Self::Claude => "ANTHROPIC_API_KEY",
            Self::Deepseek => "DEEPSEEK_API_KEY",
            Self::Openrouter => "OPENROUTER_API_KEY",
            Self::Grok => "XAI_API_KEY",
            Self::Ollama => "OLLAMA_HOST",
        }
    }

    /// Resolve an identifier, falling back to Gemini for unknown ids.
    pub fn from_id_or_default(id: &str) -> Self {
        id.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown provider '{}', falling back to gemini", id);
            Self::default()
        })
    }
}

impl FromStr for ProviderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::Openai),
            "gemini" => Ok(Self::Gemini),
            "claude" | "anthropic" => Ok(Self::Claude),
            "deepseek" => Ok(Self::Deepseek),
            "openrouter" => Ok(Self::Openrouter),
            "grok" | "xai" => Ok(Self::Grok),
            "ollama" => Ok(Self::Ollama),
            other => Err(Error::InvalidInput(format!("unknown provider: {}", other))),
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl Default for ProviderType {
    fn default() -> Self {
        Self::Gemini
    }
}
