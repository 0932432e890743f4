//! App Config - 사용자 설정
//!
//! `~/.commit-ai/config.json` 에 저장되는 설정. 키는 snake_case.

use crate::registry::{Language, ProviderType};
use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 설정 디렉토리명 (홈 디렉토리 기준)
pub const CONFIG_DIR: &str = ".commit-ai";

/// 설정 파일명
pub const CONFIG_FILE: &str = "config.json";

// ============================================================================
// AppConfig
// ============================================================================

/// Commit-AI 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Provider 식별자 (openai, gemini, claude, ...)
    pub ai_provider: String,

    pub openai_key: String,
    pub gemini_key: String,
    pub claude_key: String,
    pub deepseek_key: String,
    pub openrouter_key: String,
    pub grok_key: String,

    /// Ollama 서버 URL
    pub ollama_url: String,
    pub ollama_model: String,

    /// 기본 저장소 경로 (비어 있으면 현재 디렉토리)
    pub repo_path: String,

    /// 확인 없이 커밋
    pub auto_commit: bool,

    pub commit_style: String,

    /// 메시지 언어 코드 (pt-br, en, es, fr, de)
    pub language: String,

    /// watch 모드 설정
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch: Option<WatchSettings>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai_provider: ProviderType::default().id().to_string(),
            openai_key: String::new(),
            gemini_key: String::new(),
            claude_key: String::new(),
            deepseek_key: String::new(),
            openrouter_key: String::new(),
            grok_key: String::new(),
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: ProviderType::Ollama.default_model().to_string(),
            repo_path: String::new(),
            auto_commit: false,
            commit_style: "conventional".to_string(),
            language: Language::default().code().to_string(),
            watch: None,
        }
    }
}

/// watch 모드 설정 (모든 필드 optional, 비어 있으면 기본값 사용)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_changes: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_stage: Option<bool>,
}

impl AppConfig {
    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 사용자 설정 저장소
    pub fn store() -> Result<JsonStore> {
        JsonStore::user(CONFIG_DIR)
    }

    /// 설정 파일 경로
    pub fn path() -> Result<PathBuf> {
        Ok(Self::store()?.file_path(CONFIG_FILE))
    }

    /// 사용자 설정 로드 (없으면 기본값을 저장 후 반환) + 환경변수 적용
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::store()?)?;
        config.apply_env();
        Ok(config)
    }

    /// 지정한 저장소에서 로드. 파일이 없으면 기본 설정을 만들어 저장한다.
    pub fn load_from(store: &JsonStore) -> Result<Self> {
        match store.load_optional::<AppConfig>(CONFIG_FILE)? {
            Some(config) => Ok(config),
            None => {
                let config = Self::default();
                store.save(CONFIG_FILE, &config)?;
                tracing::info!(
                    "Created default configuration at {}",
                    store.file_path(CONFIG_FILE).display()
                );
                Ok(config)
            }
        }
    }

    /// 사용자 설정 저장
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::store()?)
    }

    pub fn save_to(&self, store: &JsonStore) -> Result<()> {
        store.save(CONFIG_FILE, self)
    }

    // ========================================================================
    // 환경변수
    // ========================================================================

    /// 비어 있는 자격 증명을 환경변수로 채운다
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for provider in ProviderType::ALL {
            let Some(value) = lookup(provider.env_var()).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            let slot = match provider {
                ProviderType::Openai => &mut self.openai_key,
                ProviderType::Gemini => &mut self.gemini_key,
                ProviderType::Claude => &mut self.claude_key,
                ProviderType::Deepseek => &mut self.deepseek_key,
                ProviderType::Openrouter => &mut self.openrouter_key,
                ProviderType::Grok => &mut self.grok_key,
                ProviderType::Ollama => &mut self.ollama_url,
            };
            // Ollama URL 은 기본값이 있으므로 환경변수가 항상 우선
            if slot.is_empty() || provider == ProviderType::Ollama {
                *slot = value;
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// 선택된 Provider (알 수 없으면 gemini)
    pub fn provider_type(&self) -> ProviderType {
        ProviderType::from_id_or_default(&self.ai_provider)
    }

    /// 선택된 언어 (알 수 없으면 pt-br)
    pub fn language(&self) -> Language {
        Language::from_code_or_default(&self.language)
    }

    /// Provider 별 API key (Ollama 는 None)
    pub fn api_key_for(&self, provider: ProviderType) -> Option<&str> {
        let key = match provider {
            ProviderType::Openai => &self.openai_key,
            ProviderType::Gemini => &self.gemini_key,
            ProviderType::Claude => &self.claude_key,
            ProviderType::Deepseek => &self.deepseek_key,
            ProviderType::Openrouter => &self.openrouter_key,
            ProviderType::Grok => &self.grok_key,
            ProviderType::Ollama => return None,
        };
        Some(key.as_str())
    }

    /// 저장소 경로 (설정이 비어 있으면 None)
    pub fn repo_path(&self) -> Option<PathBuf> {
        if self.repo_path.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.repo_path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ai_provider, "gemini");
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.ollama_model, "llama3");
        assert_eq!(config.language(), Language::PtBr);
        assert!(!config.auto_commit);
        assert!(config.repo_path().is_none());
    }

    #[test]
    fn test_load_creates_default_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonStore::new(tmp.path().join(CONFIG_DIR));

        let config = AppConfig::load_from(&store).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(store.exists(CONFIG_FILE));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonStore::new(tmp.path());
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"{"ai_provider": "anthropic", "language": "en", "watch": {"min_changes": 3}}"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&store).unwrap();
        assert_eq!(config.provider_type(), ProviderType::Claude);
        assert_eq!(config.language(), Language::En);
        assert_eq!(config.ollama_model, "llama3");
        let watch = config.watch.unwrap();
        assert_eq!(watch.min_changes, Some(3));
        assert!(watch.interval_secs.is_none());
    }

    #[test]
    fn test_env_fills_empty_keys_only() {
        let mut config = AppConfig {
            openai_key: "from-file".into(),
            ..Default::default()
        };
        let env: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "from-env"),
            ("ANTHROPIC_API_KEY", "sk-ant"),
            ("OLLAMA_HOST", "http://ollama:11434"),
        ]
        .into_iter()
        .collect();

        config.apply_env_with(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.openai_key, "from-file");
        assert_eq!(config.claude_key, "sk-ant");
        assert_eq!(config.ollama_url, "http://ollama:11434");
        assert_eq!(config.api_key_for(ProviderType::Claude), Some("sk-ant"));
        assert_eq!(config.api_key_for(ProviderType::Ollama), None);
    }

    #[test]
    fn test_save_roundtrip_keys_are_snake_case() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonStore::new(tmp.path());
        AppConfig::default().save_to(&store).unwrap();

        let raw = std::fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap();
        assert!(raw.contains("\"ai_provider\""));
        assert!(raw.contains("\"ollama_url\""));
        assert!(!raw.contains("\"watch\""));
    }
}
