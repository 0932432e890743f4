use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 커밋 메시지 언어
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Language {
    #[default]
    #[serde(rename = "pt-br")]
    PtBr,
    #[serde(rename = "en")]
    En,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "de")]
    De,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::PtBr => "pt-br",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }

    /// Resolve a language code, falling back to the default for unknown codes.
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pt-br" | "pt" | "pt_br" => Ok(Self::PtBr),
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            "fr" => Ok(Self::Fr),
            "de" => Ok(Self::De),
            other => Err(Error::InvalidInput(format!("unsupported language: {}", other))),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("PT-BR".parse::<Language>().unwrap(), Language::PtBr);
        assert!("jp".parse::<Language>().is_err());
    }

    #[test]
    fn test_unknown_code_uses_default() {
        assert_eq!(Language::from_code_or_default("jp"), Language::PtBr);
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::PtBr).unwrap(), "\"pt-br\"");
        let lang: Language = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(lang, Language::De);
    }
}
