//! Provider-specific error types
//!
//! ProviderError는 메시지 생성 서비스 관련 세부 에러를 관리합니다.

use thiserror::Error;

/// Errors that can occur during provider operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// API key is missing or invalid
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded{}", .retry_after_ms.map(|ms| format!(", retry after {}ms", ms)).unwrap_or_default())]
    RateLimited { retry_after_ms: Option<u64> },

    /// Server error (5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// Network error (connection failed, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid request (bad parameters)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid response from API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The service answered, but without any usable text
    #[error("Empty response from {0}")]
    EmptyResponse(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Provider not configured
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// JSON parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unknown error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ProviderError {
    /// Create from HTTP status code and body
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => ProviderError::Authentication(body.to_string()),
            429 => ProviderError::RateLimited {
                retry_after_ms: extract_retry_after(body),
            },
            400 | 422 => ProviderError::InvalidRequest(body.to_string()),
            404 => ProviderError::ModelNotFound(body.to_string()),
            500..=599 => ProviderError::ServerError(body.to_string()),
            _ => ProviderError::Unknown(format!("HTTP {}: {}", status, body)),
        }
    }

    /// Map a reqwest transport failure
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::ParseError(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

/// Try to extract retry-after value from error body (in milliseconds)
fn extract_retry_after(body: &str) -> Option<u64> {
    let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let secs = json
        .get("error")
        .and_then(|e| e.get("retry_after"))
        .and_then(|v| v.as_f64())?;
    Some((secs * 1000.0) as u64)
}

/// Pull the human-readable message out of a JSON error body, if there is one.
///
/// Handles `{"error": {"message": ".."}}` (OpenAI, Anthropic, Gemini) and
/// `{"error": ".."}` (Ollama).
pub(crate) fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    match json.get("error") {
        Some(serde_json::Value::String(msg)) => msg.clone(),
        Some(err) => err
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert!(matches!(
            ProviderError::from_http_status(401, "bad key"),
            ProviderError::Authentication(_)
        ));
        assert!(matches!(
            ProviderError::from_http_status(503, "down"),
            ProviderError::ServerError(_)
        ));
        assert!(matches!(
            ProviderError::from_http_status(404, "no model"),
            ProviderError::ModelNotFound(_)
        ));
        assert!(matches!(
            ProviderError::from_http_status(418, "teapot"),
            ProviderError::Unknown(_)
        ));
    }

    #[test]
    fn test_rate_limit_retry_after() {
        let err =
            ProviderError::from_http_status(429, r#"{"error": {"retry_after": 1.5}}"#);
        assert_eq!(
            err,
            ProviderError::RateLimited {
                retry_after_ms: Some(1500)
            }
        );
        assert_eq!(err.to_string(), "Rate limit exceeded, retry after 1500ms");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error": {"message": "invalid key", "type": "auth"}}"#),
            "invalid key"
        );
        assert_eq!(error_message(r#"{"error": "model not found"}"#), "model not found");
        assert_eq!(error_message("plain text"), "plain text");
    }
}
