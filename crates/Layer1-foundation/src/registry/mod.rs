//! Registry - 정적 레지스트리
//!
//! - `provider_type` - 메시지 생성 Provider 종류 (endpoint, 기본 모델, 환경변수)
//! - `language` - 커밋 메시지 언어

mod language;
mod provider_type;

pub use language::Language;
pub use provider_type::ProviderType;
