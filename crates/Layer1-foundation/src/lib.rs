//! # commitai-foundation
//!
//! Foundation layer for Commit-AI:
//! - Error: 공통 에러 타입
//! - Config: 영속 설정 (`~/.commit-ai/config.json`)
//! - Registry: Provider 종류, 메시지 언어
//! - Storage: JSON 파일 저장소
//!
//! ## 아키텍처
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  Layer4-cli      commit-ai (one-shot / watch)    │
//! │  Layer3-watch    watcher → debounce → coordinator│
//! │  Layer2-core     git collaborator                │
//! │  Layer2-provider commit message generation       │
//! │  Layer1          config, errors, registry        │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{AppConfig, WatchSettings, CONFIG_DIR, CONFIG_FILE};

// ============================================================================
// Registry (레지스트리)
// ============================================================================
pub use registry::{Language, ProviderType};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::JsonStore;
