//! Config - 영속 설정 관리
//!
//! - `app.rs` - AppConfig (`~/.commit-ai/config.json`) + watch 섹션

mod app;

pub use app::{AppConfig, WatchSettings, CONFIG_DIR, CONFIG_FILE};
