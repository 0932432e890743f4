//! # commitai-watch
//!
//! Continuous auto-commit pipeline:
//! - Ignore: 무시 패턴 매칭 (`.git` 항상 제외)
//! - Tree: 시작 시 디렉토리 등록
//! - Source: notify 이벤트 → `RawChangeEvent`
//! - Debounce: 루트별 quiet period → `SettledEvent`
//! - Coordinator: 임계값, 메시지 생성, 스테이징, 커밋
//! - Watcher: 전체 파이프라인 조립 및 종료 처리

pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod event;
pub mod ignore;
pub mod options;
pub mod source;
pub mod tree;
pub mod watcher;

pub use coordinator::{CommitCoordinator, CycleOutcome};
pub use debounce::Debouncer;
pub use error::{CycleError, CycleFailure, CycleStage, WatchError};
pub use event::{ChangeKind, RawChangeEvent, SettledEvent};
pub use ignore::{should_ignore, IgnoreFilter};
pub use options::{default_ignore_patterns, CommitOptions, DEFAULT_INTERVAL};
pub use source::EventSource;
pub use tree::{register_tree, DirectoryRegistrar};
pub use watcher::AutoCommitWatcher;
