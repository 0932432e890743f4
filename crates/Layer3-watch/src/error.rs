//! Watch error types
//!
//! - `WatchError`: setup failures, returned from `AutoCommitWatcher::run`
//! - `CycleError`: one failed commit cycle, logged and never propagated

use commitai_core::GitError;
use commitai_provider::ProviderError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the watcher from starting
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Invalid watch root {}: {source}", .path.display())]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open repository: {0}")]
    Repository(#[from] GitError),

    #[error("Cannot create file watcher: {0}")]
    Notify(#[from] notify::Error),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Directory registration task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Pipeline stage of a commit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStage {
    Open,
    ChangedFiles,
    Summary,
    Generate,
    Stage,
    Commit,
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open repository",
            Self::ChangedFiles => "list changed files",
            Self::Summary => "summarize changes",
            Self::Generate => "generate message",
            Self::Stage => "stage files",
            Self::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// Underlying failure of a cycle
#[derive(Error, Debug)]
pub enum CycleFailure {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A failed commit cycle: which root, which stage, and why
#[derive(Error, Debug)]
#[error("[{}] {stage} failed: {source}", .root.display())]
pub struct CycleError {
    pub root: PathBuf,
    pub stage: CycleStage,
    #[source]
    pub source: CycleFailure,
}

impl CycleError {
    pub fn new(root: impl Into<PathBuf>, stage: CycleStage, source: impl Into<CycleFailure>) -> Self {
        Self {
            root: root.into(),
            stage,
            source: source.into(),
        }
    }
}
