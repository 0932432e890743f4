//! Repository abstraction consumed by the watcher
//!
//! The watcher only needs five operations, so they sit behind a trait;
//! `GitRepository` implements them with the git CLI.

use super::ops::{GitError, GitOps};
use super::status::parse_porcelain;
use super::summary::build_summary;
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info, warn};

/// Version-control operations used by one commit cycle
#[async_trait]
pub trait Repository: Send + Sync {
    /// Repository root
    fn root(&self) -> &Path;

    /// Paths (relative to the root) whose index or worktree state differs
    async fn changed_files(&self) -> Result<Vec<String>, GitError>;

    /// Human-readable summary of the current changes
    async fn change_summary(&self) -> Result<String, GitError>;

    /// Stage exactly these paths
    async fn stage(&self, files: &[String]) -> Result<(), GitError>;

    /// Commit what is staged; returns the short hash
    async fn commit(&self, message: &str) -> Result<String, GitError>;
}

/// Opens a [`Repository`] for a path
pub trait RepositoryOpener: Send + Sync + 'static {
    type Repo: Repository + 'static;

    fn open(&self, path: &Path) -> Result<Self::Repo, GitError>;
}

// ============================================================================
// Git CLI implementation
// ============================================================================

/// [`Repository`] backed by the `git` command line
#[derive(Debug, Clone)]
pub struct GitRepository {
    ops: GitOps,
}

impl GitRepository {
    /// Open the repository containing `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        Ok(Self {
            ops: GitOps::new(path)?,
        })
    }

    pub fn ops(&self) -> &GitOps {
        &self.ops
    }

    /// Whether anything is recorded in the index
    pub async fn has_staged(&self) -> Result<bool, GitError> {
        let status = self.ops.status_porcelain().await?;
        Ok(parse_porcelain(&status).iter().any(|e| e.is_staged()))
    }
}

#[async_trait]
impl Repository for GitRepository {
    fn root(&self) -> &Path {
        self.ops.root()
    }

    async fn changed_files(&self) -> Result<Vec<String>, GitError> {
        let status = self.ops.status_porcelain().await?;
        Ok(parse_porcelain(&status)
            .into_iter()
            .filter(|e| !e.is_ignored())
            .map(|e| e.path)
            .collect())
    }

    async fn change_summary(&self) -> Result<String, GitError> {
        let files = self.changed_files().await?;
        if files.is_empty() {
            return Ok(build_summary(&files, None, None));
        }

        let staged = self.has_staged().await.unwrap_or(false);

        let stat = match self.ops.diff_stat(staged).await {
            Ok(stat) => Some(stat),
            Err(e) => {
                debug!("diff --stat failed: {}", e);
                None
            }
        };

        let diff = match self.ops.diff(staged).await {
            Ok(diff) => Some(diff),
            Err(e) => {
                warn!("Detailed diff failed, retrying plain diff: {}", e);
                self.ops.diff_plain().await.ok()
            }
        };

        Ok(build_summary(&files, stat.as_deref(), diff.as_deref()))
    }

    async fn stage(&self, files: &[String]) -> Result<(), GitError> {
        self.ops.add(files).await
    }

    async fn commit(&self, message: &str) -> Result<String, GitError> {
        if !self.has_staged().await? {
            return Err(GitError::NothingToCommit);
        }

        self.ops.commit(message).await?;
        let hash = self.ops.head_short().await?;

        info!("Created commit: {}", hash);
        Ok(hash)
    }
}

/// Opens [`GitRepository`] instances
#[derive(Debug, Clone, Copy, Default)]
pub struct GitOpener;

impl RepositoryOpener for GitOpener {
    type Repo = GitRepository;

    fn open(&self, path: &Path) -> Result<GitRepository, GitError> {
        GitRepository::open(path)
    }
}
