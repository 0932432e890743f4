//! Git Operations
//!
//! Core Git operations using the `git` command line.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum GitError {
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("Git command failed: {0}")]
    CommandFailed(String),

    #[error("No changes to commit")]
    NothingToCommit,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Git Operations
// ============================================================================

/// Git operations handler
#[derive(Debug, Clone)]
pub struct GitOps {
    /// Repository root directory
    root: PathBuf,
}

impl GitOps {
    /// Create new GitOps for a directory inside a repository
    pub fn new(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let root = Self::find_git_root(path.as_ref())?;
        Ok(Self { root })
    }

    /// Find the git repository root
    fn find_git_root(path: &Path) -> Result<PathBuf, GitError> {
        let start = std::fs::canonicalize(path)
            .map_err(|_| GitError::NotARepository(path.to_path_buf()))?;
        let mut current = if start.is_file() {
            start.parent().map(Path::to_path_buf).unwrap_or(start)
        } else {
            start
        };

        loop {
            if current.join(".git").exists() {
                return Ok(current);
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                return Err(GitError::NotARepository(path.to_path_buf()));
            }
        }
    }

    /// Get repository root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if directory is a git repository
    pub fn is_repo(path: impl AsRef<Path>) -> bool {
        Self::find_git_root(path.as_ref()).is_ok()
    }

    /// Run a git command and return its raw stdout
    pub async fn run_git(&self, args: &[&str]) -> Result<String, GitError> {
        debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(GitError::CommandFailed(format!(
                "git {}: {}",
                args.first().unwrap_or(&""),
                stderr.trim()
            )))
        }
    }

    /// Machine-readable status, NUL separated
    pub async fn status_porcelain(&self) -> Result<String, GitError> {
        self.run_git(&["status", "--porcelain=v1", "-z", "--untracked-files=all"])
            .await
    }

    /// Diff with extra context; staged changes when `cached`
    pub async fn diff(&self, cached: bool) -> Result<String, GitError> {
        if cached {
            self.run_git(&["diff", "--cached", "--no-color", "-U10"]).await
        } else {
            self.run_git(&["diff", "--no-color", "-U10"]).await
        }
    }

    /// Plain worktree diff
    pub async fn diff_plain(&self) -> Result<String, GitError> {
        self.run_git(&["diff", "--no-color"]).await
    }

    /// Diffstat; staged changes when `cached`
    pub async fn diff_stat(&self, cached: bool) -> Result<String, GitError> {
        if cached {
            self.run_git(&["diff", "--cached", "--stat"]).await
        } else {
            self.run_git(&["diff", "--stat"]).await
        }
    }

    /// Stage files, including deletions
    pub async fn add(&self, paths: &[String]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add", "--all", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run_git(&args).await?;
        Ok(())
    }

    /// Commit whatever is staged
    pub async fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_git(&["commit", "-m", message]).await?;
        Ok(())
    }

    /// Get short commit hash
    pub async fn head_short(&self) -> Result<String, GitError> {
        Ok(self
            .run_git(&["rev-parse", "--short", "HEAD"])
            .await?
            .trim()
            .to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
