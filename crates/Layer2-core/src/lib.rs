//! commitai-core: version-control collaborator for Commit-AI
//!
//! Layer2 - git 연동 레이어
//!
//! # 주요 모듈
//!
//! - `git`: `Repository` / `RepositoryOpener` 추상화와 git CLI 구현
//!
//! # 사용 예시
//!
//! ```ignore
//! use commitai_core::{GitRepository, Repository};
//!
//! let repo = GitRepository::open(".")?;
//! let files = repo.changed_files().await?;
//! repo.stage(&files).await?;
//! let hash = repo.commit("feat: add watcher").await?;
//! ```

pub mod git;

// Re-exports: Git
pub use git::{
    build_summary, file_kind, parse_porcelain, GitError, GitOpener, GitOps, GitRepository,
    Repository, RepositoryOpener, StatusEntry,
};
