//! Git Integration Module
//!
//! - **ops**: thin async wrapper over the `git` command line
//! - **status**: `git status --porcelain=v1 -z` parsing
//! - **summary**: human-readable change summary for message generation
//! - **repository**: the `Repository` seam consumed by the watcher

pub mod ops;
pub mod repository;
pub mod status;
pub mod summary;

pub use ops::{GitError, GitOps};
pub use repository::{GitOpener, GitRepository, Repository, RepositoryOpener};
pub use status::{parse_porcelain, StatusEntry};
pub use summary::{build_summary, file_kind};
