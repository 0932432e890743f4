//! Commit coordinator
//!
//! Consumes settled events one at a time and runs a commit cycle for each:
//! re-query the repository, filter, check the threshold, obtain a message,
//! stage and commit. A failed cycle is logged and the loop moves on.

use crate::error::{CycleError, CycleFailure, CycleStage};
use crate::event::SettledEvent;
use crate::ignore::IgnoreFilter;
use crate::options::CommitOptions;
use commitai_core::{Repository, RepositoryOpener};
use commitai_provider::CommitMessageGenerator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Result of one commit cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Not enough relevant changes yet
    BelowThreshold { relevant: usize, required: usize },
    /// Message obtained, commit disabled
    DryRun { message: String, files: Vec<String> },
    Committed {
        message: String,
        files: Vec<String>,
        hash: String,
    },
}

/// Policy engine for one watched root
pub struct CommitCoordinator<O: RepositoryOpener> {
    root: PathBuf,
    options: Arc<CommitOptions>,
    filter: IgnoreFilter,
    opener: O,
    generator: Arc<dyn CommitMessageGenerator>,
}

impl<O: RepositoryOpener> CommitCoordinator<O> {
    pub fn new(
        root: impl Into<PathBuf>,
        options: Arc<CommitOptions>,
        opener: O,
        generator: Arc<dyn CommitMessageGenerator>,
    ) -> Self {
        let filter = IgnoreFilter::new(&options.ignore_patterns);
        Self {
            root: root.into(),
            options,
            filter,
            opener,
            generator,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Process settled events until cancelled or the channel closes
    pub async fn run(self, mut settled: mpsc::Receiver<SettledEvent>, cancel: CancellationToken) {
        loop {
            let event = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                event = settled.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
            };

            debug!(
                "Settled at {} after {} change(s), last: {} ({})",
                event.settled_at.format("%H:%M:%S"),
                event.events,
                event.last_event.path.display(),
                event.last_event.kind
            );

            if let Err(e) = self.run_cycle().await {
                error!("Auto-commit cycle failed: {}", e);
            }
        }
        debug!("Commit coordinator for {} stopped", self.root.display());
    }

    fn fail<E: Into<CycleFailure>>(&self, stage: CycleStage) -> impl FnOnce(E) -> CycleError + '_ {
        move |e| CycleError::new(self.root.clone(), stage, e)
    }

    /// One full commit cycle against the current repository state
    pub async fn run_cycle(&self) -> Result<CycleOutcome, CycleError> {
        let repo = self.opener.open(&self.root).map_err(self.fail(CycleStage::Open))?;

        let changed = repo
            .changed_files()
            .await
            .map_err(self.fail(CycleStage::ChangedFiles))?;
        let files: Vec<String> = changed
            .into_iter()
            .filter(|f| !self.filter.is_ignored(Path::new(f)))
            .collect();

        if files.len() < self.options.min_changes {
            if !self.options.silent {
                info!(
                    "Not enough changes to commit ({}/{})",
                    files.len(),
                    self.options.min_changes
                );
            }
            return Ok(CycleOutcome::BelowThreshold {
                relevant: files.len(),
                required: self.options.min_changes,
            });
        }

        let message = match &self.options.commit_message {
            Some(message) => message.clone(),
            None => {
                let summary = repo
                    .change_summary()
                    .await
                    .map_err(self.fail(CycleStage::Summary))?;
                let message = self
                    .generator
                    .generate_commit_message(&summary, self.options.language())
                    .await
                    .map_err(self.fail(CycleStage::Generate))?;
                if !self.options.silent {
                    info!("Generated commit message: {}", message);
                }
                message
            }
        };

        if !self.options.do_commit {
            if !self.options.silent {
                info!("Dry run, would commit {} file(s) with: {}", files.len(), message);
            }
            return Ok(CycleOutcome::DryRun { message, files });
        }

        if self.options.auto_stage {
            repo.stage(&files).await.map_err(self.fail(CycleStage::Stage))?;
            if !self.options.silent {
                info!("Staged {} file(s)", files.len());
            }
        }

        let hash = repo.commit(&message).await.map_err(self.fail(CycleStage::Commit))?;
        if !self.options.silent {
            info!("Auto-committed {} file(s) as {}: {}", files.len(), hash, message);
        }

        Ok(CycleOutcome::Committed {
            message,
            files,
            hash,
        })
    }
}
