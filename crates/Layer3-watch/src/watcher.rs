//! Auto-commit watcher
//!
//! Wires the pipeline together for one root:
//!
//! ```text
//! notify ─▶ EventSource ─▶ Debouncer ─▶ CommitCoordinator ─▶ git / provider
//!       (1024)         (1024)        (1)
//! ```

use crate::coordinator::CommitCoordinator;
use crate::debounce::Debouncer;
use crate::error::WatchError;
use crate::ignore::IgnoreFilter;
use crate::options::CommitOptions;
use crate::source::{channel_handler, EventSource};
use crate::tree::register_tree;
use commitai_core::RepositoryOpener;
use commitai_provider::CommitMessageGenerator;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Buffer for raw notifications and filtered change events
const EVENT_BUFFER: usize = 1024;

/// One settled event may wait behind a running cycle; later ones are merged
const SETTLED_BUFFER: usize = 1;

/// Watches one directory tree and commits on its own schedule
pub struct AutoCommitWatcher<O: RepositoryOpener> {
    root: PathBuf,
    options: CommitOptions,
    opener: O,
    generator: Arc<dyn CommitMessageGenerator>,
}

impl<O: RepositoryOpener> AutoCommitWatcher<O> {
    pub fn new(
        root: impl Into<PathBuf>,
        options: CommitOptions,
        opener: O,
        generator: Arc<dyn CommitMessageGenerator>,
    ) -> Self {
        Self {
            root: root.into(),
            options,
            opener,
            generator,
        }
    }

    /// Run until `cancel` fires.
    ///
    /// Setup failures (bad options, unusable root, no repository, notify
    /// backend) are returned before any task is spawned. After that every
    /// per-cycle failure is logged and the watch continues.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), WatchError> {
        self.options.validate()?;

        let root = std::fs::canonicalize(&self.root).map_err(|source| WatchError::InvalidRoot {
            path: self.root.clone(),
            source,
        })?;
        if !root.is_dir() {
            return Err(WatchError::InvalidRoot {
                path: self.root.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        self.opener.open(&root)?;

        let silent = self.options.silent;
        let filter = IgnoreFilter::new(&self.options.ignore_patterns);

        let (notify_tx, notify_rx) = mpsc::channel(EVENT_BUFFER);
        let mut handle = notify::recommended_watcher(channel_handler(notify_tx))?;

        if !silent {
            info!(
                "Auto-commit watcher started for {} (interval {:?}, min changes {})",
                root.display(),
                self.options.interval,
                self.options.min_changes
            );
        }
        let (registered, handle, filter) = {
            let root = root.clone();
            tokio::task::spawn_blocking(move || {
                register_tree(&root, &root, &filter, &mut handle, silent)
                    .map(|count| (count, handle, filter))
            })
            .await??
        };
        debug!("Registered {} directories", registered);

        let options = Arc::new(self.options);
        let (raw_tx, raw_rx) = mpsc::channel(EVENT_BUFFER);
        let (settled_tx, settled_rx) = mpsc::channel(SETTLED_BUFFER);

        let source = EventSource::new(root.clone(), filter, handle, silent);
        let source_task = tokio::spawn(source.run(notify_rx, raw_tx, cancel.child_token()));

        let debounce_task =
            Debouncer::new(options.interval).spawn(raw_rx, settled_tx, cancel.child_token());

        let coordinator = CommitCoordinator::new(root.clone(), options, self.opener, self.generator);
        let coordinator_task = tokio::spawn(coordinator.run(settled_rx, cancel.child_token()));

        cancel.cancelled().await;

        for (name, task) in [
            ("event source", source_task),
            ("debouncer", debounce_task),
            ("coordinator", coordinator_task),
        ] {
            if let Err(e) = task.await {
                warn!("Watch task {} ended abnormally: {}", name, e);
            }
        }

        if !silent {
            info!("Auto-commit watcher stopped for {}", root.display());
        }
        Ok(())
    }
}
