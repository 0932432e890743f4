//! Raw event source
//!
//! Turns notify callbacks into [`RawChangeEvent`]s: paths are made relative
//! to the watched root and run through the ignore filter before anything
//! reaches the debouncer. Directories created or moved into the tree are
//! registered here, on the blocking pool.

use crate::event::{ChangeKind, RawChangeEvent};
use crate::ignore::IgnoreFilter;
use crate::tree::{register_tree, DirectoryRegistrar};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Notification callback payload
pub type NotifyResult = notify::Result<notify::Event>;

/// Forward notify callbacks into a bounded channel.
///
/// Never blocks the backend thread: when the channel is full the
/// notification is dropped.
pub fn channel_handler(tx: mpsc::Sender<NotifyResult>) -> impl Fn(NotifyResult) + Send + 'static {
    move |res| match tx.try_send(res) {
        Ok(()) | Err(TrySendError::Closed(_)) => {}
        Err(TrySendError::Full(_)) => debug!("Notification channel full, dropping event"),
    }
}

/// Raw event source for one watched root.
///
/// Owns the registrar (the notify handle) so it can register new
/// directories; dropping the source releases the handle.
pub struct EventSource<R> {
    root: PathBuf,
    filter: Arc<IgnoreFilter>,
    registrar: Arc<Mutex<R>>,
    silent: bool,
}

impl<R: DirectoryRegistrar + Send + 'static> EventSource<R> {
    pub fn new(root: impl Into<PathBuf>, filter: IgnoreFilter, registrar: R, silent: bool) -> Self {
        Self {
            root: root.into(),
            filter: Arc::new(filter),
            registrar: Arc::new(Mutex::new(registrar)),
            silent,
        }
    }

    /// Run until cancelled, the notification channel closes, or the
    /// downstream receiver is dropped.
    pub async fn run(
        self,
        mut notifications: mpsc::Receiver<NotifyResult>,
        events: mpsc::Sender<RawChangeEvent>,
        cancel: CancellationToken,
    ) {
        loop {
            let notification = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                notification = notifications.recv() => notification,
            };

            let event = match notification {
                None => {
                    debug!("Notification channel closed");
                    break;
                }
                Some(Err(e)) => {
                    warn!("File watcher error: {}", e);
                    continue;
                }
                Some(Ok(event)) => event,
            };

            let raws = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                raws = self.translate(event) => raws,
            };
            for raw in raws {
                if events.send(raw).await.is_err() {
                    debug!("Debouncer gone, stopping event source");
                    return;
                }
            }
        }
        debug!("Event source for {} stopped", self.root.display());
    }

    /// Map one notify event to zero or more raw change events
    async fn translate(&self, event: notify::Event) -> Vec<RawChangeEvent> {
        let Some(kind) = ChangeKind::from_event_kind(&event.kind) else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(event.paths.len());
        for path in event.paths {
            let Some(relative) = self.relative(&path) else {
                continue;
            };

            // a rename reports the destination too; only that one still exists
            let is_dir = matches!(kind, ChangeKind::Create | ChangeKind::Rename)
                && tokio::fs::metadata(&path)
                    .await
                    .map(|m| m.is_dir())
                    .unwrap_or(false);
            let ignored = if is_dir {
                self.filter.is_ignored_dir(&relative)
            } else {
                self.filter.is_ignored(&relative)
            };
            if ignored {
                continue;
            }

            if is_dir {
                self.register_new_directory(path).await;
            }

            if !self.silent {
                info!("Change detected: {} ({})", relative.display(), kind);
            }
            out.push(RawChangeEvent::new(self.root.clone(), relative, kind));
        }
        out
    }

    fn relative(&self, path: &Path) -> Option<PathBuf> {
        let relative = path.strip_prefix(&self.root).ok()?;
        if relative.as_os_str().is_empty() {
            return None;
        }
        Some(relative.to_path_buf())
    }

    /// Walk and register `dir` on the blocking pool
    async fn register_new_directory(&self, dir: PathBuf) {
        let root = self.root.clone();
        let filter = Arc::clone(&self.filter);
        let registrar = Arc::clone(&self.registrar);
        let silent = self.silent;

        let result = tokio::task::spawn_blocking(move || {
            let mut registrar = registrar.lock().unwrap_or_else(PoisonError::into_inner);
            let registered = register_tree(&root, &dir, &filter, &mut *registrar, silent);
            (dir, registered)
        })
        .await;

        match result {
            Ok((dir, Ok(count))) => {
                debug!("Registered {} new directories under {}", count, dir.display())
            }
            Ok((dir, Err(e))) => warn!("Failed to watch new directory {}: {}", dir.display(), e),
            Err(e) => warn!("Directory registration task failed: {}", e),
        }
    }
}
