//! Debouncer actor
//!
//! Coalesces bursts of raw events into one [`SettledEvent`] per root once the
//! root has been quiet for a full interval. All per-root state lives inside a
//! single task; arrivals and deadline expiry are serialized through one
//! `select!`, so a reset can never race a firing timer.

use crate::event::{RawChangeEvent, SettledEvent};
use chrono::Utc;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Pending burst for one root
#[derive(Debug)]
struct Pending {
    latest: RawChangeEvent,
    deadline: Instant,
    events: usize,
}

/// Per-root quiescence timer
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    interval: Duration,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the actor on the current runtime
    pub fn spawn(
        self,
        events: mpsc::Receiver<RawChangeEvent>,
        settled: mpsc::Sender<SettledEvent>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(self.run(events, settled, cancel))
    }

    /// Run until cancelled or until the inbox has closed and every pending
    /// burst has fired.
    pub async fn run(
        self,
        mut events: mpsc::Receiver<RawChangeEvent>,
        settled: mpsc::Sender<SettledEvent>,
        cancel: CancellationToken,
    ) {
        let mut pending: HashMap<PathBuf, Pending> = HashMap::new();
        let mut inbox_open = true;

        loop {
            if !inbox_open && pending.is_empty() {
                break;
            }
            let next_deadline = pending.values().map(|p| p.deadline).min();

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                event = events.recv(), if inbox_open => match event {
                    Some(event) => self.record(&mut pending, event),
                    None => {
                        debug!("Debouncer inbox closed, {} burst(s) pending", pending.len());
                        inbox_open = false;
                    }
                },
                _ = sleep_until(next_deadline.unwrap_or_else(Instant::now)), if next_deadline.is_some() => {
                    if !fire_due(&mut pending, &settled) {
                        break;
                    }
                }
            }
        }
        debug!("Debouncer stopped");
    }

    fn record(&self, pending: &mut HashMap<PathBuf, Pending>, event: RawChangeEvent) {
        let deadline = Instant::now() + self.interval;
        match pending.get_mut(&event.root) {
            Some(burst) => {
                burst.latest = event;
                burst.deadline = deadline;
                burst.events += 1;
            }
            None => {
                pending.insert(
                    event.root.clone(),
                    Pending {
                        latest: event,
                        deadline,
                        events: 1,
                    },
                );
            }
        }
    }
}

/// Emit every burst whose deadline has passed.
///
/// Returns `false` when the downstream receiver is gone.
fn fire_due(pending: &mut HashMap<PathBuf, Pending>, settled: &mpsc::Sender<SettledEvent>) -> bool {
    let now = Instant::now();
    let due: Vec<PathBuf> = pending
        .iter()
        .filter(|(_, p)| p.deadline <= now)
        .map(|(root, _)| root.clone())
        .collect();

    for root in due {
        let Some(burst) = pending.remove(&root) else {
            continue;
        };
        let event = SettledEvent {
            root,
            settled_at: Utc::now(),
            last_event: burst.latest,
            events: burst.events,
        };
        match settled.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                debug!(
                    "Cycle in progress for {}, merged settled event ({} changes)",
                    event.root.display(),
                    event.events
                );
            }
            Err(TrySendError::Closed(_)) => return false,
        }
    }
    true
}
