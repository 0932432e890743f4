//! Events flowing through the watch pipeline
//!
//! raw OS notification → [`RawChangeEvent`] → debouncer → [`SettledEvent`] → coordinator

use chrono::{DateTime, Utc};
use notify::event::{EventKind, ModifyKind};
use std::fmt;
use std::path::PathBuf;

/// Kind of filesystem change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Write,
    Create,
    Remove,
    Rename,
}

impl ChangeKind {
    /// Map a notify event kind; access and metadata-only events are dropped.
    pub fn from_event_kind(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(Self::Create),
            EventKind::Remove(_) => Some(Self::Remove),
            EventKind::Modify(ModifyKind::Name(_)) => Some(Self::Rename),
            EventKind::Modify(ModifyKind::Metadata(_)) => None,
            EventKind::Modify(_) => Some(Self::Write),
            EventKind::Any => Some(Self::Write),
            EventKind::Access(_) | EventKind::Other => None,
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Write => "write",
            Self::Create => "create",
            Self::Remove => "remove",
            Self::Rename => "rename",
        };
        f.write_str(name)
    }
}

/// One observed change under a watched root
#[derive(Debug, Clone, PartialEq)]
pub struct RawChangeEvent {
    /// Watched root (absolute, canonical)
    pub root: PathBuf,
    /// Changed path, relative to `root`
    pub path: PathBuf,
    pub kind: ChangeKind,
    pub timestamp: DateTime<Utc>,
}

impl RawChangeEvent {
    pub fn new(root: impl Into<PathBuf>, path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            root: root.into(),
            path: path.into(),
            kind,
            timestamp: Utc::now(),
        }
    }
}

/// A root that has been quiet for a full debounce interval
#[derive(Debug, Clone, PartialEq)]
pub struct SettledEvent {
    pub root: PathBuf,
    /// End of the quiescence window
    pub settled_at: DateTime<Utc>,
    /// Latest raw event of the burst
    pub last_event: RawChangeEvent,
    /// Number of raw events coalesced
    pub events: usize,
}
