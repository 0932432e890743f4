//! Commit policy for the watch loop

use crate::error::WatchError;
use commitai_foundation::{AppConfig, Language, WatchSettings};
use std::time::Duration;

/// Default quiet period before a cycle runs
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Ignore patterns used when nothing else is configured
pub fn default_ignore_patterns() -> Vec<String> {
    [".git/", "*.tmp", "*.log", "*~"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Policy consumed by the commit coordinator.
///
/// Built once before the watcher starts and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitOptions {
    /// Debounce interval
    pub interval: Duration,
    /// Minimum number of relevant changes per commit (≥ 1)
    pub min_changes: usize,
    /// Provider identifier (unset until resolved)
    pub provider: Option<String>,
    /// Message language (unset until resolved)
    pub language: Option<Language>,
    pub ignore_patterns: Vec<String>,
    /// Suppress informational logging
    pub silent: bool,
    /// Fixed message instead of a generated one
    pub commit_message: Option<String>,
    /// Stage relevant files before committing
    pub auto_stage: bool,
    /// Commit, or only log the would-be message
    pub do_commit: bool,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            min_changes: 1,
            provider: None,
            language: None,
            ignore_patterns: default_ignore_patterns(),
            silent: false,
            commit_message: None,
            auto_stage: true,
            do_commit: true,
        }
    }
}

impl CommitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_min_changes(mut self, min_changes: usize) -> Self {
        self.min_changes = min_changes;
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn add_ignore_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_patterns.push(pattern.into());
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = Some(message.into());
        self
    }

    pub fn auto_stage(mut self, auto_stage: bool) -> Self {
        self.auto_stage = auto_stage;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.do_commit = !dry_run;
        self
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// Apply the `watch` section of the configuration file
    pub fn apply_watch_settings(mut self, settings: &WatchSettings) -> Self {
        if let Some(secs) = settings.interval_secs {
            self.interval = Duration::from_secs(secs);
        }
        if let Some(min_changes) = settings.min_changes {
            self.min_changes = min_changes;
        }
        if let Some(patterns) = &settings.ignore_patterns {
            self.ignore_patterns = patterns.clone();
        }
        if let Some(auto_stage) = settings.auto_stage {
            self.auto_stage = auto_stage;
        }
        self
    }

    /// Merge with the persisted configuration: the `watch` section overrides
    /// the defaults, and an unset provider or language comes from the config.
    pub fn resolve(mut self, config: &AppConfig) -> Self {
        if let Some(settings) = &config.watch {
            self = self.apply_watch_settings(settings);
        }
        if self.provider.as_deref().map_or(true, |p| p.trim().is_empty()) {
            self.provider = Some(config.ai_provider.clone());
        }
        if self.language.is_none() {
            self.language = Some(config.language());
        }
        self
    }

    /// Reject values the watch loop cannot run with
    pub fn validate(&self) -> Result<(), WatchError> {
        if self.min_changes == 0 {
            return Err(WatchError::InvalidOptions(
                "min_changes must be at least 1".to_string(),
            ));
        }
        if self.interval.is_zero() {
            return Err(WatchError::InvalidOptions(
                "interval must be greater than zero".to_string(),
            ));
        }
        if matches!(&self.commit_message, Some(m) if m.trim().is_empty()) {
            return Err(WatchError::InvalidOptions(
                "commit message override is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Language used for generated messages
    pub fn language(&self) -> Language {
        self.language.unwrap_or_default()
    }
}
