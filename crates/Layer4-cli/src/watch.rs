//! `commit-ai watch`: run the auto-commit watcher until Ctrl+C

use anyhow::anyhow;
use commitai_core::GitOpener;
use commitai_foundation::{AppConfig, Language};
use commitai_provider::Gateway;
use commitai_watch::{AutoCommitWatcher, CommitOptions};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(clap::Args, Debug)]
pub struct WatchArgs {
    /// Seconds of quiet before a commit cycle runs
    #[arg(long)]
    pub interval: Option<u64>,

    /// Minimum number of relevant changed files per commit
    #[arg(long)]
    pub min_changes: Option<usize>,

    /// Additional ignore pattern (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Commit only what is already staged
    #[arg(long)]
    pub no_stage: bool,

    /// Use this message instead of generating one
    #[arg(long)]
    pub message: Option<String>,

    /// Only log errors from the watch loop
    #[arg(long)]
    pub silent: bool,
}

/// Defaults, then the config file, then command-line flags
pub fn options(
    config: &AppConfig,
    provider: Option<String>,
    language: Option<Language>,
    dry_run: bool,
    args: WatchArgs,
) -> CommitOptions {
    let mut options = CommitOptions::default();
    if let Some(provider) = provider {
        options = options.with_provider(provider);
    }
    if let Some(language) = language {
        options = options.with_language(language);
    }
    let mut options = options.resolve(config);

    if let Some(secs) = args.interval {
        options = options.with_interval(Duration::from_secs(secs));
    }
    if let Some(min_changes) = args.min_changes {
        options = options.with_min_changes(min_changes);
    }
    for pattern in args.ignore {
        options = options.add_ignore_pattern(pattern);
    }
    if args.no_stage {
        options = options.auto_stage(false);
    }
    if dry_run {
        options = options.dry_run(true);
    }
    if let Some(message) = args.message {
        options = options.with_commit_message(message);
    }
    options.silent(args.silent)
}

pub async fn run(
    gateway: &Gateway,
    config: &AppConfig,
    repo: PathBuf,
    options: CommitOptions,
) -> anyhow::Result<()> {
    let provider_id = options
        .provider
        .clone()
        .unwrap_or_else(|| config.ai_provider.clone());
    let generator = gateway
        .generator(&provider_id)
        .ok_or_else(|| anyhow!("Provider '{}' is not available", provider_id))?;

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Stopping watcher...");
                token.cancel();
            }
            Err(e) => warn!("Cannot listen for Ctrl+C: {}", e),
        }
    });

    AutoCommitWatcher::new(repo, options, GitOpener, generator)
        .run(cancel)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitai_foundation::WatchSettings;

    fn args() -> WatchArgs {
        WatchArgs {
            interval: None,
            min_changes: None,
            ignore: Vec::new(),
            no_stage: false,
            message: None,
            silent: false,
        }
    }

    #[test]
    fn test_options_from_config() {
        let config = AppConfig {
            ai_provider: "ollama".into(),
            language: "en".into(),
            ..AppConfig::default()
        };

        let options = options(&config, None, None, false, args());
        assert_eq!(options.provider.as_deref(), Some("ollama"));
        assert_eq!(options.language, Some(Language::En));
        assert!(options.do_commit);
        assert!(options.auto_stage);
    }

    #[test]
    fn test_flags_override_config() {
        let config = AppConfig {
            watch: Some(WatchSettings {
                interval_secs: Some(60),
                min_changes: Some(5),
                ..WatchSettings::default()
            }),
            ..AppConfig::default()
        };
        let watch = WatchArgs {
            interval: Some(5),
            ignore: vec!["target/".into()],
            no_stage: true,
            message: Some("chore: wip".into()),
            silent: true,
            ..args()
        };

        let options = options(&config, Some("claude".into()), Some(Language::Fr), true, watch);
        assert_eq!(options.interval, Duration::from_secs(5));
        assert_eq!(options.min_changes, 5);
        assert_eq!(options.provider.as_deref(), Some("claude"));
        assert_eq!(options.language, Some(Language::Fr));
        assert!(options.ignore_patterns.contains(&"target/".to_string()));
        assert!(options.ignore_patterns.contains(&"*.tmp".to_string()));
        assert!(!options.auto_stage);
        assert!(!options.do_commit);
        assert!(options.silent);
        assert_eq!(options.commit_message.as_deref(), Some("chore: wip"));
    }
}
