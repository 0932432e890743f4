//! Commit-AI CLI - Main entry point

mod cli;
mod watch;

use clap::{Parser, Subcommand};
use commitai_foundation::{AppConfig, Language};
use commitai_provider::Gateway;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Commit-AI - commit messages written from your diff
#[derive(Parser, Debug)]
#[command(name = "commit-ai")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Repository path (defaults to the configured repo_path, then the current directory)
    #[arg(long, global = true)]
    repo: Option<PathBuf>,

    /// Provider to use (openai, gemini, claude, deepseek, openrouter, grok, ollama)
    #[arg(long, global = true)]
    provider: Option<String>,

    /// Message language (pt-br, en, es, fr, de)
    #[arg(long, global = true)]
    language: Option<Language>,

    /// Generate the message but never stage or commit
    #[arg(long, global = true)]
    dry_run: bool,

    /// Commit without asking
    #[arg(short, long)]
    yes: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Watch the repository and commit automatically when edits settle
    Watch(watch::WatchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Args {
        command,
        repo,
        provider,
        language,
        dry_run,
        yes,
        debug,
    } = Args::parse();

    // Initialize logging
    let log_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}", e);
        let mut config = AppConfig::default();
        config.apply_env();
        config
    });

    let repo = repo
        .or_else(|| config.repo_path())
        .unwrap_or_else(|| PathBuf::from("."));
    let gateway = Gateway::from_config(&config);

    match command {
        Some(Command::Watch(args)) => {
            let options = watch::options(&config, provider, language, dry_run, args);
            watch::run(&gateway, &config, repo, options).await
        }
        None => {
            let request = cli::OneShot {
                provider,
                language,
                dry_run,
                yes,
            };
            cli::run_once(&config, &gateway, &repo, request).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_args() {
        let args = Args::try_parse_from([
            "commit-ai",
            "--repo",
            "/tmp/project",
            "--provider",
            "ollama",
            "--language",
            "en",
            "--yes",
        ])
        .unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.repo, Some(PathBuf::from("/tmp/project")));
        assert_eq!(args.provider.as_deref(), Some("ollama"));
        assert_eq!(args.language, Some(Language::En));
        assert!(args.yes);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_watch_args() {
        let args = Args::try_parse_from([
            "commit-ai",
            "watch",
            "--interval",
            "10",
            "--min-changes",
            "3",
            "--ignore",
            "target/",
            "--ignore",
            "*.bak",
            "--no-stage",
            "--dry-run",
            "--silent",
        ])
        .unwrap();
        assert!(args.dry_run);
        let Some(Command::Watch(watch)) = args.command else {
            panic!("expected watch subcommand");
        };
        assert_eq!(watch.interval, Some(10));
        assert_eq!(watch.min_changes, Some(3));
        assert_eq!(watch.ignore, vec!["target/", "*.bak"]);
        assert!(watch.no_stage);
        assert!(watch.silent);
        assert!(watch.message.is_none());
    }

    #[test]
    fn test_unknown_language_rejected() {
        assert!(Args::try_parse_from(["commit-ai", "--language", "klingon"]).is_err());
    }
}
