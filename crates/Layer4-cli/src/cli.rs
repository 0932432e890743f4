//! One-shot mode: generate a message for the current changes and commit

use anyhow::{anyhow, Context};
use commitai_core::{GitRepository, Repository};
use commitai_foundation::{AppConfig, Language};
use commitai_provider::{CommitMessageGenerator, Gateway};
use commitai_watch::{CommitOptions, IgnoreFilter};
use std::path::Path;

/// Flags that shape a one-shot run
#[derive(Debug, Clone, Default)]
pub struct OneShot {
    pub provider: Option<String>,
    pub language: Option<Language>,
    pub dry_run: bool,
    pub yes: bool,
}

impl OneShot {
    /// Whether this run ends in a commit
    pub fn commits(&self, config: &AppConfig) -> bool {
        !self.dry_run && (self.yes || config.auto_commit)
    }
}

/// Run a single commit-message round against `repo_path`
pub async fn run_once(
    config: &AppConfig,
    gateway: &Gateway,
    repo_path: &Path,
    request: OneShot,
) -> anyhow::Result<()> {
    let repo = GitRepository::open(repo_path)
        .with_context(|| format!("Cannot open repository at {}", repo_path.display()))?;

    let patterns = CommitOptions::default().resolve(config).ignore_patterns;
    let filter = IgnoreFilter::new(&patterns);
    let files = relevant_files(&filter, repo.changed_files().await?);

    if files.is_empty() {
        println!("No changes to commit.");
        return Ok(());
    }

    println!("Changed files:");
    for file in &files {
        println!("  {}", file);
    }

    let commit = request.commits(config);
    if commit && !repo.has_staged().await? {
        repo.stage(&files).await?;
    }

    let summary = repo.change_summary().await?;
    let provider_id = request
        .provider
        .unwrap_or_else(|| config.ai_provider.clone());
    let generator = gateway
        .generator(&provider_id)
        .ok_or_else(|| anyhow!("Provider '{}' is not available", provider_id))?;

    println!("\nGenerating commit message...");
    let language = request.language.unwrap_or_else(|| config.language());
    let message = generator
        .generate_commit_message(&summary, language)
        .await
        .context("Failed to generate commit message")?;

    println!("\n{}\n", message);

    if commit {
        let hash = repo.commit(&message).await?;
        println!("✓ Committed {}", hash);
    } else if !request.dry_run {
        println!("Run again with --yes to commit with this message.");
    }
    Ok(())
}

fn relevant_files(filter: &IgnoreFilter, changed: Vec<String>) -> Vec<String> {
    changed
        .into_iter()
        .filter(|f| !filter.is_ignored(Path::new(f)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitai_watch::default_ignore_patterns;

    #[test]
    fn test_commits_decision() {
        let mut config = AppConfig::default();
        let ask = OneShot::default();
        assert!(!ask.commits(&config));

        let yes = OneShot {
            yes: true,
            ..OneShot::default()
        };
        assert!(yes.commits(&config));

        config.auto_commit = true;
        assert!(ask.commits(&config));

        let dry = OneShot {
            dry_run: true,
            yes: true,
            ..OneShot::default()
        };
        assert!(!dry.commits(&config));
    }

    #[test]
    fn test_relevant_files() {
        let filter = IgnoreFilter::new(&default_ignore_patterns());
        let files = relevant_files(
            &filter,
            vec!["src/main.rs".into(), "build.log".into(), "notes.txt~".into()],
        );
        assert_eq!(files, vec!["src/main.rs".to_string()]);
    }
}
