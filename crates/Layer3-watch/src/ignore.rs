//! Ignore filter
//!
//! Rules, first match wins:
//! 1. any `.git` path segment is ignored, whatever the patterns say
//! 2. `name/` (trailing separator) ignores everything below a directory
//!    segment matching `name`, at any depth; `a/b/` matches consecutive segments
//! 3. any other pattern is a glob matched against the base name only

use glob::{MatchOptions, Pattern};
use std::borrow::Cow;
use std::path::{Component, Path};
use tracing::warn;

/// Version-control metadata directory
pub const METADATA_DIR: &str = ".git";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
enum Rule {
    /// Consecutive directory segments
    Dir(Vec<Pattern>),
    /// Base name
    Name(Pattern),
}

/// Compiled ignore patterns
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    rules: Vec<Rule>,
}

impl IgnoreFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let rules = patterns
            .iter()
            .filter_map(|p| Self::compile_rule(p.as_ref()))
            .collect();
        Self { rules }
    }

    fn compile_rule(raw: &str) -> Option<Rule> {
        let trimmed = raw.trim();
        let pattern = trimmed
            .strip_prefix("./")
            .unwrap_or(trimmed)
            .trim_start_matches('/');
        if pattern.is_empty() {
            return None;
        }

        if pattern.ends_with('/') || pattern.ends_with('\\') {
            let segments: Option<Vec<Pattern>> = pattern
                .split(['/', '\\'])
                .filter(|s| !s.is_empty())
                .map(compile)
                .collect();
            return segments.filter(|s| !s.is_empty()).map(Rule::Dir);
        }

        compile(pattern).map(Rule::Name)
    }

    /// Whether a file path (relative to the watched root) is ignored
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.check(path, false)
    }

    /// Whether a directory path is ignored; the directory itself counts
    /// as part of its own ancestry.
    pub fn is_ignored_dir(&self, path: &Path) -> bool {
        self.check(path, true)
    }

    fn check(&self, path: &Path, is_dir: bool) -> bool {
        let segments = segments(path);
        if segments.iter().any(|s| *s == METADATA_DIR) {
            return true;
        }
        let Some(name) = segments.last() else {
            return false;
        };

        let ancestry = if is_dir {
            &segments[..]
        } else {
            &segments[..segments.len() - 1]
        };

        self.rules.iter().any(|rule| match rule {
            Rule::Dir(dir) => contains_run(ancestry, dir),
            Rule::Name(pattern) => pattern.matches_with(name, MATCH_OPTIONS),
        })
    }
}

/// Check a single path against a pattern list
pub fn should_ignore<S: AsRef<str>>(path: &Path, patterns: &[S]) -> bool {
    IgnoreFilter::new(patterns).is_ignored(path)
}

fn compile(pattern: &str) -> Option<Pattern> {
    match Pattern::new(pattern) {
        Ok(p) => Some(p),
        Err(e) => {
            warn!("Invalid ignore pattern '{}', matching literally: {}", pattern, e);
            Pattern::new(&Pattern::escape(pattern)).ok()
        }
    }
}

fn segments(path: &Path) -> Vec<Cow<'_, str>> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect()
}

/// `haystack` contains consecutive segments matching `needle`
fn contains_run(haystack: &[Cow<'_, str>], needle: &[Pattern]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| {
        window
            .iter()
            .zip(needle)
            .all(|(segment, pattern)| pattern.matches_with(segment, MATCH_OPTIONS))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> Vec<String> {
        vec![".git/".into(), "*.tmp".into(), "*.log".into(), "*~".into()]
    }

    #[test]
    fn test_metadata_dir_always_ignored() {
        let empty: [&str; 0] = [];
        assert!(should_ignore(Path::new(".git/index"), &empty));
        assert!(should_ignore(Path::new("sub/.git/HEAD"), &empty));
        assert!(IgnoreFilter::new(&empty).is_ignored_dir(Path::new(".git")));
        assert!(!should_ignore(Path::new("src/.gitignore"), &empty));
    }

    #[test]
    fn test_glob_matches_base_name() {
        let filter = IgnoreFilter::new(&patterns());
        assert!(filter.is_ignored(Path::new("b.tmp")));
        assert!(filter.is_ignored(Path::new("logs/deep/server.log")));
        assert!(filter.is_ignored(Path::new("notes.md~")));
        assert!(!filter.is_ignored(Path::new("a.go")));
        assert!(!filter.is_ignored(Path::new("tmp/a.go")));
    }

    #[test]
    fn test_directory_rule_matches_any_ancestor() {
        let filter = IgnoreFilter::new(&["target/", "node_modules/"]);
        assert!(filter.is_ignored(Path::new("target/debug/app")));
        assert!(filter.is_ignored(Path::new("web/node_modules/x/index.js")));
        // a file named like the directory is not below it
        assert!(!filter.is_ignored(Path::new("target")));
        assert!(!filter.is_ignored(Path::new("src/targets/a.rs")));
    }

    #[test]
    fn test_directory_semantics_prune_the_dir_itself() {
        let filter = IgnoreFilter::new(&["target/"]);
        assert!(filter.is_ignored_dir(Path::new("target")));
        assert!(filter.is_ignored_dir(Path::new("crates/a/target")));
        assert!(!filter.is_ignored_dir(Path::new("src")));
    }

    #[test]
    fn test_multi_segment_directory_rule() {
        let filter = IgnoreFilter::new(&["build/cache/"]);
        assert!(filter.is_ignored(Path::new("app/build/cache/obj.o")));
        assert!(!filter.is_ignored(Path::new("build/out/cache/obj.o")));
        assert!(!filter.is_ignored(Path::new("build/main.c")));
    }

    #[test]
    fn test_pattern_with_separator_only_sees_base_name() {
        let patterns = ["docs/*.md"];
        assert!(!should_ignore(Path::new("docs/intro.md"), &patterns));
        assert!(!should_ignore(Path::new("docs/api/intro.md"), &patterns));
        assert!(!should_ignore(Path::new("README.md"), &patterns));
    }

    #[test]
    fn test_is_idempotent() {
        let filter = IgnoreFilter::new(&patterns());
        for path in ["a.go", "b.tmp", ".git/config", "x/y~"] {
            let first = filter.is_ignored(Path::new(path));
            for _ in 0..3 {
                assert_eq!(filter.is_ignored(Path::new(path)), first);
                assert_eq!(should_ignore(Path::new(path), &patterns()), first);
            }
        }
    }

    #[test]
    fn test_blank_and_invalid_patterns() {
        let filter = IgnoreFilter::new(&["", "   ", "[abc"]);
        assert!(!filter.is_ignored(Path::new("a.go")));
        // an unparsable glob still matches itself literally
        assert!(filter.is_ignored(Path::new("[abc")));
    }

    #[test]
    fn test_empty_path_not_ignored() {
        assert!(!IgnoreFilter::new(&patterns()).is_ignored(Path::new("")));
    }
}
