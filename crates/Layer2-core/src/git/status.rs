//! `git status --porcelain=v1 -z` parsing

/// One entry of the porcelain status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Index (staging area) status code
    pub index: char,
    /// Worktree status code
    pub worktree: char,
    /// Path relative to the repository root (new path for renames)
    pub path: String,
    /// Original path for renames and copies
    pub orig_path: Option<String>,
}

impl StatusEntry {
    /// Something is recorded in the index for this path
    pub fn is_staged(&self) -> bool {
        !matches!(self.index, ' ' | '?' | '!')
    }

    pub fn is_untracked(&self) -> bool {
        self.index == '?' && self.worktree == '?'
    }

    pub fn is_ignored(&self) -> bool {
        self.index == '!' && self.worktree == '!'
    }
}

/// Parse NUL-separated porcelain v1 output.
///
/// Rename and copy entries carry their original path in the following
/// NUL-terminated field.
pub fn parse_porcelain(output: &str) -> Vec<StatusEntry> {
    let mut entries = Vec::new();
    let mut fields = output.split('\0');

    while let Some(field) = fields.next() {
        let mut chars = field.chars();
        let (Some(index), Some(worktree), Some(' ')) = (chars.next(), chars.next(), chars.next())
        else {
            continue;
        };
        let path = chars.as_str().to_string();
        if path.is_empty() {
            continue;
        }

        let orig_path = if matches!(index, 'R' | 'C') || matches!(worktree, 'R' | 'C') {
            fields.next().map(str::to_string)
        } else {
            None
        };

        entries.push(StatusEntry {
            index,
            worktree,
            path,
            orig_path,
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_status() {
        let output = " M src/main.rs\0A  new.rs\0?? notes.txt\0 D gone.rs\0";
        let entries = parse_porcelain(output);

        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["src/main.rs", "new.rs", "notes.txt", "gone.rs"]);
        assert!(!entries[0].is_staged());
        assert!(entries[1].is_staged());
        assert!(entries[2].is_untracked());
        assert!(!entries[2].is_staged());
    }

    #[test]
    fn test_parse_rename_reports_new_path() {
        let output = "R  lib/new name.rs\0lib/old.rs\0 M other.rs\0";
        let entries = parse_porcelain(output);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].path, "lib/new name.rs");
        assert_eq!(entries[0].orig_path.as_deref(), Some("lib/old.rs"));
        assert_eq!(entries[1].path, "other.rs");
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_porcelain("").is_empty());
    }
}
