//! Tree enumeration: registers every non-ignored directory with the
//! notification backend (non-recursive watches, one per directory).

use crate::ignore::IgnoreFilter;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Something directories can be registered with
pub trait DirectoryRegistrar {
    fn register(&mut self, dir: &Path) -> notify::Result<()>;
}

impl DirectoryRegistrar for RecommendedWatcher {
    fn register(&mut self, dir: &Path) -> notify::Result<()> {
        self.watch(dir, RecursiveMode::NonRecursive)
    }
}

/// Register `start` and every non-ignored directory below it.
///
/// `root` is the watched root that ignore rules are evaluated against.
/// Failing to register `start` is an error; failures below it are logged
/// and skipped, as are unreadable entries. Returns the number of
/// directories registered.
pub fn register_tree<R: DirectoryRegistrar + ?Sized>(
    root: &Path,
    start: &Path,
    filter: &IgnoreFilter,
    registrar: &mut R,
    silent: bool,
) -> notify::Result<usize> {
    registrar.register(start)?;
    if !silent {
        info!("Watching directory: {}", start.display());
    }
    let mut registered = 1;

    let walker = WalkDir::new(start)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            !entry.file_type().is_dir()
                || !filter.is_ignored_dir(relative(root, entry.path()))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        match registrar.register(entry.path()) {
            Ok(()) => {
                registered += 1;
                if !silent {
                    info!("Watching directory: {}", entry.path().display());
                }
            }
            Err(e) => warn!("Failed to watch {}: {}", entry.path().display(), e),
        }
    }

    Ok(registered)
}

fn relative<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    #[derive(Default)]
    struct Recorder {
        dirs: Vec<PathBuf>,
        reject: Option<PathBuf>,
    }

    impl DirectoryRegistrar for Recorder {
        fn register(&mut self, dir: &Path) -> notify::Result<()> {
            if self.reject.as_deref() == Some(dir) {
                return Err(notify::Error::generic("rejected"));
            }
            self.dirs.push(dir.to_path_buf());
            Ok(())
        }
    }

    fn layout() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for dir in [
            "src/nested",
            "target/debug",
            ".git/objects",
            "web/node_modules/pkg",
        ] {
            std::fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        std::fs::write(tmp.path().join("src/main.rs"), "").unwrap();
        tmp
    }

    fn relative_set(root: &Path, dirs: &[PathBuf]) -> BTreeSet<String> {
        dirs.iter()
            .map(|d| d.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_registers_non_ignored_directories() {
        let tmp = layout();
        let filter = IgnoreFilter::new(&["target/", "node_modules/"]);
        let mut recorder = Recorder::default();

        let count = register_tree(tmp.path(), tmp.path(), &filter, &mut recorder, true).unwrap();

        let expected: BTreeSet<String> = ["", "src", "src/nested", "web"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(relative_set(tmp.path(), &recorder.dirs), expected);
        assert_eq!(count, 4);
    }

    #[test]
    fn test_subtree_uses_root_for_rules() {
        let tmp = layout();
        let filter = IgnoreFilter::new(&["node_modules/"]);
        let mut recorder = Recorder::default();

        register_tree(tmp.path(), &tmp.path().join("web"), &filter, &mut recorder, true).unwrap();

        assert_eq!(recorder.dirs, vec![tmp.path().join("web")]);
    }

    #[test]
    fn test_child_failure_is_skipped() {
        let tmp = layout();
        let filter = IgnoreFilter::new(&["target/", "node_modules/"]);
        let mut recorder = Recorder {
            reject: Some(tmp.path().join("src")),
            ..Default::default()
        };

        let count = register_tree(tmp.path(), tmp.path(), &filter, &mut recorder, true).unwrap();
        assert_eq!(count, 3);
        assert!(recorder.dirs.contains(&tmp.path().join("src/nested")));
    }

    #[test]
    fn test_start_failure_is_error() {
        let tmp = layout();
        let mut recorder = Recorder {
            reject: Some(tmp.path().to_path_buf()),
            ..Default::default()
        };
        let empty: [&str; 0] = [];
        assert!(register_tree(
            tmp.path(),
            tmp.path(),
            &IgnoreFilter::new(&empty),
            &mut recorder,
            true
        )
        .is_err());
    }
}
