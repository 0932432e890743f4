//! Change summary sent to the message generator

use std::path::Path;

/// Diffs longer than this are cut
pub const MAX_DIFF_BYTES: usize = 8000;

const TRUNCATION_MARKER: &str = "...\n[diff truncated]";

/// Short description of a file by extension
pub fn file_kind(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("go") => "Go source",
        Some("rs") => "Rust source",
        Some("md") | Some("markdown") => "Markdown documentation",
        Some("js") | Some("mjs") | Some("cjs") | Some("jsx") => "JavaScript source",
        Some("ts") | Some("tsx") => "TypeScript source",
        Some("html") | Some("htm") => "HTML file",
        Some("css") => "CSS stylesheet",
        Some("json") => "JSON data",
        Some("yml") | Some("yaml") => "YAML configuration",
        Some("toml") => "TOML configuration",
        _ => "file",
    }
}

/// Cut `diff` to at most `max` bytes on a char boundary
fn truncate_diff(diff: &str, max: usize) -> String {
    if diff.len() <= max {
        return diff.to_string();
    }
    let mut end = max;
    while !diff.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &diff[..end], TRUNCATION_MARKER)
}

/// Build the human-readable summary of a change set.
///
/// `stat` and `diff` are optional because either git call may fail
/// without invalidating the rest of the summary.
pub fn build_summary(files: &[String], stat: Option<&str>, diff: Option<&str>) -> String {
    if files.is_empty() {
        return "No changes detected".to_string();
    }

    let mut out = format!("Changes in {} file(s):\n", files.len());
    for file in files {
        out.push_str(&format!("- {}\n", file));
    }

    out.push_str("\nFile context:\n");
    for file in files {
        out.push_str(&format!("- {}: {}\n", file, file_kind(file)));
    }

    if let Some(stat) = stat.filter(|s| !s.trim().is_empty()) {
        out.push_str("\nStatistics:\n");
        out.push_str(stat.trim_end());
        out.push('\n');
    }

    match diff {
        Some(diff) if !diff.trim().is_empty() => {
            out.push_str("\nDiff:\n");
            out.push_str(&truncate_diff(diff, MAX_DIFF_BYTES));
        }
        Some(_) => {}
        None => out.push_str("\nDetailed diff unavailable."),
    }

    out
}
