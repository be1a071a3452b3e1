//! Hygiene — enforces coding standards at test time
//!
//! Scans the canvas crate source tree for patterns that crash the host page,
//! lose errors silently, or bypass the `log` facade. Each pattern has a
//! budget of zero. The engine runs inside a browser tab: a panic there kills
//! the session with no server-side trace.

use std::fs;
use std::path::Path;

/// `(pattern, budget, what it means)`.
const RULES: &[(&str, usize, &str)] = &[
    // Panics.
    (".unwrap()", 0, "panics on None/Err"),
    (".expect(", 0, "panics on None/Err"),
    ("panic!(", 0, "explicit panic"),
    ("unreachable!(", 0, "explicit panic"),
    ("todo!(", 0, "unfinished stub"),
    ("unimplemented!(", 0, "unfinished stub"),
    // Silent loss.
    ("let _ =", 0, "discards a value without inspecting it"),
    (".ok()", 0, "drops the error half of a Result"),
    // Style / structure.
    ("#[allow(dead_code)]", 0, "hides unused code"),
    ("println!(", 0, "use the log facade"),
    ("eprintln!(", 0, "use the log facade"),
];

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `canvas/src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|file| (file.path.clone(), file.content.lines().filter(|line| line.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[test]
fn source_tree_is_not_empty() {
    assert!(source_files().iter().any(|f| f.path.ends_with("engine.rs")));
}

#[test]
fn pattern_budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();

    for &(pattern, budget, meaning) in RULES {
        let found = hits(&files, pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget {
            let detail: Vec<String> = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect();
            failures.push(format!("  `{pattern}` ({meaning}): found {count}, max {budget}\n{}", detail.join("\n")));
        }
    }

    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
