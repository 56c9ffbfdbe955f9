//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural
//! principles across the workspace:
//! - HTTP stays inside `library-core`; the TUI never talks to the wire
//! - `library-core` stays headless; no terminal crates below the TUI
//! - No unfinished-code markers in production code
//!
//! These tests are designed to catch violations early in the development
//! cycle.

use std::fs;
use std::path::{Path, PathBuf};

/// Collect every `.rs` file under a workspace-relative directory
pub fn source_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    if !root.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.path().to_path_buf())
        .collect()
}

/// Lines of code in a file with line comments stripped
///
/// Returns (line_number, code) pairs; string literals are not parsed, so
/// policies should match on tokens unlikely to appear in user-facing text.
pub fn code_lines(path: &Path) -> Vec<(usize, String)> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    content
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let code = line.split("//").next().unwrap_or(line);
            (idx + 1, code.to_string())
        })
        .collect()
}

/// Report a violation as `path:line - source`
pub fn violation(path: &Path, line_number: usize, line: &str) -> String {
    format!("{}:{} - {}", path.display(), line_number, line.trim())
}

/// The workspace root, resolved from this crate's manifest directory
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .unwrap_or_else(|_| PathBuf::from("../.."))
}
