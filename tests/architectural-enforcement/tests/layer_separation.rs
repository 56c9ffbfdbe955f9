//! Integration Test: Layer Separation
//!
//! **Policy**: All HTTP lives in `library-core`. The TUI renders display
//! state and routes messages; it must never construct requests itself.
//! **Policy**: `library-core` is headless and must never pull in terminal
//! crates.

use architectural_enforcement::{code_lines, source_files, violation};

/// The TUI must not reach for the HTTP client directly
#[test]
fn test_tui_does_not_use_reqwest() {
    let mut violations = Vec::new();

    for path in source_files("tui/src") {
        for (line_number, code) in code_lines(&path) {
            if code.contains("reqwest::") || code.contains("use reqwest") {
                violations.push(violation(&path, line_number, &code));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "HTTP calls belong in library-core, not the TUI:\n{}",
        violations.join("\n")
    );
}

/// The headless core must not depend on terminal crates
#[test]
fn test_core_stays_headless() {
    let mut violations = Vec::new();

    for path in source_files("library/core/src") {
        for (line_number, code) in code_lines(&path) {
            if code.contains("ratatui") || code.contains("crossterm") {
                violations.push(violation(&path, line_number, &code));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "library-core must stay headless:\n{}",
        violations.join("\n")
    );
}
