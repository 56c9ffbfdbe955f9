//! Integration Test: Unfinished Code Prohibition
//!
//! **Policy**: Production code must not ship placeholder macros. A stubbed
//! path panics at the worst possible time, in someone else's terminal.

use architectural_enforcement::{code_lines, source_files, violation};

/// No placeholder macros anywhere in shipped crates
#[test]
fn test_no_placeholder_macros() {
    let markers = ["todo!(", "unimplemented!(", "unreachable!(\"TODO"];
    let mut violations = Vec::new();

    for dir in ["library/core/src", "tui/src"] {
        for path in source_files(dir) {
            for (line_number, code) in code_lines(&path) {
                if markers.iter().any(|m| code.contains(m)) {
                    violations.push(violation(&path, line_number, &code));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Placeholder macros found in production code:\n{}",
        violations.join("\n")
    );
}
