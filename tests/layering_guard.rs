//! Layering guardrails between the workspace crates.
//!
//! - `calcgen_core` is pure vocabulary and must not grow dependencies.
//! - `calcgen_syntax` must not depend on the code generator crate.
//!
//! These tests scan the member manifests and fail if a forbidden entry appears in `[dependencies]`.

fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_vocabulary_has_no_dependencies() {
    let deps = dependency_names(include_str!("../crates/calcgen_core/Cargo.toml"));
    assert!(deps.is_empty(), "calcgen_core must stay dependency-free, found {deps:?}");
}

#[test]
fn syntax_does_not_depend_on_generator() {
    let deps = dependency_names(include_str!("../crates/calcgen_syntax/Cargo.toml"));
    assert!(deps.iter().any(|d| d == "calcgen_core"));
    if deps.iter().any(|d| d == "calcgen") {
        panic!("`calcgen` must not appear in calcgen_syntax [dependencies]; the front end stays target-agnostic");
    }
}
