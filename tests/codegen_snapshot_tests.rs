//! Golden snapshot tests for codegen
//!
//! These tests load `.json` model documents from `tests/codegen_snapshots/`, generate Go source and compare the
//! output against stored snapshots. This ensures codegen changes are reviewed and intentional.
//!
//! Run with: `cargo test --test codegen_snapshot_tests`
//! Review changes: `cargo insta review`

use calcgen::backend::{GeneratorConfig, TargetKind, generate};
use calcgen::load_model;
use std::fs;

/// Load a model document from the codegen_snapshots directory
fn load_test_file(name: &str) -> String {
    let path = format!("tests/codegen_snapshots/{}.json", name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read test file: {}", path))
}

/// Generate Go source from a model document
fn generate_go(document: &str) -> String {
    let model = load_model(document).expect("model failed to load");
    generate(&model, TargetKind::Go, &GeneratorConfig::default()).expect("generation failed")
}

#[test]
fn test_end_to_end_codegen() {
    let source = generate_go(&load_test_file("end_to_end"));
    insta::assert_snapshot!("end_to_end", source);
}

#[test]
fn test_lst_excerpt_codegen() {
    let source = generate_go(&load_test_file("lst_excerpt"));
    insta::assert_snapshot!("lst_excerpt", source);
}

#[test]
fn test_nested_conditions_codegen() {
    let source = generate_go(&load_test_file("nested_conditions"));
    insta::assert_snapshot!("nested_conditions", source);
}

#[test]
fn test_every_fixture_generates() {
    for entry in fs::read_dir("tests/codegen_snapshots").unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|e| e == "json") {
            let document = fs::read_to_string(&path).unwrap();
            let source = generate_go(&document);
            assert!(source.ends_with("}\n"), "{} did not end with a closed block", path.display());
        }
    }
}
