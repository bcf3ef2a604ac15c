//! Integration tests for the calcgen pipeline and CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use calcgen::backend::{GeneratorConfig, TargetKind, generate};
use calcgen::load_model_file;

/// Helper to run the full pipeline on a model document
fn generate_file(path: &Path) -> Result<String, String> {
    let model = load_model_file(path).map_err(|e| e.to_string())?;
    generate(&model, TargetKind::Go, &GeneratorConfig::default()).map_err(|e| e.to_string())
}

fn calcgen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_calcgen"))
}

/// Test that all snapshot fixtures generate successfully
#[test]
fn test_valid_fixtures() {
    for entry in fs::read_dir("tests/codegen_snapshots").unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|e| e == "json") {
            let result = generate_file(&path);
            assert!(
                result.is_ok(),
                "Expected {} to generate, got error: {:?}",
                path.display(),
                result.unwrap_err()
            );
        }
    }
}

/// Test that invalid fixtures produce errors
#[test]
fn test_invalid_fixtures() {
    for entry in fs::read_dir("tests/fixtures/invalid").unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|e| e == "json") {
            let result = generate_file(&path);
            assert!(result.is_err(), "Expected {} to fail, but it succeeded", path.display());
        }
    }
}

#[test]
fn test_invalid_fixture_messages() {
    let cases = [
        ("unmapped_member", "`negate` has no go mapping (in `tax.negate()`)"),
        ("string_constructor", "cannot infer a numeric constructor from a string literal"),
        ("missing_entry", "entry method `MAIN` is not defined"),
        ("syntax_error", "cannot parse method `MAIN`"),
    ];
    for (name, expected) in cases {
        let path = format!("tests/fixtures/invalid/{name}.json");
        let err = generate_file(Path::new(&path)).unwrap_err();
        assert!(err.contains(expected), "{name}: {err}");
    }
}

mod cli_tests {
    use super::*;

    #[test]
    fn test_generate_to_stdout() {
        let output = calcgen()
            .args(["generate", "tests/codegen_snapshots/end_to_end.json"])
            .output()
            .expect("failed to run calcgen");
        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.starts_with("// This file is automatically generated by calcgen, do not edit!\npackage tax\n"));
        assert!(stdout.contains("    t.tax = t.amount.Mul(decimal.NewFromInt(2))\n"));
    }

    #[test]
    fn test_generate_to_file_with_options() {
        let out = std::env::temp_dir().join(format!("calcgen_cli_{}.go", std::process::id()));
        let output = calcgen()
            .args([
                "generate",
                "tests/codegen_snapshots/end_to_end.json",
                "--package",
                "lohnsteuer",
                "--class-name",
                "Lst",
                "--indent",
                "2",
                "-o",
            ])
            .arg(&out)
            .output()
            .expect("failed to run calcgen");
        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        assert!(output.stdout.is_empty());

        let written = fs::read_to_string(&out).unwrap();
        let _ = fs::remove_file(&out);
        assert!(written.contains("package lohnsteuer\n"));
        assert!(written.contains("func (t *Lst) SetAmount(value decimal.Decimal) {\n  t.amount = value\n}\n"));
    }

    #[test]
    fn test_generate_failure_exits_nonzero_without_output() {
        let output = calcgen()
            .args(["generate", "tests/fixtures/invalid/unmapped_member.json"])
            .output()
            .expect("failed to run calcgen");
        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("unmapped_operation"), "stderr: {stderr}");
    }

    #[test]
    fn test_check_reports_success() {
        let output = calcgen()
            .args(["check", "tests/codegen_snapshots/lst_excerpt.json"])
            .output()
            .expect("failed to run calcgen");
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("Lst2024 lowers cleanly for go"));
    }

    #[test]
    fn test_check_missing_file_fails() {
        let output = calcgen()
            .args(["check", "tests/fixtures/invalid/nope.json"])
            .output()
            .expect("failed to run calcgen");
        assert_eq!(output.status.code(), Some(1));
    }

    #[test]
    fn test_targets_lists_go() {
        let output = calcgen().arg("targets").output().expect("failed to run calcgen");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("go - Go with github.com/shopspring/decimal"));
        assert!(stdout.contains("setScale"));
    }
}
