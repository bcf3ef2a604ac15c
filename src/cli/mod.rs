//! CLI module for calcgen
//!
//! ## Commands
//!
//! - `generate <model>` - Generate target source for a model document
//! - `check <model>` - Load, validate and lower a model without writing output
//! - `targets` - List targets and the decimal-API members each one maps
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::backend::{GeneratorConfig, TargetKind};
use crate::backend::config::DEFAULT_PACKAGE;
use crate::version::CALCGEN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic through miette's report handler.
    pub fn diagnostic<E>(err: E) -> Self
    where
        E: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::failure(format!("{:?}", miette::Report::new(err)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Retargetable code generator for statutory calculation procedures
#[derive(Parser, Debug)]
#[command(name = "calcgen")]
#[command(version = CALCGEN_VERSION)]
#[command(about = "Generate decimal-arithmetic source code from calculation models", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate target source for a model document
    Generate {
        /// Model document (JSON)
        #[arg(value_name = "MODEL")]
        model: PathBuf,
        /// Target language
        #[arg(short, long, value_enum, default_value_t = TargetKind::Go)]
        target: TargetKind,
        /// Package / namespace of the generated file
        #[arg(long, value_name = "NAME", default_value = DEFAULT_PACKAGE)]
        package: String,
        /// Name of the generated type (default: the model name)
        #[arg(long, value_name = "NAME")]
        class_name: Option<String>,
        /// Spaces per indentation level
        #[arg(long, value_name = "N", default_value_t = 4)]
        indent: usize,
        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Load, validate and lower a model without writing output
    Check {
        /// Model document (JSON)
        #[arg(value_name = "MODEL")]
        model: PathBuf,
        /// Target language
        #[arg(short, long, value_enum, default_value_t = TargetKind::Go)]
        target: TargetKind,
    },

    /// List targets and the decimal-API members each one maps
    Targets,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            model,
            target,
            package,
            class_name,
            indent,
            output,
        } => {
            let mut config = GeneratorConfig::new()
                .with_package_name(package)
                .with_indent_width(indent);
            if let Some(class_name) = class_name {
                config = config.with_class_name(class_name);
            }
            commands::generate_file(&model, target, &config, output.as_deref())
        }
        Command::Check { model, target } => commands::check_file(&model, target),
        Command::Targets => commands::list_targets(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["calcgen", "generate", "lst.json"]).unwrap();
        if let Command::Generate {
            model,
            target,
            package,
            class_name,
            indent,
            output,
        } = cli.command
        {
            assert_eq!(model, PathBuf::from("lst.json"));
            assert_eq!(target, TargetKind::Go);
            assert_eq!(package, "tax");
            assert!(class_name.is_none());
            assert_eq!(indent, 4);
            assert!(output.is_none());
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_parse_generate_options() {
        let cli = Cli::try_parse_from([
            "calcgen",
            "generate",
            "lst.json",
            "--target",
            "go",
            "--package",
            "lohnsteuer",
            "--class-name",
            "Lst2024",
            "--indent",
            "2",
            "-o",
            "out.go",
        ])
        .unwrap();
        if let Command::Generate {
            package,
            class_name,
            indent,
            output,
            ..
        } = cli.command
        {
            assert_eq!(package, "lohnsteuer");
            assert_eq!(class_name.as_deref(), Some("Lst2024"));
            assert_eq!(indent, 2);
            assert_eq!(output, Some(PathBuf::from("out.go")));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_target() {
        assert!(Cli::try_parse_from(["calcgen", "generate", "lst.json", "--target", "cobol"]).is_err());
    }

    #[test]
    fn test_cli_parse_check_and_targets() {
        let cli = Cli::try_parse_from(["calcgen", "check", "lst.json"]).unwrap();
        assert!(matches!(cli.command, Command::Check { target: TargetKind::Go, .. }));

        let cli = Cli::try_parse_from(["calcgen", "targets"]).unwrap();
        assert!(matches!(cli.command, Command::Targets));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["calcgen"]).is_err());
    }
}
