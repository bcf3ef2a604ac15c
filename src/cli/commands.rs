//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::Path;

use calcgen_core::NumericTy;
use calcgen_core::lang::members::MEMBERS;
use calcgen_syntax::{Model, load_model_file};

use crate::backend::target::MemberMapping;
use crate::backend::{GeneratorConfig, TargetKind, generate};
use crate::version::CALCGEN_VERSION;

use super::{CliError, CliResult, ExitCode};

fn load(model_path: &Path) -> CliResult<Model> {
    load_model_file(model_path).map_err(CliError::diagnostic)
}

/// Generate target source for a model document.
///
/// Writes to `output` when given, otherwise to stdout. Nothing is written when generation fails.
pub fn generate_file(
    model_path: &Path,
    target: TargetKind,
    config: &GeneratorConfig,
    output: Option<&Path>,
) -> CliResult<ExitCode> {
    let model = load(model_path)?;
    let source = generate(&model, target, config).map_err(CliError::diagnostic)?;

    match output {
        Some(path) => {
            fs::write(path, &source)
                .map_err(|e| CliError::failure(format!("Error writing {}: {}", path.display(), e)))?;
            tracing::info!(model = %model.name, output = %path.display(), "generated {target} source");
        }
        None => print!("{source}"),
    }
    Ok(ExitCode::SUCCESS)
}

/// Load, validate and lower a model without writing output.
pub fn check_file(model_path: &Path, target: TargetKind) -> CliResult<ExitCode> {
    let model = load(model_path)?;
    generate(&model, target, &GeneratorConfig::default()).map_err(CliError::diagnostic)?;
    println!("✓ {} lowers cleanly for {}", model.name, target);
    Ok(ExitCode::SUCCESS)
}

/// List targets and, per target, the decimal-API members it maps.
pub fn list_targets() -> CliResult<ExitCode> {
    print!("{}", targets_report());
    Ok(ExitCode::SUCCESS)
}

fn targets_report() -> String {
    let mut report = format!("calcgen {CALCGEN_VERSION}\n");
    for kind in TargetKind::ALL {
        let adapter = kind.adapter();
        report.push_str(&format!("\n{kind} - {}\n", kind.description()));
        for info in MEMBERS {
            let Some(mapping) = adapter.map_member(info.id) else {
                continue;
            };
            let rendered = match mapping {
                MemberMapping::ClassConstant(token) => format!("{}.{}", adapter.class_scope(), token),
                MemberMapping::Instance(token) => format!(".{token}"),
                MemberMapping::Constructor => format!(
                    "{}.{{{}|{}}}",
                    adapter.class_scope(),
                    adapter.constructor(NumericTy::Int),
                    adapter.constructor(NumericTy::Float)
                ),
                MemberMapping::RoundingMode(mode) => format!("mode argument, rounds via {}", adapter.round_callee(mode)),
            };
            report.push_str(&format!("  {:<14} {}\n", info.spelling, rendered));
        }
    }
    report
}
