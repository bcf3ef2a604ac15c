//! Calcgen backend
//!
//! Turns a [`calcgen_syntax::Model`] into the source text of one target language.
//!
//! The pipeline is:
//! 1. [`codegen::Codegen`] walks the model in a fixed order
//! 2. [`lower::Lowerer`] turns expressions and statements into target text, asking the active
//!    [`target::TargetAdapter`] for every language-specific decision
//! 3. [`emitter::CodeEmitter`] accumulates lines with block-structured indentation
//!
//! ## Module Organization
//!
//! - `codegen` - generation facade and emission order
//! - `config` - package name, class name, indentation
//! - `emitter` - indentation-aware line writer
//! - `errors` - [`GenerationError`]
//! - `lower/` - generic lowering engine
//! - `target/` - target adapters (`go`)

#![deny(clippy::unwrap_used)]

pub mod codegen;
pub mod config;
pub mod emitter;
pub mod errors;
pub mod lower;
pub mod target;

pub use codegen::{Codegen, generate};
pub use config::GeneratorConfig;
pub use errors::{GenerationError, GenerationResult};
pub use lower::Lowerer;
pub use target::{GoAdapter, TargetAdapter, TargetKind};
