#![forbid(unsafe_code)]
//! Calcgen: a retargetable code generator for statutory calculation procedures
//!
//! A calculation procedure (a payroll-tax table, a contribution formula) is described once as a model of typed
//! constants, input/output/internal variables and methods whose bodies are decimal-API expressions. This crate
//! lowers such a model into a self-contained source file for a target language that has a fixed-point decimal
//! library.
//!
//! - [`calcgen_syntax`] parses model documents and expressions
//! - [`backend`] lowers a model through a target adapter
//! - [`cli`] is the `calcgen` command-line tool
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a generator bug (logic error), use `.expect("INVARIANT: reason")`
//!   with a clear explanation.

pub mod backend;
pub mod cli;
pub mod version;

pub use backend::{GenerationError, GeneratorConfig, TargetKind, generate};
pub use calcgen_syntax::{Model, load_model, load_model_file};
