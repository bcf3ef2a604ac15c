//! Generic lowering engine
//!
//! Lowering turns expression nodes into target token sequences and statements into emitted lines. It is a pure
//! function of the node, the active [`TargetAdapter`], and the set of field names of the generated aggregate: the
//! AST is only ever borrowed, so one parsed model can drive any number of runs.
//!
//! ## Module Structure
//!
//! - `expr` - dispatch over expression node kinds
//! - `calls` - call lowering, call-shape rewrites, numeric-constructor inference
//! - `stmt` - statement lowering into an emitter
//!
//! ## Notes
//! - Every failure is fatal for the run. Statement lowering returns the error after the emitter has closed any
//!   block it opened.

mod calls;
mod expr;
mod stmt;

use std::collections::HashSet;

use calcgen_syntax::{Expr, Model};

use super::errors::{GenerationError, GenerationResult};
use super::target::TargetAdapter;

pub use calls::ConstructorPolicy;

/// Lowering context for one generation run.
pub struct Lowerer<'a> {
    adapter: &'a dyn TargetAdapter,
    fields: HashSet<&'a str>,
}

impl<'a> Lowerer<'a> {
    /// Create a lowerer; names in `fields` lower to instance field accesses.
    pub fn new(adapter: &'a dyn TargetAdapter, fields: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            adapter,
            fields: fields.into_iter().collect(),
        }
    }

    /// Lowerer whose fields are the constants and variables of `model`.
    pub fn for_model(adapter: &'a dyn TargetAdapter, model: &'a Model) -> Self {
        Self::new(adapter, model.field_names())
    }

    /// Lower an expression and join its tokens.
    pub fn expr_text(&self, expr: &Expr) -> GenerationResult<String> {
        Ok(self.expr(expr)?.concat())
    }

    fn unmapped(&self, member: &str, node: &Expr) -> GenerationError {
        GenerationError::UnmappedOperation {
            member: member.to_string(),
            target: self.adapter.kind().as_str(),
            node: node.to_string(),
        }
    }
}
