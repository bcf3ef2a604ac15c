//! Error types for code generation.
//!
//! Every variant aborts the run. Each carries the source-notation rendering of the offending node so the
//! caller can point at it without a span.

use miette::Diagnostic;
use thiserror::Error;

/// Error during expression or statement lowering.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GenerationError {
    /// A member has no entry in the active target's table.
    #[error("`{member}` has no {target} mapping (in `{node}`)")]
    #[diagnostic(
        code(calcgen::codegen::unmapped_operation),
        help("run `calcgen targets` to list the members each target supports")
    )]
    UnmappedOperation {
        member: String,
        target: &'static str,
        node: String,
    },

    /// The value-of factory got an argument whose integer/float constructor cannot be decided.
    #[error("cannot infer a numeric constructor from {shape} in `{node}`")]
    #[diagnostic(
        code(calcgen::codegen::constructor_inference),
        help("value-of arguments must be numeric literals, names, calls, or arithmetic on those")
    )]
    UnsupportedConstructorInference { shape: String, node: String },

    /// A node kind appeared where lowering has no rule for it.
    #[error("unsupported {kind} {context} (in `{node}`)")]
    #[diagnostic(code(calcgen::codegen::unsupported_node))]
    UnsupportedNodeKind {
        kind: &'static str,
        context: &'static str,
        node: String,
    },
}

/// Result type for lowering operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
