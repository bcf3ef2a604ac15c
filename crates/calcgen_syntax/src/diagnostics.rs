//! Front-end errors: expression parse failures and model validation failures.
//!
//! Both types implement [`miette::Diagnostic`] so the CLI can render them with source context.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Failure to parse one expression text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(calcgen::syntax::parse))]
pub struct ParseError {
    pub message: String,
    #[label("here")]
    pub span: SourceSpan,
}

impl ParseError {
    pub fn new(message: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            message: message.into(),
            span: (start, end.saturating_sub(start)).into(),
        }
    }

    /// Byte offset where the error starts.
    pub fn offset(&self) -> usize {
        self.span.offset()
    }
}

/// Failure to build a [`crate::model::Model`].
#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("invalid model document: {0}")]
    #[diagnostic(code(calcgen::model::document))]
    Document(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(calcgen::model::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown type `{spelling}` declared for `{name}`")]
    #[diagnostic(code(calcgen::model::unknown_type), help("supported types: BigDecimal, int, BigDecimal[]"))]
    UnknownType { name: String, spelling: String },

    #[error("duplicate {section} name `{name}`")]
    #[diagnostic(code(calcgen::model::duplicate_name))]
    DuplicateName { section: &'static str, name: String },

    #[error("entry method `{0}` is not defined")]
    #[diagnostic(code(calcgen::model::missing_entry))]
    MissingEntry(String),

    #[error("method `{method}` executes unknown method `{callee}`")]
    #[diagnostic(code(calcgen::model::unknown_method))]
    UnknownMethod { method: String, callee: String },

    #[error("method `{method}` assigns to `{target}`, which is not a variable")]
    #[diagnostic(code(calcgen::model::unknown_target))]
    UnknownTarget { method: String, target: String },

    #[error("cannot parse {location}: {message}")]
    #[diagnostic(code(calcgen::model::expression))]
    Expression {
        location: String,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

impl ModelError {
    /// Attach the failing expression text to a parse error.
    pub fn expression(location: impl Into<String>, text: &str, err: ParseError) -> Self {
        let location = location.into();
        ModelError::Expression {
            src: NamedSource::new(location.clone(), text.to_string()),
            location,
            message: err.message,
            span: err.span,
        }
    }
}
