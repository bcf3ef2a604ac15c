//! Syntax front end for calcgen: expression lexer/parser, expression AST, calculation IR model, and model
//! document loading.
//!
//! ## Notes
//! - This crate knows nothing about targets. Member spellings are resolved into `calcgen_core::lang` tags here,
//!   and whether a tag is supported is decided later by the code generator's target adapter.
//! - Everything produced here is immutable once built.
//!
//! ## Examples
//! ```rust,no_run
//! use calcgen_syntax::parser;
//!
//! let expr = parser::parse_expr("amount.multiply(BigDecimal.valueOf(2))").unwrap();
//! assert_eq!(expr.to_string(), "amount.multiply(BigDecimal.valueOf(2))");
//! ```

pub mod ast;
pub mod diagnostics;
pub mod document;
pub mod lexer;
pub mod model;
pub mod parser;

pub use ast::{Expr, Literal, Member};
pub use diagnostics::{ModelError, ParseError};
pub use document::{load_model, load_model_file};
pub use model::{Constant, Method, Model, ModelBuilder, Role, Statement, Variable};
