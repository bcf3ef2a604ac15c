//! calcgen vocabulary registries.
//!
//! This module is the "front door" for calculation-language vocabulary: decimal-API members, declared value types,
//! and binary operators.
//!
//! The design goal is to avoid stringly-typed checks scattered across the parser and the code generator. Callers
//! work with **stable IDs** (e.g. `MemberId`, `BinaryOperator`) and look up spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - Spellings follow the source pseudocode, which is written against Java's `BigDecimal`.
//!
//! ## Examples
//! ```rust
//! use calcgen_core::lang::members::{self, MemberId};
//!
//! assert_eq!(members::from_str("setScale"), Some(MemberId::SetScale));
//! assert_eq!(members::as_str(MemberId::SetScale), "setScale");
//! ```

pub mod members;
pub mod operators;
pub mod types;
