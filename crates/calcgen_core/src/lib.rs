//! Provide the canonical vocabulary and pure semantic helpers shared by the calcgen front end and code generator.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both:
//! - the expression parser uses to resolve member spellings into stable ids, and
//! - the code generator uses to drive target adapters without string matching.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no AST types.
//! - Current scope: decimal-API member vocabulary, declared value types, binary operators, and numeric literal
//!   classification.

pub mod lang;

/// Represent the numeric category of a literal or constructor argument.
///
/// This is not a concrete target type. It exists to describe "integer-valued" and "floating-point-valued"
/// decimal construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericTy {
    Int,
    Float,
}

/// Classify numeric literal text.
///
/// ## Parameters
/// - `text`: literal digits as written in the source expression, optionally signed (`-12`, `0.5`).
///
/// ## Returns
/// - `Some(NumericTy::Int)` for integer digits, `Some(NumericTy::Float)` for digits with a fractional part or an
///   exponent, `None` if the text is not a numeric literal at all.
///
/// ## Examples
/// ```rust
/// use calcgen_core::{classify_numeric_literal, NumericTy};
///
/// assert_eq!(classify_numeric_literal("7"), Some(NumericTy::Int));
/// assert_eq!(classify_numeric_literal("7.5"), Some(NumericTy::Float));
/// assert_eq!(classify_numeric_literal("seven"), None);
/// ```
pub fn classify_numeric_literal(text: &str) -> Option<NumericTy> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() {
        return None;
    }
    if digits.chars().all(|c| c.is_ascii_digit()) {
        return Some(NumericTy::Int);
    }

    let (mantissa, exponent) = match digits.find(['e', 'E']) {
        Some(idx) => (&digits[..idx], Some(&digits[idx + 1..])),
        None => (digits, None),
    };
    if let Some(exp) = exponent {
        let exp = exp.strip_prefix(['-', '+']).unwrap_or(exp);
        if exp.is_empty() || !exp.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }

    let mut parts = mantissa.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next();
    let int_ok = int_part.chars().all(|c| c.is_ascii_digit());
    let frac_ok = frac_part.is_none_or(|f| f.chars().all(|c| c.is_ascii_digit()));
    let has_digits = !int_part.is_empty() || frac_part.is_some_and(|f| !f.is_empty());

    if int_ok && frac_ok && has_digits && (frac_part.is_some() || exponent.is_some()) {
        Some(NumericTy::Float)
    } else {
        None
    }
}
