//! Binary operator vocabulary.
//!
//! Raw scalar arithmetic is rare in calculation pseudocode (decimal arithmetic goes through member calls), but
//! conditions compare `compareTo` results and combine them with `&&`/`||`. This module defines those operators with
//! their spelling and precedence.
//!
//! ## Notes
//! - Precedence is a relative ordering where higher binds tighter; it follows Java.
//! - All operators are left-associative.
//!
//! ## Examples
//! ```rust
//! use calcgen_core::lang::operators::{self, BinaryOperator};
//!
//! assert_eq!(operators::from_str("&&"), Some(BinaryOperator::And));
//! assert!(BinaryOperator::Mul.precedence() > BinaryOperator::Add.precedence());
//! ```

/// Stable identifier for every binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Logical
    Or,
    And,

    // Equality
    Eq,
    NotEq,

    // Relational
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: BinaryOperator,
    pub spelling: &'static str,
    pub precedence: u8,
}

/// Registry of all binary operators.
pub const OPERATORS: &[OperatorInfo] = &[
    OperatorInfo {
        id: BinaryOperator::Or,
        spelling: "||",
        precedence: 10,
    },
    OperatorInfo {
        id: BinaryOperator::And,
        spelling: "&&",
        precedence: 20,
    },
    OperatorInfo {
        id: BinaryOperator::Eq,
        spelling: "==",
        precedence: 30,
    },
    OperatorInfo {
        id: BinaryOperator::NotEq,
        spelling: "!=",
        precedence: 30,
    },
    OperatorInfo {
        id: BinaryOperator::Lt,
        spelling: "<",
        precedence: 40,
    },
    OperatorInfo {
        id: BinaryOperator::LtEq,
        spelling: "<=",
        precedence: 40,
    },
    OperatorInfo {
        id: BinaryOperator::Gt,
        spelling: ">",
        precedence: 40,
    },
    OperatorInfo {
        id: BinaryOperator::GtEq,
        spelling: ">=",
        precedence: 40,
    },
    OperatorInfo {
        id: BinaryOperator::Add,
        spelling: "+",
        precedence: 50,
    },
    OperatorInfo {
        id: BinaryOperator::Sub,
        spelling: "-",
        precedence: 50,
    },
    OperatorInfo {
        id: BinaryOperator::Mul,
        spelling: "*",
        precedence: 60,
    },
    OperatorInfo {
        id: BinaryOperator::Div,
        spelling: "/",
        precedence: 60,
    },
    OperatorInfo {
        id: BinaryOperator::Rem,
        spelling: "%",
        precedence: 60,
    },
];

pub fn info_for(id: BinaryOperator) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("INVARIANT: every BinaryOperator has a registry entry")
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<BinaryOperator> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

pub fn as_str(id: BinaryOperator) -> &'static str {
    info_for(id).spelling
}

impl BinaryOperator {
    pub fn precedence(self) -> u8 {
        info_for(self).precedence
    }

    /// Whether the operator is `+ - * / %`.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Rem
        )
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}
