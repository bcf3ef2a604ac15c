//! Expression AST shared by every target.
//!
//! The AST is deliberately tiny: calculation pseudocode only needs names, literals, member access, calls,
//! binary operators and list literals. Nodes are immutable once built; lowering reads them by reference.

use std::fmt;

use calcgen_core::lang::members::{self, MemberId};
use calcgen_core::lang::operators::BinaryOperator;
use calcgen_core::lang::types::ValueType;

/// Literal value, kept as written so numeric text survives unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Integer digits, optionally signed (`-3`, `100`).
    Integer(String),
    /// Digits with a fractional part or exponent (`0.5`, `1e3`).
    Decimal(String),
    Str(String),
    Bool(bool),
}

/// Member named after the `.` of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Known(MemberId),
    /// Spelling outside the decimal-API vocabulary. Lowering rejects these.
    Unknown(String),
}

impl Member {
    pub fn from_spelling(spelling: &str) -> Self {
        match members::from_str(spelling) {
            Some(id) => Member::Known(id),
            None => Member::Unknown(spelling.to_string()),
        }
    }

    pub fn spelling(&self) -> &str {
        match self {
            Member::Known(id) => members::as_str(*id),
            Member::Unknown(name) => name,
        }
    }
}

/// Expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Name(String),
    Literal(Literal),
    /// `receiver.member`; covers class-scoped constants (`BigDecimal.ZERO`) and instance member selection.
    Attribute(Box<Expr>, Member),
    Call(Box<Expr>, Vec<Expr>),
    Binary(Box<Expr>, BinaryOperator, Box<Expr>),
    /// Array literal with its element type.
    List(Vec<Expr>, ValueType),
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    /// Numeric literal; the text decides between integer and decimal.
    pub fn number(text: impl Into<String>) -> Self {
        let text = text.into();
        match calcgen_core::classify_numeric_literal(&text) {
            Some(calcgen_core::NumericTy::Int) => Expr::Literal(Literal::Integer(text)),
            _ => Expr::Literal(Literal::Decimal(text)),
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expr::Literal(Literal::Str(text.into()))
    }

    pub fn attr(receiver: Expr, member: &str) -> Self {
        Expr::Attribute(Box::new(receiver), Member::from_spelling(member))
    }

    /// `receiver.member(args...)`
    pub fn method_call(receiver: Expr, member: &str, args: Vec<Expr>) -> Self {
        Expr::Call(Box::new(Expr::attr(receiver, member)), args)
    }

    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::Binary(Box::new(left), op, Box::new(right))
    }

    /// Short, stable name of the node kind (used in diagnostics).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Name(_) => "Name",
            Expr::Literal(Literal::Str(_)) => "StringLiteral",
            Expr::Literal(Literal::Bool(_)) => "BoolLiteral",
            Expr::Literal(_) => "NumericLiteral",
            Expr::Attribute(..) => "Attribute",
            Expr::Call(..) => "Call",
            Expr::Binary(..) => "BinaryOp",
            Expr::List(..) => "ListLiteral",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary(_, op, _) => op.precedence(),
            _ => u8::MAX,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(text) | Literal::Decimal(text) => f.write_str(text),
            Literal::Str(s) => write!(f, "{:?}", s),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Renders the expression back in source notation.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Name(name) => f.write_str(name),
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Attribute(receiver, member) => write!(f, "{}.{}", receiver, member.spelling()),
            Expr::Call(callee, args) => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Binary(left, op, right) => {
                if left.precedence() < op.precedence() {
                    write!(f, "({})", left)?;
                } else {
                    write!(f, "{}", left)?;
                }
                write!(f, " {} ", op)?;
                if right.precedence() <= op.precedence() {
                    write!(f, "({})", right)
                } else {
                    write!(f, "{}", right)
                }
            }
            Expr::List(items, _) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("}")
            }
        }
    }
}
