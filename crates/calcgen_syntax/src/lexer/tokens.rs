//! Token types for the expression lexer.

use calcgen_core::lang::operators::BinaryOperator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    /// Integer digits with any Java suffix (`L`) removed.
    Integer(String),
    /// Fractional/exponent digits with any Java suffix (`D`, `F`) removed.
    Decimal(String),
    Str(String),
    True,
    False,
    New,
    Operator(BinaryOperator),
    /// `=` separating an assignment target from its value
    Assign,
    Dot,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Eof,
}

impl TokenKind {
    /// Human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier `{}`", name),
            TokenKind::Integer(text) | TokenKind::Decimal(text) => format!("number `{}`", text),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::True => "`true`".to_string(),
            TokenKind::False => "`false`".to_string(),
            TokenKind::New => "`new`".to_string(),
            TokenKind::Operator(op) => format!("`{}`", op),
            TokenKind::Assign => "`=`".to_string(),
            TokenKind::Dot => "`.`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::LBrace => "`{`".to_string(),
            TokenKind::RBrace => "`}`".to_string(),
            TokenKind::LBracket => "`[`".to_string(),
            TokenKind::RBracket => "`]`".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// A token with its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }
}

/// Map reserved words to their token kinds.
pub fn keyword(ident: &str) -> Option<TokenKind> {
    match ident {
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "new" => Some(TokenKind::New),
        _ => None,
    }
}
