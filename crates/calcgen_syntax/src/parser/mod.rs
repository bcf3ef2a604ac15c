//! Recursive-descent parser for calculation expression text.
//!
//! Grammar (precedence climbing for binary operators, Java precedence):
//!
//! ```text
//! assignment := IDENT '=' expr EOF
//! expr       := unary (OP unary)*
//! unary      := '-' NUMBER | postfix
//! postfix    := primary ('.' IDENT call_args?)*
//! primary    := IDENT call_args? | NUMBER | STRING | 'true' | 'false'
//!             | '(' expr ')' | '{' list '}' | 'new' IDENT '[' ']' '{' list '}'
//! ```
//!
//! ## Notes
//! - Member spellings are resolved into [`Member`] tags while parsing; unknown spellings survive as
//!   [`Member::Unknown`] so the code generator can report them against the active target.
//! - A bare `{...}` list literal takes its element type from the parser context (see [`parse_value`]).

use calcgen_core::lang::operators::BinaryOperator;
use calcgen_core::lang::types::{self, ValueType};

use crate::ast::{Expr, Literal, Member};
use crate::diagnostics::ParseError;
use crate::lexer::{self, Token, TokenKind};

/// Parser state over one token stream.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    list_element: ValueType,
}

impl<'a> Parser<'a> {
    /// Create a parser; `tokens` must end with [`TokenKind::Eof`] (as produced by [`lexer::lex`]).
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            list_element: ValueType::Decimal,
        }
    }

    /// Element type used for bare `{...}` list literals.
    pub fn with_list_element(mut self, ty: ValueType) -> Self {
        self.list_element = ty.element();
        self
    }

    /// Parse a complete expression; trailing tokens are an error.
    pub fn parse_expression(mut self) -> Result<Expr, ParseError> {
        let expr = self.expr(0)?;
        self.expect_end()?;
        Ok(expr)
    }

    /// Parse `target = expr`.
    pub fn parse_assignment(mut self) -> Result<(String, Expr), ParseError> {
        let target = match &self.peek().kind {
            TokenKind::Ident(name) => name.clone(),
            _ => return Err(self.unexpected("an assignment target")),
        };
        self.advance();
        if self.peek().kind != TokenKind::Assign {
            return Err(self.unexpected("`=`"));
        }
        self.advance();
        let value = self.expr(0)?;
        self.expect_end()?;
        Ok((target, value))
    }

    // ------------------------------------------------------------------
    // Token helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof, and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len().saturating_sub(1))]
    }

    fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len().saturating_sub(1));
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<&Token, ParseError> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        if self.peek().kind == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::new(
            format!("expected {}, found {}", expected, token.kind.describe()),
            token.start,
            token.end,
        )
    }

    // ------------------------------------------------------------------
    // Grammar
    // ------------------------------------------------------------------

    fn expr(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let mut left = self.unary()?;
        while let TokenKind::Operator(op) = self.peek().kind {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance();
            let right = self.expr(precedence + 1)?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.peek().kind == TokenKind::Operator(BinaryOperator::Sub) {
            let minus = self.advance().start;
            let token = self.advance().clone();
            return match token.kind {
                TokenKind::Integer(text) => Ok(Expr::Literal(Literal::Integer(format!("-{}", text)))),
                TokenKind::Decimal(text) => Ok(Expr::Literal(Literal::Decimal(format!("-{}", text)))),
                other => Err(ParseError::new(
                    format!("unary minus is only supported on numbers, found {}", other.describe()),
                    minus,
                    token.end,
                )),
            };
        }
        self.postfix()
    }

    fn postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        while self.peek().kind == TokenKind::Dot {
            self.advance();
            let member = match &self.peek().kind {
                TokenKind::Ident(name) => Member::from_spelling(name),
                _ => return Err(self.unexpected("a member name")),
            };
            self.advance();
            expr = Expr::Attribute(Box::new(expr), member);
            if self.peek().kind == TokenKind::LParen {
                let args = self.call_args()?;
                expr = Expr::Call(Box::new(expr), args);
            }
        }
        Ok(expr)
    }

    fn call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(TokenKind::LParen, "`(`")?;
        let args = self.comma_separated(TokenKind::RParen)?;
        self.expect(TokenKind::RParen, "`)` or `,`")?;
        Ok(args)
    }

    fn comma_separated(&mut self, close: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        if self.peek().kind == close {
            return Ok(items);
        }
        loop {
            items.push(self.expr(0)?);
            if self.peek().kind == TokenKind::Comma {
                self.advance();
            } else {
                break;
            }
        }
        Ok(items)
    }

    fn list(&mut self, element: ValueType) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LBrace, "`{`")?;
        let items = self.comma_separated(TokenKind::RBrace)?;
        self.expect(TokenKind::RBrace, "`}` or `,`")?;
        Ok(Expr::List(items, element))
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                let expr = Expr::Name(name);
                if self.peek().kind == TokenKind::LParen {
                    let args = self.call_args()?;
                    return Ok(Expr::Call(Box::new(expr), args));
                }
                Ok(expr)
            }
            TokenKind::Integer(text) => {
                self.advance();
                Ok(Expr::Literal(Literal::Integer(text)))
            }
            TokenKind::Decimal(text) => {
                self.advance();
                Ok(Expr::Literal(Literal::Decimal(text)))
            }
            TokenKind::Str(text) => {
                self.advance();
                Ok(Expr::Literal(Literal::Str(text)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Literal(Literal::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Literal(Literal::Bool(false)))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expr(0)?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            TokenKind::LBrace => self.list(self.list_element),
            TokenKind::New => {
                self.advance();
                let element = match &self.peek().kind {
                    TokenKind::Ident(name) => match types::from_str(name) {
                        Some(ty) if !ty.is_array() => ty,
                        _ => {
                            let tok = self.peek();
                            return Err(ParseError::new(
                                format!("unknown array element type `{}`", name),
                                tok.start,
                                tok.end,
                            ));
                        }
                    },
                    _ => return Err(self.unexpected("an element type after `new`")),
                };
                self.advance();
                self.expect(TokenKind::LBracket, "`[`")?;
                self.expect(TokenKind::RBracket, "`]`")?;
                self.list(element)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }
}

/// Parse one expression text.
///
/// ## Errors
/// Returns a [`ParseError`] with the byte span of the offending token.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_expr(source: &str) -> Result<Expr, ParseError> {
    let tokens = lexer::lex(source)?;
    Parser::new(&tokens).parse_expression()
}

/// Parse a constant value or variable default declared with type `ty`.
///
/// Bare `{...}` list literals take `ty`'s element type.
pub fn parse_value(source: &str, ty: ValueType) -> Result<Expr, ParseError> {
    let tokens = lexer::lex(source)?;
    Parser::new(&tokens).with_list_element(ty).parse_expression()
}

/// Parse an assignment (`target = expr`), the textual form of an `Eval` statement.
pub fn parse_assignment(source: &str) -> Result<(String, Expr), ParseError> {
    let tokens = lexer::lex(source)?;
    Parser::new(&tokens).parse_assignment()
}
