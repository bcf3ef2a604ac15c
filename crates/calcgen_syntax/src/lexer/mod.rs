//! Lexer for calculation expression text.
//!
//! Handles tokenization of the Java-flavored expression notation used by calculation pseudocode:
//! - Identifiers and the reserved words `true`, `false`, `new`
//! - Integer and decimal literals, with Java type suffixes (`10L`, `0.5D`) stripped
//! - Double-quoted strings with `\"`, `\\`, `\n`, `\t` escapes
//! - Binary operators, `=` and punctuation
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind};

use calcgen_core::lang::operators::BinaryOperator;

use crate::diagnostics::ParseError;

/// Lexer state over one expression text.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole source; the last token is always [`TokenKind::Eof`].
    ///
    /// ## Errors
    /// Returns the first [`ParseError`] encountered (unexpected character, unterminated string, malformed number).
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some(&(start, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
                continue;
            }
            if is_ident_start(c) {
                self.identifier(start);
            } else if c.is_ascii_digit() || (c == '.' && self.next_is_digit(start)) {
                self.number(start)?;
            } else if c == '"' {
                self.string(start)?;
            } else {
                self.symbol(start, c)?;
            }
        }
        let end = self.source.len();
        self.tokens.push(Token::new(TokenKind::Eof, end, end));
        Ok(self.tokens)
    }

    fn next_is_digit(&self, start: usize) -> bool {
        self.source[start + 1..].chars().next().is_some_and(|c| c.is_ascii_digit())
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut end = self.source.len();
        while let Some(&(idx, c)) = self.chars.peek() {
            if pred(c) {
                self.chars.next();
            } else {
                end = idx;
                break;
            }
        }
        end
    }

    fn identifier(&mut self, start: usize) {
        let end = self.take_while(is_ident_continue);
        let text = &self.source[start..end];
        let kind = tokens::keyword(text).unwrap_or_else(|| TokenKind::Ident(text.to_string()));
        self.tokens.push(Token::new(kind, start, end));
    }

    fn number(&mut self, start: usize) -> Result<(), ParseError> {
        let mut end = self.take_while(|c| c.is_ascii_digit());
        let mut is_decimal = false;

        if let Some(&(_, '.')) = self.chars.peek() {
            // `1.add(...)` is not valid source, so a dot after digits always starts a fraction.
            self.chars.next();
            is_decimal = true;
            end = self.take_while(|c| c.is_ascii_digit());
        }

        if let Some(&(_, 'e' | 'E')) = self.chars.peek() {
            self.chars.next();
            if let Some(&(_, '+' | '-')) = self.chars.peek() {
                self.chars.next();
            }
            let exp_start = self.chars.peek().map(|&(i, _)| i).unwrap_or(self.source.len());
            end = self.take_while(|c| c.is_ascii_digit());
            if end == exp_start {
                return Err(ParseError::new("malformed exponent in number", start, end));
            }
            is_decimal = true;
        }

        let text = self.source[start..end].to_string();
        let mut token_end = end;
        match self.chars.peek() {
            Some(&(idx, 'L' | 'l')) if !is_decimal => {
                self.chars.next();
                token_end = idx + 1;
            }
            Some(&(idx, 'D' | 'd' | 'F' | 'f')) => {
                self.chars.next();
                token_end = idx + 1;
                is_decimal = true;
            }
            Some(&(idx, c)) if is_ident_continue(c) => {
                return Err(ParseError::new(format!("invalid suffix `{}` on number", c), start, idx + 1));
            }
            _ => {}
        }

        let kind = if is_decimal {
            TokenKind::Decimal(text)
        } else {
            TokenKind::Integer(text)
        };
        self.tokens.push(Token::new(kind, start, token_end));
        Ok(())
    }

    fn string(&mut self, start: usize) -> Result<(), ParseError> {
        self.chars.next(); // opening quote
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((idx, '"')) => {
                    self.tokens.push(Token::new(TokenKind::Str(value), start, idx + 1));
                    return Ok(());
                }
                Some((idx, '\\')) => match self.chars.next() {
                    Some((_, '"')) => value.push('"'),
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((esc_idx, other)) => {
                        return Err(ParseError::new(
                            format!("unknown escape `\\{}`", other),
                            idx,
                            esc_idx + other.len_utf8(),
                        ));
                    }
                    None => break,
                },
                Some((_, c)) => value.push(c),
                None => break,
            }
        }
        Err(ParseError::new("unterminated string literal", start, self.source.len()))
    }

    fn symbol(&mut self, start: usize, c: char) -> Result<(), ParseError> {
        self.chars.next();
        let next = self.chars.peek().map(|&(_, n)| n);
        let (kind, len) = match (c, next) {
            ('|', Some('|')) => (TokenKind::Operator(BinaryOperator::Or), 2),
            ('&', Some('&')) => (TokenKind::Operator(BinaryOperator::And), 2),
            ('=', Some('=')) => (TokenKind::Operator(BinaryOperator::Eq), 2),
            ('!', Some('=')) => (TokenKind::Operator(BinaryOperator::NotEq), 2),
            ('<', Some('=')) => (TokenKind::Operator(BinaryOperator::LtEq), 2),
            ('>', Some('=')) => (TokenKind::Operator(BinaryOperator::GtEq), 2),
            ('<', _) => (TokenKind::Operator(BinaryOperator::Lt), 1),
            ('>', _) => (TokenKind::Operator(BinaryOperator::Gt), 1),
            ('+', _) => (TokenKind::Operator(BinaryOperator::Add), 1),
            ('-', _) => (TokenKind::Operator(BinaryOperator::Sub), 1),
            ('*', _) => (TokenKind::Operator(BinaryOperator::Mul), 1),
            ('/', _) => (TokenKind::Operator(BinaryOperator::Div), 1),
            ('%', _) => (TokenKind::Operator(BinaryOperator::Rem), 1),
            ('=', _) => (TokenKind::Assign, 1),
            ('.', _) => (TokenKind::Dot, 1),
            (',', _) => (TokenKind::Comma, 1),
            ('(', _) => (TokenKind::LParen, 1),
            (')', _) => (TokenKind::RParen, 1),
            ('{', _) => (TokenKind::LBrace, 1),
            ('}', _) => (TokenKind::RBrace, 1),
            ('[', _) => (TokenKind::LBracket, 1),
            (']', _) => (TokenKind::RBracket, 1),
            _ => {
                return Err(ParseError::new(
                    format!("unexpected character `{}`", c),
                    start,
                    start + c.len_utf8(),
                ));
            }
        };
        if len == 2 {
            self.chars.next();
        }
        self.tokens.push(Token::new(kind, start, start + len));
        Ok(())
    }
}

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex an expression text.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_member_call() {
        assert_eq!(
            kinds("a.add(b)"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Dot,
                TokenKind::Ident("add".into()),
                TokenKind::LParen,
                TokenKind::Ident("b".into()),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers_and_suffixes() {
        assert_eq!(
            kinds("7 7.5 10L 0.5D 2D 1e3 .25"),
            vec![
                TokenKind::Integer("7".into()),
                TokenKind::Decimal("7.5".into()),
                TokenKind::Integer("10".into()),
                TokenKind::Decimal("0.5".into()),
                TokenKind::Decimal("2".into()),
                TokenKind::Decimal("1e3".into()),
                TokenKind::Decimal(".25".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_invalid_number_suffix() {
        let err = lex("12abc").unwrap_err();
        assert!(err.message.contains("invalid suffix"));
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("a == b && c != d || e <= f"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Operator(BinaryOperator::Eq),
                TokenKind::Ident("b".into()),
                TokenKind::Operator(BinaryOperator::And),
                TokenKind::Ident("c".into()),
                TokenKind::Operator(BinaryOperator::NotEq),
                TokenKind::Ident("d".into()),
                TokenKind::Operator(BinaryOperator::Or),
                TokenKind::Ident("e".into()),
                TokenKind::Operator(BinaryOperator::LtEq),
                TokenKind::Ident("f".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_assignment_and_keywords() {
        assert_eq!(
            kinds("x = new BigDecimal[] {}"),
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Assign,
                TokenKind::New,
                TokenKind::Ident("BigDecimal".into()),
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\"b\\c""#),
            vec![TokenKind::Str("a\"b\\c".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex("\"abc").unwrap_err();
        assert_eq!(err.message, "unterminated string literal");
    }

    #[test]
    fn test_unexpected_character_span() {
        let err = lex("a # b").unwrap_err();
        assert_eq!(err.message, "unexpected character `#`");
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_token_spans() {
        let tokens = lex("ab + 10L").unwrap();
        assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
        assert_eq!((tokens[1].start, tokens[1].end), (3, 4));
        assert_eq!((tokens[2].start, tokens[2].end), (5, 8));
        assert_eq!((tokens[3].start, tokens[3].end), (8, 8));
    }
}
