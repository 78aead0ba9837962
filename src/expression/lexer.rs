//! Lexer for single-variable arithmetic expressions.

use crate::expression::error::{ExpressionError, Span};

/// Token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

/// Tokenize expression text. Whitespace is skipped; `**` is read as `^`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExpressionError> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let end_of = |i: usize| chars.get(i).map_or(source.len(), |(pos, _)| *pos);

    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, ch) = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if ch.is_ascii_digit() || (ch == '.' && chars.get(i + 1).is_some_and(|(_, c)| c.is_ascii_digit())) {
            let next = lex_number(&chars, i);
            let end = end_of(next);
            let text = &source[start..end];
            let value = text.parse::<f64>().map_err(|_| ExpressionError::Lex {
                message: format!("malformed number {text:?}"),
                span: Span::new(start, end),
            })?;
            tokens.push(Token { kind: TokenKind::Number(value), span: Span::new(start, end) });
            i = next;
            continue;
        }

        if ch.is_alphabetic() || ch == '_' {
            let mut next = i;
            while next < chars.len() && (chars[next].1.is_alphanumeric() || chars[next].1 == '_') {
                next += 1;
            }
            let end = end_of(next);
            tokens.push(Token {
                kind: TokenKind::Ident(source[start..end].to_string()),
                span: Span::new(start, end),
            });
            i = next;
            continue;
        }

        let (kind, width) = match ch {
            '+' => (TokenKind::Plus, 1),
            '-' => (TokenKind::Minus, 1),
            '*' if chars.get(i + 1).is_some_and(|(_, c)| *c == '*') => (TokenKind::Caret, 2),
            '*' => (TokenKind::Star, 1),
            '/' => (TokenKind::Slash, 1),
            '^' => (TokenKind::Caret, 1),
            '(' => (TokenKind::LParen, 1),
            ')' => (TokenKind::RParen, 1),
            other => {
                return Err(ExpressionError::Lex {
                    message: format!("unexpected character {other:?}"),
                    span: Span::new(start, end_of(i + 1)),
                })
            }
        };
        tokens.push(Token { kind, span: Span::new(start, end_of(i + width)) });
        i += width;
    }

    Ok(tokens)
}

/// Returns the index one past the number starting at `i`: digits, optional fraction and an
/// exponent only when `e` is followed by digits (otherwise `e` is the constant).
fn lex_number(chars: &[(usize, char)], mut i: usize) -> usize {
    let is_digit = |i: usize| chars.get(i).is_some_and(|(_, c)| c.is_ascii_digit());

    while is_digit(i) {
        i += 1;
    }
    if chars.get(i).is_some_and(|(_, c)| *c == '.') {
        i += 1;
        while is_digit(i) {
            i += 1;
        }
    }
    if chars.get(i).is_some_and(|(_, c)| *c == 'e' || *c == 'E') {
        let signed = chars.get(i + 1).is_some_and(|(_, c)| *c == '+' || *c == '-');
        let first_digit = if signed { i + 2 } else { i + 1 };
        if is_digit(first_digit) {
            i = first_digit;
            while is_digit(i) {
                i += 1;
            }
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn operators_and_numbers() {
        assert_eq!(
            vec![
                TokenKind::Number(2.5),
                TokenKind::Star,
                TokenKind::Ident("x".to_string()),
                TokenKind::Caret,
                TokenKind::Number(2.0),
                TokenKind::Minus,
                TokenKind::LParen,
                TokenKind::Number(1.0),
                TokenKind::Slash,
                TokenKind::Number(3.0),
                TokenKind::RParen,
            ],
            kinds("2.5 * x^2 - (1/3)")
        );
    }

    #[test]
    fn double_star_is_power() {
        assert_eq!(
            vec![TokenKind::Ident("x".to_string()), TokenKind::Caret, TokenKind::Number(3.0)],
            kinds("x**3")
        );
    }

    #[test]
    fn exponent_versus_constant_e() {
        assert_eq!(vec![TokenKind::Number(1500.0)], kinds("1.5e3"));
        assert_eq!(vec![TokenKind::Number(0.025)], kinds("2.5E-2"));
        assert_eq!(
            vec![TokenKind::Number(2.0), TokenKind::Ident("e".to_string())],
            kinds("2e")
        );
        assert_eq!(vec![TokenKind::Number(0.5)], kinds(".5"));
    }

    #[test]
    fn spans_are_byte_offsets() {
        let tokens = tokenize("π + sin").unwrap();

        assert_eq!(Span::new(0, 2), tokens[0].span);
        assert_eq!(Span::new(3, 4), tokens[1].span);
        assert_eq!(Span::new(5, 8), tokens[2].span);
    }

    #[test]
    fn rejects_unknown_character() {
        let error = tokenize("x; 2").unwrap_err();

        assert_eq!(
            ExpressionError::Lex { message: "unexpected character ';'".to_string(), span: Span::new(1, 2) },
            error
        );
    }
}
