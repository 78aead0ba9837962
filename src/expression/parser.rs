//! Recursive-descent parser producing [Node] trees.
//!
//! Precedence, lowest first: `+ -`, `* /` and implicit multiplication, unary sign, `^`
//! (right-associative). `-x^2` therefore reads as `-(x^2)`.

use std::f64::consts::{E, PI};

use crate::expression::ast::{BinaryOp, Function, Node};
use crate::expression::error::{ExpressionError, Span};
use crate::expression::lexer::{Token, TokenKind};

/// Deepest nesting of parentheses, signs and exponents accepted.
const MAX_DEPTH: usize = 256;
/// Longest token stream accepted; bounds the depth of the evaluated tree.
const MAX_TOKENS: usize = 4096;

/// Parser state wrapping a token stream.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    source_len: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>, source_len: usize) -> Self {
        Self { tokens, pos: 0, source_len, depth: 0 }
    }

    /// Runs `rule` one nesting level deeper, failing past [MAX_DEPTH].
    fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Parser) -> Result<T, ExpressionError>,
    ) -> Result<T, ExpressionError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExpressionError::Parse {
                message: format!("expression is nested deeper than {MAX_DEPTH} levels"),
                span: self.current_span(),
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &TokenKind) -> Result<(), ExpressionError> {
        match self.tokens.get(self.pos) {
            Some(tok) if &tok.kind == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(tok) => Err(ExpressionError::Parse {
                message: format!("expected {expected:?}, got {:?}", tok.kind),
                span: tok.span,
            }),
            None => Err(ExpressionError::Parse {
                message: format!("expected {expected:?}, got end of input"),
                span: self.eof_span(),
            }),
        }
    }

    fn current_span(&self) -> Span {
        self.tokens.get(self.pos).map_or(self.eof_span(), |t| t.span)
    }

    fn eof_span(&self) -> Span {
        Span::new(self.source_len, self.source_len)
    }
}

/// Parse a token stream into a single expression tree. Trailing tokens are an error.
pub fn parse(tokens: Vec<Token>, source_len: usize) -> Result<Node, ExpressionError> {
    if tokens.is_empty() {
        return Err(ExpressionError::Parse {
            message: "expression is empty".to_string(),
            span: Span::new(0, source_len),
        });
    }
    if tokens.len() > MAX_TOKENS {
        return Err(ExpressionError::Parse {
            message: format!("expression has more than {MAX_TOKENS} tokens"),
            span: Span::new(0, source_len),
        });
    }

    let mut p = Parser::new(tokens, source_len);
    let node = parse_additive(&mut p)?;
    if let Some(kind) = p.peek_kind() {
        return Err(ExpressionError::Parse {
            message: format!("unexpected {kind:?} after end of expression"),
            span: p.current_span(),
        });
    }
    Ok(node)
}

fn parse_additive(p: &mut Parser) -> Result<Node, ExpressionError> {
    p.nested(parse_additive_terms)
}

fn parse_additive_terms(p: &mut Parser) -> Result<Node, ExpressionError> {
    let mut left = parse_multiplicative(p)?;
    loop {
        let op = match p.peek_kind() {
            Some(TokenKind::Plus) => BinaryOp::Add,
            Some(TokenKind::Minus) => BinaryOp::Sub,
            _ => break,
        };
        p.advance();
        let right = parse_multiplicative(p)?;
        left = Node::Binary { op, lhs: Box::new(left), rhs: Box::new(right) };
    }
    Ok(left)
}

fn parse_multiplicative(p: &mut Parser) -> Result<Node, ExpressionError> {
    let mut left = parse_unary(p)?;
    loop {
        let (op, right) = match p.peek_kind() {
            Some(TokenKind::Star) => {
                p.advance();
                (BinaryOp::Mul, parse_unary(p)?)
            }
            Some(TokenKind::Slash) => {
                p.advance();
                (BinaryOp::Div, parse_unary(p)?)
            }
            // implicit multiplication: 2x, 3(x + 1), x sin(x)
            Some(TokenKind::Number(_)) | Some(TokenKind::Ident(_)) | Some(TokenKind::LParen) => {
                (BinaryOp::Mul, parse_power(p)?)
            }
            _ => break,
        };
        left = Node::Binary { op, lhs: Box::new(left), rhs: Box::new(right) };
    }
    Ok(left)
}

fn parse_unary(p: &mut Parser) -> Result<Node, ExpressionError> {
    p.nested(parse_signed)
}

fn parse_signed(p: &mut Parser) -> Result<Node, ExpressionError> {
    match p.peek_kind() {
        Some(TokenKind::Minus) => {
            p.advance();
            Ok(Node::Neg(Box::new(parse_unary(p)?)))
        }
        Some(TokenKind::Plus) => {
            p.advance();
            parse_unary(p)
        }
        _ => parse_power(p),
    }
}

fn parse_power(p: &mut Parser) -> Result<Node, ExpressionError> {
    let base = parse_primary(p)?;
    if matches!(p.peek_kind(), Some(TokenKind::Caret)) {
        p.advance();
        let exponent = parse_unary(p)?;
        return Ok(Node::Binary { op: BinaryOp::Pow, lhs: Box::new(base), rhs: Box::new(exponent) });
    }
    Ok(base)
}

fn parse_primary(p: &mut Parser) -> Result<Node, ExpressionError> {
    let span = p.current_span();
    match p.peek_kind().cloned() {
        Some(TokenKind::Number(n)) => {
            p.advance();
            Ok(Node::Number(n))
        }
        Some(TokenKind::LParen) => {
            p.advance();
            let node = parse_additive(p)?;
            p.expect(&TokenKind::RParen)?;
            Ok(node)
        }
        Some(TokenKind::Ident(name)) => {
            p.advance();
            match name.as_str() {
                "x" => Ok(Node::Variable),
                "pi" | "π" => Ok(Node::Number(PI)),
                "e" => Ok(Node::Number(E)),
                _ => match Function::from_name(&name) {
                    Some(function) => {
                        if !matches!(p.peek_kind(), Some(TokenKind::LParen)) {
                            return Err(ExpressionError::Parse {
                                message: format!("function {name} must be followed by '('"),
                                span: p.current_span(),
                            });
                        }
                        p.advance();
                        let argument = parse_additive(p)?;
                        p.expect(&TokenKind::RParen)?;
                        Ok(Node::Call { function, argument: Box::new(argument) })
                    }
                    None => Err(ExpressionError::Parse {
                        message: format!("unknown identifier {name:?}"),
                        span,
                    }),
                },
            }
        }
        Some(kind) => Err(ExpressionError::Parse {
            message: format!("expected expression, got {kind:?}"),
            span,
        }),
        None => Err(ExpressionError::Parse {
            message: "expected expression, got end of input".to_string(),
            span,
        }),
    }
}
