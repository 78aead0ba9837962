//! Expression error types with span-based diagnostics.

use thiserror::Error;

/// Byte range in the expression source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Errors produced while lexing, parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// Unexpected character or malformed number.
    #[error("lex error at {}-{}: {message}", .span.start, .span.end)]
    Lex { message: String, span: Span },
    /// Unexpected token, unknown identifier or missing parenthesis.
    #[error("parse error at {}-{}: {message}", .span.start, .span.end)]
    Parse { message: String, span: Span },
    /// Evaluation produced no usable number.
    #[error("evaluation error: {0}")]
    Eval(String),
}
