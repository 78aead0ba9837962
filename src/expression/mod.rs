//! Sandboxed evaluation of single-variable expressions such as `x^3 - 2sin(x)`.
//!
//! Text is lexed and parsed into a small syntax tree which is then evaluated directly;
//! nothing is ever compiled or executed as host code. Supported: numbers, the variable `x`,
//! constants `pi` and `e`, `+ - * / ^`, parentheses, implicit multiplication and a fixed
//! function set (see [ast::Function]).

pub mod ast;
mod error;
mod lexer;
mod parser;

pub use error::{ExpressionError, Span};

use ast::Node;

/// Relative step of the central difference used by [FunctionEvaluator::derivative].
pub const DERIVATIVE_STEP: f64 = 1e-5;

/// Source of y values (and boundary derivatives) for points sampled from a function.
pub trait FunctionEvaluator {
    fn evaluate(&self, x: f64) -> Result<f64, ExpressionError>;

    /// First derivative at `x`. The default is a central difference with step
    /// `DERIVATIVE_STEP * max(1, |x|)`.
    fn derivative(&self, x: f64) -> Result<f64, ExpressionError> {
        let h = DERIVATIVE_STEP * x.abs().max(1.0);
        let forward = self.evaluate(x + h)?;
        let backward = self.evaluate(x - h)?;
        Ok((forward - backward) / (2.0 * h))
    }
}

impl<F> FunctionEvaluator for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> Result<f64, ExpressionError> {
        finite_at(self(x), x)
    }
}

/// Parsed expression in the variable `x`.
/// # Example
/// ```
/// use spline_steps::{Expression, FunctionEvaluator};
/// use assert_approx_eq::assert_approx_eq;
///
/// let expression = Expression::parse("3x^2 - 2").unwrap();
///
/// assert_approx_eq!(10.0, expression.evaluate(2.0).unwrap(), 1e-12);
/// assert_approx_eq!(12.0, expression.derivative(2.0).unwrap(), 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
}

impl Expression {
    /// # Errors
    /// [ExpressionError::Lex] or [ExpressionError::Parse] with the offending byte span.
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        let tokens = lexer::tokenize(source)?;
        let root = parser::parse(tokens, source.len())?;
        Ok(Expression { source: source.to_string(), root })
    }

    pub fn get_source(&self) -> &str {
        &self.source
    }

    pub fn get_root(&self) -> &Node {
        &self.root
    }
}

impl FunctionEvaluator for Expression {
    /// # Errors
    /// [ExpressionError::Eval] when the value at `x` is not finite (division by zero,
    /// logarithm of a negative number, ...).
    fn evaluate(&self, x: f64) -> Result<f64, ExpressionError> {
        finite_at(self.root.evaluate(x), x)
    }
}

fn finite_at(value: f64, x: f64) -> Result<f64, ExpressionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExpressionError::Eval(format!("function is not defined at x = {x} (got {value})")))
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use super::*;

    #[test]
    fn evaluate_polynomial() {
        let eps = 1e-12;
        let expression = Expression::parse("x^3 - 2x + 1").unwrap();

        assert_approx_eq!(expression.evaluate(0.0).unwrap(), 1.0, eps);
        assert_approx_eq!(expression.evaluate(2.0).unwrap(), 5.0, eps);
        assert_approx_eq!(expression.evaluate(-1.5).unwrap(), -0.375, eps);
        assert_eq!("x^3 - 2x + 1", expression.get_source());
    }

    #[test]
    fn non_finite_values_are_errors() {
        let expression = Expression::parse("1 / x").unwrap();

        assert!(expression.evaluate(0.0).is_err());
        assert!(Expression::parse("ln(x)").unwrap().evaluate(-1.0).is_err());
        assert!(Expression::parse("sqrt(x)").unwrap().evaluate(4.0).is_ok());
    }

    #[test]
    fn numeric_derivative() {
        let eps = 1e-6;

        let cubic = Expression::parse("x^3").unwrap();
        assert_approx_eq!(cubic.derivative(2.0).unwrap(), 12.0, eps);
        assert_approx_eq!(cubic.derivative(-100.0).unwrap(), 30000.0, 1e-3);

        let sine = Expression::parse("sin(x)").unwrap();
        assert_approx_eq!(sine.derivative(0.3).unwrap(), 0.3_f64.cos(), eps);
    }

    #[test]
    fn closures_are_evaluators() {
        let eps = 1e-6;
        let square = |x: f64| x * x;

        assert_approx_eq!(square.evaluate(3.0).unwrap(), 9.0, eps);
        assert_approx_eq!(square.derivative(3.0).unwrap(), 6.0, eps);
    }

    #[test]
    fn parse_errors_carry_spans() {
        match Expression::parse("x + $") {
            Err(ExpressionError::Lex { span, .. }) => assert_eq!(Span::new(4, 5), span),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
