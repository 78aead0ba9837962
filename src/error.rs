use thiserror::Error;

use crate::expression::ExpressionError;

/// Coordinate of a point that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Problem found in the input before any system is built. The validator collects all of them
/// so they can be shown at once.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("at least 2 points are needed to build a cubic spline, got {got}")]
    InsufficientPoints { got: usize },

    /// `index` is 1-based, as shown to the user.
    #[error("point {index}: {axis} value {value:?} is not a valid number")]
    InvalidNumber { index: usize, axis: Axis, value: String },

    #[error("duplicate points at x = {0}")]
    DuplicateX(f64),

    #[error("{0}")]
    Expression(String),
}

/// Failure of a single solve attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("degenerate system: {0}")]
    DegenerateSystem(String),

    #[error("matrix is not invertible: system has no unique solution")]
    Singular,

    #[error("invalid input: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),

    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error("x = {0} is out of range")]
    OutOfRange(f64),
}

impl From<Vec<ValidationIssue>> for SplineError {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        SplineError::Invalid(issues)
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<String>>()
        .join("; ")
}
