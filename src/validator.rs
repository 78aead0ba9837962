//! Checks on raw input before any system is built.
//!
//! Every problem is reported, not only the first one, so the caller can show them all at once.
//! An empty list means the input can be solved.

use log::warn;

use crate::{
    config::SolverOptions,
    error::{Axis, ValidationIssue},
    expression::{Expression, FunctionEvaluator},
    point::{parse_coordinate, RawPoint},
};

/// Validates raw points and, in function mode, the expression that produces their y values.
///
/// - fewer than 2 points: only [ValidationIssue::InsufficientPoints] is returned,
/// - each empty or non-numeric coordinate: [ValidationIssue::InvalidNumber],
/// - each pair of equal x values (exact comparison after sorting): [ValidationIssue::DuplicateX],
/// - expression that fails to parse, or fails to evaluate at one of the x values:
///   [ValidationIssue::Expression] with the evaluator's message.
/// # Example
/// ```
/// use spline_steps::{validate, RawPoint, ValidationIssue};
///
/// let points = vec![RawPoint::new("1", "2"), RawPoint::new("1", "5")];
/// assert_eq!(vec![ValidationIssue::DuplicateX(1.0)], validate(&points, None));
/// ```
pub fn validate(points: &[RawPoint], expression: Option<&str>) -> Vec<ValidationIssue> {
    if points.len() < 2 {
        return vec![ValidationIssue::InsufficientPoints { got: points.len() }];
    }

    let mut issues = Vec::new();
    let mut xs = Vec::with_capacity(points.len());

    for (i, raw) in points.iter().enumerate() {
        let x = parse_coordinate(&raw.x);
        match x {
            Some(x) => xs.push(x),
            None => issues.push(ValidationIssue::InvalidNumber { index: i + 1, axis: Axis::X, value: raw.x.clone() }),
        }
        if parse_coordinate(&raw.y).is_none() {
            issues.push(ValidationIssue::InvalidNumber { index: i + 1, axis: Axis::Y, value: raw.y.clone() });
        }
    }

    issues.extend(duplicate_xs(&xs));

    if let Some(source) = expression {
        issues.extend(validate_expression(source, &xs));
    }

    issues
}

/// Advisory for large inputs; solving is still allowed.
pub fn check_point_count(count: usize, options: &SolverOptions) -> Option<String> {
    if count > options.recommended_max_points {
        let message = format!(
            "{} points given, no more than {} are recommended to keep the system readable",
            count, options.recommended_max_points
        );
        warn!("{}", message);
        Some(message)
    } else {
        None
    }
}

fn duplicate_xs(xs: &[f64]) -> Vec<ValidationIssue> {
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);

    sorted
        .windows(2)
        .filter(|w| w[0] == w[1])
        .map(|w| ValidationIssue::DuplicateX(w[1]))
        .collect()
}

/// Validates sampling `evaluator` at `xs` in function mode: point count, non-finite or
/// duplicate x, and every x where the evaluator fails.
pub fn validate_samples<E>(evaluator: &E, xs: &[f64]) -> Vec<ValidationIssue>
where
    E: FunctionEvaluator + ?Sized,
{
    if xs.len() < 2 {
        return vec![ValidationIssue::InsufficientPoints { got: xs.len() }];
    }

    let mut issues = Vec::new();
    let mut finite = Vec::with_capacity(xs.len());
    for (i, x) in xs.iter().enumerate() {
        if x.is_finite() {
            finite.push(*x);
        } else {
            issues.push(ValidationIssue::InvalidNumber { index: i + 1, axis: Axis::X, value: x.to_string() });
        }
    }

    issues.extend(duplicate_xs(&finite));
    issues.extend(evaluation_issues(evaluator, &finite));
    issues
}

fn validate_expression(source: &str, xs: &[f64]) -> Vec<ValidationIssue> {
    match Expression::parse(source) {
        Ok(expression) => evaluation_issues(&expression, xs),
        Err(error) => vec![ValidationIssue::Expression(error.to_string())],
    }
}

fn evaluation_issues<E>(evaluator: &E, xs: &[f64]) -> Vec<ValidationIssue>
where
    E: FunctionEvaluator + ?Sized,
{
    xs.iter()
        .filter_map(|x| evaluator.evaluate(*x).err())
        .map(|error| ValidationIssue::Expression(error.to_string()))
        .collect()
}
