use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::{
    assembly::{assemble, solve_with_inverse},
    config::SolverOptions,
    error::{Axis, SplineError, ValidationIssue},
    expression::{Expression, FunctionEvaluator},
    point::{normalize, sample_function, sort_points, Point, RawPoint},
    segment::SplineSegment,
    spline::Spline,
    system::{build, Boundary, BoundaryMode, LinearSystem},
    validator::{check_point_count, validate, validate_samples},
};

/// Everything produced by one solve: the system, its inverse, the solution vector and the spline.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    boundary: Boundary,
    system: LinearSystem,
    inverse: DMatrix<f64>,
    solution: DVector<f64>,
    spline: Spline,
    advisory: Option<String>,
}

impl SolveResult {
    pub fn get_boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn get_system(&self) -> &LinearSystem {
        &self.system
    }

    pub fn get_inverse(&self) -> &DMatrix<f64> {
        &self.inverse
    }

    /// Raw solution vector, ordered like the system's unknown layout.
    pub fn get_solution(&self) -> &DVector<f64> {
        &self.solution
    }

    pub fn get_spline(&self) -> &Spline {
        &self.spline
    }

    /// Set when more points were given than [SolverOptions::recommended_max_points].
    pub fn get_advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn get_points(&self) -> &[Point] {
        self.spline.get_points()
    }

    pub fn get_segments(&self) -> &[SplineSegment] {
        self.spline.get_segments()
    }
}

/// Runs validation, normalization, system building, inversion and assembly in one call.
/// # Example
/// ```
/// use spline_steps::{Boundary, RawPoint, SplineSolver};
/// use assert_approx_eq::assert_approx_eq;
///
/// let points = vec![RawPoint::new("0", "0"), RawPoint::new("1", "1"), RawPoint::new("2", "0")];
/// let result = SplineSolver::new().solve(&points, &Boundary::Natural).unwrap();
///
/// assert_eq!(2, result.get_segments().len());
/// assert_approx_eq!(1.0, result.get_spline().interpolate(1.0).unwrap(), 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SplineSolver {
    options: SolverOptions,
}

impl SplineSolver {
    pub fn new() -> Self {
        SplineSolver::default()
    }

    pub fn with_options(options: SolverOptions) -> Self {
        SplineSolver { options }
    }

    pub fn get_options(&self) -> &SolverOptions {
        &self.options
    }

    /// # Errors
    /// [SplineError::Invalid] with every validation issue, or the first builder/inverter failure.
    pub fn solve(&self, points: &[RawPoint], boundary: &Boundary) -> Result<SolveResult, SplineError> {
        let issues = validate(points, None);
        if !issues.is_empty() {
            return Err(SplineError::Invalid(issues));
        }
        self.solve_points(normalize(points)?, boundary)
    }

    /// Numeric points in any order; they are sorted and checked for duplicate x first.
    pub fn solve_points(&self, points: Vec<Point>, boundary: &Boundary) -> Result<SolveResult, SplineError> {
        let points = sort_points(points);
        check_numeric_points(&points)?;
        let advisory = check_point_count(points.len(), &self.options);

        let system = build(&points, boundary)?;
        let (inverse, solution) = solve_with_inverse(&system, self.options.pivot_tolerance)?;
        let segments = assemble(&points, boundary, &solution, system.get_layout());
        debug!("assembled {} segments", segments.len());

        Ok(SolveResult {
            boundary: *boundary,
            system,
            inverse,
            solution,
            spline: Spline::new(points, segments)?,
            advisory,
        })
    }

    /// Function mode: y values are `expression` at each of `xs`. Under [BoundaryMode::Clamped]
    /// the end slopes are the expression's derivative at the first and last x.
    ///
    /// # Errors
    /// [SplineError::Expression] when the text does not parse, [SplineError::Invalid] with every
    /// sampling issue (duplicate x, each x where the expression is undefined).
    pub fn solve_function(
        &self,
        expression: &str,
        xs: &[f64],
        mode: BoundaryMode,
    ) -> Result<SolveResult, SplineError> {
        let expression = Expression::parse(expression)?;
        self.solve_evaluator(&expression, xs, mode)
    }

    /// Same as [SplineSolver::solve_function] for any [FunctionEvaluator].
    pub fn solve_evaluator<E>(&self, evaluator: &E, xs: &[f64], mode: BoundaryMode) -> Result<SolveResult, SplineError>
    where
        E: FunctionEvaluator + ?Sized,
    {
        let issues = validate_samples(evaluator, xs);
        if !issues.is_empty() {
            return Err(SplineError::Invalid(issues));
        }

        let points = sample_function(evaluator, xs)?;
        let boundary = match mode {
            BoundaryMode::Natural => Boundary::Natural,
            BoundaryMode::Clamped => Boundary::clamped(
                evaluator.derivative(points[0].get_x())?,
                evaluator.derivative(points[points.len() - 1].get_x())?,
            ),
        };
        self.solve_points(points, &boundary)
    }
}

fn check_numeric_points(points: &[Point]) -> Result<(), SplineError> {
    if points.len() < 2 {
        return Err(SplineError::Invalid(vec![ValidationIssue::InsufficientPoints { got: points.len() }]));
    }

    let mut issues = Vec::new();
    for (i, point) in points.iter().enumerate() {
        if !point.get_x().is_finite() {
            issues.push(ValidationIssue::InvalidNumber {
                index: point.get_original_index() + 1,
                axis: Axis::X,
                value: point.get_x().to_string(),
            });
        }
        if !point.get_y().is_finite() {
            issues.push(ValidationIssue::InvalidNumber {
                index: point.get_original_index() + 1,
                axis: Axis::Y,
                value: point.get_y().to_string(),
            });
        }
        if i > 0 && points[i - 1].get_x() == point.get_x() {
            issues.push(ValidationIssue::DuplicateX(point.get_x()));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(SplineError::Invalid(issues))
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::Rng;
    use super::*;

    const EPS: f64 = 1e-6;

    fn raw(xy: &[(f64, f64)]) -> Vec<RawPoint> {
        xy.iter().map(|p| RawPoint::from(*p)).collect()
    }

    fn random_points(rng: &mut impl Rng, n: usize) -> Vec<Point> {
        let mut x = rng.gen_range(-5.0..5.0);
        (0..n)
            .map(|i| {
                x += rng.gen_range(0.5..2.0);
                Point::new(x, rng.gen_range(-5.0..5.0), i)
            })
            .collect()
    }

    fn assert_junctions_smooth(result: &SolveResult) {
        let segments = result.get_segments();
        let points = result.get_points();
        for j in 0..segments.len() - 1 {
            let x = points[j + 1].get_x();
            let (left, right) = (&segments[j], &segments[j + 1]);

            assert_approx_eq!(left.evaluate(x), points[j + 1].get_y(), EPS);
            assert_approx_eq!(right.evaluate(x), points[j + 1].get_y(), EPS);
            assert_approx_eq!(left.first_derivative(x), right.first_derivative(x), EPS);
            assert_approx_eq!(left.second_derivative(x), right.second_derivative(x), EPS);
        }
        let last = &segments[segments.len() - 1];
        let last_point = &points[points.len() - 1];
        assert_approx_eq!(last.evaluate(last_point.get_x()), last_point.get_y(), EPS);
    }

    #[test]
    fn natural_scenario() {
        let result = SplineSolver::new()
            .solve(&raw(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]), &Boundary::Natural)
            .unwrap();
        let segments = result.get_segments();

        assert_eq!(2, segments.len());
        assert_eq!(0.0, segments[0].get_c());
        assert_approx_eq!(segments[0].evaluate(1.0), 1.0, EPS);
        assert_approx_eq!(segments[1].evaluate(1.0), 1.0, EPS);
        assert_approx_eq!(segments[0].second_derivative(0.0), 0.0, EPS);
        assert_approx_eq!(segments[1].second_derivative(2.0), 0.0, EPS);
        assert_eq!(5, result.get_solution().len());
        assert_eq!(&Boundary::Natural, result.get_boundary());
    }

    #[test]
    fn clamped_scenario() {
        let result = SplineSolver::new()
            .solve(&raw(&[(0.0, 0.0), (2.0, 4.0)]), &Boundary::clamped(0.0, 4.0))
            .unwrap();
        let segments = result.get_segments();

        assert_eq!(1, segments.len());
        assert_eq!(0.0, segments[0].get_b());
        assert_approx_eq!(segments[0].first_derivative(2.0), 4.0, EPS);
        assert_approx_eq!(segments[0].evaluate(2.0), 4.0, EPS);
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let result = SplineSolver::new()
            .solve(&raw(&[(2.0, 0.0), (0.0, 0.0), (1.0, 1.0)]), &Boundary::Natural)
            .unwrap();
        let indices: Vec<usize> = result.get_points().iter().map(|p| p.get_original_index()).collect();

        assert_eq!(vec![1, 2, 0], indices);
        assert_junctions_smooth(&result);
    }

    #[test]
    fn duplicate_x_is_never_solved() {
        let error = SplineSolver::new()
            .solve(&raw(&[(1.0, 2.0), (1.0, 5.0)]), &Boundary::Natural)
            .unwrap_err();
        assert_eq!(SplineError::Invalid(vec![ValidationIssue::DuplicateX(1.0)]), error);

        let error = SplineSolver::new()
            .solve_points(vec![Point::new(1.0, 2.0, 0), Point::new(1.0, 5.0, 1)], &Boundary::clamped(0.0, 0.0))
            .unwrap_err();
        assert_eq!(SplineError::Invalid(vec![ValidationIssue::DuplicateX(1.0)]), error);
    }

    #[test]
    fn insufficient_points() {
        let solver = SplineSolver::new();

        assert!(matches!(
            solver.solve(&raw(&[(1.0, 2.0)]), &Boundary::Natural),
            Err(SplineError::Invalid(_))
        ));
        assert!(solver.solve_function("x", &[1.0], BoundaryMode::Natural).is_err());
    }

    #[test]
    fn random_natural_splines() {
        let mut rng = rand::thread_rng();
        let solver = SplineSolver::new();

        for n in 2..=20 {
            let result = solver.solve_points(random_points(&mut rng, n), &Boundary::Natural).unwrap();
            let segments = result.get_segments();
            let points = result.get_points();

            assert_eq!(n - 1, segments.len());
            assert_approx_eq!(segments[0].second_derivative(points[0].get_x()), 0.0, EPS);
            assert_approx_eq!(segments[n - 2].second_derivative(points[n - 1].get_x()), 0.0, EPS);
            assert_junctions_smooth(&result);
        }
    }

    #[test]
    fn random_clamped_splines() {
        let mut rng = rand::thread_rng();
        let solver = SplineSolver::new();

        for n in 2..=20 {
            let start = rng.gen_range(-3.0..3.0);
            let end = rng.gen_range(-3.0..3.0);
            let result = solver.solve_points(random_points(&mut rng, n), &Boundary::clamped(start, end)).unwrap();
            let segments = result.get_segments();
            let points = result.get_points();

            assert_eq!(n - 1, segments.len());
            assert_eq!(start, segments[0].get_b());
            assert_approx_eq!(segments[0].first_derivative(points[0].get_x()), start, EPS);
            assert_approx_eq!(segments[n - 2].first_derivative(points[n - 1].get_x()), end, EPS);
            assert_junctions_smooth(&result);
        }
    }

    #[test]
    fn inverse_round_trip() {
        let mut rng = rand::thread_rng();
        let solver = SplineSolver::new();

        for boundary in [Boundary::Natural, Boundary::clamped(1.0, -1.0)] {
            let result = solver.solve_points(random_points(&mut rng, 8), &boundary).unwrap();
            let product = result.get_system().get_matrix() * result.get_inverse();

            for i in 0..product.nrows() {
                for j in 0..product.ncols() {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_approx_eq!(product[(i, j)], expected, EPS);
                }
            }
        }
    }

    #[test]
    fn function_mode_natural() {
        let result = SplineSolver::new()
            .solve_function("x^2", &[2.0, 0.0, 1.0], BoundaryMode::Natural)
            .unwrap();
        let points = result.get_points();

        assert_eq!(0.0, points[0].get_x());
        assert_eq!(4.0, points[2].get_y());
        assert_junctions_smooth(&result);
    }

    #[test]
    fn function_mode_clamped_reproduces_cubic() {
        // a clamped cubic spline is exact for cubic data with exact end slopes
        let xs = [-1.0, 0.0, 0.5, 2.0];
        let result = SplineSolver::new()
            .solve_function("x^3 - 2x", &xs, BoundaryMode::Clamped)
            .unwrap();

        match result.get_boundary() {
            Boundary::Clamped { start, end } => {
                assert_approx_eq!(*start, 1.0, EPS);
                assert_approx_eq!(*end, 10.0, EPS);
            }
            other => panic!("unexpected boundary {:?}", other),
        }
        for x in [-0.75, 0.25, 1.0, 1.9] {
            assert_approx_eq!(result.get_spline().interpolate(x).unwrap(), x * x * x - 2.0 * x, 1e-5);
        }
    }

    #[test]
    fn function_mode_errors() {
        let solver = SplineSolver::new();

        assert!(matches!(
            solver.solve_function("x +", &[0.0, 1.0], BoundaryMode::Natural),
            Err(SplineError::Expression(_))
        ));
        assert!(matches!(
            solver.solve_function("1 / x", &[0.0, 1.0], BoundaryMode::Natural),
            Err(SplineError::Invalid(_))
        ));
    }

    #[test]
    fn function_mode_reports_every_issue() {
        let solver = SplineSolver::new();

        match solver.solve_function("1/x", &[0.0, 1.0, 1.0], BoundaryMode::Natural) {
            Err(SplineError::Invalid(issues)) => {
                assert_eq!(2, issues.len());
                assert!(issues.contains(&ValidationIssue::DuplicateX(1.0)));
                assert!(issues.iter().any(|issue| matches!(issue, ValidationIssue::Expression(_))));
            }
            other => panic!("unexpected result {:?}", other),
        }

        match solver.solve_function("ln(x)", &[-1.0, 0.0, 1.0, 2.0], BoundaryMode::Clamped) {
            Err(SplineError::Invalid(issues)) => assert_eq!(2, issues.len()),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn point_count_advisory_is_kept() {
        let mut rng = rand::thread_rng();

        let result = SplineSolver::new().solve_points(random_points(&mut rng, 21), &Boundary::Natural).unwrap();
        assert!(result.get_advisory().unwrap().contains("no more than 20"));

        let result = SplineSolver::new().solve_points(random_points(&mut rng, 20), &Boundary::Natural).unwrap();
        assert_eq!(None, result.get_advisory());

        let solver = SplineSolver::with_options(SolverOptions::default().with_recommended_max_points(2));
        let result = solver.solve(&raw(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]), &Boundary::Natural).unwrap();
        assert!(result.get_advisory().is_some());
    }

    #[test]
    fn custom_pivot_tolerance() {
        let solver = SplineSolver::with_options(SolverOptions::default().with_pivot_tolerance(10.0));

        assert_eq!(
            Err(SplineError::Singular),
            solver.solve(&raw(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]), &Boundary::Natural)
        );
    }
}
