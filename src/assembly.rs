use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::{
    config::DEFAULT_PIVOT_TOLERANCE,
    error::SplineError,
    inverse::invert_with_tolerance,
    point::Point,
    segment::SplineSegment,
    system::{Boundary, LinearSystem},
    unknown::{Unknown, UnknownLayout},
};

/// Solution vector of `system`, ordered like its layout: `inverse(matrix) * rhs`.
/// # Errors
/// [SplineError::Singular] when the matrix cannot be inverted.
pub fn solve(system: &LinearSystem) -> Result<DVector<f64>, SplineError> {
    solve_with_inverse(system, DEFAULT_PIVOT_TOLERANCE).map(|(_, solution)| solution)
}

/// Inverse of the system matrix together with the solution vector.
pub fn solve_with_inverse(
    system: &LinearSystem,
    pivot_tolerance: f64,
) -> Result<(DMatrix<f64>, DVector<f64>), SplineError> {
    let inverse = invert_with_tolerance(system.get_matrix(), pivot_tolerance)?;
    let solution = &inverse * system.get_rhs();
    debug!("solved system of size {}", solution.len());
    Ok((inverse, solution))
}

/// Unpacks a solution vector into one segment per pair of consecutive points.
///
/// `a_j` is `y_j`; `b_j`, `c_j` and `d_j` are looked up through `layout`. The unknown fixed by the
/// boundary takes its known value. A coefficient with no column and no boundary value is 0.
pub fn assemble(
    points: &[Point],
    boundary: &Boundary,
    solution: &DVector<f64>,
    layout: &UnknownLayout,
) -> Vec<SplineSegment> {
    let eliminated = UnknownLayout::eliminated_unknown(boundary.mode());
    let value_of = |unknown: Unknown| -> f64 {
        match layout.column_of(unknown) {
            Some(column) => solution.get(column).copied().unwrap_or(0.0),
            None if unknown == eliminated => boundary.eliminated_value(),
            None => 0.0,
        }
    };

    points
        .windows(2)
        .enumerate()
        .map(|(j, pair)| {
            SplineSegment::new(
                j,
                [pair[0].get_y(), value_of(Unknown::b(j)), value_of(Unknown::c(j)), value_of(Unknown::d(j))],
                pair[0].get_x(),
                pair[1].get_x(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use super::*;
    use crate::system::build;

    fn points(xy: &[(f64, f64)]) -> Vec<Point> {
        xy.iter().enumerate().map(|(i, (x, y))| Point::new(*x, *y, i)).collect()
    }

    #[test]
    fn natural_three_points() {
        let eps = 1e-9;
        let points = points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let system = build(&points, &Boundary::Natural).unwrap();
        let solution = solve(&system).unwrap();
        let segments = assemble(&points, &Boundary::Natural, &solution, system.get_layout());

        assert_eq!(2, segments.len());
        assert_eq!(0.0, segments[0].get_c());
        // symmetric data: S0 = 1.5x - 0.5x^3, S1 = 1 - 1.5(x-1)^2 + 0.5(x-1)^3
        assert_approx_eq!(segments[0].get_b(), 1.5, eps);
        assert_approx_eq!(segments[0].get_d(), -0.5, eps);
        assert_approx_eq!(segments[1].get_a(), 1.0, eps);
        assert_approx_eq!(segments[1].get_b(), 0.0, eps);
        assert_approx_eq!(segments[1].get_c(), -1.5, eps);
        assert_approx_eq!(segments[1].get_d(), 0.5, eps);
        assert_approx_eq!(segments[0].evaluate(1.0), 1.0, eps);
        assert_approx_eq!(segments[1].evaluate(1.0), 1.0, eps);
    }

    #[test]
    fn clamped_two_points() {
        let eps = 1e-9;
        let boundary = Boundary::clamped(0.0, 4.0);
        let points = points(&[(0.0, 0.0), (2.0, 4.0)]);
        let system = build(&points, &boundary).unwrap();
        let solution = solve(&system).unwrap();
        let segments = assemble(&points, &boundary, &solution, system.get_layout());

        assert_eq!(1, segments.len());
        assert_eq!(0.0, segments[0].get_b());
        // x^2 is the only cubic through the points with these slopes
        assert_approx_eq!(segments[0].get_c(), 1.0, eps);
        assert_approx_eq!(segments[0].get_d(), 0.0, eps);
        assert_approx_eq!(segments[0].first_derivative(2.0), 4.0, eps);
    }

    #[test]
    fn clamped_two_points_with_start_slope() {
        let eps = 1e-9;
        let boundary = Boundary::clamped(1.0, -1.0);
        let points = points(&[(0.0, 0.0), (1.0, 0.0)]);
        let system = build(&points, &boundary).unwrap();
        let segments = assemble(&points, &boundary, &solve(&system).unwrap(), system.get_layout());

        assert_eq!(1.0, segments[0].get_b());
        assert_approx_eq!(segments[0].evaluate(1.0), 0.0, eps);
        assert_approx_eq!(segments[0].first_derivative(0.0), 1.0, eps);
        assert_approx_eq!(segments[0].first_derivative(1.0), -1.0, eps);
    }

    #[test]
    fn zero_width_segment_is_singular() {
        let points = points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 2.0)]);
        let system = build(&points, &Boundary::Natural).unwrap();

        assert_eq!(Err(SplineError::Singular), solve(&system));
    }

    #[test]
    fn missing_entries_default_to_zero() {
        let points = points(&[(0.0, 1.0), (1.0, 2.0)]);
        let layout = UnknownLayout::new(1, Boundary::Natural.mode());
        let segments = assemble(&points, &Boundary::Natural, &DVector::from_vec(vec![3.0]), &layout);

        assert_eq!([1.0, 3.0, 0.0, 0.0], segments[0].get_coefficients());
    }
}
