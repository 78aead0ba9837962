use log::{trace, warn};
use nalgebra::DMatrix;

use crate::{config::DEFAULT_PIVOT_TOLERANCE, error::SplineError};

/// Inverse of a square matrix by Gauss-Jordan elimination with partial pivoting, using the
/// default pivot tolerance of `1e-12`.
/// # Example
/// ```
/// use nalgebra::DMatrix;
/// use spline_steps::invert;
///
/// let matrix = DMatrix::from_row_slice(2, 2, &[4.0, 7.0, 2.0, 6.0]);
/// let inverse = invert(&matrix).unwrap();
///
/// assert!(((&matrix * &inverse) - DMatrix::<f64>::identity(2, 2)).amax() < 1e-12);
/// ```
/// # Errors
/// [SplineError::Singular] when no usable pivot exists for some column.
pub fn invert(matrix: &DMatrix<f64>) -> Result<DMatrix<f64>, SplineError> {
    invert_with_tolerance(matrix, DEFAULT_PIVOT_TOLERANCE)
}

/// Same as [invert] with a custom threshold below which a pivot counts as zero.
pub fn invert_with_tolerance(matrix: &DMatrix<f64>, tolerance: f64) -> Result<DMatrix<f64>, SplineError> {
    if !matrix.is_square() {
        return Err(SplineError::DegenerateSystem(format!(
            "cannot invert a {}x{} matrix",
            matrix.nrows(),
            matrix.ncols()
        )));
    }

    let size = matrix.nrows();
    let mut working = matrix.clone();
    let mut inverse = DMatrix::<f64>::identity(size, size);

    for i in 0..size {
        let pivot_row = select_pivot_row(&working, i);
        if pivot_row != i {
            trace!("column {}: swapping rows {} and {}", i, i, pivot_row);
            working.swap_rows(i, pivot_row);
            inverse.swap_rows(i, pivot_row);
        }

        let pivot = working[(i, i)];
        if pivot.abs() < tolerance {
            warn!("column {}: pivot {:e} below tolerance {:e}, matrix is singular", i, pivot, tolerance);
            return Err(SplineError::Singular);
        }

        for j in 0..size {
            working[(i, j)] /= pivot;
            inverse[(i, j)] /= pivot;
        }

        for k in 0..size {
            if k == i {
                continue;
            }
            let factor = working[(k, i)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..size {
                let working_step = factor * working[(i, j)];
                let inverse_step = factor * inverse[(i, j)];
                working[(k, j)] -= working_step;
                inverse[(k, j)] -= inverse_step;
            }
        }
    }

    Ok(inverse)
}

/// Row at or below `column` holding the largest absolute value in that column.
fn select_pivot_row(matrix: &DMatrix<f64>, column: usize) -> usize {
    let mut pivot_row = column;
    for row in column + 1..matrix.nrows() {
        if matrix[(row, column)].abs() > matrix[(pivot_row, column)].abs() {
            pivot_row = row;
        }
    }
    pivot_row
}
