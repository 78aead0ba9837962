use std::fmt::Display;

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::{
    error::SplineError,
    point::Point,
    unknown::{Unknown, UnknownLayout},
};

/// Boundary condition selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryMode {
    /// Second derivative is zero at both ends (free boundary).
    Natural,
    /// First derivative is given at both ends.
    Clamped,
}

/// Boundary condition together with the values it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    Natural,
    /// `start` and `end` are the first derivatives at the first and last x.
    Clamped { start: f64, end: f64 },
}

impl Boundary {
    pub fn clamped(start: f64, end: f64) -> Self {
        Boundary::Clamped { start, end }
    }

    pub fn mode(&self) -> BoundaryMode {
        match self {
            Boundary::Natural => BoundaryMode::Natural,
            Boundary::Clamped { .. } => BoundaryMode::Clamped,
        }
    }

    /// Value of the unknown removed from the system: `c0 = 0` or `b0 = start`.
    pub fn eliminated_value(&self) -> f64 {
        match self {
            Boundary::Natural => 0.0,
            Boundary::Clamped { start, .. } => *start,
        }
    }
}

/// Step of the procedure a row of the system comes from. `usize` values are segment indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationKind {
    /// Last segment passes through the last point.
    Image,
    /// Segment `j` reaches `y_{j+1}` at its right end.
    Continuity(usize),
    /// First derivatives of segments `j` and `j + 1` agree at `x_{j+1}`.
    FirstDerivative(usize),
    /// Second derivatives of segments `j` and `j + 1` agree at `x_{j+1}`.
    SecondDerivative(usize),
    /// Condition at the last point given by the boundary.
    Boundary,
}

impl Display for EquationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquationKind::Image => write!(f, "image"),
            EquationKind::Continuity(j) => write!(f, "continuity {j}"),
            EquationKind::FirstDerivative(j) => write!(f, "first derivative {j}"),
            EquationKind::SecondDerivative(j) => write!(f, "second derivative {j}"),
            EquationKind::Boundary => write!(f, "boundary"),
        }
    }
}

/// Square system `matrix * unknowns = rhs`. Column `i` of `matrix` belongs to `layout.get(i)`,
/// row `i` was produced by `equations[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
    layout: UnknownLayout,
    equations: Vec<EquationKind>,
}

impl LinearSystem {
    pub fn get_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn get_rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    pub fn get_layout(&self) -> &UnknownLayout {
        &self.layout
    }

    pub fn get_equations(&self) -> &[EquationKind] {
        &self.equations
    }

    pub fn labels(&self) -> Vec<String> {
        self.layout.labels()
    }

    pub fn size(&self) -> usize {
        self.rhs.len()
    }
}

/// One equation per line, zero coefficients left out, e.g. `1·b0 + 1·d0 = 1`.
impl Display for LinearSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size() {
            let mut first = true;
            for (column, unknown) in self.layout.iter().enumerate() {
                let coefficient = self.matrix[(row, column)];
                if coefficient == 0.0 {
                    continue;
                }
                if first {
                    write!(f, "{}·{}", coefficient, unknown)?;
                    first = false;
                } else if coefficient < 0.0 {
                    write!(f, " - {}·{}", -coefficient, unknown)?;
                } else {
                    write!(f, " + {}·{}", coefficient, unknown)?;
                }
            }
            if first {
                write!(f, "0")?;
            }
            writeln!(f, " = {}", self.rhs[row])?;
        }
        Ok(())
    }
}

/// Builds the spline system for points ordered by ascending x.
///
/// Rows come in a fixed order: the image equation of the last segment, the continuity
/// equations, the first derivative and second derivative matching equations, and finally the
/// boundary equation at the last point. The unknown fixed by the boundary (`c0` or `b0`) has no
/// column; where it appears its known contribution is moved to the right-hand side.
/// # Example
/// ```
/// use spline_steps::{build, Boundary, Point};
///
/// let points = vec![Point::new(0.0, 0.0, 0), Point::new(1.0, 1.0, 1), Point::new(2.0, 0.0, 2)];
/// let system = build(&points, &Boundary::Natural).unwrap();
///
/// assert_eq!(5, system.size());
/// assert_eq!(vec!["b0", "b1", "c1", "d0", "d1"], system.labels());
/// ```
/// # Errors
/// [SplineError::DegenerateSystem] when fewer than 2 points are given.
pub fn build(points: &[Point], boundary: &Boundary) -> Result<LinearSystem, SplineError> {
    let n = points.len();
    if n < 2 {
        return Err(SplineError::DegenerateSystem(format!(
            "at least 2 points are needed, got {n}"
        )));
    }

    let number_of_segments = n - 1;
    let layout = UnknownLayout::new(number_of_segments, boundary.mode());
    let size = layout.len();
    debug!("building {:?} system: {} points, {} unknowns", boundary.mode(), n, size);

    let mut builder = SystemBuilder {
        matrix: DMatrix::<f64>::zeros(size, size),
        rhs: DVector::<f64>::zeros(size),
        equations: Vec::with_capacity(size),
        eliminated: UnknownLayout::eliminated_unknown(boundary.mode()),
        eliminated_value: boundary.eliminated_value(),
        layout,
    };

    let dx = |j: usize| points[j + 1].get_x() - points[j].get_x();
    let dy = |j: usize| points[j + 1].get_y() - points[j].get_y();
    let last = number_of_segments - 1;

    builder.value_equation(EquationKind::Image, last, dx(last), dy(last));

    for j in 0..last {
        builder.value_equation(EquationKind::Continuity(j), j, dx(j), dy(j));
    }

    for j in 0..last {
        let h = dx(j);
        builder.push_equation(
            EquationKind::FirstDerivative(j),
            &[
                (Unknown::b(j), 1.0),
                (Unknown::c(j), 2.0 * h),
                (Unknown::d(j), 3.0 * h.powi(2)),
                (Unknown::b(j + 1), -1.0),
            ],
            0.0,
        );
    }

    for j in 0..last {
        builder.push_equation(
            EquationKind::SecondDerivative(j),
            &[
                (Unknown::c(j), 2.0),
                (Unknown::d(j), 6.0 * dx(j)),
                (Unknown::c(j + 1), -2.0),
            ],
            0.0,
        );
    }

    let h = dx(last);
    match boundary {
        Boundary::Natural => builder.push_equation(
            EquationKind::Boundary,
            &[(Unknown::c(last), 2.0), (Unknown::d(last), 6.0 * h)],
            0.0,
        ),
        Boundary::Clamped { end, .. } => builder.push_equation(
            EquationKind::Boundary,
            &[
                (Unknown::b(last), 1.0),
                (Unknown::c(last), 2.0 * h),
                (Unknown::d(last), 3.0 * h.powi(2)),
            ],
            *end,
        ),
    }

    Ok(builder.finish())
}

struct SystemBuilder {
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
    equations: Vec<EquationKind>,
    layout: UnknownLayout,
    eliminated: Unknown,
    eliminated_value: f64,
}

impl SystemBuilder {
    /// `b_j·h + c_j·h² + d_j·h³ = Δy`
    fn value_equation(&mut self, kind: EquationKind, segment: usize, h: f64, dy: f64) {
        self.push_equation(
            kind,
            &[
                (Unknown::b(segment), h),
                (Unknown::c(segment), h.powi(2)),
                (Unknown::d(segment), h.powi(3)),
            ],
            dy,
        );
    }

    fn push_equation(&mut self, kind: EquationKind, terms: &[(Unknown, f64)], rhs: f64) {
        let row = self.equations.len();
        let mut rhs = rhs;

        for (unknown, coefficient) in terms {
            match self.layout.column_of(*unknown) {
                Some(column) => self.matrix[(row, column)] += coefficient,
                None if *unknown == self.eliminated => rhs -= coefficient * self.eliminated_value,
                None => {}
            }
        }

        self.rhs[row] = rhs;
        self.equations.push(kind);
    }

    fn finish(self) -> LinearSystem {
        LinearSystem {
            matrix: self.matrix,
            rhs: self.rhs,
            layout: self.layout,
            equations: self.equations,
        }
    }
}
