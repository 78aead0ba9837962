//! Cubic spline coefficients for natural and clamped boundaries, with every intermediate step
//! of the computation exposed: the ordered points, the labelled linear system, its inverse
//! obtained by Gauss-Jordan elimination, the solution vector and the per-segment coefficients
//! of `S_j(x) = a_j + b_j(x - x_j) + c_j(x - x_j)^2 + d_j(x - x_j)^3`.
//!
//! # Example
//! ```
//! use spline_steps::{Boundary, RawPoint, SplineSolver};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let points = vec![
//!     RawPoint::new("0", "0"),
//!     RawPoint::new("2", "4"),
//! ];
//! let result = SplineSolver::new().solve(&points, &Boundary::clamped(0.0, 4.0)).unwrap();
//!
//! assert_eq!(vec!["c0", "d0"], result.get_system().labels());
//! let segment = &result.get_segments()[0];
//! assert_approx_eq!(0.0, segment.get_b(), 1e-9);
//! assert_approx_eq!(4.0, segment.first_derivative(2.0), 1e-9);
//! ```
//!
//! The steps can also be run one by one:
//! ```
//! use spline_steps::{assemble, build, invert, normalize, validate, Boundary, RawPoint};
//!
//! let raw = vec![RawPoint::new("1", "1"), RawPoint::new("0", "0"), RawPoint::new("2", "0")];
//! assert!(validate(&raw, None).is_empty());
//!
//! let points = normalize(&raw).unwrap();
//! let system = build(&points, &Boundary::Natural).unwrap();
//! let inverse = invert(system.get_matrix()).unwrap();
//! let solution = &inverse * system.get_rhs();
//! let segments = assemble(&points, &Boundary::Natural, &solution, system.get_layout());
//!
//! assert_eq!(2, segments.len());
//! assert_eq!(0.0, segments[0].get_c());
//! ```

mod assembly;
mod config;
mod error;
pub mod expression;
mod inverse;
mod point;
mod polynomial;
mod segment;
mod solver;
mod spline;
mod system;
mod unknown;
mod validator;

pub use assembly::{assemble, solve, solve_with_inverse};
pub use config::{SolverOptions, DEFAULT_PIVOT_TOLERANCE, DEFAULT_RECOMMENDED_MAX_POINTS};
pub use error::{Axis, SplineError, ValidationIssue};
pub use expression::{Expression, ExpressionError, FunctionEvaluator};
pub use inverse::{invert, invert_with_tolerance};
pub use point::{normalize, sample_function, sort_points, Point, RawPoint};
pub use polynomial::Polynomial;
pub use segment::SplineSegment;
pub use solver::{SolveResult, SplineSolver};
pub use spline::Spline;
pub use system::{build, Boundary, BoundaryMode, EquationKind, LinearSystem};
pub use unknown::{Unknown, UnknownKind, UnknownLayout};
pub use validator::{check_point_count, validate, validate_samples};
