use crate::{
    error::{Axis, SplineError, ValidationIssue},
    expression::FunctionEvaluator,
};

/// Point through which the spline passes.
/// - `x` - coordinate,
/// - `y` - coordinate,
/// - `original_index` - position of the point in the input before sorting.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    x: f64,
    y: f64,
    original_index: usize,
}

impl Point {
    /// # Example
    /// ```
    /// use spline_steps::Point;
    ///
    /// let point = Point::new(1.0, 2.0, 0);
    /// assert_eq!(1.0, point.get_x());
    /// assert_eq!(2.0, point.get_y());
    /// ```
    pub fn new(x: f64, y: f64, original_index: usize) -> Self {
        Point { x, y, original_index }
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }

    pub fn get_original_index(&self) -> usize {
        self.original_index
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.x.total_cmp(&other.x)
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
    }
}

impl Eq for Point { }

/// Point as typed by the user, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawPoint {
    pub x: String,
    pub y: String,
}

impl RawPoint {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        RawPoint { x: x.into(), y: y.into() }
    }
}

impl From<(f64, f64)> for RawPoint {
    fn from((x, y): (f64, f64)) -> Self {
        RawPoint { x: x.to_string(), y: y.to_string() }
    }
}

impl From<(&str, &str)> for RawPoint {
    fn from((x, y): (&str, &str)) -> Self {
        RawPoint::new(x, y)
    }
}

/// Parses a coordinate. Empty, non-numeric and non-finite text is rejected.
pub(crate) fn parse_coordinate(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Converts raw points into points ordered by ascending x, each tagged with its input position.
/// # Example
/// ```
/// use spline_steps::{normalize, RawPoint};
///
/// let raw = vec![RawPoint::new("2", "0"), RawPoint::new("0", "1")];
/// let points = normalize(&raw).unwrap();
///
/// assert_eq!(0.0, points[0].get_x());
/// assert_eq!(1, points[0].get_original_index());
/// ```
/// # Errors
/// [SplineError::Invalid] listing every coordinate that could not be parsed.
pub fn normalize(points: &[RawPoint]) -> Result<Vec<Point>, SplineError> {
    let mut parsed = Vec::with_capacity(points.len());
    let mut issues = Vec::new();

    for (i, raw) in points.iter().enumerate() {
        let x = parse_coordinate(&raw.x);
        let y = parse_coordinate(&raw.y);
        if x.is_none() {
            issues.push(ValidationIssue::InvalidNumber { index: i + 1, axis: Axis::X, value: raw.x.clone() });
        }
        if y.is_none() {
            issues.push(ValidationIssue::InvalidNumber { index: i + 1, axis: Axis::Y, value: raw.y.clone() });
        }
        if let (Some(x), Some(y)) = (x, y) {
            parsed.push(Point::new(x, y, i));
        }
    }

    if !issues.is_empty() {
        return Err(SplineError::Invalid(issues));
    }
    Ok(sort_points(parsed))
}

/// Stable sort by ascending x.
pub fn sort_points(mut points: Vec<Point>) -> Vec<Point> {
    points.sort();
    points
}

/// Builds points whose y values come from `evaluator`, sorted by x.
pub fn sample_function<E>(evaluator: &E, xs: &[f64]) -> Result<Vec<Point>, SplineError>
where
    E: FunctionEvaluator + ?Sized,
{
    let mut points = Vec::with_capacity(xs.len());
    for (i, x) in xs.iter().enumerate() {
        points.push(Point::new(*x, evaluator.evaluate(*x)?, i));
    }
    Ok(sort_points(points))
}
