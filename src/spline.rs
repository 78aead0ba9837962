use crate::{error::SplineError, point::Point, segment::SplineSegment};

/// Piecewise cubic built from solved segments, one per pair of consecutive points.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    points: Vec<Point>,
    segments: Vec<SplineSegment>,
    min_x: f64,
    max_x: f64,
    is_knot_spacing_uniform: bool,
}

impl Spline {
    /// `points` must be ordered by x and `segments.len()` must be `points.len() - 1`.
    pub fn new(points: Vec<Point>, segments: Vec<SplineSegment>) -> Result<Self, SplineError> {
        if points.len() < 2 || segments.len() != points.len() - 1 {
            return Err(SplineError::DegenerateSystem(format!(
                "{} segments do not join {} points",
                segments.len(),
                points.len()
            )));
        }

        let min_x = points[0].get_x();
        let max_x = points[points.len() - 1].get_x();
        let mut spline = Spline {
            points,
            segments,
            min_x,
            max_x,
            is_knot_spacing_uniform: false,
        };
        spline.check_knots_spacing();
        Ok(spline)
    }

    pub fn get_points(&self) -> &[Point] {
        &self.points
    }

    pub fn get_segments(&self) -> &[SplineSegment] {
        &self.segments
    }

    pub fn interpolate(&self, x: f64) -> Result<f64, SplineError> {
        if self.is_in_range(x) {
            let index = self.find_interval_index(x);
            Ok(self.segments[index].evaluate(x))
        } else {
            Err(SplineError::OutOfRange(x))
        }
    }

    /// Derivative of order `order` at `x` inside the range.
    pub fn derivative(&self, x: f64, order: usize) -> Result<f64, SplineError> {
        if self.is_in_range(x) {
            let index = self.find_interval_index(x);
            Ok(self.segments[index].derivative(x, order))
        } else {
            Err(SplineError::OutOfRange(x))
        }
    }

    pub fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>, SplineError> {

        if let Some(x) = x_vector.iter().find(|x| !self.is_in_range(**x)) {
            return Err(SplineError::OutOfRange(*x));
        }

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            index = self.find_interval_index_with_hint(index, *x);
            results.push(self.segments[index].evaluate(*x));
        }
        Ok(results)
    }

    /// Outside the range the first or last segment is extended.
    pub fn extrapolate(&self, x: f64) -> f64 {

        match self.evaluate_on_boundaries(x) {
            Some(result) => result,
            None => {
                let index = self.find_interval_index(x);
                self.segments[index].evaluate(x)
            },
        }
    }

    pub fn batch_extrapolate(&self, x_vector: &[f64]) -> Vec<f64> {

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            match self.evaluate_on_boundaries(*x) {
                Some(result) => results.push(result),
                None => {
                    index = self.find_interval_index_with_hint(index, *x);
                    results.push(self.segments[index].evaluate(*x));
                },
            }
        }
        results
    }

    fn check_knots_spacing(&mut self) {
        let x_spacing_vec: Vec<f64> = self.points
            .windows(2)
            .map(|w| w[1].get_x() - w[0].get_x())
            .collect();

        self.is_knot_spacing_uniform = x_spacing_vec
            .windows(2)
            .map(|spacing| (spacing[1] - spacing[0]).abs())
            .all(|difference| difference < 1e-16);
    }

    fn is_in_range(&self, x: f64) -> bool {
        self.min_x <= x && x <= self.max_x
    }

    fn find_interval_index(&self, x: f64) -> usize {
        if self.is_knot_spacing_uniform {
            self.find_interval_index_uniform(x)
        } else {
            self.find_interval_index_bisect(x)
        }
    }

    fn find_interval_index_bisect(&self, x: f64) -> usize {
        let size = self.points.len();
        let mut min = 0;
        let mut max = size - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x < self.points[mid].get_x() {
                max = mid;
            } else {
                min = mid;
            }
        }
        min
    }

    fn find_interval_index_uniform(&self, x: f64) -> usize {
        let last = self.segments.len() - 1;
        let relative_x = ((x - self.min_x) / (self.max_x - self.min_x)).clamp(0.0, 1.0);
        let index = (relative_x * self.segments.len() as f64).floor() as usize;
        index.min(last)
    }

    fn find_interval_index_with_hint(&self, index_hint: usize, x: f64) -> usize {

        if !self.segments[index_hint].contains(x) {

            if index_hint + 1 < self.segments.len() && self.segments[index_hint + 1].contains(x) {
                return index_hint + 1;
            } else {
                return self.find_interval_index(x);
            }
        }
        index_hint
    }

    fn evaluate_on_boundaries(&self, x: f64) -> Option<f64> {
        let size = self.points.len();
        if x < self.points[1].get_x() {
            Some(self.segments[0].evaluate(x))
        } else if x > self.points[size - 2].get_x() {
            Some(self.segments[size - 2].evaluate(x))
        } else {
            None
        }
    }
}
