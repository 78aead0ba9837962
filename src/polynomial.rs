/// Polynomial in powers of `(x - origin)`: `coefficients[i]` multiplies `(x - origin)^i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
    origin: f64,
}

impl Polynomial {

    pub fn new(coefficients: Vec<f64>, origin: f64) -> Self {
        Polynomial { coefficients, origin }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let t = x - self.origin;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |result, coefficient| result * t + coefficient)
    }

    /// Derivative of order `order`; a constant zero polynomial once the degree is exceeded.
    pub fn derivative(&self, order: usize) -> Polynomial {
        let coefficients = self.coefficients
            .iter()
            .enumerate()
            .skip(order)
            .map(|(power, coefficient)| coefficient * falling_factorial(power, order))
            .collect();
        Polynomial { coefficients, origin: self.origin }
    }

    pub fn get_coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

/// `power * (power - 1) * ... * (power - order + 1)`
fn falling_factorial(power: usize, order: usize) -> f64 {
    (power + 1 - order..=power).map(|p| p as f64).product()
}
