use std::fmt::Display;

use crate::polynomial::Polynomial;

/// Cubic piece `S_j(x) = a + b(x - x_start) + c(x - x_start)^2 + d(x - x_start)^3` valid on
/// `[x_start, x_end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplineSegment {
    index: usize,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    x_start: f64,
    x_end: f64,
}

impl SplineSegment {
    pub fn new(index: usize, coefficients: [f64; 4], x_start: f64, x_end: f64) -> Self {
        let [a, b, c, d] = coefficients;
        SplineSegment { index, a, b, c, d, x_start, x_end }
    }

    pub fn get_index(&self) -> usize {
        self.index
    }

    pub fn get_a(&self) -> f64 {
        self.a
    }

    pub fn get_b(&self) -> f64 {
        self.b
    }

    pub fn get_c(&self) -> f64 {
        self.c
    }

    pub fn get_d(&self) -> f64 {
        self.d
    }

    /// `[a, b, c, d]`
    pub fn get_coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn get_x_start(&self) -> f64 {
        self.x_start
    }

    pub fn get_x_end(&self) -> f64 {
        self.x_end
    }

    pub fn contains(&self, x: f64) -> bool {
        self.x_start <= x && x <= self.x_end
    }

    pub fn polynomial(&self) -> Polynomial {
        Polynomial::new(self.get_coefficients().to_vec(), self.x_start)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let dx = x - self.x_start;
        self.a + dx * (self.b + dx * (self.c + dx * self.d))
    }

    /// Derivative of order `order` at `x`; zero above the third order.
    pub fn derivative(&self, x: f64, order: usize) -> f64 {
        let dx = x - self.x_start;
        match order {
            0 => self.evaluate(x),
            1 => self.b + dx * (2.0 * self.c + dx * 3.0 * self.d),
            2 => 2.0 * self.c + dx * 6.0 * self.d,
            3 => 6.0 * self.d,
            _ => 0.0,
        }
    }

    pub fn first_derivative(&self, x: f64) -> f64 {
        self.derivative(x, 1)
    }

    pub fn second_derivative(&self, x: f64) -> f64 {
        self.derivative(x, 2)
    }

    pub fn third_derivative(&self, x: f64) -> f64 {
        self.derivative(x, 3)
    }
}

/// `S0(x) = 1 + 0.5(x - 2) - 3(x - 2)^2 + 0(x - 2)^3`, with `(x + 2)` for a negative start.
impl Display for SplineSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let term = if self.x_start < 0.0 {
            format!("(x + {})", -self.x_start)
        } else {
            format!("(x - {})", self.x_start)
        };

        write!(f, "S{}(x) = {}", self.index, self.a)?;
        for (coefficient, power) in [(self.b, ""), (self.c, "^2"), (self.d, "^3")] {
            if coefficient < 0.0 {
                write!(f, " - {}{}{}", -coefficient, term, power)?;
            } else {
                write!(f, " + {}{}{}", coefficient, term, power)?;
            }
        }
        Ok(())
    }
}
