/// Tunables of the solver pipeline.
/// - `pivot_tolerance` - pivots with smaller magnitude make the system singular,
/// - `recommended_max_points` - above this point count a warning is issued (solving still proceeds).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverOptions {
    pub pivot_tolerance: f64,
    pub recommended_max_points: usize,
}

pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;
pub const DEFAULT_RECOMMENDED_MAX_POINTS: usize = 20;

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
            recommended_max_points: DEFAULT_RECOMMENDED_MAX_POINTS,
        }
    }
}

impl SolverOptions {
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }

    pub fn with_recommended_max_points(mut self, recommended_max_points: usize) -> Self {
        self.recommended_max_points = recommended_max_points;
        self
    }
}
