use super::phase::Phase;
use crate::grid::SamplingGrid;

pub const NEUTRAL_TITLE: &str = "Neutral current (harmonics)";

/// A sampled `(angle in degrees, value)` curve ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub title: String,
    pub points: Vec<(f64, f64)>,
}

impl Trace {
    /// Pair `values` with the grid's angle axis
    pub fn new(title: impl Into<String>, values: &[f64], grid: &SamplingGrid) -> Self {
        let points = grid
            .angles_degrees()
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect();

        Self {
            title: title.into(),
            points,
        }
    }

    pub fn phase(phase: Phase, total: &[f64], grid: &SamplingGrid) -> Self {
        Self::new(format!("Phase current {}", phase), total, grid)
    }

    pub fn neutral(neutral: &[f64], grid: &SamplingGrid) -> Self {
        Self::new(NEUTRAL_TITLE, neutral, grid)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn angles(&self) -> Vec<f64> {
        self.points.iter().map(|&(angle, _)| angle).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, value)| value).collect()
    }

    /// Largest absolute sample, 0.0 for an empty trace.
    /// NaN if any sample is NaN, matching `rms`.
    pub fn peak(&self) -> f64 {
        self.points
            .iter()
            .map(|&(_, value)| value.abs())
            .fold(0.0, |peak, value| {
                if peak.is_nan() || value.is_nan() {
                    f64::NAN
                } else {
                    peak.max(value)
                }
            })
    }

    /// Root mean square over the sampled period
    pub fn rms(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.points.iter().map(|&(_, v)| v * v).sum();
        (sum_sq / self.points.len() as f64).sqrt()
    }
}
