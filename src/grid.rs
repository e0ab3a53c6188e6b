//! Shared time/angle base for every waveform in the system.
//!
//! All phase totals and the neutral current are sampled on the same grid,
//! which is what makes them elementwise-addable.

use std::sync::OnceLock;

/// Number of samples across one fundamental period
pub const SAMPLE_COUNT: usize = 1000;

/// Fundamental (mains) frequency in Hz
pub const FUNDAMENTAL_HZ: f64 = 50.0;

/// One fundamental period sampled at `SAMPLE_COUNT` points, endpoint excluded.
///
/// `t[i] = i / (f0 * N)` covers `[0, 1/f0)` and `theta[i] = 360 * f0 * t[i]`
/// is the matching electrical angle in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingGrid {
    fundamental_hz: f64,
    times: Vec<f64>,
    angles_degrees: Vec<f64>,
}

impl SamplingGrid {
    pub fn new() -> Self {
        let fundamental_hz = FUNDAMENTAL_HZ;
        let times: Vec<f64> = (0..SAMPLE_COUNT)
            .map(|i| i as f64 / (fundamental_hz * SAMPLE_COUNT as f64))
            .collect();
        let angles_degrees = times.iter().map(|t| 360.0 * fundamental_hz * t).collect();

        Self {
            fundamental_hz,
            times,
            angles_degrees,
        }
    }

    /// Process-wide grid, built on first use and never mutated afterwards
    pub fn shared() -> &'static SamplingGrid {
        static GRID: OnceLock<SamplingGrid> = OnceLock::new();
        GRID.get_or_init(SamplingGrid::new)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn fundamental_hz(&self) -> f64 {
        self.fundamental_hz
    }

    /// Fundamental angular frequency `2π·f0` in rad/s
    pub fn angular_frequency(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.fundamental_hz
    }

    /// Length of one fundamental period in seconds
    pub fn period(&self) -> f64 {
        1.0 / self.fundamental_hz
    }

    /// Rate at which the grid samples one period, in Hz
    pub fn sample_rate(&self) -> f64 {
        self.fundamental_hz * self.len() as f64
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn angles_degrees(&self) -> &[f64] {
        &self.angles_degrees
    }

    /// Zero vector of grid length, the total of a phase with no history
    pub fn zeros(&self) -> Vec<f64> {
        vec![0.0; self.len()]
    }

    /// Index of the sample closest to `time` (seconds), clamped to the grid
    pub fn nearest_index(&self, time: f64) -> usize {
        let step = self.period() / self.len() as f64;
        let index = (time / step).round();
        if index <= 0.0 {
            0
        } else {
            (index as usize).min(self.len() - 1)
        }
    }
}

impl Default for SamplingGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_spans_one_period_without_endpoint() {
        let grid = SamplingGrid::new();
        assert_eq!(grid.len(), SAMPLE_COUNT);
        assert_eq!(grid.times()[0], 0.0);

        let last = *grid.times().last().unwrap();
        assert!(last < grid.period());
        assert!((last - (SAMPLE_COUNT - 1) as f64 / (FUNDAMENTAL_HZ * SAMPLE_COUNT as f64)).abs() < 1e-15);
    }

    #[test]
    fn test_angles_track_times() {
        let grid = SamplingGrid::new();
        for (t, theta) in grid.times().iter().zip(grid.angles_degrees()) {
            let expected = t / grid.period() * 360.0;
            assert!((theta - expected).abs() < 1e-9);
        }
        assert_eq!(grid.angles_degrees()[0], 0.0);
        assert!(*grid.angles_degrees().last().unwrap() < 360.0);
    }

    #[test]
    fn test_nearest_index() {
        let grid = SamplingGrid::new();
        assert_eq!(grid.nearest_index(0.0), 0);
        assert_eq!(grid.nearest_index(-1.0), 0);
        assert_eq!(grid.nearest_index(1.0 / (4.0 * FUNDAMENTAL_HZ)), 250);
        assert_eq!(grid.nearest_index(10.0), SAMPLE_COUNT - 1);
    }

    #[test]
    fn test_shared_grid_is_the_same_instance() {
        let a = SamplingGrid::shared();
        let b = SamplingGrid::shared();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a, &SamplingGrid::new());
    }

    #[test]
    fn test_zeros() {
        let grid = SamplingGrid::new();
        let zeros = grid.zeros();
        assert_eq!(zeros.len(), SAMPLE_COUNT);
        assert!(zeros.iter().all(|&v| v == 0.0));
        assert_eq!(grid.sample_rate(), 50_000.0);
    }
}
