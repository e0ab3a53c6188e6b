use crate::grid::SamplingGrid;

/// One harmonic current component of a phase.
///
/// Immutable once built: it is only ever appended to a phase history or
/// dropped on reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicComponent {
    pub order: i32,
    pub amplitude: f64,
    pub phase_shift_degrees: f64,
}

impl HarmonicComponent {
    pub fn new(order: i32, amplitude: f64, phase_shift_degrees: f64) -> Self {
        Self {
            order,
            amplitude,
            phase_shift_degrees,
        }
    }

    /// Fundamental (order 1) component
    pub fn fundamental(amplitude: f64, phase_shift_degrees: f64) -> Self {
        Self::new(1, amplitude, phase_shift_degrees)
    }

    pub fn phase_shift_radians(&self) -> f64 {
        self.phase_shift_degrees.to_radians()
    }

    /// Sample this component on `grid`
    pub fn synthesize(&self, grid: &SamplingGrid) -> Vec<f64> {
        synthesize(self.order, self.amplitude, self.phase_shift_degrees, grid)
    }

    /// Value of this component at a single grid time
    pub fn sample_at(&self, time: f64, grid: &SamplingGrid) -> f64 {
        let shift = self.phase_shift_radians();
        self.amplitude * (self.order as f64 * (grid.angular_frequency() * time - shift)).cos()
    }
}

/// Synthesize `amplitude * cos(order * (2π·f0·t - shift))` over the grid.
///
/// No validation happens here: order ≥ 1 is the input layer's job, and
/// non-finite amplitudes or shifts propagate into the output as-is.
pub fn synthesize(
    order: i32,
    amplitude: f64,
    phase_shift_degrees: f64,
    grid: &SamplingGrid,
) -> Vec<f64> {
    let shift = phase_shift_degrees.to_radians();
    let omega = grid.angular_frequency();
    let order = order as f64;

    grid.times()
        .iter()
        .map(|&t| amplitude * (order * (omega * t - shift)).cos())
        .collect()
}
