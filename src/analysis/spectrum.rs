use rustfft::{num_complex::Complex, FftPlanner};

/// Below this amplitude a harmonic is treated as absent
pub const AMPLITUDE_FLOOR: f64 = 1e-9;

/// Harmonic content of one fundamental period.
///
/// The input must cover exactly one period on an endpoint-exclusive grid, so
/// FFT bin `k` lines up with harmonic order `k` and no window is needed.
#[derive(Debug, Clone)]
pub struct HarmonicSpectrum {
    // Index is the harmonic order; 0 is the DC offset
    bins: Vec<Complex<f64>>,
    sample_count: usize,
}

impl HarmonicSpectrum {
    pub fn analyze(samples: &[f64]) -> Self {
        let sample_count = samples.len();
        if sample_count == 0 {
            return Self {
                bins: Vec::new(),
                sample_count,
            };
        }

        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(sample_count);
        fft.process(&mut buffer);

        // Only the first half carries information for real input
        buffer.truncate(sample_count / 2 + 1);

        Self {
            bins: buffer,
            sample_count,
        }
    }

    /// Highest order that can be resolved from the sample count
    pub fn max_order(&self) -> usize {
        self.bins.len().saturating_sub(1)
    }

    /// Peak amplitude of the given harmonic order (DC value for order 0)
    pub fn amplitude(&self, order: usize) -> f64 {
        let Some(bin) = self.bins.get(order) else {
            return 0.0;
        };
        let magnitude = bin.norm() / self.sample_count as f64;

        let is_nyquist = self.sample_count % 2 == 0 && order == self.sample_count / 2;
        if order == 0 || is_nyquist {
            magnitude
        } else {
            2.0 * magnitude
        }
    }

    /// Phase shift in degrees such that the harmonic reads
    /// `amplitude * cos(order * (ωt - shift))`, wrapped to `[0, 360/order)`.
    pub fn phase_shift_degrees(&self, order: usize) -> Option<f64> {
        if order == 0 || self.amplitude(order) < AMPLITUDE_FLOOR {
            return None;
        }
        let bin = self.bins.get(order)?;
        let period = 360.0 / order as f64;
        let shift = (-bin.arg().to_degrees() / order as f64).rem_euclid(period);
        Some(shift)
    }

    /// Orders whose amplitude exceeds `threshold`, lowest first
    pub fn dominant_orders(&self, threshold: f64) -> Vec<(usize, f64)> {
        (1..=self.max_order())
            .map(|order| (order, self.amplitude(order)))
            .filter(|&(_, amplitude)| amplitude > threshold)
            .collect()
    }

    /// Total harmonic distortion relative to the fundamental.
    ///
    /// `None` when there is no fundamental to compare against.
    pub fn thd(&self) -> Option<f64> {
        let fundamental = self.amplitude(1);
        if fundamental < AMPLITUDE_FLOOR {
            return None;
        }
        let harmonics: f64 = (2..=self.max_order())
            .map(|order| self.amplitude(order).powi(2))
            .sum();
        Some(harmonics.sqrt() / fundamental)
    }
}
