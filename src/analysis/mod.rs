//! Frequency-domain views of sampled traces

pub mod spectrum;

pub use spectrum::HarmonicSpectrum;
