//! Harmonic current model for a three-phase system.
//!
//! Each phase accumulates harmonic components on a shared one-period grid;
//! the neutral conductor current is the sample-by-sample sum of the three
//! phase totals.

pub mod controls;
pub mod engine;
pub mod gen;
pub mod grid;
pub mod script;
pub mod utils;
pub mod visualization;

#[cfg(feature = "analysis")]
pub mod analysis;

// Offline WAV export
#[cfg(feature = "bounce")]
pub mod bounce;

pub use engine::{Engine, Event, Frame, Phase};
pub use gen::{synthesize, HarmonicComponent};
pub use grid::{SamplingGrid, FUNDAMENTAL_HZ, SAMPLE_COUNT};
