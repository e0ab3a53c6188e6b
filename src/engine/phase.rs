use std::fmt;
use std::str::FromStr;

use crate::gen::HarmonicComponent;
use crate::grid::SamplingGrid;

/// One of the three labeled channels of the supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    A,
    B,
    C,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::A, Phase::B, Phase::C];

    pub fn index(self) -> usize {
        match self {
            Phase::A => 0,
            Phase::B => 1,
            Phase::C => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::A => "A",
            Phase::B => "B",
            Phase::C => "C",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "a" => Some(Phase::A),
            "b" => Some(Phase::B),
            "c" => Some(Phase::C),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::parse(s).ok_or_else(|| format!("unknown phase '{}', expected a, b or c", s))
    }
}

/// History of one phase, as handed back to the input layer between events.
///
/// Only the components are kept; the total is always derived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseState {
    pub history: Vec<HarmonicComponent>,
}

/// Append-only harmonic history of a single phase
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: Phase,
    history: Vec<HarmonicComponent>,
}

impl PhaseAccumulator {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            history: Vec::new(),
        }
    }

    /// Restore an accumulator from a previously exported state
    pub fn from_state(phase: Phase, state: PhaseState) -> Self {
        Self {
            phase,
            history: state.history,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Append a component and return the updated total
    pub fn generate(&mut self, component: HarmonicComponent, grid: &SamplingGrid) -> Vec<f64> {
        self.push(component);
        self.total(grid)
    }

    /// Append a component without computing the total
    pub fn push(&mut self, component: HarmonicComponent) {
        self.history.push(component);
        log::debug!(
            "phase {}: added order {} amp {} shift {}° ({} components)",
            self.phase,
            component.order,
            component.amplitude,
            component.phase_shift_degrees,
            self.history.len()
        );
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Elementwise sum of every component in history, in insertion order.
    ///
    /// Recomputed from the full history on every call.
    pub fn total(&self, grid: &SamplingGrid) -> Vec<f64> {
        let mut total = grid.zeros();
        for component in &self.history {
            let wave = component.synthesize(grid);
            for (sum, sample) in total.iter_mut().zip(wave) {
                *sum += sample;
            }
        }
        total
    }

    pub fn history(&self) -> &[HarmonicComponent] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn state(&self) -> PhaseState {
        PhaseState {
            history: self.history.clone(),
        }
    }
}
