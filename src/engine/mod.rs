pub mod neutral;
pub mod phase;
pub mod trace;

pub use neutral::combine;
pub use phase::{Phase, PhaseAccumulator, PhaseState};
pub use trace::{Trace, NEUTRAL_TITLE};

use crate::gen::HarmonicComponent;
use crate::grid::SamplingGrid;

/// A single trigger coming from the input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// "Generate <phase>": append one component to that phase
    Generate {
        phase: Phase,
        component: HarmonicComponent,
    },
    /// "Restart All": clear every phase
    Restart,
}

impl Event {
    pub fn generate(phase: Phase, order: i32, amplitude: f64, phase_shift_degrees: f64) -> Self {
        Event::Generate {
            phase,
            component: HarmonicComponent::new(order, amplitude, phase_shift_degrees),
        }
    }

    pub fn is_restart(&self) -> bool {
        matches!(self, Event::Restart)
    }
}

/// Outputs for display after one event, all taken from the same state
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub phases: [Trace; 3],
    pub neutral: Trace,
}

impl Frame {
    pub fn phase(&self, phase: Phase) -> &Trace {
        &self.phases[phase.index()]
    }

    pub fn traces(&self) -> impl Iterator<Item = &Trace> {
        self.phases.iter().chain(std::iter::once(&self.neutral))
    }
}

/// Owns the three phase histories and turns events into frames.
///
/// Every event is handled to completion before the next one is accepted;
/// the neutral is always recomputed from fresh totals of all three phases.
pub struct Engine {
    grid: &'static SamplingGrid,
    phases: [PhaseAccumulator; 3],
}

impl Engine {
    pub fn new() -> Self {
        Self::with_grid(SamplingGrid::shared())
    }

    pub fn with_grid(grid: &'static SamplingGrid) -> Self {
        Self {
            grid,
            phases: Phase::ALL.map(PhaseAccumulator::new),
        }
    }

    /// Rebuild an engine on `grid` from per-phase states saved between interactions
    pub fn from_states(grid: &'static SamplingGrid, states: [PhaseState; 3]) -> Self {
        let mut engine = Self::with_grid(grid);
        for (phase, state) in Phase::ALL.into_iter().zip(states) {
            engine.phases[phase.index()] = PhaseAccumulator::from_state(phase, state);
        }
        engine
    }

    pub fn grid(&self) -> &SamplingGrid {
        self.grid
    }

    /// Handle one event and return the refreshed outputs
    pub fn handle(&mut self, event: Event) -> Frame {
        self.apply(event);
        self.frame()
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::Generate { phase, component } => {
                self.phases[phase.index()].push(component);
            }
            Event::Restart => self.restart(),
        }
    }

    /// Handle triggers that fired in the same invocation.
    ///
    /// A restart anywhere in the batch wins: every phase is cleared and the
    /// generate triggers of that batch are dropped.
    pub fn handle_simultaneous<I>(&mut self, events: I) -> Frame
    where
        I: IntoIterator<Item = Event>,
    {
        let events: Vec<Event> = events.into_iter().collect();

        if events.iter().any(Event::is_restart) {
            let dropped = events.iter().filter(|e| !e.is_restart()).count();
            if dropped > 0 {
                log::debug!("restart overrides {} generate trigger(s)", dropped);
            }
            return self.handle(Event::Restart);
        }

        for event in events {
            self.apply(event);
        }
        self.frame()
    }

    /// Clear all three phases
    pub fn restart(&mut self) {
        for phase in &mut self.phases {
            phase.reset();
        }
        log::info!("restart: all phase histories cleared");
    }

    pub fn phase(&self, phase: Phase) -> &PhaseAccumulator {
        &self.phases[phase.index()]
    }

    pub fn phase_mut(&mut self, phase: Phase) -> &mut PhaseAccumulator {
        &mut self.phases[phase.index()]
    }

    pub fn phase_total(&self, phase: Phase) -> Vec<f64> {
        self.phase(phase).total(self.grid)
    }

    pub fn neutral(&self) -> Vec<f64> {
        let [a, b, c] = Phase::ALL.map(|p| self.phase_total(p));
        combine(&a, &b, &c)
    }

    pub fn states(&self) -> [PhaseState; 3] {
        Phase::ALL.map(|p| self.phase(p).state())
    }

    /// Snapshot of every trace for the current state
    pub fn frame(&self) -> Frame {
        let totals = Phase::ALL.map(|p| self.phase_total(p));
        let neutral = combine(&totals[0], &totals[1], &totals[2]);

        Frame {
            phases: Phase::ALL.map(|p| Trace::phase(p, &totals[p.index()], self.grid)),
            neutral: Trace::neutral(&neutral, self.grid),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
