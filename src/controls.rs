//! Per-phase input values, as the dashboard form holds them between presses.

use crate::engine::{Event, Phase};
use crate::gen::HarmonicComponent;

/// Smallest order the input layer will hand to the engine
pub const MIN_ORDER: i32 = 1;

/// Form values for one phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseControls {
    pub order: i32,
    pub amplitude: f64,
    pub phase_shift_degrees: f64,
}

impl PhaseControls {
    /// Defaults for a phase: fundamental, unit amplitude, 0°/120°/240° shift
    pub fn for_phase(phase: Phase) -> Self {
        Self {
            order: 1,
            amplitude: 1.0,
            phase_shift_degrees: 120.0 * phase.index() as f64,
        }
    }

    /// Orders below 1 are clamped, as the order widget does
    pub fn set_order(&mut self, order: i32) {
        self.order = order.max(MIN_ORDER);
    }

    pub fn component(&self) -> HarmonicComponent {
        HarmonicComponent::new(self.order, self.amplitude, self.phase_shift_degrees)
    }

    /// The "Generate <phase>" trigger with the current form values
    pub fn generate_event(&self, phase: Phase) -> Event {
        Event::Generate {
            phase,
            component: self.component(),
        }
    }
}

/// Form values for all three phases
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    phases: [PhaseControls; 3],
}

impl DashboardConfig {
    pub fn controls(&self, phase: Phase) -> &PhaseControls {
        &self.phases[phase.index()]
    }

    pub fn controls_mut(&mut self, phase: Phase) -> &mut PhaseControls {
        &mut self.phases[phase.index()]
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            phases: Phase::ALL.map(PhaseControls::for_phase),
        }
    }
}
