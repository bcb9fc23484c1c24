//! # Phase Slot
//!
//! Holds the single current [`Phase`] together with its generation number.
//! Replacing the phase bumps the generation; phase-scoped counters are keyed
//! by generation, so the replacement logically zeroes all of them in O(1)
//! without sweeping per-address state.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Phase, PhaseKind};

/// Generation number of a phase. Bumped on every replacement.
pub type Generation = u64;

/// The current phase and its generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseSlot {
    current: Phase,
    generation: Generation,
}

impl PhaseSlot {
    /// Starts at the pre-initialization sentinel, generation 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Phase::preparing(),
            generation: 0,
        }
    }

    /// Replaces the phase wholesale. Any phase is legal, including zero
    /// price or zero supply.
    pub fn replace(&mut self, phase: Phase) {
        self.current = phase;
        self.generation += 1;
    }

    #[must_use]
    pub fn current(&self) -> &Phase {
        &self.current
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        self.current.kind
    }
}

impl Default for PhaseSlot {
    fn default() -> Self {
        Self::new()
    }
}
