//! Fundamental identifier and simulation time types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a machine for the lifetime of a battle.
///
/// Assigned in spawn order (team one first), so it doubles as the
/// iteration order used for tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MachineId(pub u32);

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of `update` calls processed.
    pub tick: u64,
    /// Accumulated delta time in abstract time units.
    pub elapsed: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` time units.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed += dt;
    }
}
