//! Setup blueprints consumed when spawning teams.
//!
//! Produced by the static data layer from loadouts; the engine only
//! sees fully resolved parts and medals.

use serde::{Deserialize, Serialize};

use crate::components::{Medal, Part};
use crate::enums::StrategyKind;

/// A fully resolved machine ready to be spawned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineBlueprint {
    pub name: String,
    pub medal: Medal,
    pub head: Part,
    pub right_arm: Part,
    pub left_arm: Part,
    pub legs: Part,
}

/// One side of the battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSetup {
    pub members: Vec<MachineBlueprint>,
    /// Index into `members` of the leader.
    pub leader: usize,
    /// Decision policy for computer-controlled members.
    #[serde(default)]
    pub strategy: StrategyKind,
}
