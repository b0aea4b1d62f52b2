//! Battle state snapshot: the complete visible state handed to presentation.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::BattleEvent;
use crate::types::{MachineId, SimTime};

/// Complete battle state after an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub time: SimTime,
    pub phase: BattlePhase,
    /// Time spent in the current phase.
    pub phase_timer: f64,
    pub outcome: Option<BattleOutcome>,
    pub active_actor: Option<MachineId>,
    pub machines: Vec<MachineView>,
    /// Lines currently on screen.
    pub battle_log: Vec<String>,
    /// Lines still waiting to be revealed.
    pub pending_log: usize,
    /// Actions offered to the player (only during `PlayerInput`).
    pub available_actions: Vec<ActionOption>,
    pub cursor: usize,
    pub events: Vec<BattleEvent>,
}

/// A machine as seen by presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineView {
    pub id: MachineId,
    pub name: String,
    pub team: Team,
    pub leader: bool,
    pub defeated: bool,
    pub status: GaugeStatus,
    pub progress: f64,
    /// 0 = home, 1 = execution midpoint.
    pub position_ratio: f64,
    pub stopped: bool,
    pub parts: Vec<PartView>,
}

/// Part health for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartView {
    pub slot: PartSlot,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
}

/// One entry of the player's action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOption {
    Attack(PartSlot),
    Skip,
}
