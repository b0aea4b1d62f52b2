//! Events emitted by the engine for presentation feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::MachineId;

/// Battle events, drained once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BattleEvent {
    /// The battle flow moved to a new phase.
    PhaseChanged { from: BattlePhase, to: BattlePhase },
    /// A machine committed to an action and started charging.
    ActionCommitted {
        machine: MachineId,
        action: ActionKind,
        slot: Option<PartSlot>,
    },
    /// An in-progress action was abandoned.
    ActionInterrupted {
        machine: MachineId,
        reason: InterruptReason,
    },
    /// An attack was resolved against a target.
    AttackResolved {
        attacker: MachineId,
        target: MachineId,
        hit: bool,
        critical: bool,
        guarded: bool,
        part: Option<PartSlot>,
        damage: u32,
    },
    /// A part's health reached zero.
    PartBroken { machine: MachineId, slot: PartSlot },
    /// A machine's head was destroyed.
    MachineDefeated { machine: MachineId },
    /// A leader fell.
    BattleOver { outcome: BattleOutcome },
}
