//! Action and damage messages passed between systems.
//!
//! Held in single slots on the `BattleContext`, NOT as ECS entities.
//! Neither may survive past the log-wait phase.

use mechabattle_behavior::resolution::CombatResult;
use mechabattle_core::components::StatusEffect;
use mechabattle_core::enums::{ActionKind, PartSlot};
use mechabattle_core::types::MachineId;

/// A committed action, precomputed at initiation and consumed at resolution.
#[derive(Debug, Clone)]
pub struct ActionEvent {
    pub attacker: MachineId,
    pub kind: ActionKind,
    /// Acting part (attacks only).
    pub part: Option<PartSlot>,
    /// Target as resolved at initiation.
    pub original_target: Option<MachineId>,
    /// Target the action lands on.
    pub current_target: Option<MachineId>,
    pub desired_part: Option<PartSlot>,
    pub result: CombatResult,
}

impl ActionEvent {
    pub fn skip(attacker: MachineId) -> Self {
        Self {
            attacker,
            kind: ActionKind::Skip,
            part: None,
            original_target: None,
            current_target: None,
            desired_part: None,
            result: CombatResult::miss(),
        }
    }
}

/// Damage to apply to a target, consumed the same tick it is produced.
#[derive(Debug, Clone)]
pub struct DamageEvent {
    pub attacker: MachineId,
    pub attacker_part: PartSlot,
    pub target: MachineId,
    pub part: PartSlot,
    pub damage: u32,
    pub critical: bool,
    pub effects: Vec<StatusEffect>,
}
