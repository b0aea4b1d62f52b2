//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and behavior functions, not components.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::MachineId;

/// Identity and standing of a machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineInfo {
    pub id: MachineId,
    pub name: String,
    pub team: Team,
    /// Whether this machine's defeat ends the battle for its team.
    pub leader: bool,
    /// Set exactly when the head part's health reaches zero.
    pub defeated: bool,
}

/// The machine's brain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medal {
    pub name: String,
    pub personality: PersonalityKind,
    pub attribute: Attribute,
}

/// Decision policy used when the machine is not player-controlled.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Commander {
    pub strategy: StrategyKind,
}

/// Offensive stats of a head or arm part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartOffense {
    pub attack: i32,
    pub success: i32,
    pub trait_kind: TraitKind,
    pub skill: SkillKind,
    /// Data-driven duration multiplier (1.0 = neutral).
    pub time_modifier: f64,
}

/// One part of a machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub slot: PartSlot,
    pub name: String,
    pub attribute: Attribute,
    pub hp: u32,
    pub max_hp: u32,
    /// Absent for legs and for parts without offensive capability.
    pub offense: Option<PartOffense>,
    /// Legs only.
    pub mobility: i32,
    /// Legs only.
    pub defense: i32,
}

/// A speculative (or locked) target picked for one attacking slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSelection {
    pub machine: MachineId,
    pub part: PartSlot,
}

/// Active status effect on a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Remaining duration in abstract time units.
    pub remaining: f64,
}

/// ATB gauge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gauge {
    pub status: GaugeStatus,
    /// 0..=100, meaningful only while charging or cooling down.
    pub progress: f64,
    pub charging_time: f64,
    pub cooldown_time: f64,
    pub action: Option<ActionKind>,
    /// Reserved attacking part. Kept through cooldown.
    pub part: Option<PartSlot>,
    /// Pre-selected targets per offensive slot.
    pub selections: BTreeMap<PartSlot, TargetSelection>,
    pub effects: Vec<StatusEffect>,
}
