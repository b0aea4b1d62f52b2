//! Combat resolution: composes affinity, skills, traits and formulas into
//! one outcome record.
//!
//! Pure function of its inputs and the RNG. No ECS dependency; the sim
//! gathers the profiles from components and applies the result later.

use rand::prelude::*;

use mechabattle_core::components::StatusEffect;
use mechabattle_core::constants::CRITICAL_PROBABILITY_SUM;
use mechabattle_core::enums::{Attribute, GaugeStatus, PartSlot, SkillKind, TraitKind};

use crate::formulas::{self, HitOutcome};
use crate::{affinity, skills, traits};

/// Everything about the attacking side that affects the outcome.
#[derive(Debug, Clone)]
pub struct AttackerProfile {
    pub attack: i32,
    pub success: i32,
    pub trait_kind: TraitKind,
    pub skill: SkillKind,
    pub medal_attribute: Attribute,
    pub part_attribute: Attribute,
    /// Attacker's own leg mobility.
    pub mobility: i32,
    /// Attacker's own leg defense.
    pub defense: i32,
}

/// Current health of one defender part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartHealth {
    pub slot: PartSlot,
    pub hp: u32,
}

/// Everything about the defending side that affects the outcome.
#[derive(Debug, Clone)]
pub struct DefenderProfile {
    pub medal_attribute: Attribute,
    /// Leg mobility, 0 without legs.
    pub mobility: i32,
    /// Leg defense, 0 without legs.
    pub defense: i32,
    pub status: GaugeStatus,
    /// Skill of the part the defender has reserved, if it is mid-action.
    pub reserved_skill: Option<SkillKind>,
    /// All parts in slot order.
    pub parts: Vec<PartHealth>,
}

/// Outcome of one attack. On a miss every other field is zero/empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatResult {
    pub hit: bool,
    pub critical: bool,
    pub guarded: bool,
    pub damage: u32,
    pub part: Option<PartSlot>,
    pub effects: Vec<StatusEffect>,
}

impl CombatResult {
    pub fn miss() -> Self {
        Self::default()
    }
}

/// Resolve an attack from `attacker` against `defender`, aimed at `desired`.
pub fn resolve<R: Rng>(
    attacker: &AttackerProfile,
    defender: &DefenderProfile,
    desired: PartSlot,
    rng: &mut R,
) -> CombatResult {
    // 1. Affinity
    let bonus = affinity::bonus(
        attacker.medal_attribute,
        attacker.part_attribute,
        defender.medal_attribute,
    );

    // 2. Skill offense bonus
    let skill_bonus = skills::offense_bonus(attacker.skill, attacker.mobility, attacker.defense);

    // 3. Adjusted stats
    let success = (attacker.success as f64 + bonus.attack as f64 + skill_bonus.success).max(1.0);
    let attack = (attacker.attack as f64 + bonus.attack as f64 + skill_bonus.attack).max(1.0);
    let mobility = ((defender.mobility + bonus.defense) as f64).max(0.0);
    let defense = ((defender.defense + bonus.defense) as f64).max(0.0);

    // 4. Defender's own skill exposure
    let penalty = defender
        .reserved_skill
        .map(|skill| skills::defense_penalty(skill, defender.status))
        .unwrap_or_default();

    // 5. Hit check
    let hit_probability = if penalty.force_hit {
        1.0
    } else {
        formulas::hit_probability(success, mobility)
    };
    if rng.gen::<f64>() >= hit_probability {
        return CombatResult::miss();
    }

    // 6. Break / critical / guard
    let (critical, guarded) = if penalty.force_critical {
        (true, false)
    } else {
        let break_probability = formulas::break_probability(success, defense);
        if rng.gen::<f64>() < break_probability {
            let critical = hit_probability + break_probability >= CRITICAL_PROBABILITY_SUM;
            (critical, false)
        } else {
            (false, !penalty.prevent_defense)
        }
    };

    // 7. Hit part
    let part = if guarded {
        guard_part(&defender.parts)
    } else {
        aimed_part(&defender.parts, desired, rng)
    };

    // 8. Damage
    let outcome = if critical {
        HitOutcome::Critical
    } else if guarded {
        HitOutcome::Guarded
    } else {
        HitOutcome::Clean
    };
    let damage = formulas::calculate_damage(attack, success, mobility, defense, outcome);

    // 9. Trait secondary effects
    let effects = traits::secondary_effects(attacker.trait_kind, success, defender.mobility as f64);

    CombatResult {
        hit: true,
        critical,
        guarded,
        damage,
        part: Some(part),
        effects,
    }
}

/// Guard substitution: the healthiest alive non-head part absorbs the hit.
pub fn guard_part(parts: &[PartHealth]) -> PartSlot {
    parts
        .iter()
        .filter(|p| p.slot != PartSlot::Head && p.hp > 0)
        .fold(None, |best: Option<&PartHealth>, p| match best {
            Some(b) if b.hp >= p.hp => Some(b),
            _ => Some(p),
        })
        .map(|p| p.slot)
        .unwrap_or(PartSlot::Head)
}

/// The desired part if alive, else a random alive part, else the head.
pub fn aimed_part<R: Rng>(parts: &[PartHealth], desired: PartSlot, rng: &mut R) -> PartSlot {
    if parts.iter().any(|p| p.slot == desired && p.hp > 0) {
        return desired;
    }
    let alive: Vec<PartSlot> = parts.iter().filter(|p| p.hp > 0).map(|p| p.slot).collect();
    alive.choose(rng).copied().unwrap_or(PartSlot::Head)
}
