//! Trait registry: targeting timing and on-hit secondary effects.

use mechabattle_core::components::StatusEffect;
use mechabattle_core::constants::{STOP_DURATION_SCALE, STOP_MIN_DURATION};
use mechabattle_core::enums::{StatusEffectKind, TraitKind};

/// When a trait decides its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTiming {
    /// Ranged: target picked by personality while choosing, locked while charging.
    PreTarget,
    /// Melee: closest living enemy at execution time.
    Closest,
}

/// Static parameters of a trait.
pub struct TraitProfile {
    pub timing: TargetTiming,
    /// Whether a hit stops the target's gauge.
    pub inflicts_stop: bool,
}

/// Get the profile for a trait.
pub fn get_profile(trait_kind: TraitKind) -> TraitProfile {
    match trait_kind {
        TraitKind::Rifle | TraitKind::Gatling => TraitProfile {
            timing: TargetTiming::PreTarget,
            inflicts_stop: false,
        },
        TraitKind::Sword => TraitProfile {
            timing: TargetTiming::Closest,
            inflicts_stop: false,
        },
        TraitKind::Hammer => TraitProfile {
            timing: TargetTiming::Closest,
            inflicts_stop: true,
        },
    }
}

pub fn is_pre_target(trait_kind: TraitKind) -> bool {
    get_profile(trait_kind).timing == TargetTiming::PreTarget
}

/// Status effects appended to a landed hit.
pub fn secondary_effects(
    trait_kind: TraitKind,
    success: f64,
    target_mobility: f64,
) -> Vec<StatusEffect> {
    if !get_profile(trait_kind).inflicts_stop {
        return Vec::new();
    }
    vec![StatusEffect {
        kind: StatusEffectKind::Stop,
        remaining: stop_duration(success, target_mobility),
    }]
}

/// Duration of a stop effect.
pub fn stop_duration(success: f64, target_mobility: f64) -> f64 {
    ((success - target_mobility) * STOP_DURATION_SCALE).max(STOP_MIN_DURATION)
}
