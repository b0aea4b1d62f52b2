//! Gauge timing: action durations and the position ratio shared with
//! presentation and melee targeting.

use mechabattle_core::components::PartOffense;
use mechabattle_core::constants::{ATTRIBUTE_MATCH_TIME_FACTOR, PROGRESS_FULL};
use mechabattle_core::enums::{Attribute, GaugeStatus};

use crate::skills;

/// `1 + log10(attack)`, or 0 for non-positive attack.
pub fn base_duration(attack: i32) -> f64 {
    if attack <= 0 {
        return 0.0;
    }
    1.0 + (attack as f64).log10()
}

/// Duration multiplier when the medal and acting part share an attribute.
/// Only the speed attribute is rewarded.
pub fn attribute_match_factor(medal: Attribute, part: Attribute) -> f64 {
    if medal == Attribute::Speed && part == Attribute::Speed {
        ATTRIBUTE_MATCH_TIME_FACTOR
    } else {
        1.0
    }
}

/// Charge (and cooldown) duration for acting with `offense`.
///
/// Always uses the base attack so attack bonuses never slow the gauge.
pub fn action_duration(offense: &PartOffense, medal: Attribute, part: Attribute) -> f64 {
    base_duration(offense.attack)
        * skills::get_profile(offense.skill).time_multiplier
        * offense.time_modifier
        * attribute_match_factor(medal, part)
}

/// How far a machine has moved from home toward the execution midpoint.
pub fn position_ratio(status: GaugeStatus, progress: f64) -> f64 {
    let fraction = (progress / PROGRESS_FULL).clamp(0.0, 1.0);
    match status {
        GaugeStatus::ActionChoice => 0.0,
        GaugeStatus::Charging => fraction,
        GaugeStatus::Executing => 1.0,
        GaugeStatus::Cooldown => 1.0 - fraction,
    }
}
