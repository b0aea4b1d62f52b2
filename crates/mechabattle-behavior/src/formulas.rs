//! Combat formulas.
//!
//! Probabilities are unclamped: a target with no mobility is always hit,
//! and one with overwhelming mobility is practically never hit.

use mechabattle_core::constants::{BREAK_DEFENSE_WEIGHT, HIT_MOBILITY_WEIGHT};

/// How a hit landed, which decides the damage penalties applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Ignores both mobility and defense.
    Critical,
    /// Not guarded: ignores defense.
    Clean,
    /// Guarded: both penalties apply.
    Guarded,
}

/// Probability that an attack with `success` hits a target with `mobility`.
pub fn hit_probability(success: f64, mobility: f64) -> f64 {
    let denominator = success + mobility * HIT_MOBILITY_WEIGHT;
    if denominator <= 0.0 {
        return 1.0;
    }
    success / denominator
}

/// Probability that a hit breaks through a target's `defense`.
pub fn break_probability(success: f64, defense: f64) -> f64 {
    let denominator = success + defense * BREAK_DEFENSE_WEIGHT;
    if denominator <= 0.0 {
        return 1.0;
    }
    success / denominator
}

/// Damage dealt by a hit. Never below `floor(attack)` for non-negative attack.
pub fn calculate_damage(
    attack: f64,
    success: f64,
    mobility: f64,
    defense: f64,
    outcome: HitOutcome,
) -> u32 {
    let (penalty_mobility, penalty_defense) = match outcome {
        HitOutcome::Critical => (0.0, 0.0),
        HitOutcome::Clean => (mobility, 0.0),
        HitOutcome::Guarded => (mobility, defense),
    };
    let bonus = (success - penalty_mobility / 2.0 - penalty_defense / 2.0).max(0.0) / 2.0;
    (attack + bonus).floor().max(0.0) as u32
}
