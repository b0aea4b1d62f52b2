//! Attribute affinity: power beats technique, technique beats speed,
//! speed beats power.

use mechabattle_core::constants::AFFINITY_STEP;
use mechabattle_core::enums::Attribute;

/// Additive stat adjustments from affinity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AffinityBonus {
    /// Added to the attacker's success and attack.
    pub attack: i32,
    /// Added to the target's mobility and defense.
    pub defense: i32,
}

/// +1 if `attacker` beats `defender`, -1 if it loses, 0 otherwise.
/// `Undefined` never wins or loses.
pub fn advantage(attacker: Attribute, defender: Attribute) -> i32 {
    use Attribute::*;
    match (attacker, defender) {
        (Power, Technique) | (Technique, Speed) | (Speed, Power) => 1,
        (Technique, Power) | (Speed, Technique) | (Power, Speed) => -1,
        _ => 0,
    }
}

/// Affinity score in -2..=2: medal vs medal plus acting part vs medal.
pub fn score(
    attacker_medal: Attribute,
    attacker_part: Attribute,
    defender_medal: Attribute,
) -> i32 {
    advantage(attacker_medal, defender_medal) + advantage(attacker_part, defender_medal)
}

/// Stat bonuses for an attack.
pub fn bonus(
    attacker_medal: Attribute,
    attacker_part: Attribute,
    defender_medal: Attribute,
) -> AffinityBonus {
    let total = score(attacker_medal, attacker_part, defender_medal);
    AffinityBonus {
        attack: total * AFFINITY_STEP,
        defense: -total * AFFINITY_STEP,
    }
}
