//! Skill registry: offensive bonuses, reciprocal defensive penalties,
//! and time multipliers per skill.

use mechabattle_core::constants::*;
use mechabattle_core::enums::{GaugeStatus, SkillKind};

/// Static parameters of a skill.
pub struct SkillProfile {
    /// Multiplier on charge and cooldown durations.
    pub time_multiplier: f64,
}

/// Additive bonuses a skill grants its user's attack.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkillBonus {
    pub success: f64,
    pub attack: f64,
}

/// Weaknesses a machine exposes while acting with a skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefensePenalty {
    /// Incoming hits are never guarded.
    pub prevent_defense: bool,
    /// Incoming attacks always hit.
    pub force_hit: bool,
    /// Incoming hits are always critical.
    pub force_critical: bool,
}

/// Get the profile for a skill.
pub fn get_profile(skill: SkillKind) -> SkillProfile {
    match skill {
        SkillKind::Shoot | SkillKind::Fight => SkillProfile {
            time_multiplier: 1.0,
        },
        SkillKind::Aim => SkillProfile {
            time_multiplier: 1.2,
        },
        SkillKind::Berserk => SkillProfile {
            time_multiplier: 0.8,
        },
    }
}

/// Bonus derived from the attacker's own leg mobility and defense.
pub fn offense_bonus(skill: SkillKind, mobility: i32, defense: i32) -> SkillBonus {
    let mobility = mobility.max(0) as f64;
    let defense = defense.max(0) as f64;
    match skill {
        SkillKind::Shoot => SkillBonus::default(),
        SkillKind::Fight => SkillBonus {
            success: mobility * FIGHT_MOBILITY_SHARE,
            attack: 0.0,
        },
        SkillKind::Aim => SkillBonus {
            success: defense * AIM_DEFENSE_SHARE,
            attack: 0.0,
        },
        SkillKind::Berserk => SkillBonus {
            success: 0.0,
            attack: (mobility + defense) * BERSERK_STAT_SHARE,
        },
    }
}

/// Penalty a defender suffers from its own reserved skill, given its gauge status.
pub fn defense_penalty(skill: SkillKind, status: GaugeStatus) -> DefensePenalty {
    let charging = status == GaugeStatus::Charging;
    match skill {
        SkillKind::Shoot => DefensePenalty::default(),
        SkillKind::Fight => DefensePenalty {
            prevent_defense: charging,
            ..Default::default()
        },
        SkillKind::Aim => DefensePenalty {
            force_hit: charging,
            ..Default::default()
        },
        SkillKind::Berserk => {
            let exposed = charging || status == GaugeStatus::Cooldown;
            DefensePenalty {
                prevent_defense: exposed,
                force_hit: exposed,
                force_critical: exposed,
            }
        }
    }
}
