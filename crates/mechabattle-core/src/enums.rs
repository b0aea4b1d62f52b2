//! Enumeration types used throughout the battle.
//!
//! Behavior registries (skill, trait, personality, strategy) are closed
//! enums keyed by an identifier string. `from_id` returns `None` for ids
//! it does not know; callers substitute the `Default` variant.

use serde::{Deserialize, Serialize};

/// Team affiliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// The player's side.
    One,
    /// The opposing side.
    Two,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

/// Part slot on a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartSlot {
    Head,
    RightArm,
    LeftArm,
    Legs,
}

impl PartSlot {
    /// All slots in iteration order.
    pub const ALL: [PartSlot; 4] = [
        PartSlot::Head,
        PartSlot::RightArm,
        PartSlot::LeftArm,
        PartSlot::Legs,
    ];

    /// Slots that can carry an offense block.
    pub const OFFENSIVE: [PartSlot; 3] = [PartSlot::Head, PartSlot::RightArm, PartSlot::LeftArm];

    pub fn label(self) -> &'static str {
        match self {
            PartSlot::Head => "head",
            PartSlot::RightArm => "right arm",
            PartSlot::LeftArm => "left arm",
            PartSlot::Legs => "legs",
        }
    }
}

/// Attribute tag of medals and parts.
///
/// Power beats technique, technique beats speed, speed beats power.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Speed,
    Power,
    Technique,
    #[default]
    Undefined,
}

impl Attribute {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "speed" => Some(Attribute::Speed),
            "power" => Some(Attribute::Power),
            "technique" => Some(Attribute::Technique),
            "undefined" | "" => Some(Attribute::Undefined),
            _ => None,
        }
    }
}

/// ATB gauge status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaugeStatus {
    /// Waiting for an action to be chosen.
    #[default]
    ActionChoice,
    /// Moving toward the execution midpoint.
    Charging,
    /// Charge complete, action pending or resolving.
    Executing,
    /// Returning home after acting.
    Cooldown,
}

/// Battle flow phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Gauges advance and the waiting queue is dispatched.
    #[default]
    Idle,
    /// Waiting for the player to pick an action for the active actor.
    PlayerInput,
    /// The active actor's strategy picks an action.
    EnemyDecision,
    /// Final target resolution and combat pre-computation.
    Initiation,
    /// The precomputed action resolves and damage is applied.
    Executing,
    /// Battle log lines are revealed one by one.
    LogWait,
    /// A leader has fallen.
    GameOver,
}

/// Kind of action a machine commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Attack,
    Skip,
}

/// Offensive skill behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    /// Plain shot, no modifiers.
    #[default]
    Shoot,
    /// Melee-oriented: mobility feeds success, no defense while charging.
    Fight,
    /// Aimed: defense feeds success, easy to hit while charging.
    Aim,
    /// Reckless: mobility and defense feed attack, fully exposed while acting.
    Berserk,
}

impl SkillKind {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "shoot" => Some(SkillKind::Shoot),
            "fight" => Some(SkillKind::Fight),
            "aim" => Some(SkillKind::Aim),
            "berserk" => Some(SkillKind::Berserk),
            _ => None,
        }
    }
}

/// Weapon-category trait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitKind {
    #[default]
    Rifle,
    Gatling,
    Sword,
    /// Melee blow that stops the target's gauge.
    Hammer,
}

impl TraitKind {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "rifle" => Some(TraitKind::Rifle),
            "gatling" => Some(TraitKind::Gatling),
            "sword" => Some(TraitKind::Sword),
            "hammer" => Some(TraitKind::Hammer),
            _ => None,
        }
    }
}

/// Targeting personality of a medal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalityKind {
    #[default]
    Random,
    /// Finishes off the weakest parts.
    Assassin,
    /// Goes after the sturdiest parts.
    Challenger,
    /// Focuses the enemy leader.
    Leader,
}

impl PersonalityKind {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "random" => Some(PersonalityKind::Random),
            "assassin" => Some(PersonalityKind::Assassin),
            "challenger" => Some(PersonalityKind::Challenger),
            "leader" => Some(PersonalityKind::Leader),
            _ => None,
        }
    }
}

/// AI decision policy for computer-controlled machines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    #[default]
    Random,
    /// Always uses the hardest-hitting usable part.
    Strongest,
}

impl StrategyKind {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "random" => Some(StrategyKind::Random),
            "strongest" => Some(StrategyKind::Strongest),
            _ => None,
        }
    }
}

/// Status effect kinds carried on a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEffectKind {
    /// Freezes gauge progression while the duration lasts.
    Stop,
}

/// Why an in-progress action was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterruptReason {
    /// The reserved attacking part is broken.
    PartBroken,
    /// The target is defeated, its part is broken, or no target exists.
    TargetLost,
    /// The reserved part has no offense block.
    NoOffense,
}

/// Final result of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory(Team),
    /// Both leaders fell in the same tick.
    Draw,
}
