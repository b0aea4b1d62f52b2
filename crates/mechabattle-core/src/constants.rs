//! Battle constants and tuning parameters.

// --- Gauge ---

/// Progress value at which a charge or cooldown completes.
pub const PROGRESS_FULL: f64 = 100.0;

/// Charge/cooldown duration used by skip actions (abstract time units).
pub const SKIP_ACTION_DURATION: f64 = 1.0;

/// Duration multiplier when a speed medal acts with a speed part.
pub const ATTRIBUTE_MATCH_TIME_FACTOR: f64 = 0.9;

/// Default upper bound on a single update step.
pub const DEFAULT_MAX_DT: f64 = 0.25;

// --- Affinity ---

/// Stat bonus per point of attribute advantage.
pub const AFFINITY_STEP: i32 = 5;

// --- Combat formulas ---

/// Weight of target mobility in the hit probability denominator.
pub const HIT_MOBILITY_WEIGHT: f64 = 0.2;

/// Weight of target defense in the break probability denominator.
pub const BREAK_DEFENSE_WEIGHT: f64 = 2.0;

/// `hit + break` probability sum at or above which a clean hit is critical.
pub const CRITICAL_PROBABILITY_SUM: f64 = 2.0;

// --- Skills ---

/// Share of the attacker's mobility a fight skill adds to success.
pub const FIGHT_MOBILITY_SHARE: f64 = 0.25;

/// Share of the attacker's defense an aim skill adds to success.
pub const AIM_DEFENSE_SHARE: f64 = 0.5;

/// Share of mobility and of defense a berserk skill adds to attack.
pub const BERSERK_STAT_SHARE: f64 = 0.25;

// --- Traits ---

/// Minimum duration of a stop effect.
pub const STOP_MIN_DURATION: f64 = 0.5;

/// Stop duration per point of success over target mobility.
pub const STOP_DURATION_SCALE: f64 = 0.05;

// --- Personalities ---

/// Selection weights for the top three ranked candidates.
pub const RANKED_TARGET_WEIGHTS: [u32; 3] = [60, 30, 10];

// --- Teams ---

/// Maximum number of machines on one team.
pub const MAX_TEAM_SIZE: usize = 3;
