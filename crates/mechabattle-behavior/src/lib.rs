//! Behavior registries and combat math for MECHABATTLE.
//!
//! Pure functions over plain data: combat formulas, attribute affinity,
//! the skill / trait / personality / strategy registries, and the combat
//! resolution that composes them. No ECS dependency.

pub mod affinity;
pub mod formulas;
pub mod personality;
pub mod resolution;
pub mod skills;
pub mod strategy;
pub mod timing;
pub mod traits;

pub use mechabattle_core as core;
