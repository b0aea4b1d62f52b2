//! Battle engine for MECHABATTLE.
//!
//! Owns the hecs ECS world and the battle context, runs systems in a
//! fixed order once per `update`, and produces `BattleSnapshot`s for
//! presentation.

pub mod action;
pub mod context;
pub mod engine;
pub mod roster;
pub mod systems;
pub mod world_setup;

pub use engine::{BattleConfig, BattleEngine};
pub use mechabattle_core as core;

#[cfg(test)]
mod tests;
