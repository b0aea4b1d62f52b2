//! ECS systems run once per engine update, in a fixed order.
//!
//! Systems are free functions over `&mut World` and the battle context.
//! Most of them only act while the battle is in one particular phase.

pub mod damage;
pub mod decision;
pub mod defeat;
pub mod execution;
pub mod gauge;
pub mod log_wait;
pub mod snapshot;
pub mod target_selection;
pub mod turn_dispatch;
