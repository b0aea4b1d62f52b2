//! Snapshot system: queries the ECS world and builds a complete BattleSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::{Entity, World};

use mechabattle_behavior::timing;
use mechabattle_core::components::{Gauge, MachineInfo, Part};
use mechabattle_core::enums::{BattlePhase, PartSlot, StatusEffectKind};
use mechabattle_core::state::{BattleSnapshot, MachineView, PartView};
use mechabattle_core::types::SimTime;

use crate::context::BattleContext;
use crate::roster::PartSet;
use crate::systems::decision;

/// Build a complete BattleSnapshot from the current world and context.
pub fn build_snapshot(world: &World, ctx: &BattleContext, time: &SimTime) -> BattleSnapshot {
    let available_actions = match (ctx.phase, ctx.active_actor) {
        (BattlePhase::PlayerInput, Some(actor)) => decision::available_actions(world, ctx, actor),
        _ => Vec::new(),
    };

    BattleSnapshot {
        time: *time,
        phase: ctx.phase,
        phase_timer: ctx.phase_timer,
        outcome: ctx.outcome,
        active_actor: ctx.active_actor,
        machines: ctx
            .roster
            .iter()
            .filter_map(|&entity| build_machine(world, entity))
            .collect(),
        battle_log: ctx.battle_log.clone(),
        pending_log: ctx.pending_log.len(),
        available_actions,
        cursor: ctx.cursor,
        events: ctx.events.clone(),
    }
}

fn build_machine(world: &World, entity: Entity) -> Option<MachineView> {
    let info = world.get::<&MachineInfo>(entity).ok()?;
    let gauge = world.get::<&Gauge>(entity).ok()?;
    let parts = world.get::<&PartSet>(entity).ok()?;

    Some(MachineView {
        id: info.id,
        name: info.name.clone(),
        team: info.team,
        leader: info.leader,
        defeated: info.defeated,
        status: gauge.status,
        progress: gauge.progress,
        position_ratio: timing::position_ratio(gauge.status, gauge.progress),
        stopped: gauge
            .effects
            .iter()
            .any(|e| e.kind == StatusEffectKind::Stop && e.remaining > 0.0),
        parts: PartSlot::ALL
            .iter()
            .filter_map(|&slot| {
                let part = world.get::<&Part>(parts.get(slot)).ok()?;
                Some(PartView {
                    slot,
                    name: part.name.clone(),
                    hp: part.hp,
                    max_hp: part.max_hp,
                })
            })
            .collect(),
    })
}
