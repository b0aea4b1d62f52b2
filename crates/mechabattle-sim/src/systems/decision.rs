//! Action decision: AI commanders pick an action, and committing any
//! chosen action (AI or player) starts the charge.

use hecs::World;
use rand::Rng;

use mechabattle_behavior::{strategy, timing};
use mechabattle_core::components::{Commander, Gauge, Medal};
use mechabattle_core::constants::SKIP_ACTION_DURATION;
use mechabattle_core::enums::{ActionKind, BattlePhase, GaugeStatus};
use mechabattle_core::events::BattleEvent;
use mechabattle_core::state::ActionOption;
use mechabattle_core::types::MachineId;

use crate::context::BattleContext;
use crate::roster;

/// Let the active AI machine decide and commit.
pub fn run<R: Rng>(world: &mut World, ctx: &mut BattleContext, rng: &mut R, tick: u64) {
    if ctx.phase != BattlePhase::EnemyDecision {
        return;
    }
    let Some(actor) = ctx.active_actor else {
        tracing::warn!("Enemy decision without an active machine");
        ctx.set_phase(BattlePhase::Idle, tick);
        return;
    };
    let Some(entity) = ctx.entity(actor) else {
        ctx.dequeue(actor);
        ctx.set_phase(BattlePhase::Idle, tick);
        return;
    };

    let strategy_kind = world
        .get::<&Commander>(entity)
        .map(|c| c.strategy)
        .unwrap_or_default();
    let candidates = roster::actionable_parts(world, entity);
    let choice = strategy::decide(strategy_kind, &candidates, rng);

    if !commit_action(world, ctx, actor, choice, tick) {
        commit_action(world, ctx, actor, ActionOption::Skip, tick);
    }
}

/// Options offered to a machine in action choice: its actionable parts, then skip.
pub fn available_actions(world: &World, ctx: &BattleContext, id: MachineId) -> Vec<ActionOption> {
    let mut options: Vec<ActionOption> = ctx
        .entity(id)
        .map(|entity| roster::actionable_parts(world, entity))
        .unwrap_or_default()
        .into_iter()
        .map(|candidate| ActionOption::Attack(candidate.slot))
        .collect();
    options.push(ActionOption::Skip);
    options
}

/// Commit `choice` for machine `id` and return to idle.
///
/// Returns false, changing nothing, when the choice is not available.
pub fn commit_action(
    world: &mut World,
    ctx: &mut BattleContext,
    id: MachineId,
    choice: ActionOption,
    tick: u64,
) -> bool {
    let Some(entity) = ctx.entity(id) else {
        return false;
    };
    if !available_actions(world, ctx, id).contains(&choice) {
        tracing::warn!("Machine {id} cannot take action {choice:?}");
        return false;
    }

    let (action, slot, duration) = match choice {
        ActionOption::Skip => (ActionKind::Skip, None, SKIP_ACTION_DURATION),
        ActionOption::Attack(slot) => {
            let Some((offense, part_attribute)) = roster::part_offense(world, entity, slot) else {
                return false;
            };
            let medal_attribute = world
                .get::<&Medal>(entity)
                .map(|m| m.attribute)
                .unwrap_or_default();
            let duration = timing::action_duration(&offense, medal_attribute, part_attribute);
            (ActionKind::Attack, Some(slot), duration)
        }
    };

    if let Ok(mut gauge) = world.get::<&mut Gauge>(entity) {
        gauge.status = GaugeStatus::Charging;
        gauge.progress = 0.0;
        gauge.charging_time = duration;
        gauge.cooldown_time = duration;
        gauge.action = Some(action);
        gauge.part = slot;
        // Only the committed part's target stays locked in.
        gauge.selections.retain(|&s, _| Some(s) == slot);
    }

    tracing::debug!("Machine {id} committed {choice:?} ({duration:.2})");
    ctx.events.push(BattleEvent::ActionCommitted {
        machine: id,
        action,
        slot,
    });
    ctx.dequeue(id);
    ctx.set_phase(BattlePhase::Idle, tick);
    true
}
