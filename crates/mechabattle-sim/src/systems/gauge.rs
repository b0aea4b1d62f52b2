//! Gauge system: interruption checks and progress advancement.
//!
//! Runs only while the battle is idle. Charging machines whose reserved
//! action became invalid are pushed into cooldown first; then every
//! living gauge advances, consuming any freeze budget before progress.

use hecs::{Entity, World};

use mechabattle_behavior::traits;
use mechabattle_core::components::{Gauge, MachineInfo, StatusEffect};
use mechabattle_core::constants::PROGRESS_FULL;
use mechabattle_core::enums::{ActionKind, BattlePhase, GaugeStatus, InterruptReason};
use mechabattle_core::events::BattleEvent;
use mechabattle_core::types::MachineId;

use crate::context::BattleContext;
use crate::roster;

/// Run the gauge system for one tick of `dt`.
pub fn run(world: &mut World, ctx: &mut BattleContext, dt: f64) {
    if ctx.phase != BattlePhase::Idle {
        return;
    }

    // 1. Interruptions
    let mut interrupted: Vec<(MachineId, Entity, InterruptReason)> = Vec::new();
    for &entity in &ctx.roster {
        let Some(info) = roster::info(world, entity) else {
            continue;
        };
        if info.defeated {
            continue;
        }
        if let Some(reason) = check_interruption(world, ctx, entity) {
            interrupted.push((info.id, entity, reason));
        }
    }
    for (id, entity, reason) in interrupted {
        interrupt(world, ctx, id, entity, reason);
    }

    // 2. Advancement
    let mut ready: Vec<MachineId> = Vec::new();
    for (_entity, (info, gauge)) in world.query_mut::<(&MachineInfo, &mut Gauge)>() {
        if info.defeated {
            continue;
        }
        if advance(gauge, dt) {
            ready.push(info.id);
        }
    }
    // Queue in id order so simultaneous completions stay deterministic.
    ready.sort();
    for id in ready {
        ctx.enqueue(id);
    }
}

/// Why a charging machine can no longer carry out its reserved action.
pub fn check_interruption(
    world: &World,
    ctx: &BattleContext,
    machine: Entity,
) -> Option<InterruptReason> {
    let gauge = world.get::<&Gauge>(machine).ok()?;
    if gauge.status != GaugeStatus::Charging || gauge.action != Some(ActionKind::Attack) {
        return None;
    }
    let Some(slot) = gauge.part else {
        return Some(InterruptReason::NoOffense);
    };
    if !roster::part_alive(world, machine, slot) {
        return Some(InterruptReason::PartBroken);
    }
    let Some((offense, _)) = roster::part_offense(world, machine, slot) else {
        return Some(InterruptReason::NoOffense);
    };
    if traits::is_pre_target(offense.trait_kind) {
        let valid = gauge.selections.get(&slot).is_some_and(|selection| {
            ctx.entity(selection.machine).is_some_and(|target| {
                !roster::is_defeated(world, target)
                    && roster::part_alive(world, target, selection.part)
            })
        });
        if !valid {
            return Some(InterruptReason::TargetLost);
        }
    }
    None
}

/// Cancel the reserved action: cooldown from the mirrored position.
pub fn interrupt(
    world: &mut World,
    ctx: &mut BattleContext,
    id: MachineId,
    machine: Entity,
    reason: InterruptReason,
) {
    let name = roster::machine_name(world, machine);
    if let Ok(mut gauge) = world.get::<&mut Gauge>(machine) {
        gauge.status = GaugeStatus::Cooldown;
        gauge.progress = (PROGRESS_FULL - gauge.progress).max(0.0);
        if gauge.cooldown_time <= 0.0 {
            gauge.cooldown_time = gauge.charging_time;
        }
        gauge.action = None;
        gauge.part = None;
        gauge.selections.clear();
    }
    ctx.dequeue(id);
    tracing::debug!("{name} ({id}) interrupted: {reason:?}");
    let cause = match reason {
        InterruptReason::PartBroken => "'s part is broken!",
        InterruptReason::TargetLost => " lost its target!",
        InterruptReason::NoOffense => " cannot attack!",
    };
    ctx.log(format!("{name}{cause} The action was cancelled."));
    ctx.events.push(BattleEvent::ActionInterrupted { machine: id, reason });
}

/// Advance one gauge. Returns true when it now wants a turn.
pub fn advance(gauge: &mut Gauge, dt: f64) -> bool {
    match gauge.status {
        GaugeStatus::ActionChoice => true,
        GaugeStatus::Executing => false,
        GaugeStatus::Charging | GaugeStatus::Cooldown => {
            let budget = consume_freeze(&mut gauge.effects, dt);
            let duration = match gauge.status {
                GaugeStatus::Charging => gauge.charging_time,
                _ => gauge.cooldown_time,
            };
            if duration <= 0.0 {
                gauge.progress = PROGRESS_FULL;
            } else {
                gauge.progress += budget / duration * PROGRESS_FULL;
            }
            if gauge.progress < PROGRESS_FULL {
                return false;
            }
            if gauge.status == GaugeStatus::Charging {
                gauge.status = GaugeStatus::Executing;
                gauge.progress = PROGRESS_FULL;
            } else {
                reset_to_choice(gauge);
            }
            true
        }
    }
}

/// Spend `dt` on active freeze effects first. Returns the unfrozen remainder.
pub fn consume_freeze(effects: &mut Vec<StatusEffect>, dt: f64) -> f64 {
    let mut budget = dt.max(0.0);
    for effect in effects.iter_mut() {
        let used = effect.remaining.min(budget);
        effect.remaining -= used;
        budget -= used;
    }
    effects.retain(|effect| effect.remaining > 0.0);
    budget
}

/// Back to action choice with a fresh gauge.
pub fn reset_to_choice(gauge: &mut Gauge) {
    gauge.status = GaugeStatus::ActionChoice;
    gauge.progress = 0.0;
    gauge.action = None;
    gauge.part = None;
    gauge.selections.clear();
}

/// Start cooling down after an action.
///
/// The action and part stay reserved until the gauge returns to action
/// choice, so a reckless skill keeps its user exposed while cooling down.
pub fn begin_cooldown(gauge: &mut Gauge, duration: f64) {
    gauge.status = GaugeStatus::Cooldown;
    gauge.progress = 0.0;
    gauge.cooldown_time = duration;
    gauge.selections.clear();
}
