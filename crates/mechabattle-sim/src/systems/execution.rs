//! Action execution: initiation resolves the final target and rolls the
//! attack; resolution turns the rolled result into log lines, damage and
//! the attacker's cooldown.

use hecs::{Entity, World};
use rand::prelude::*;

use mechabattle_behavior::resolution::{self, AttackerProfile, DefenderProfile};
use mechabattle_behavior::timing;
use mechabattle_behavior::traits::{self, TargetTiming};
use mechabattle_core::components::{Gauge, MachineInfo, Medal, TargetSelection};
use mechabattle_core::constants::SKIP_ACTION_DURATION;
use mechabattle_core::enums::{
    ActionKind, Attribute, BattlePhase, InterruptReason, PartSlot, Team, TraitKind,
};
use mechabattle_core::events::BattleEvent;
use mechabattle_core::types::MachineId;

use crate::action::{ActionEvent, DamageEvent};
use crate::context::BattleContext;
use crate::roster;
use crate::systems::gauge;

/// Initiation phase: validate the action, pick the final target, roll it.
pub fn initiate<R: Rng>(world: &mut World, ctx: &mut BattleContext, rng: &mut R, tick: u64) {
    if ctx.phase != BattlePhase::Initiation {
        return;
    }
    let Some(actor) = ctx.active_actor else {
        tracing::warn!("Initiation without an active machine");
        ctx.set_phase(BattlePhase::Idle, tick);
        return;
    };
    ctx.dequeue(actor);
    let Some(entity) = ctx.entity(actor).filter(|&e| !roster::is_defeated(world, e)) else {
        tracing::warn!("Attacker {actor} is missing or defeated");
        ctx.set_phase(BattlePhase::Idle, tick);
        return;
    };

    let Some((action, slot, selection)) = world.get::<&Gauge>(entity).ok().map(|g| {
        let selection = g.part.and_then(|slot| g.selections.get(&slot).copied());
        (g.action, g.part, selection)
    }) else {
        ctx.set_phase(BattlePhase::Idle, tick);
        return;
    };

    if action != Some(ActionKind::Attack) {
        ctx.action_event = Some(ActionEvent::skip(actor));
        ctx.set_phase(BattlePhase::Executing, tick);
        return;
    }

    let Some(slot) = slot else {
        abort(world, ctx, actor, entity, InterruptReason::NoOffense, tick);
        return;
    };
    if !roster::part_alive(world, entity, slot) {
        abort(world, ctx, actor, entity, InterruptReason::PartBroken, tick);
        return;
    }
    let Some((offense, part_attribute)) = roster::part_offense(world, entity, slot) else {
        abort(world, ctx, actor, entity, InterruptReason::NoOffense, tick);
        return;
    };
    let team = world
        .get::<&MachineInfo>(entity)
        .map(|info| info.team)
        .unwrap_or(Team::One);
    let Some(target) = resolve_target(world, ctx, team, offense.trait_kind, selection, rng) else {
        abort(world, ctx, actor, entity, InterruptReason::TargetLost, tick);
        return;
    };
    let Some(target_entity) = ctx.entity(target.machine) else {
        abort(world, ctx, actor, entity, InterruptReason::TargetLost, tick);
        return;
    };

    let (mobility, defense) = roster::leg_stats(world, entity);
    let attacker = AttackerProfile {
        attack: offense.attack,
        success: offense.success,
        trait_kind: offense.trait_kind,
        skill: offense.skill,
        medal_attribute: medal_attribute(world, entity),
        part_attribute,
        mobility,
        defense,
    };
    let defender = defender_profile(world, target_entity);
    let result = resolution::resolve(&attacker, &defender, target.part, rng);

    ctx.action_event = Some(ActionEvent {
        attacker: actor,
        kind: ActionKind::Attack,
        part: Some(slot),
        original_target: Some(target.machine),
        current_target: Some(target.machine),
        desired_part: Some(target.part),
        result,
    });
    ctx.set_phase(BattlePhase::Executing, tick);
}

/// Final target for an attack with a part of `trait_kind`.
///
/// Pre-target parts re-validate their selection. Closest-target parts
/// strike the enemy furthest along its gauge; ties go to the lowest id.
pub fn resolve_target<R: Rng>(
    world: &World,
    ctx: &BattleContext,
    team: Team,
    trait_kind: TraitKind,
    selection: Option<TargetSelection>,
    rng: &mut R,
) -> Option<TargetSelection> {
    match traits::get_profile(trait_kind).timing {
        TargetTiming::PreTarget => {
            let selection = selection?;
            let target = ctx.entity(selection.machine)?;
            let valid = !roster::is_defeated(world, target)
                && roster::part_alive(world, target, selection.part);
            valid.then_some(selection)
        }
        TargetTiming::Closest => {
            let mut closest: Option<(MachineId, Entity, f64)> = None;
            for (id, entity) in roster::living_members(world, ctx, team.opponent()) {
                let Ok(gauge) = world.get::<&Gauge>(entity) else {
                    continue;
                };
                let ratio = timing::position_ratio(gauge.status, gauge.progress);
                if closest.map_or(true, |(_, _, best)| ratio > best) {
                    closest = Some((id, entity, ratio));
                }
            }
            let (machine, entity, _) = closest?;
            let part = roster::alive_slots(world, entity)
                .choose(rng)
                .copied()
                .unwrap_or(PartSlot::Head);
            Some(TargetSelection { machine, part })
        }
    }
}

fn medal_attribute(world: &World, machine: Entity) -> Attribute {
    world
        .get::<&Medal>(machine)
        .map(|m| m.attribute)
        .unwrap_or_default()
}

fn defender_profile(world: &World, machine: Entity) -> DefenderProfile {
    let (mobility, defense) = roster::leg_stats(world, machine);
    let (status, reserved) = world
        .get::<&Gauge>(machine)
        .map(|g| {
            let reserved = match g.action {
                Some(ActionKind::Attack) => g.part,
                _ => None,
            };
            (g.status, reserved)
        })
        .unwrap_or_default();
    let reserved_skill = reserved
        .and_then(|slot| roster::part_offense(world, machine, slot))
        .map(|(offense, _)| offense.skill);
    DefenderProfile {
        medal_attribute: medal_attribute(world, machine),
        mobility,
        defense,
        status,
        reserved_skill,
        parts: roster::part_healths(world, machine),
    }
}

fn abort(
    world: &mut World,
    ctx: &mut BattleContext,
    actor: MachineId,
    entity: Entity,
    reason: InterruptReason,
    tick: u64,
) {
    gauge::interrupt(world, ctx, actor, entity, reason);
    ctx.set_phase(BattlePhase::Idle, tick);
}

/// Executing phase: consume the action event.
pub fn resolve(world: &mut World, ctx: &mut BattleContext, tick: u64) {
    if ctx.phase != BattlePhase::Executing {
        return;
    }
    let Some(event) = ctx.action_event.take() else {
        tracing::warn!("Executing phase without an action event");
        ctx.set_phase(BattlePhase::Idle, tick);
        return;
    };
    let Some(entity) = ctx.entity(event.attacker) else {
        tracing::warn!("Attacker {} vanished before resolution", event.attacker);
        ctx.set_phase(BattlePhase::Idle, tick);
        return;
    };
    let name = roster::machine_name(world, entity);

    let cooldown = match (event.kind, event.part, event.current_target) {
        (ActionKind::Attack, Some(slot), Some(target)) => {
            announce_attack(world, ctx, &event, &name, slot, target);
            world.get::<&Gauge>(entity).map(|g| g.charging_time).unwrap_or(SKIP_ACTION_DURATION)
        }
        _ => {
            ctx.log(format!("{name} is biding its time."));
            SKIP_ACTION_DURATION
        }
    };

    if let Ok(mut g) = world.get::<&mut Gauge>(entity) {
        gauge::begin_cooldown(&mut g, cooldown);
    }
    ctx.begin_log_wait(tick);
}

fn announce_attack(
    world: &World,
    ctx: &mut BattleContext,
    event: &ActionEvent,
    name: &str,
    slot: PartSlot,
    target: MachineId,
) {
    let attacker_entity = ctx.entity(event.attacker);
    let weapon = attacker_entity
        .map(|e| roster::part_name(world, e, slot))
        .unwrap_or_else(|| slot.label().to_string());
    let target_name = ctx
        .entity(target)
        .map(|e| roster::machine_name(world, e))
        .unwrap_or_default();
    ctx.log(format!("{name} attacks {target_name} with {weapon}!"));

    let result = &event.result;
    match result.part {
        Some(part) if result.hit => {
            if result.critical {
                ctx.log("Critical hit!");
            } else if result.guarded {
                let guard = ctx
                    .entity(target)
                    .map(|e| roster::part_name(world, e, part))
                    .unwrap_or_default();
                ctx.log(format!("{target_name} guarded with {guard}!"));
            }
            ctx.damage_event = Some(DamageEvent {
                attacker: event.attacker,
                attacker_part: slot,
                target,
                part,
                damage: result.damage,
                critical: result.critical,
                effects: result.effects.clone(),
            });
        }
        _ => ctx.log(format!("{target_name} dodged the attack!")),
    }

    ctx.events.push(BattleEvent::AttackResolved {
        attacker: event.attacker,
        target,
        hit: result.hit,
        critical: result.critical,
        guarded: result.guarded,
        part: result.part,
        damage: result.damage,
    });
}
