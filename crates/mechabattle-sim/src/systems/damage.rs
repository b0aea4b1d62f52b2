//! Damage application: consumes the pending damage event.
//!
//! Health never goes below zero. Breaking the head defeats the machine
//! and removes it from the waiting queue.

use hecs::World;

use mechabattle_core::components::{Gauge, MachineInfo, Part};
use mechabattle_core::enums::{PartSlot, StatusEffectKind};
use mechabattle_core::events::BattleEvent;

use crate::context::BattleContext;
use crate::roster::{self, PartSet};

pub fn run(world: &mut World, ctx: &mut BattleContext) {
    let Some(event) = ctx.damage_event.take() else {
        return;
    };
    let Some(target) = ctx.entity(event.target) else {
        tracing::warn!("Damage target {} does not exist", event.target);
        return;
    };
    let Some(part_entity) = world.get::<&PartSet>(target).ok().map(|set| set.get(event.part)) else {
        return;
    };
    let name = roster::machine_name(world, target);

    let (part_name, broken) = {
        let Ok(mut part) = world.get::<&mut Part>(part_entity) else {
            return;
        };
        let was_alive = part.hp > 0;
        part.hp = part.hp.saturating_sub(event.damage);
        (part.name.clone(), was_alive && part.hp == 0)
    };
    tracing::debug!(
        "{} hit {}'s {:?} for {}",
        event.attacker,
        event.target,
        event.part,
        event.damage
    );
    ctx.log(format!("{name}'s {part_name} took {} damage!", event.damage));

    if broken {
        ctx.log(format!("{name}'s {part_name} was destroyed!"));
        ctx.events.push(BattleEvent::PartBroken {
            machine: event.target,
            slot: event.part,
        });
    }

    let head_down =
        event.part == PartSlot::Head && !roster::part_alive(world, target, PartSlot::Head);
    if head_down {
        let newly_defeated = match world.get::<&mut MachineInfo>(target) {
            Ok(mut info) => !std::mem::replace(&mut info.defeated, true),
            Err(_) => false,
        };
        if newly_defeated {
            ctx.log(format!("{name} is out of action!"));
            ctx.events.push(BattleEvent::MachineDefeated { machine: event.target });
            ctx.dequeue(event.target);
        }
        return;
    }

    if event.effects.is_empty() {
        return;
    }
    if let Ok(mut gauge) = world.get::<&mut Gauge>(target) {
        for effect in &event.effects {
            if effect.kind == StatusEffectKind::Stop {
                ctx.log(format!("{name} is stopped in its tracks!"));
            }
            gauge.effects.push(*effect);
        }
    }
}
