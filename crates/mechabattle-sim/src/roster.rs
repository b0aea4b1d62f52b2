//! Machine-to-part links and read helpers over the world.
//!
//! Parts are their own entities; a machine holds a `PartSet` pointing at
//! them. These helpers copy out the values systems need so that no
//! component borrow outlives the call.

use hecs::{Entity, World};

use mechabattle_behavior::personality::TargetCandidate;
use mechabattle_behavior::resolution::PartHealth;
use mechabattle_behavior::strategy::ActionCandidate;
use mechabattle_behavior::traits;
use mechabattle_core::components::{Gauge, MachineInfo, Part, PartOffense};
use mechabattle_core::enums::{Attribute, PartSlot, Team};
use mechabattle_core::types::MachineId;

use crate::context::BattleContext;

/// Part entities of one machine.
#[derive(Debug, Clone, Copy)]
pub struct PartSet {
    pub head: Entity,
    pub right_arm: Entity,
    pub left_arm: Entity,
    pub legs: Entity,
}

impl PartSet {
    pub fn get(&self, slot: PartSlot) -> Entity {
        match slot {
            PartSlot::Head => self.head,
            PartSlot::RightArm => self.right_arm,
            PartSlot::LeftArm => self.left_arm,
            PartSlot::Legs => self.legs,
        }
    }
}

fn part_entity(world: &World, machine: Entity, slot: PartSlot) -> Option<Entity> {
    world.get::<&PartSet>(machine).ok().map(|set| set.get(slot))
}

/// Current health of a part, `None` if the machine or part is missing.
pub fn part_hp(world: &World, machine: Entity, slot: PartSlot) -> Option<u32> {
    let part = part_entity(world, machine, slot)?;
    world.get::<&Part>(part).ok().map(|p| p.hp)
}

pub fn part_alive(world: &World, machine: Entity, slot: PartSlot) -> bool {
    part_hp(world, machine, slot).is_some_and(|hp| hp > 0)
}

pub fn part_name(world: &World, machine: Entity, slot: PartSlot) -> String {
    part_entity(world, machine, slot)
        .and_then(|part| world.get::<&Part>(part).ok().map(|p| p.name.clone()))
        .unwrap_or_else(|| slot.label().to_string())
}

/// Offense and attribute of a part, if it can attack.
pub fn part_offense(
    world: &World,
    machine: Entity,
    slot: PartSlot,
) -> Option<(PartOffense, Attribute)> {
    let part = part_entity(world, machine, slot)?;
    let part = world.get::<&Part>(part).ok()?;
    part.offense.clone().map(|offense| (offense, part.attribute))
}

/// Mobility and defense from the legs. Broken legs still count.
pub fn leg_stats(world: &World, machine: Entity) -> (i32, i32) {
    part_entity(world, machine, PartSlot::Legs)
        .and_then(|legs| world.get::<&Part>(legs).ok().map(|p| (p.mobility, p.defense)))
        .unwrap_or((0, 0))
}

/// Health of every part, in slot order.
pub fn part_healths(world: &World, machine: Entity) -> Vec<PartHealth> {
    PartSlot::ALL
        .iter()
        .filter_map(|&slot| part_hp(world, machine, slot).map(|hp| PartHealth { slot, hp }))
        .collect()
}

pub fn alive_slots(world: &World, machine: Entity) -> Vec<PartSlot> {
    PartSlot::ALL
        .iter()
        .copied()
        .filter(|&slot| part_alive(world, machine, slot))
        .collect()
}

pub fn info(world: &World, machine: Entity) -> Option<MachineInfo> {
    world.get::<&MachineInfo>(machine).ok().map(|info| (*info).clone())
}

pub fn is_defeated(world: &World, machine: Entity) -> bool {
    world
        .get::<&MachineInfo>(machine)
        .map(|info| info.defeated)
        .unwrap_or(true)
}

pub fn machine_name(world: &World, machine: Entity) -> String {
    world
        .get::<&MachineInfo>(machine)
        .map(|info| info.name.clone())
        .unwrap_or_default()
}

/// Living machines of `team`, in id order.
pub fn living_members(world: &World, ctx: &BattleContext, team: Team) -> Vec<(MachineId, Entity)> {
    ctx.roster
        .iter()
        .filter_map(|&entity| {
            let info = world.get::<&MachineInfo>(entity).ok()?;
            (info.team == team && !info.defeated).then_some((info.id, entity))
        })
        .collect()
}

/// Every alive part of every living member of `team`, machine-then-slot order.
pub fn target_candidates(world: &World, ctx: &BattleContext, team: Team) -> Vec<TargetCandidate> {
    let mut candidates = Vec::new();
    for (id, entity) in living_members(world, ctx, team) {
        let leader = world
            .get::<&MachineInfo>(entity)
            .map(|info| info.leader)
            .unwrap_or(false);
        for slot in PartSlot::ALL {
            if let Some(hp) = part_hp(world, entity, slot).filter(|&hp| hp > 0) {
                candidates.push(TargetCandidate {
                    machine: id,
                    part: slot,
                    hp,
                    leader,
                });
            }
        }
    }
    candidates
}

/// Parts the machine can act with right now.
///
/// A part is actionable when alive and offensive; pre-target parts also
/// need a selection.
pub fn actionable_parts(world: &World, machine: Entity) -> Vec<ActionCandidate> {
    let Ok(gauge) = world.get::<&Gauge>(machine) else {
        return Vec::new();
    };
    PartSlot::OFFENSIVE
        .iter()
        .filter(|&&slot| part_alive(world, machine, slot))
        .filter_map(|&slot| {
            let (offense, _) = part_offense(world, machine, slot)?;
            if traits::is_pre_target(offense.trait_kind) && !gauge.selections.contains_key(&slot) {
                return None;
            }
            Some(ActionCandidate {
                slot,
                base_attack: offense.attack,
            })
        })
        .collect()
}
