//! Entity spawn factories for setting up a battle.
//!
//! Each machine is one entity carrying identity, medal, commander and
//! gauge, plus four part entities linked through a `PartSet`.

use hecs::{Entity, World};

use mechabattle_core::blueprint::{MachineBlueprint, TeamSetup};
use mechabattle_core::components::{Commander, Gauge, MachineInfo};
use mechabattle_core::constants::MAX_TEAM_SIZE;
use mechabattle_core::enums::Team;
use mechabattle_core::types::MachineId;

use crate::roster::PartSet;

/// Spawn both teams. Returns machine entities indexed by `MachineId`.
///
/// Team one is spawned first, so its members get the lowest ids.
pub fn setup_battle(world: &mut World, team_one: &TeamSetup, team_two: &TeamSetup) -> Vec<Entity> {
    let mut roster = Vec::new();
    for (team, setup) in [(Team::One, team_one), (Team::Two, team_two)] {
        if setup.members.len() > MAX_TEAM_SIZE {
            tracing::warn!(
                "{team:?} has {} members, only the first {MAX_TEAM_SIZE} will fight",
                setup.members.len()
            );
        }
        for (index, blueprint) in setup.members.iter().take(MAX_TEAM_SIZE).enumerate() {
            let id = MachineId(roster.len() as u32);
            let commander = Commander {
                strategy: setup.strategy,
            };
            let leader = index == setup.leader;
            let entity = spawn_machine(world, id, team, leader, commander, blueprint);
            roster.push(entity);
        }
    }
    roster
}

/// Spawn one machine and its parts.
pub fn spawn_machine(
    world: &mut World,
    id: MachineId,
    team: Team,
    leader: bool,
    commander: Commander,
    blueprint: &MachineBlueprint,
) -> Entity {
    let parts = PartSet {
        head: world.spawn((blueprint.head.clone(),)),
        right_arm: world.spawn((blueprint.right_arm.clone(),)),
        left_arm: world.spawn((blueprint.left_arm.clone(),)),
        legs: world.spawn((blueprint.legs.clone(),)),
    };
    let info = MachineInfo {
        id,
        name: blueprint.name.clone(),
        team,
        leader,
        defeated: blueprint.head.hp == 0,
    };
    world.spawn((info, blueprint.medal.clone(), commander, Gauge::default(), parts))
}
