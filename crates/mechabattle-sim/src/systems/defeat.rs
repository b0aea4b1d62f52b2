//! Defeat and win checks.
//!
//! A machine is defeated exactly when its head is at zero. The battle
//! ends as soon as a leader falls; both leaders falling together is a draw.

use hecs::World;

use mechabattle_core::components::MachineInfo;
use mechabattle_core::enums::{BattleOutcome, BattlePhase, PartSlot, Team};
use mechabattle_core::events::BattleEvent;

use crate::context::BattleContext;
use crate::roster;

pub fn run(world: &mut World, ctx: &mut BattleContext, tick: u64) {
    if ctx.is_over() {
        return;
    }

    // Keep the defeat flag in step with head health.
    let mut downed = Vec::new();
    for &entity in &ctx.roster {
        let head_alive = roster::part_alive(world, entity, PartSlot::Head);
        if let Ok(mut info) = world.get::<&mut MachineInfo>(entity) {
            if info.defeated != !head_alive {
                info.defeated = !head_alive;
                if info.defeated {
                    downed.push(info.id);
                }
            }
        }
    }
    for id in downed {
        ctx.dequeue(id);
        ctx.events.push(BattleEvent::MachineDefeated { machine: id });
    }

    let Some(outcome) = check_outcome(world, ctx) else {
        return;
    };
    ctx.outcome = Some(outcome);
    ctx.damage_event = None;
    ctx.waiting.clear();
    ctx.set_phase(BattlePhase::GameOver, tick);
    ctx.events.push(BattleEvent::BattleOver { outcome });
    tracing::info!("Battle over at tick {tick}: {outcome:?}");
    ctx.log(match outcome {
        BattleOutcome::Victory(Team::One) => "Team one wins the robattle!".to_string(),
        BattleOutcome::Victory(Team::Two) => "Team two wins the robattle!".to_string(),
        BattleOutcome::Draw => "Both leaders are down. The robattle is a draw!".to_string(),
    });
    // Nothing waits on acknowledgement any more; show everything left.
    let remaining: Vec<String> = ctx.pending_log.drain(..).collect();
    ctx.battle_log.extend(remaining);
}

/// Outcome if a leader has fallen. A team without a leader counts as fallen.
pub fn check_outcome(world: &World, ctx: &BattleContext) -> Option<BattleOutcome> {
    let leader_down = |team: Team| {
        !ctx.roster.iter().any(|&entity| {
            world
                .get::<&MachineInfo>(entity)
                .map(|info| info.team == team && info.leader && !info.defeated)
                .unwrap_or(false)
        })
    };
    match (leader_down(Team::One), leader_down(Team::Two)) {
        (true, true) => Some(BattleOutcome::Draw),
        (true, false) => Some(BattleOutcome::Victory(Team::Two)),
        (false, true) => Some(BattleOutcome::Victory(Team::One)),
        (false, false) => None,
    }
}
