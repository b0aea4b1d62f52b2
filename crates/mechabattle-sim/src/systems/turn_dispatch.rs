//! Turn dispatch: hands the head of the waiting queue its turn.
//!
//! At most one phase transition per tick. A machine in action choice
//! goes to player input or enemy decision; a machine whose charge has
//! finished goes to initiation.

use hecs::World;

use mechabattle_core::components::{Gauge, MachineInfo};
use mechabattle_core::enums::{BattlePhase, GaugeStatus, Team};

use crate::context::BattleContext;

pub fn run(world: &World, ctx: &mut BattleContext, player_controlled: bool, tick: u64) {
    if ctx.phase != BattlePhase::Idle {
        return;
    }
    let Some(&head) = ctx.waiting.front() else {
        return;
    };

    let Some(entity) = ctx.entity(head) else {
        tracing::warn!("Queued machine {head} does not exist");
        ctx.waiting.pop_front();
        return;
    };
    let (team, defeated) = match world.get::<&MachineInfo>(entity) {
        Ok(info) => (info.team, info.defeated),
        Err(_) => (Team::One, true),
    };
    if defeated {
        ctx.waiting.pop_front();
        return;
    }
    let status = world.get::<&Gauge>(entity).map(|g| g.status).ok();

    match status {
        Some(GaugeStatus::ActionChoice) => {
            ctx.active_actor = Some(head);
            ctx.cursor = 0;
            let phase = if player_controlled && team == Team::One {
                BattlePhase::PlayerInput
            } else {
                BattlePhase::EnemyDecision
            };
            ctx.set_phase(phase, tick);
        }
        Some(GaugeStatus::Executing) => {
            ctx.active_actor = Some(head);
            ctx.set_phase(BattlePhase::Initiation, tick);
        }
        _ => {
            // Stale entry: the gauge moved on without a turn.
            ctx.waiting.pop_front();
        }
    }
}
