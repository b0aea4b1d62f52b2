//! Target pre-selection for ranged parts.
//!
//! While a machine waits in action choice, its medal personality picks a
//! target for every alive pre-target part, so the decision step only has
//! to pick which part to use.

use hecs::World;
use rand::Rng;

use mechabattle_behavior::personality;
use mechabattle_behavior::traits;
use mechabattle_core::components::{Gauge, Medal, TargetSelection};
use mechabattle_core::enums::{BattlePhase, GaugeStatus, PartSlot};

use crate::context::BattleContext;
use crate::roster;

pub fn run<R: Rng>(world: &mut World, ctx: &BattleContext, rng: &mut R) {
    if ctx.phase != BattlePhase::Idle {
        return;
    }

    for &entity in &ctx.roster {
        let Some(info) = roster::info(world, entity) else {
            continue;
        };
        if info.defeated {
            continue;
        }
        let needs_selection = world
            .get::<&Gauge>(entity)
            .map(|g| g.status == GaugeStatus::ActionChoice && g.selections.is_empty())
            .unwrap_or(false);
        if !needs_selection {
            continue;
        }
        let Some(personality) = world.get::<&Medal>(entity).ok().map(|m| m.personality) else {
            continue;
        };

        let candidates = roster::target_candidates(world, ctx, info.team.opponent());
        let mut picks: Vec<(PartSlot, TargetSelection)> = Vec::new();
        for slot in PartSlot::OFFENSIVE {
            if !roster::part_alive(world, entity, slot) {
                continue;
            }
            let Some((offense, _)) = roster::part_offense(world, entity, slot) else {
                continue;
            };
            if !traits::is_pre_target(offense.trait_kind) {
                continue;
            }
            if let Some(selection) = personality::select_target(personality, &candidates, rng) {
                picks.push((slot, selection));
            }
        }

        if picks.is_empty() {
            continue;
        }
        if let Ok(mut gauge) = world.get::<&mut Gauge>(entity) {
            gauge.selections.extend(picks);
        }
    }
}
