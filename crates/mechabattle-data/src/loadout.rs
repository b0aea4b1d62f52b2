//! Loadouts: which medal and parts a machine is assembled from.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use mechabattle_core::blueprint::{MachineBlueprint, TeamSetup};
use mechabattle_core::components::{Medal, Part};
use mechabattle_core::enums::{Attribute, PartSlot, PersonalityKind, StrategyKind};

use crate::catalog::GameData;

/// A machine assembly by data id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub medal: String,
    pub head: String,
    pub right_arm: String,
    pub left_arm: String,
    pub legs: String,
}

impl Loadout {
    pub fn part_id(&self, slot: PartSlot) -> &str {
        match slot {
            PartSlot::Head => &self.head,
            PartSlot::RightArm => &self.right_arm,
            PartSlot::LeftArm => &self.left_arm,
            PartSlot::Legs => &self.legs,
        }
    }
}

/// Pick a medal and one part per slot uniformly at random.
///
/// Returns `None` when the data set lacks medals or parts for some slot.
pub fn random_loadout<R: Rng>(data: &GameData, rng: &mut R) -> Option<Loadout> {
    let medal = data.medals.choose(rng)?.id.clone();
    let mut pick = |slot: PartSlot| data.parts.slot(slot).choose(rng).map(|p| p.id.clone());
    Some(Loadout {
        medal,
        head: pick(PartSlot::Head)?,
        right_arm: pick(PartSlot::RightArm)?,
        left_arm: pick(PartSlot::LeftArm)?,
        legs: pick(PartSlot::Legs)?,
    })
}

/// Resolve a loadout into a spawnable blueprint.
///
/// Unknown ids are logged and replaced by a neutral placeholder.
pub fn resolve_loadout(data: &GameData, loadout: &Loadout) -> MachineBlueprint {
    let medal = match data.medal(&loadout.medal) {
        Some(record) => record.to_medal(),
        None => {
            tracing::warn!("Unknown medal id '{}', using placeholder", loadout.medal);
            placeholder_medal()
        }
    };
    let part = |slot: PartSlot| {
        let id = loadout.part_id(slot);
        match data.part(slot, id) {
            Some(record) => record.to_part(slot),
            None => {
                tracing::warn!("Unknown {} part id '{id}', using placeholder", slot.label());
                placeholder_part(slot)
            }
        }
    };
    MachineBlueprint {
        name: medal.name.clone(),
        head: part(PartSlot::Head),
        right_arm: part(PartSlot::RightArm),
        left_arm: part(PartSlot::LeftArm),
        legs: part(PartSlot::Legs),
        medal,
    }
}

/// Build a team from loadouts. The leader index is clamped into range.
pub fn build_team(
    data: &GameData,
    loadouts: &[Loadout],
    leader: usize,
    strategy: StrategyKind,
) -> TeamSetup {
    TeamSetup {
        members: loadouts.iter().map(|l| resolve_loadout(data, l)).collect(),
        leader: leader.min(loadouts.len().saturating_sub(1)),
        strategy,
    }
}

/// Build a team of `size` random machines, led by the first.
pub fn random_team<R: Rng>(
    data: &GameData,
    size: usize,
    strategy: StrategyKind,
    rng: &mut R,
) -> TeamSetup {
    let loadouts: Vec<Loadout> = (0..size).filter_map(|_| random_loadout(data, rng)).collect();
    build_team(data, &loadouts, 0, strategy)
}

fn placeholder_medal() -> Medal {
    Medal {
        name: "Unknown".to_string(),
        personality: PersonalityKind::default(),
        attribute: Attribute::default(),
    }
}

/// A part with one hit point and no offense, so the machine still spawns alive.
fn placeholder_part(slot: PartSlot) -> Part {
    Part {
        slot,
        name: "Unknown".to_string(),
        attribute: Attribute::default(),
        hp: 1,
        max_hp: 1,
        offense: None,
        mobility: 0,
        defense: 0,
    }
}
