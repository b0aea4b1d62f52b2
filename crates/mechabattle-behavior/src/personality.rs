//! Personality registry: pre-selects ranged targets while a machine is
//! choosing its action.

use rand::distributions::WeightedIndex;
use rand::prelude::*;

use mechabattle_core::components::TargetSelection;
use mechabattle_core::constants::RANKED_TARGET_WEIGHTS;
use mechabattle_core::enums::{PartSlot, PersonalityKind};
use mechabattle_core::types::MachineId;

/// An alive part of a living enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetCandidate {
    pub machine: MachineId,
    pub part: PartSlot,
    pub hp: u32,
    pub leader: bool,
}

/// Pick a target among `candidates` according to `personality`.
///
/// Candidates are expected in machine-then-slot order. Returns `None` only
/// when there is nothing to target.
pub fn select_target<R: Rng>(
    personality: PersonalityKind,
    candidates: &[TargetCandidate],
    rng: &mut R,
) -> Option<TargetSelection> {
    match personality {
        PersonalityKind::Random => select_random(candidates, rng),
        PersonalityKind::Assassin => select_ranked(candidates, false, rng),
        PersonalityKind::Challenger => select_ranked(candidates, true, rng),
        PersonalityKind::Leader => {
            let leader_parts: Vec<TargetCandidate> =
                candidates.iter().copied().filter(|c| c.leader).collect();
            if leader_parts.is_empty() {
                select_random(candidates, rng)
            } else {
                select_random(&leader_parts, rng)
            }
        }
    }
}

/// Uniform over enemies, then uniform over that enemy's alive parts.
fn select_random<R: Rng>(candidates: &[TargetCandidate], rng: &mut R) -> Option<TargetSelection> {
    let mut machines: Vec<MachineId> = Vec::new();
    for candidate in candidates {
        if !machines.contains(&candidate.machine) {
            machines.push(candidate.machine);
        }
    }
    let machine = *machines.choose(rng)?;
    let parts: Vec<&TargetCandidate> = candidates.iter().filter(|c| c.machine == machine).collect();
    parts.choose(rng).map(|c| selection(c))
}

/// Rank by part health and draw among the top three with 60/30/10 weights.
fn select_ranked<R: Rng>(
    candidates: &[TargetCandidate],
    descending: bool,
    rng: &mut R,
) -> Option<TargetSelection> {
    let mut ranked = candidates.to_vec();
    if descending {
        ranked.sort_by(|a, b| b.hp.cmp(&a.hp));
    } else {
        ranked.sort_by(|a, b| a.hp.cmp(&b.hp));
    }
    ranked.truncate(RANKED_TARGET_WEIGHTS.len());
    if ranked.is_empty() {
        return None;
    }

    let weights = &RANKED_TARGET_WEIGHTS[..ranked.len()];
    let index = match WeightedIndex::new(weights) {
        Ok(dist) => dist.sample(rng),
        Err(_) => 0,
    };
    Some(selection(&ranked[index]))
}

fn selection(candidate: &TargetCandidate) -> TargetSelection {
    TargetSelection {
        machine: candidate.machine,
        part: candidate.part,
    }
}
