//! Strategy registry: the AI commander policy that picks an action.
//!
//! A strategy never picks targets; it only chooses which part to act with.

use rand::prelude::*;

use mechabattle_core::enums::{PartSlot, StrategyKind};
use mechabattle_core::state::ActionOption;

/// A part the machine could act with right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCandidate {
    pub slot: PartSlot,
    pub base_attack: i32,
}

/// Choose an action. Skips when nothing is actionable.
pub fn decide<R: Rng>(
    strategy: StrategyKind,
    candidates: &[ActionCandidate],
    rng: &mut R,
) -> ActionOption {
    let chosen = match strategy {
        StrategyKind::Random => candidates.choose(rng),
        // First maximum wins, so ties fall to slot order.
        StrategyKind::Strongest => {
            candidates
                .iter()
                .fold(None, |best: Option<&ActionCandidate>, c| match best {
                    Some(b) if b.base_attack >= c.base_attack => Some(b),
                    _ => Some(c),
                })
        }
    };
    match chosen {
        Some(candidate) => ActionOption::Attack(candidate.slot),
        None => ActionOption::Skip,
    }
}
