//! Battle context: the shared battle-flow state passed into every system.

use std::collections::VecDeque;

use hecs::Entity;

use mechabattle_core::enums::{BattleOutcome, BattlePhase};
use mechabattle_core::events::BattleEvent;
use mechabattle_core::types::MachineId;

use crate::action::{ActionEvent, DamageEvent};

/// Battle flow state. Owned by the engine, one per battle.
#[derive(Debug, Default)]
pub struct BattleContext {
    pub phase: BattlePhase,
    /// Tick at which the current phase started.
    pub phase_start_tick: u64,
    /// Time spent in the current phase.
    pub phase_timer: f64,
    /// Machines eligible to act or execute, first come first served.
    pub waiting: VecDeque<MachineId>,
    pub active_actor: Option<MachineId>,
    /// In-flight action between initiation and resolution.
    pub action_event: Option<ActionEvent>,
    /// Damage between resolution and damage application.
    pub damage_event: Option<DamageEvent>,
    pub outcome: Option<BattleOutcome>,
    /// Lines currently shown.
    pub battle_log: Vec<String>,
    /// Lines waiting to be revealed one at a time.
    pub pending_log: VecDeque<String>,
    /// Player menu cursor.
    pub cursor: usize,
    /// Machine entities indexed by `MachineId`.
    pub roster: Vec<Entity>,
    /// Events emitted during the current tick.
    pub events: Vec<BattleEvent>,
}

impl BattleContext {
    /// Transition to `phase`. Entering idle clears the in-flight action.
    pub fn set_phase(&mut self, phase: BattlePhase, tick: u64) {
        if self.phase == phase {
            return;
        }
        tracing::debug!("Phase {:?} -> {:?} at tick {tick}", self.phase, phase);
        self.events.push(BattleEvent::PhaseChanged {
            from: self.phase,
            to: phase,
        });
        self.phase = phase;
        self.phase_start_tick = tick;
        self.phase_timer = 0.0;

        if phase == BattlePhase::Idle {
            self.action_event = None;
            self.active_actor = None;
            self.cursor = 0;
        }
    }

    /// Entity of a machine, if it exists.
    pub fn entity(&self, id: MachineId) -> Option<Entity> {
        self.roster.get(id.0 as usize).copied()
    }

    /// Push onto the waiting queue unless already queued.
    pub fn enqueue(&mut self, id: MachineId) {
        if !self.waiting.contains(&id) {
            self.waiting.push_back(id);
        }
    }

    pub fn dequeue(&mut self, id: MachineId) {
        self.waiting.retain(|&queued| queued != id);
    }

    /// Queue a line for sequential reveal.
    pub fn log(&mut self, line: impl Into<String>) {
        self.pending_log.push_back(line.into());
    }

    /// Replace the shown line with the next pending one, or clear it.
    pub fn advance_log(&mut self) {
        self.battle_log.clear();
        if let Some(line) = self.pending_log.pop_front() {
            self.battle_log.push(line);
        }
    }

    /// Enter log-wait, revealing the first pending line.
    pub fn begin_log_wait(&mut self, tick: u64) {
        self.set_phase(BattlePhase::LogWait, tick);
        if self.battle_log.is_empty() {
            self.advance_log();
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == BattlePhase::GameOver
    }
}
