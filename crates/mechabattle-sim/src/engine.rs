//! Battle engine: the core of the game.
//!
//! `BattleEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `BattleSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use mechabattle_core::blueprint::TeamSetup;
use mechabattle_core::commands::{LogicalInput, PlayerCommand};
use mechabattle_core::constants::DEFAULT_MAX_DT;
use mechabattle_core::enums::{BattleOutcome, BattlePhase};
use mechabattle_core::events::BattleEvent;
use mechabattle_core::state::{ActionOption, BattleSnapshot};
use mechabattle_core::types::SimTime;

use crate::context::BattleContext;
use crate::systems;
use crate::world_setup;

/// Configuration for a battle engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// RNG seed for determinism. Same seed = same battle.
    pub seed: u64,
    /// Team one waits for player commands instead of deciding itself.
    pub player_controlled: bool,
    /// Reveal one pending log line per tick without acknowledgement.
    pub auto_advance_log: bool,
    /// Upper bound on a single update step.
    pub max_dt: f64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            player_controlled: true,
            auto_advance_log: false,
            max_dt: DEFAULT_MAX_DT,
        }
    }
}

impl BattleConfig {
    /// Both teams computer-controlled, logs advancing on their own.
    pub fn headless(seed: u64) -> Self {
        Self {
            seed,
            player_controlled: false,
            auto_advance_log: true,
            ..Default::default()
        }
    }
}

/// The battle engine. Owns the ECS world and all battle state.
pub struct BattleEngine {
    world: World,
    context: BattleContext,
    time: SimTime,
    rng: ChaCha8Rng,
    config: BattleConfig,
    started: bool,
    command_queue: VecDeque<PlayerCommand>,
}

impl BattleEngine {
    /// Create a new battle engine with the given config.
    pub fn new(config: BattleConfig) -> Self {
        Self {
            world: World::new(),
            context: BattleContext::default(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            started: false,
            command_queue: VecDeque::new(),
        }
    }

    /// Spawn both teams and begin a fresh battle.
    pub fn start_battle(&mut self, team_one: &TeamSetup, team_two: &TeamSetup) {
        self.world.clear();
        self.context = BattleContext::default();
        self.time = SimTime::default();
        self.command_queue.clear();
        self.context.roster = world_setup::setup_battle(&mut self.world, team_one, team_two);
        self.started = true;
        tracing::info!(
            "Battle started: {} vs {} machines",
            team_one.members.len(),
            team_two.members.len()
        );
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Queue the commands produced by one frame of logical input.
    pub fn apply_input(&mut self, input: &LogicalInput) {
        self.queue_commands(input.commands());
    }

    /// Like [`apply_input`](Self::apply_input), hit-testing the pointer
    /// against the action menu with `entry_at`.
    pub fn apply_input_with_menu(
        &mut self,
        input: &LogicalInput,
        entry_at: impl Fn(i32, i32) -> Option<usize>,
    ) {
        self.queue_commands(input.commands_with_menu(entry_at));
    }

    /// Advance the battle by `dt` time units.
    pub fn update(&mut self, dt: f64) {
        self.context.events.clear();
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_dt)
        } else {
            0.0
        };

        self.process_commands();

        if self.started && !self.context.is_over() {
            self.run_systems(dt);
            self.context.phase_timer += dt;
            self.time.advance(dt);
        }
    }

    /// Build a snapshot of the current battle state.
    pub fn snapshot(&self) -> BattleSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.context, &self.time)
    }

    /// Events emitted by the latest update.
    pub fn events(&self) -> &[BattleEvent] {
        &self.context.events
    }

    pub fn phase(&self) -> BattlePhase {
        self.context.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.context.outcome
    }

    pub fn is_over(&self) -> bool {
        self.context.is_over()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the battle context.
    pub fn context(&self) -> &BattleContext {
        &self.context
    }

    /// Actions offered to the player right now.
    pub fn available_actions(&self) -> Vec<ActionOption> {
        match (self.context.phase, self.context.active_actor) {
            (BattlePhase::PlayerInput, Some(actor)) => {
                systems::decision::available_actions(&self.world, &self.context, actor)
            }
            _ => Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn context_mut(&mut self) -> &mut BattleContext {
        &mut self.context
    }

    #[cfg(test)]
    pub fn split_mut(&mut self) -> (&mut World, &mut BattleContext) {
        (&mut self.world, &mut self.context)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let tick = self.time.tick;
        match (self.context.phase, command) {
            (BattlePhase::PlayerInput, PlayerCommand::SelectPart { slot }) => {
                self.commit_player_action(ActionOption::Attack(slot));
            }
            (BattlePhase::PlayerInput, PlayerCommand::Skip) => {
                self.commit_player_action(ActionOption::Skip);
            }
            (BattlePhase::PlayerInput, PlayerCommand::MoveCursor { delta }) => {
                let count = self.available_actions().len();
                if count > 0 {
                    let cursor = self.context.cursor as i64 + delta as i64;
                    self.context.cursor = cursor.rem_euclid(count as i64) as usize;
                }
            }
            (BattlePhase::PlayerInput, PlayerCommand::Confirm) => {
                let options = self.available_actions();
                match options.get(self.context.cursor) {
                    Some(&choice) => self.commit_player_action(choice),
                    None => tracing::warn!("Cursor {} is out of range", self.context.cursor),
                }
            }
            (BattlePhase::PlayerInput, PlayerCommand::PointAt { index }) => {
                if index < self.available_actions().len() {
                    self.context.cursor = index;
                }
            }
            (BattlePhase::PlayerInput, PlayerCommand::Cancel) => {
                self.context.cursor = 0;
            }
            (BattlePhase::LogWait, PlayerCommand::AdvanceLog | PlayerCommand::Confirm) => {
                systems::log_wait::acknowledge(&mut self.context, tick);
            }
            (phase, command) => {
                tracing::debug!("Ignoring {command:?} during {phase:?}");
            }
        }
    }

    fn commit_player_action(&mut self, choice: ActionOption) {
        let Some(actor) = self.context.active_actor else {
            tracing::warn!("No machine is waiting for input");
            return;
        };
        systems::decision::commit_action(
            &mut self.world,
            &mut self.context,
            actor,
            choice,
            self.time.tick,
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let tick = self.time.tick;
        // 1. Gauges (interruptions, then advancement)
        systems::gauge::run(&mut self.world, &mut self.context, dt);
        // 2. Ranged target pre-selection
        systems::target_selection::run(&mut self.world, &self.context, &mut self.rng);
        // 3. Turn dispatch
        systems::turn_dispatch::run(
            &self.world,
            &mut self.context,
            self.config.player_controlled,
            tick,
        );
        // 4. AI decision
        systems::decision::run(&mut self.world, &mut self.context, &mut self.rng, tick);
        // 5. Initiation (final target, combat roll)
        systems::execution::initiate(&mut self.world, &mut self.context, &mut self.rng, tick);
        // 6. Resolution (log lines, damage event, cooldown)
        systems::execution::resolve(&mut self.world, &mut self.context, tick);
        // 7. Damage application
        systems::damage::run(&mut self.world, &mut self.context);
        // 8. Defeat and win checks
        systems::defeat::run(&mut self.world, &mut self.context, tick);
        // 9. Log wait
        systems::log_wait::run(&mut self.context, self.config.auto_advance_log, tick);
    }
}
