//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the hero, the run state and the
//! scheduled-event queue. It processes player commands, runs all systems in a
//! fixed order, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::commands::PlayerCommand;
use skyraid_core::enums::GamePhase;
use skyraid_core::error::{ProfileError, SimError};
use skyraid_core::events::{GameOverReport, SimEvent};
use skyraid_core::profile::DifficultyProfile;
use skyraid_core::state::GameStateSnapshot;
use skyraid_core::types::SimTime;

use crate::hero::Hero;
use crate::input::HeroInput;
use crate::run_state::RunState;
use crate::systems;
use crate::systems::collision::Resolution;
use crate::systems::snapshot::SnapshotContext;
use crate::timers::{TimerAction, TimerEvent, TimerQueue};

/// Configuration for a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same run.
    pub seed: u64,
    pub profile: DifficultyProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            profile: DifficultyProfile::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    profile: DifficultyProfile,
    phase: GamePhase,
    rng: ChaCha8Rng,
    hero: Option<Hero>,
    run: RunState,
    next_run_id: u64,
    next_seq: u64,
    timers: TimerQueue,
    input: HeroInput,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
    game_over: Option<GameOverReport>,
    /// Set when a tick fails part way. Cleared when the run is torn down.
    fault: Option<SimError>,
}

impl SimulationEngine {
    /// Create a new engine. The profile is checked up front so a bad one can
    /// never stall a tick.
    pub fn new(config: SimConfig) -> Result<Self, ProfileError> {
        config.profile.validate()?;
        Ok(Self {
            world: World::new(),
            run: RunState::new(0, &config.profile),
            profile: config.profile,
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            hero: None,
            next_run_id: 1,
            next_seq: 0,
            timers: TimerQueue::new(),
            input: HeroInput::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            game_over: None,
            fault: None,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// A handle the input layer can write hero positions into from any thread.
    pub fn input_handle(&self) -> HeroInput {
        self.input.clone()
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Outside the `Active` phase nothing advances. The only error is a
    /// wiring defect (an aircraft asked to fire without a pattern). A failed
    /// tick is left part applied, so every later step returns the same error
    /// until an `EndRun` command tears the run down.
    pub fn step(&mut self) -> Result<GameStateSnapshot, SimError> {
        self.process_commands();

        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        if self.phase == GamePhase::Active {
            if let Err(e) = self.run_systems() {
                tracing::error!(run_id = self.run.run_id, error = %e, "run halted");
                self.fault = Some(e.clone());
                return Err(e);
            }
        }

        Ok(self.snapshot())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.run.time
    }

    pub fn score(&self) -> u32 {
        self.run.score
    }

    pub fn is_terminal(&self) -> bool {
        self.run.terminal
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.hero.as_ref()
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn game_over(&self) -> Option<&GameOverReport> {
        self.game_over.as_ref()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::GameOver) {
                    self.start_run();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::EndRun => {
                if self.phase != GamePhase::MainMenu {
                    self.end_run();
                }
            }
        }
    }

    fn start_run(&mut self) {
        let run_id = self.next_run_id;
        self.next_run_id += 1;

        self.world.clear();
        self.run = RunState::new(run_id, &self.profile);
        self.hero = Some(Hero::new());
        self.input.clear();
        self.events.clear();
        self.game_over = None;
        self.fault = None;
        self.phase = GamePhase::Active;

        tracing::info!(
            run_id,
            difficulty = self.profile.difficulty.label(),
            max_enemies = self.profile.max_enemies,
            cycle_ms = self.profile.cycle_duration_ms,
            boss = self.profile.boss.is_some(),
            escalation = self.profile.escalation.is_some(),
            "run started"
        );
    }

    /// Tear the run down. Pending timer events stay queued and are dropped
    /// harmlessly when they come due.
    fn end_run(&mut self) {
        tracing::info!(run_id = self.run.run_id, score = self.run.score, "run ended");
        self.hero = None;
        self.world.clear();
        self.game_over = None;
        self.fault = None;
        self.phase = GamePhase::MainMenu;
    }

    /// Run all systems in order.
    fn run_systems(&mut self) -> Result<(), SimError> {
        // 1. Hero input
        if let (Some(hero), Some(target)) = (self.hero.as_mut(), self.input.latest()) {
            hero.move_to(target);
        }

        // 2. Time advance
        self.run.time.advance();

        // 3. Due timer events
        self.fire_due_timers();

        // 4. Escalation
        systems::difficulty::run(&mut self.run, &self.profile, &mut self.events);

        // 5. Scheduled spawns
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.next_seq,
            &mut self.run,
            &self.profile,
            &mut self.events,
        );

        let Some(hero) = self.hero.as_mut() else {
            return Ok(());
        };

        // 6. Weapon fire
        systems::weapons::run(
            &mut self.world,
            &mut self.next_seq,
            &mut self.run,
            hero,
            &self.profile,
        )?;

        // 7. Entity motion
        systems::movement::run(&mut self.world);

        // 8. Collision resolution
        let mut ctx = Resolution {
            run: &mut self.run,
            rng: &mut self.rng,
            next_seq: &mut self.next_seq,
            timers: &mut self.timers,
            events: &mut self.events,
        };
        systems::collision::run(&mut self.world, hero, &mut ctx);
        let hero_lost = !hero.is_alive();

        // 9. Post-tick sweep
        systems::cleanup::run(&mut self.world, &mut self.run, &mut self.despawn_buffer);

        // 10. Terminal check
        if hero_lost {
            self.finish_run();
        }
        Ok(())
    }

    fn fire_due_timers(&mut self) {
        let due = self
            .timers
            .drain_due(self.run.run_id, self.run.time.elapsed_ms);
        for event in due {
            dispatch_timer(self.hero.as_mut(), event);
        }
    }

    fn finish_run(&mut self) {
        let report = GameOverReport {
            score: self.run.score,
            difficulty: self.profile.difficulty,
            elapsed_ms: self.run.time.elapsed_ms,
            ticks: self.run.time.tick,
        };
        tracing::info!(
            run_id = self.run.run_id,
            score = report.score,
            difficulty = report.difficulty.label(),
            elapsed_ms = report.elapsed_ms,
            "game over"
        );
        self.run.terminal = true;
        self.phase = GamePhase::GameOver;
        self.events.push(SimEvent::GameOver {
            score: report.score,
        });
        self.game_over = Some(report);
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        let ctx = SnapshotContext {
            time: self.run.time,
            phase: self.phase,
            difficulty: self.profile.difficulty,
            score: self.run.score,
            hero: self.hero.as_ref(),
            terminal: self.run.terminal,
            game_over: self.game_over.clone(),
        };
        systems::snapshot::build_snapshot(&self.world, ctx, events)
    }
}

/// Apply one scheduled event. Without a hero (run torn down) it is a no-op.
fn dispatch_timer(hero: Option<&mut Hero>, event: TimerEvent) {
    match event.action {
        TimerAction::RevertHeroPattern => {
            if let Some(hero) = hero {
                hero.revert_pattern(event.id);
            }
        }
    }
}

#[cfg(test)]
impl SimulationEngine {
    /// Spawn an enemy at an exact position. A boss also sets the boss flag.
    pub fn spawn_test_enemy(
        &mut self,
        kind: skyraid_core::enums::AircraftKind,
        position: skyraid_core::types::Position,
        velocity: skyraid_core::types::Velocity,
        hp: i32,
    ) -> hecs::Entity {
        if kind == skyraid_core::enums::AircraftKind::Boss {
            self.run.boss_exists = true;
        }
        crate::world_setup::spawn_enemy_at(
            &mut self.world,
            &mut self.next_seq,
            kind,
            position,
            velocity,
            hp,
        )
    }

    pub fn spawn_test_projectile(&mut self, shot: crate::firing::Shot) -> hecs::Entity {
        crate::world_setup::spawn_projectile(&mut self.world, &mut self.next_seq, &shot)
    }

    pub fn spawn_test_pickup(
        &mut self,
        kind: skyraid_core::enums::PickupKind,
        position: skyraid_core::types::Position,
    ) -> hecs::Entity {
        crate::world_setup::spawn_pickup(&mut self.world, &mut self.next_seq, kind, position)
    }

    pub fn set_score(&mut self, score: u32) {
        self.run.score = score;
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Drain and dispatch timers as if run time were `now_ms`, even outside
    /// an active run.
    pub fn fire_timers_at(&mut self, now_ms: u64) {
        self.run.time.elapsed_ms = now_ms;
        self.fire_due_timers();
    }
}
