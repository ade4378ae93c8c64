//! Per-run mutable state owned by the engine.
//!
//! Stored on `SimulationEngine`, NOT in the ECS world. Only systems running
//! inside a tick mutate it.

use skyraid_core::enums::AircraftKind;
use skyraid_core::profile::{ClassBaseline, DifficultyProfile};
use skyraid_core::types::SimTime;

#[derive(Debug, Clone)]
pub struct RunState {
    /// Distinguishes this run from earlier ones for scheduled events.
    pub run_id: u64,
    pub time: SimTime,
    pub score: u32,

    // --- Spawn cadence ---
    pub cycle_timer_ms: u64,
    /// Kept fractional so repeated multiplication stays monotonic.
    pub cycle_duration_ms: f64,
    pub elite_probability: f64,
    pub max_enemies: u32,
    pub elite_plus_counter: u32,

    // --- Class baselines (rounded at spawn) ---
    pub mob: ClassBaseline,
    pub elite: ClassBaseline,
    pub elite_plus: ClassBaseline,

    // --- Fire timers ---
    pub hero_fire_timer_ms: u64,
    pub enemy_fire_timer_ms: u64,

    // --- Boss ---
    pub boss_appearances: u32,
    pub last_boss_score: u32,
    pub boss_exists: bool,

    // --- Escalation ---
    pub escalation_level: u32,
    pub last_escalation_ms: u64,

    pub terminal: bool,
}

impl RunState {
    pub fn new(run_id: u64, profile: &DifficultyProfile) -> Self {
        Self {
            run_id,
            time: SimTime::default(),
            score: 0,
            cycle_timer_ms: 0,
            cycle_duration_ms: profile.cycle_duration_ms as f64,
            elite_probability: profile.elite_probability,
            max_enemies: profile.max_enemies,
            elite_plus_counter: 0,
            mob: profile.mob,
            elite: profile.elite,
            elite_plus: profile.elite_plus,
            hero_fire_timer_ms: 0,
            enemy_fire_timer_ms: 0,
            boss_appearances: 0,
            last_boss_score: 0,
            boss_exists: false,
            escalation_level: 0,
            last_escalation_ms: 0,
            terminal: false,
        }
    }

    /// Spawn cycle rounded to whole milliseconds, at least 1.
    pub fn cycle_period_ms(&self) -> u64 {
        (self.cycle_duration_ms.round() as u64).max(1)
    }

    /// Current baseline for a spawnable class. The hero and boss have none.
    pub fn baseline(&self, kind: AircraftKind) -> Option<ClassBaseline> {
        match kind {
            AircraftKind::Mob => Some(self.mob),
            AircraftKind::Elite => Some(self.elite),
            AircraftKind::ElitePlus => Some(self.elite_plus),
            AircraftKind::Hero | AircraftKind::Boss => None,
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}
