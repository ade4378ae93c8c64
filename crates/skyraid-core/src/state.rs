//! Game state snapshot: the complete read-only view sent after every tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{GameOverReport, SimEvent};
use crate::pattern::FiringPattern;
use crate::types::{Position, SimTime};

/// Complete game state for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub score: u32,
    pub hero: Option<HeroView>,
    pub enemies: Vec<EntityView>,
    pub projectiles: Vec<EntityView>,
    pub pickups: Vec<EntityView>,
    pub events: Vec<SimEvent>,
    /// Set once the hero is lost. No further ticks advance the run.
    pub terminal: bool,
    pub game_over: Option<GameOverReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroView {
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub pattern: FiringPattern,
}

/// One live entity as the presentation layer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    /// Spawn sequence number; stable for the entity's lifetime.
    pub id: u64,
    pub sprite: SpriteKind,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    /// Only aircraft carry HP.
    pub hp: Option<i32>,
}
