//! Events emitted by the simulation for audio and UI feedback.
//!
//! Events are buffered during a tick and handed out with the snapshot.
//! Nothing in the sim waits on how they are consumed.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete notifications the audio/notification layer can map to cues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// An enemy was shot down by hero fire.
    EnemyDestroyed { kind: AircraftKind, score: u32 },
    /// The hero collected a pickup.
    PickupCollected { kind: PickupKind },
    /// A boss entered the playfield.
    BossAppeared { appearance: u32, hp: i32 },
    /// The boss was shot down.
    BossDestroyed { appearance: u32 },
    /// A bomb cleared the field.
    BombActivated { enemies_destroyed: u32, score: u32 },
    /// Difficulty stepped up.
    DifficultyEscalated { level: u32 },
    /// The hero was lost; the run is over.
    GameOver { score: u32 },
}

/// Final result handed to the score-persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub score: u32,
    pub difficulty: Difficulty,
    pub elapsed_ms: u64,
    pub ticks: u64,
}
