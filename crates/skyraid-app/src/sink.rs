//! Frame sinks: consumers of per-tick snapshots and the game-over report.
//!
//! Sinks are fire-and-forget. The game loop logs their failures and keeps
//! ticking.

use thiserror::Error;

use skyraid_core::enums::PickupKind;
use skyraid_core::events::{GameOverReport, SimEvent};
use skyraid_core::state::GameStateSnapshot;

use crate::scoreboard::{ScoreRecord, Scoreboard, ScoreboardError};

#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    Scoreboard(#[from] ScoreboardError),
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

pub trait FrameSink: Send {
    fn on_frame(&mut self, snapshot: &GameStateSnapshot) -> Result<(), SinkError>;

    fn on_game_over(&mut self, _report: &GameOverReport) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sound cue a presentation layer would play for an event.
pub fn cue_for(event: &SimEvent) -> Option<&'static str> {
    match event {
        SimEvent::EnemyDestroyed { .. } => Some("bullet_hit"),
        SimEvent::PickupCollected {
            kind: PickupKind::Bomb,
        } => None,
        SimEvent::PickupCollected { .. } => Some("get_supply"),
        SimEvent::BombActivated { .. } => Some("bomb_explosion"),
        SimEvent::BossAppeared { .. } => Some("bgm_boss"),
        SimEvent::BossDestroyed { .. } => Some("bgm"),
        SimEvent::GameOver { .. } => Some("game_over"),
        SimEvent::DifficultyEscalated { .. } => None,
    }
}

/// Logs every event with its cue.
#[derive(Debug, Default)]
pub struct EventLogSink {
    cues_played: u64,
}

impl EventLogSink {
    pub fn cues_played(&self) -> u64 {
        self.cues_played
    }
}

impl FrameSink for EventLogSink {
    fn on_frame(&mut self, snapshot: &GameStateSnapshot) -> Result<(), SinkError> {
        let tick = snapshot.time.tick;
        for event in &snapshot.events {
            let cue = cue_for(event);
            if cue.is_some() {
                self.cues_played += 1;
            }
            match event {
                SimEvent::EnemyDestroyed { .. } | SimEvent::PickupCollected { .. } => {
                    tracing::debug!(tick, ?event, cue, "event");
                }
                _ => tracing::info!(tick, ?event, cue, "event"),
            }
        }
        Ok(())
    }
}

/// Records the final score of each run.
pub struct ScoreboardSink {
    board: Scoreboard,
    player: String,
}

impl ScoreboardSink {
    pub fn new(board: Scoreboard, player: impl Into<String>) -> Self {
        Self {
            board,
            player: player.into(),
        }
    }
}

impl FrameSink for ScoreboardSink {
    fn on_frame(&mut self, _snapshot: &GameStateSnapshot) -> Result<(), SinkError> {
        Ok(())
    }

    fn on_game_over(&mut self, report: &GameOverReport) -> Result<(), SinkError> {
        let record = ScoreRecord::now(self.player.clone(), report.score);
        self.board.insert(report.difficulty, &record)?;
        Ok(())
    }
}

/// Fans out to every sink. One failing sink does not starve the others.
impl FrameSink for Vec<Box<dyn FrameSink>> {
    fn on_frame(&mut self, snapshot: &GameStateSnapshot) -> Result<(), SinkError> {
        for sink in self.iter_mut() {
            if let Err(e) = sink.on_frame(snapshot) {
                tracing::warn!(error = %e, tick = snapshot.time.tick, "frame sink failed");
            }
        }
        Ok(())
    }

    fn on_game_over(&mut self, report: &GameOverReport) -> Result<(), SinkError> {
        for sink in self.iter_mut() {
            if let Err(e) = sink.on_game_over(report) {
                tracing::warn!(error = %e, score = report.score, "game-over sink failed");
            }
        }
        Ok(())
    }
}
