//! Latest-value hero input cell.
//!
//! Written by the input layer from any thread, read by the engine once at the
//! top of each tick. Only the most recent position matters.

use std::sync::{Arc, Mutex};

use skyraid_core::types::Position;

#[derive(Debug, Clone, Default)]
pub struct HeroInput {
    latest: Arc<Mutex<Option<Position>>>,
}

impl HeroInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a target position, replacing any unread one.
    pub fn set(&self, x: f64, y: f64) {
        if let Ok(mut lock) = self.latest.lock() {
            *lock = Some(Position::new(x, y));
        }
    }

    /// The most recently set position, if any has been set.
    pub fn latest(&self) -> Option<Position> {
        self.latest.lock().ok().and_then(|lock| *lock)
    }

    /// Forget the stored position (used between runs).
    pub fn clear(&self) {
        if let Ok(mut lock) = self.latest.lock() {
            *lock = None;
        }
    }
}
