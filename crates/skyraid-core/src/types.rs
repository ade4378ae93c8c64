//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AIRCRAFT_HITBOX_HEIGHT_FACTOR, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, TICK_INTERVAL_MS,
};
use crate::enums::SpriteKind;

/// 2D position on the playfield (pixels).
/// x grows to the right, y grows downward; the hero sits near the bottom edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity (pixels per tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed run time in milliseconds.
    pub elapsed_ms: u64,
}

/// Axis-aligned bounding box centred on an entity's position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub center: Position,
    pub width: f64,
    pub height: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Copy of this position shifted by (dx, dy).
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Clamp into the playfield rectangle.
    pub fn clamped_to_playfield(&self) -> Self {
        Self {
            x: self.x.clamp(0.0, PLAYFIELD_WIDTH),
            y: self.y.clamp(0.0, PLAYFIELD_HEIGHT),
        }
    }

    /// Whether the point lies on or inside the playfield edges.
    pub fn inside_playfield(&self) -> bool {
        (0.0..=PLAYFIELD_WIDTH).contains(&self.x) && (0.0..=PLAYFIELD_HEIGHT).contains(&self.y)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Speed magnitude (pixels per tick).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_ms += TICK_INTERVAL_MS;
    }
}

impl Hitbox {
    pub fn new(center: Position, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Collision box for a sprite centred at `center`. Aircraft only collide
    /// with part of their sprite height.
    pub fn of_sprite(sprite: SpriteKind, center: Position) -> Self {
        let (width, height) = sprite.size();
        let height = if sprite.is_aircraft() {
            height * AIRCRAFT_HITBOX_HEIGHT_FACTOR
        } else {
            height
        };
        Self::new(center, width, height)
    }

    /// Strict overlap test. Symmetric: `a.overlaps(&b) == b.overlaps(&a)`.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        let dx = (self.center.x - other.center.x).abs();
        let dy = (self.center.y - other.center.y).abs();
        dx < (self.width + other.width) / 2.0 && dy < (self.height + other.height) / 2.0
    }
}
