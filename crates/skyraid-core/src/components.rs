//! Components attached to enemies, projectiles and pickups in the hecs world.
//!
//! Plain data only. Behavior lives in the sim crate's systems.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::pattern::FiringPattern;

/// Which sprite the entity is drawn with. Also fixes its collision footprint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
}

/// Validity flag. An entity with `alive == false` is never moved, never
/// collides, and is despawned by the post-tick sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Validity {
    pub alive: bool,
}

/// Aircraft hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hitpoints {
    pub current: i32,
    pub max: i32,
}

/// Firing pattern slot. `None` is a wiring defect, distinct from
/// `Some(FiringPattern::None)` which is a craft that never shoots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Armament {
    pub pattern: Option<FiringPattern>,
}

/// Marks a computer-controlled aircraft.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyCraft {
    pub kind: AircraftKind,
}

/// A bullet in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub side: Side,
    pub damage: i32,
}

/// A collectible power-up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
}

/// Monotonic spawn order. Collision resolution iterates in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpawnSeq(pub u64);
