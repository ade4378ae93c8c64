//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Aircraft variant. Per-variant behavior (score, drops, pattern) is looked up
/// from the sim's class policy table, never from type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftKind {
    Hero,
    Mob,
    Elite,
    ElitePlus,
    Boss,
}

/// Which side a projectile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Pickup kinds dropped by destroyed enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Restores HP up to the hero's max.
    Heal,
    /// Temporary scatter pattern.
    Fire,
    /// Temporary radial pattern.
    SuperFire,
    /// Clears all non-boss enemies and enemy projectiles.
    Bomb,
}

/// Launch direction along the vertical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    /// Toward the top of the playfield (hero).
    #[default]
    Up,
    /// Toward the bottom of the playfield (enemies).
    Down,
}

/// Named difficulty mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Current phase of the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    GameOver,
}

/// Sprite identity handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Hero,
    Mob,
    Elite,
    ElitePlus,
    Boss,
    HeroBullet,
    EnemyBullet,
    PickupHeal,
    PickupFire,
    PickupSuperFire,
    PickupBomb,
}

impl AircraftKind {
    /// The side this aircraft fights for. Only the hero is on the player side.
    pub fn side(self) -> Side {
        match self {
            AircraftKind::Hero => Side::Player,
            _ => Side::Enemy,
        }
    }

    pub fn sprite(self) -> SpriteKind {
        match self {
            AircraftKind::Hero => SpriteKind::Hero,
            AircraftKind::Mob => SpriteKind::Mob,
            AircraftKind::Elite => SpriteKind::Elite,
            AircraftKind::ElitePlus => SpriteKind::ElitePlus,
            AircraftKind::Boss => SpriteKind::Boss,
        }
    }
}

impl Side {
    pub fn bullet_sprite(self) -> SpriteKind {
        match self {
            Side::Player => SpriteKind::HeroBullet,
            Side::Enemy => SpriteKind::EnemyBullet,
        }
    }
}

impl PickupKind {
    pub fn sprite(self) -> SpriteKind {
        match self {
            PickupKind::Heal => SpriteKind::PickupHeal,
            PickupKind::Fire => SpriteKind::PickupFire,
            PickupKind::SuperFire => SpriteKind::PickupSuperFire,
            PickupKind::Bomb => SpriteKind::PickupBomb,
        }
    }
}

impl Heading {
    /// -1 for up, +1 for down (y grows downward).
    pub fn sign(self) -> f64 {
        match self {
            Heading::Up => -1.0,
            Heading::Down => 1.0,
        }
    }
}

impl Difficulty {
    /// Lowercase label used for score files and logs.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a label as produced by [`Difficulty::label`].
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl SpriteKind {
    /// Sprite footprint (width, height) in pixels.
    pub fn size(self) -> (f64, f64) {
        match self {
            SpriteKind::Hero => HERO_SIZE,
            SpriteKind::Mob => MOB_SIZE,
            SpriteKind::Elite => ELITE_SIZE,
            SpriteKind::ElitePlus => ELITE_PLUS_SIZE,
            SpriteKind::Boss => BOSS_SIZE,
            SpriteKind::HeroBullet => HERO_BULLET_SIZE,
            SpriteKind::EnemyBullet => ENEMY_BULLET_SIZE,
            SpriteKind::PickupHeal
            | SpriteKind::PickupFire
            | SpriteKind::PickupSuperFire
            | SpriteKind::PickupBomb => PICKUP_SIZE,
        }
    }

    pub fn is_aircraft(self) -> bool {
        matches!(
            self,
            SpriteKind::Hero
                | SpriteKind::Mob
                | SpriteKind::Elite
                | SpriteKind::ElitePlus
                | SpriteKind::Boss
        )
    }
}
