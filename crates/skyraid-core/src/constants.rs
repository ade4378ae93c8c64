//! Simulation constants and tuning parameters.
//!
//! Per-difficulty numbers live in [`crate::profile`]; everything here is
//! shared by all modes.

/// Fixed duration of one tick in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 40;

/// Ticks per second at the fixed interval.
pub const TICK_RATE: u32 = (1000 / TICK_INTERVAL_MS) as u32;

// --- Playfield ---

/// Playfield width in pixels.
pub const PLAYFIELD_WIDTH: f64 = 512.0;

/// Playfield height in pixels.
pub const PLAYFIELD_HEIGHT: f64 = 768.0;

/// Enemies spawn in the top band of this fraction of the playfield height.
pub const SPAWN_BAND_FRACTION: f64 = 0.05;

// --- Sprite footprints (width, height) ---

pub const HERO_SIZE: (f64, f64) = (100.0, 84.0);
pub const MOB_SIZE: (f64, f64) = (60.0, 44.0);
pub const ELITE_SIZE: (f64, f64) = (70.0, 56.0);
pub const ELITE_PLUS_SIZE: (f64, f64) = (80.0, 64.0);
pub const BOSS_SIZE: (f64, f64) = (180.0, 120.0);
pub const HERO_BULLET_SIZE: (f64, f64) = (10.0, 24.0);
pub const ENEMY_BULLET_SIZE: (f64, f64) = (12.0, 12.0);
pub const PICKUP_SIZE: (f64, f64) = (36.0, 36.0);

/// Aircraft collide with this fraction of their sprite height.
pub const AIRCRAFT_HITBOX_HEIGHT_FACTOR: f64 = 0.5;

// --- Hero ---

pub const HERO_INITIAL_HP: i32 = 1000;

/// Damage of the hero's default and boosted bullets.
pub const HERO_BULLET_DAMAGE: i32 = 30;

/// How long a fire or super-fire pickup overrides the hero pattern.
pub const PATTERN_BOOST_DURATION_MS: u64 = 3000;

/// HP restored by a heal pickup (capped at max HP).
pub const HEAL_AMOUNT: i32 = 100;

// --- Firing patterns ---

/// Lateral spacing between parallel straight shots.
pub const STRAIGHT_SPACING: f64 = 10.0;

/// Forward spawn offset of a straight or scatter shot.
pub const MUZZLE_OFFSET: f64 = 2.0;

/// Forward speed added on top of the shooter's own vertical speed.
pub const BULLET_FORWARD_SPEED: f64 = 5.0;

/// Lateral offset and speed of the outer scatter shots.
pub const SCATTER_OFFSET: f64 = 10.0;
pub const SCATTER_LATERAL_SPEED: f64 = 3.0;

/// Radial burst parameters (boss and super-fire).
pub const CIRCLE_SHOT_COUNT: u32 = 20;
pub const CIRCLE_SHOT_SPEED: f64 = 6.0;

// --- Enemies ---

/// Period between enemy volleys.
pub const ENEMY_FIRE_PERIOD_MS: u64 = 600;

/// Every this many spawn cycles, an elite-plus roll happens.
pub const ELITE_PLUS_CYCLE_PERIOD: u32 = 5;

/// Probability that the elite-plus roll spawns one.
pub const ELITE_PLUS_SPAWN_CHANCE: f64 = 0.5;

/// Elite lateral speed is drawn from [-ELITE_DRIFT, ELITE_DRIFT).
pub const ELITE_DRIFT: f64 = 2.0;

/// Elite-plus lateral speed is drawn from [-ELITE_PLUS_DRIFT, ELITE_PLUS_DRIFT).
pub const ELITE_PLUS_DRIFT: f64 = 3.0;

/// Boss hover speed along x.
pub const BOSS_SPEED: f64 = 5.0;

// --- Pickups ---

/// Falling speed of dropped pickups.
pub const PICKUP_FALL_SPEED: f64 = 5.0;

/// Horizontal offset of the outer boss drops.
pub const BOSS_DROP_SPREAD: f64 = 50.0;
