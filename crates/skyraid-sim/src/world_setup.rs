//! Entity spawn factories.
//!
//! Every entity gets a `SpawnSeq` from the engine's counter so systems can
//! iterate in creation order.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::components::*;
use skyraid_core::constants::*;
use skyraid_core::enums::{AircraftKind, PickupKind};
use skyraid_core::types::{Position, Velocity};

use crate::firing::Shot;
use crate::policy::class_policy;

fn take_seq(next_seq: &mut u64) -> SpawnSeq {
    let seq = SpawnSeq(*next_seq);
    *next_seq += 1;
    seq
}

/// Spawn an enemy aircraft with an explicit position and velocity.
pub fn spawn_enemy_at(
    world: &mut World,
    next_seq: &mut u64,
    kind: AircraftKind,
    position: Position,
    velocity: Velocity,
    hp: i32,
) -> Entity {
    let hp = hp.max(1);
    world.spawn((
        EnemyCraft { kind },
        Sprite {
            kind: kind.sprite(),
        },
        position,
        velocity,
        Hitpoints {
            current: hp,
            max: hp,
        },
        Validity { alive: true },
        Armament {
            pattern: Some(class_policy(kind).pattern),
        },
        take_seq(next_seq),
    ))
}

/// Random spawn point in the top band, with the whole sprite inside the
/// horizontal bounds.
pub fn random_spawn_position(rng: &mut ChaCha8Rng, kind: AircraftKind) -> Position {
    let half_width = kind.sprite().size().0 / 2.0;
    let x = if half_width * 2.0 >= PLAYFIELD_WIDTH {
        PLAYFIELD_WIDTH / 2.0
    } else {
        rng.gen_range(half_width..=PLAYFIELD_WIDTH - half_width)
    };
    let y = rng.gen_range(0.0..PLAYFIELD_HEIGHT * SPAWN_BAND_FRACTION);
    Position::new(x, y)
}

/// Spawn a regular enemy (mob, elite or elite-plus) at a random position.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_seq: &mut u64,
    kind: AircraftKind,
    hp: i32,
    speed: f64,
) -> Entity {
    let position = random_spawn_position(rng, kind);
    let drift = match kind {
        AircraftKind::Elite => rng.gen_range(-ELITE_DRIFT..ELITE_DRIFT),
        AircraftKind::ElitePlus => rng.gen_range(-ELITE_PLUS_DRIFT..ELITE_PLUS_DRIFT),
        _ => 0.0,
    };
    spawn_enemy_at(
        world,
        next_seq,
        kind,
        position,
        Velocity::new(drift, speed),
        hp,
    )
}

/// Spawn the boss, hovering at the top centre.
pub fn spawn_boss(world: &mut World, next_seq: &mut u64, hp: i32) -> Entity {
    spawn_enemy_at(
        world,
        next_seq,
        AircraftKind::Boss,
        Position::new(PLAYFIELD_WIDTH / 2.0, BOSS_SIZE.1),
        Velocity::new(BOSS_SPEED, 0.0),
        hp,
    )
}

pub fn spawn_projectile(world: &mut World, next_seq: &mut u64, shot: &Shot) -> Entity {
    world.spawn((
        Projectile {
            side: shot.side,
            damage: shot.damage,
        },
        Sprite {
            kind: shot.side.bullet_sprite(),
        },
        shot.position,
        shot.velocity,
        Validity { alive: true },
        take_seq(next_seq),
    ))
}

pub fn spawn_pickup(
    world: &mut World,
    next_seq: &mut u64,
    kind: PickupKind,
    position: Position,
) -> Entity {
    world.spawn((
        Pickup { kind },
        Sprite {
            kind: kind.sprite(),
        },
        position,
        Velocity::new(0.0, PICKUP_FALL_SPEED),
        Validity { alive: true },
        take_seq(next_seq),
    ))
}
