//! Collision and resolution system.
//!
//! Runs four passes in a fixed order, each iterating in spawn order:
//! 1. enemy projectiles against the hero
//! 2. hero projectiles against enemy aircraft
//! 3. the hero against pickups
//! 4. the hero against enemy bodies
//!
//! Expiry is a flag flip; nothing is despawned here, so handles collected at
//! the start of a pass stay valid for the whole pass.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::components::*;
use skyraid_core::enums::{AircraftKind, PickupKind, Side};
use skyraid_core::events::SimEvent;
use skyraid_core::pattern::FiringPattern;
use skyraid_core::types::{Hitbox, Position};

use crate::damage;
use crate::drops;
use crate::hero::Hero;
use crate::policy::class_policy;
use crate::run_state::RunState;
use crate::timers::TimerQueue;
use crate::world_setup;

/// Everything collision resolution may touch besides the world and the hero.
pub struct Resolution<'a> {
    pub run: &'a mut RunState,
    pub rng: &'a mut ChaCha8Rng,
    pub next_seq: &'a mut u64,
    pub timers: &'a mut TimerQueue,
    pub events: &'a mut Vec<SimEvent>,
}

struct Body {
    entity: Entity,
    hitbox: Hitbox,
}

struct Bullet {
    entity: Entity,
    hitbox: Hitbox,
    side: Side,
    damage: i32,
}

/// Run all four passes. Stops early once the hero is destroyed.
pub fn run(world: &mut World, hero: &mut Hero, ctx: &mut Resolution) {
    if !hero.is_alive() {
        return;
    }
    let bullets = live_bullets(world);

    if enemy_fire_on_hero(world, hero, &bullets) {
        return;
    }
    hero_fire_on_enemies(world, &bullets, ctx);
    hero_collects_pickups(world, hero, ctx);
    body_collisions(world, hero);
}

fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get::<&Validity>(entity)
        .map(|validity| validity.alive)
        .unwrap_or(false)
}

fn expire(world: &World, entity: Entity) {
    if let Ok(mut validity) = world.get::<&mut Validity>(entity) {
        validity.alive = false;
    }
}

fn sorted_by_seq<T>(mut items: Vec<(SpawnSeq, T)>) -> Vec<T> {
    items.sort_by_key(|(seq, _)| *seq);
    items.into_iter().map(|(_, item)| item).collect()
}

fn live_bullets(world: &World) -> Vec<Bullet> {
    let items = world
        .query::<(&Projectile, &Sprite, &Position, &Validity, &SpawnSeq)>()
        .iter()
        .filter(|(_, (_, _, _, validity, _))| validity.alive)
        .map(|(entity, (projectile, sprite, pos, _, seq))| {
            (
                *seq,
                Bullet {
                    entity,
                    hitbox: Hitbox::of_sprite(sprite.kind, *pos),
                    side: projectile.side,
                    damage: projectile.damage,
                },
            )
        })
        .collect();
    sorted_by_seq(items)
}

fn live_enemies(world: &World) -> Vec<Body> {
    let items = world
        .query::<(&EnemyCraft, &Sprite, &Position, &Validity, &SpawnSeq)>()
        .iter()
        .filter(|(_, (_, _, _, validity, _))| validity.alive)
        .map(|(entity, (_, sprite, pos, _, seq))| {
            (
                *seq,
                Body {
                    entity,
                    hitbox: Hitbox::of_sprite(sprite.kind, *pos),
                },
            )
        })
        .collect();
    sorted_by_seq(items)
}

fn live_pickups(world: &World) -> Vec<(Body, PickupKind)> {
    let items = world
        .query::<(&Pickup, &Sprite, &Position, &Validity, &SpawnSeq)>()
        .iter()
        .filter(|(_, (_, _, _, validity, _))| validity.alive)
        .map(|(entity, (pickup, sprite, pos, _, seq))| {
            (
                *seq,
                (
                    Body {
                        entity,
                        hitbox: Hitbox::of_sprite(sprite.kind, *pos),
                    },
                    pickup.kind,
                ),
            )
        })
        .collect();
    sorted_by_seq(items)
}

/// Pass 1. Returns true if the hero was destroyed.
fn enemy_fire_on_hero(world: &World, hero: &mut Hero, bullets: &[Bullet]) -> bool {
    let hero_box = hero.hitbox();
    for bullet in bullets.iter().filter(|b| b.side == Side::Enemy) {
        if !hero_box.overlaps(&bullet.hitbox) {
            continue;
        }
        expire(world, bullet.entity);
        if hero.take_damage(bullet.damage) {
            return true;
        }
    }
    false
}

/// Pass 2. Each hero bullet hits at most the first overlapping live enemy.
fn hero_fire_on_enemies(world: &mut World, bullets: &[Bullet], ctx: &mut Resolution) {
    let enemies = live_enemies(world);

    for bullet in bullets.iter().filter(|b| b.side == Side::Player) {
        if !is_alive(world, bullet.entity) {
            continue;
        }
        let Some(target) = enemies
            .iter()
            .find(|enemy| is_alive(world, enemy.entity) && enemy.hitbox.overlaps(&bullet.hitbox))
        else {
            continue;
        };
        expire(world, bullet.entity);

        let destroyed = match world.query_one_mut::<(&mut Hitpoints, &mut Validity)>(target.entity)
        {
            Ok((hp, validity)) => damage::take_damage(hp, validity, bullet.damage),
            Err(_) => false,
        };
        if destroyed {
            enemy_destroyed(world, target.entity, ctx);
        }
    }
}

/// Score, notify and drop pickups for an enemy shot down by the hero.
fn enemy_destroyed(world: &mut World, entity: Entity, ctx: &mut Resolution) {
    let (kind, position) = match world.query_one_mut::<(&EnemyCraft, &Position)>(entity) {
        Ok((craft, pos)) => (craft.kind, *pos),
        Err(_) => return,
    };
    let score = class_policy(kind).score;
    ctx.run.add_score(score);
    ctx.events.push(SimEvent::EnemyDestroyed { kind, score });

    if kind == AircraftKind::Boss {
        tracing::info!(
            appearance = ctx.run.boss_appearances,
            score = ctx.run.score,
            "boss destroyed"
        );
        ctx.events.push(SimEvent::BossDestroyed {
            appearance: ctx.run.boss_appearances,
        });
    }

    let draw: f64 = ctx.rng.gen();
    for drop in drops::roll(kind, draw) {
        world_setup::spawn_pickup(
            world,
            ctx.next_seq,
            drop.kind,
            position.offset(drop.dx, 0.0),
        );
    }
}

/// Pass 3.
fn hero_collects_pickups(world: &mut World, hero: &mut Hero, ctx: &mut Resolution) {
    let hero_box = hero.hitbox();
    for (body, kind) in live_pickups(world) {
        if !hero_box.overlaps(&body.hitbox) {
            continue;
        }
        expire(world, body.entity);
        ctx.events.push(SimEvent::PickupCollected { kind });

        let now_ms = ctx.run.time.elapsed_ms;
        match kind {
            PickupKind::Heal => hero.heal_pickup(),
            PickupKind::Fire => hero.boost_pattern(
                FiringPattern::hero_scatter(),
                ctx.timers,
                ctx.run.run_id,
                now_ms,
            ),
            PickupKind::SuperFire => hero.boost_pattern(
                FiringPattern::hero_circle(),
                ctx.timers,
                ctx.run.run_id,
                now_ms,
            ),
            PickupKind::Bomb => detonate_bomb(world, ctx),
        }
    }
}

/// Expire every live non-boss enemy and every live enemy projectile.
/// Scores the destroyed aircraft; bomb kills drop nothing.
pub fn detonate_bomb(world: &mut World, ctx: &mut Resolution) {
    let mut destroyed = 0u32;
    let mut score = 0u32;
    for (_entity, (craft, validity)) in world.query_mut::<(&EnemyCraft, &mut Validity)>() {
        if validity.alive && craft.kind != AircraftKind::Boss {
            validity.alive = false;
            destroyed += 1;
            score += class_policy(craft.kind).score;
        }
    }
    for (_entity, (projectile, validity)) in world.query_mut::<(&Projectile, &mut Validity)>() {
        if validity.alive && projectile.side == Side::Enemy {
            validity.alive = false;
        }
    }

    ctx.run.add_score(score);
    tracing::debug!(destroyed, score, "bomb activated");
    ctx.events.push(SimEvent::BombActivated {
        enemies_destroyed: destroyed,
        score,
    });
}

/// Pass 4. Any overlap with an enemy body is fatal to both.
fn body_collisions(world: &World, hero: &mut Hero) {
    let hero_box = hero.hitbox();
    for enemy in live_enemies(world) {
        if hero_box.overlaps(&enemy.hitbox) {
            expire(world, enemy.entity);
            hero.destroy();
            return;
        }
    }
}
