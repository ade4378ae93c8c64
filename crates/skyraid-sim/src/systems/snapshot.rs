//! Snapshot system: queries the ECS world and builds a GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use skyraid_core::components::*;
use skyraid_core::enums::{Difficulty, GamePhase};
use skyraid_core::events::{GameOverReport, SimEvent};
use skyraid_core::state::{EntityView, GameStateSnapshot};
use skyraid_core::types::{Position, SimTime};

use crate::hero::Hero;

/// Inputs to a snapshot that live outside the world.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub score: u32,
    pub hero: Option<&'a Hero>,
    pub terminal: bool,
    pub game_over: Option<GameOverReport>,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        difficulty: ctx.difficulty,
        score: ctx.score,
        hero: ctx.hero.map(Hero::view),
        enemies: build_views::<EnemyCraft>(world),
        projectiles: build_views::<Projectile>(world),
        pickups: build_views::<Pickup>(world),
        events,
        terminal: ctx.terminal,
        game_over: ctx.game_over,
    }
}

/// Views of every live entity tagged with component `T`, sorted by id.
fn build_views<T: hecs::Component>(world: &World) -> Vec<EntityView> {
    let mut views: Vec<EntityView> = world
        .query::<(
            &T,
            &Sprite,
            &Position,
            &Validity,
            &SpawnSeq,
            Option<&Hitpoints>,
        )>()
        .iter()
        .filter(|(_, (_, _, _, validity, _, _))| validity.alive)
        .map(|(_, (_, sprite, pos, _, seq, hp))| {
            let (width, height) = sprite.kind.size();
            EntityView {
                id: seq.0,
                sprite: sprite.kind,
                position: *pos,
                width,
                height,
                hp: hp.map(|hp| hp.current),
            }
        })
        .collect();
    views.sort_by_key(|view| view.id);
    views
}
