//! Cleanup system: despawns every entity whose validity flag is down.

use hecs::{Entity, World};

use skyraid_core::components::Validity;

use crate::run_state::RunState;
use crate::systems::spawner;

/// Remove expired entities, then clear the boss flag if no boss survived.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, run: &mut RunState, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, validity) in world.query_mut::<&Validity>() {
        if !validity.alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    if run.boss_exists && !spawner::boss_alive(world) {
        run.boss_exists = false;
    }
}
