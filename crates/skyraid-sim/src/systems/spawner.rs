//! Spawn scheduler: boss appearances and the regular enemy cadence.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyraid_core::components::{EnemyCraft, Validity};
use skyraid_core::constants::{ELITE_PLUS_CYCLE_PERIOD, ELITE_PLUS_SPAWN_CHANCE, TICK_INTERVAL_MS};
use skyraid_core::enums::AircraftKind;
use skyraid_core::events::SimEvent;
use skyraid_core::profile::DifficultyProfile;

use crate::run_state::RunState;
use crate::world_setup;

/// Number of live enemy aircraft, boss included.
pub fn live_enemy_count(world: &World) -> u32 {
    world
        .query::<(&EnemyCraft, &Validity)>()
        .iter()
        .filter(|(_, (_, validity))| validity.alive)
        .count() as u32
}

pub fn boss_alive(world: &World) -> bool {
    world
        .query::<(&EnemyCraft, &Validity)>()
        .iter()
        .any(|(_, (craft, validity))| validity.alive && craft.kind == AircraftKind::Boss)
}

/// Run the scheduler for one tick.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_seq: &mut u64,
    run: &mut RunState,
    profile: &DifficultyProfile,
    events: &mut Vec<SimEvent>,
) {
    maybe_spawn_boss(world, next_seq, run, profile, events);

    run.cycle_timer_ms += TICK_INTERVAL_MS;
    let period = run.cycle_period_ms();
    if run.cycle_timer_ms < period {
        return;
    }
    run.cycle_timer_ms %= period;

    // Elite-plus roll every N cycles; the counter resets either way.
    run.elite_plus_counter += 1;
    if run.elite_plus_counter >= ELITE_PLUS_CYCLE_PERIOD {
        run.elite_plus_counter = 0;
        if rng.gen_bool(ELITE_PLUS_SPAWN_CHANCE) {
            spawn_class(world, rng, next_seq, run, AircraftKind::ElitePlus);
        }
    }

    if live_enemy_count(world) < run.max_enemies {
        let kind = if rng.gen::<f64>() < run.elite_probability {
            AircraftKind::Elite
        } else {
            AircraftKind::Mob
        };
        spawn_class(world, rng, next_seq, run, kind);
    }
}

fn spawn_class(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_seq: &mut u64,
    run: &RunState,
    kind: AircraftKind,
) {
    let Some(baseline) = run.baseline(kind) else {
        return;
    };
    world_setup::spawn_enemy(
        world,
        rng,
        next_seq,
        kind,
        baseline.hp.round() as i32,
        baseline.speed,
    );
}

/// Spawn one boss when the score has advanced far enough since the last one
/// and none is alive.
fn maybe_spawn_boss(
    world: &mut World,
    next_seq: &mut u64,
    run: &mut RunState,
    profile: &DifficultyProfile,
    events: &mut Vec<SimEvent>,
) {
    let Some(policy) = profile.boss.as_ref() else {
        return;
    };
    if run.boss_exists || run.score.saturating_sub(run.last_boss_score) < policy.score_threshold {
        return;
    }
    if boss_alive(world) {
        return;
    }

    run.boss_appearances += 1;
    let hp = profile
        .boss_hp(run.boss_appearances)
        .unwrap_or(policy.initial_hp);
    world_setup::spawn_boss(world, next_seq, hp);
    run.last_boss_score = run.score;
    run.boss_exists = true;

    tracing::info!(
        appearance = run.boss_appearances,
        hp,
        score = run.score,
        "boss appeared"
    );
    events.push(SimEvent::BossAppeared {
        appearance: run.boss_appearances,
        hp,
    });
}
