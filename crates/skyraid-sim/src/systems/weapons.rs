//! Weapon fire system: hero and enemy volleys on their own fire timers.

use hecs::World;

use skyraid_core::components::{Armament, EnemyCraft, SpawnSeq, Validity};
use skyraid_core::constants::{ENEMY_FIRE_PERIOD_MS, TICK_INTERVAL_MS};
use skyraid_core::enums::AircraftKind;
use skyraid_core::error::SimError;
use skyraid_core::profile::DifficultyProfile;
use skyraid_core::types::{Position, Velocity};

use crate::firing::{self, Shot};
use crate::hero::Hero;
use crate::run_state::RunState;
use crate::world_setup;

/// Advance both fire timers and spawn any volleys that come due.
///
/// Every pattern is resolved before anything changes, so a failure leaves the
/// timers and the world untouched.
pub fn run(
    world: &mut World,
    next_seq: &mut u64,
    run: &mut RunState,
    hero: &Hero,
    profile: &DifficultyProfile,
) -> Result<(), SimError> {
    let (hero_timer, hero_due) = tick_timer(run.hero_fire_timer_ms, profile.hero_fire_period_ms);
    let (enemy_timer, enemy_due) = tick_timer(run.enemy_fire_timer_ms, ENEMY_FIRE_PERIOD_MS);

    let mut shots = Vec::new();
    if hero_due && hero.is_alive() {
        shots.extend(firing::fire_aircraft(
            AircraftKind::Hero,
            Some(hero.pattern()),
            hero.position,
            hero.velocity(),
        )?);
    }
    if enemy_due {
        shots.extend(enemy_volley(world)?);
    }

    run.hero_fire_timer_ms = hero_timer;
    run.enemy_fire_timer_ms = enemy_timer;
    for shot in &shots {
        world_setup::spawn_projectile(world, next_seq, shot);
    }
    Ok(())
}

/// Timer value after one tick, and whether the period elapsed.
fn tick_timer(timer_ms: u64, period_ms: u64) -> (u64, bool) {
    let timer_ms = timer_ms + TICK_INTERVAL_MS;
    if timer_ms >= period_ms {
        (timer_ms % period_ms, true)
    } else {
        (timer_ms, false)
    }
}

/// Every live enemy fires its pattern, in spawn order.
fn enemy_volley(world: &World) -> Result<Vec<Shot>, SimError> {
    let mut shooters: Vec<_> = world
        .query::<(
            &EnemyCraft,
            &Armament,
            &Position,
            &Velocity,
            &Validity,
            &SpawnSeq,
        )>()
        .iter()
        .filter(|(_, (_, _, _, _, validity, _))| validity.alive)
        .map(|(_, (craft, armament, pos, vel, _, seq))| {
            (*seq, craft.kind, armament.pattern, *pos, *vel)
        })
        .collect();
    shooters.sort_by_key(|shooter| shooter.0);

    let mut shots = Vec::new();
    for (_, kind, pattern, pos, vel) in shooters {
        shots.extend(firing::fire_aircraft(kind, pattern.as_ref(), pos, vel)?);
    }
    Ok(shots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyraid_core::components::Projectile;
    use skyraid_core::enums::Side;

    fn projectile_count(world: &World, side: Side) -> usize {
        world
            .query::<&Projectile>()
            .iter()
            .filter(|(_, p)| p.side == side)
            .count()
    }

    #[test]
    fn test_hero_fires_on_period() {
        let profile = DifficultyProfile::normal();
        let mut state = RunState::new(1, &profile);
        let mut world = World::new();
        let mut next_seq = 0;
        let hero = Hero::new();

        // 300 ms period: the 8th tick (320 ms) is the first volley.
        for _ in 0..7 {
            run(&mut world, &mut next_seq, &mut state, &hero, &profile).unwrap();
        }
        assert_eq!(projectile_count(&world, Side::Player), 0);
        run(&mut world, &mut next_seq, &mut state, &hero, &profile).unwrap();
        assert_eq!(projectile_count(&world, Side::Player), 1);
        assert_eq!(state.hero_fire_timer_ms, 20);
    }

    #[test]
    fn test_enemies_fire_their_patterns() {
        let profile = DifficultyProfile::easy();
        let mut state = RunState::new(1, &profile);
        let mut world = World::new();
        let mut next_seq = 0;
        let hero = Hero::new();

        world_setup::spawn_enemy_at(
            &mut world,
            &mut next_seq,
            AircraftKind::Mob,
            Position::new(100.0, 100.0),
            Velocity::default(),
            20,
        );
        world_setup::spawn_boss(&mut world, &mut next_seq, 500);

        // 600 ms = 15 ticks.
        for _ in 0..15 {
            run(&mut world, &mut next_seq, &mut state, &hero, &profile).unwrap();
        }
        assert_eq!(projectile_count(&world, Side::Enemy), 20);
    }

    #[test]
    fn test_unarmed_enemy_is_a_contract_violation() {
        let profile = DifficultyProfile::easy();
        let mut state = RunState::new(1, &profile);
        let mut world = World::new();
        let mut next_seq = 0;
        let hero = Hero::new();

        let elite = world_setup::spawn_enemy_at(
            &mut world,
            &mut next_seq,
            AircraftKind::Elite,
            Position::new(100.0, 100.0),
            Velocity::default(),
            60,
        );
        world.get::<&mut Armament>(elite).unwrap().pattern = None;

        // Both volleys due on the same tick.
        state.hero_fire_timer_ms = profile.hero_fire_period_ms - TICK_INTERVAL_MS;
        state.enemy_fire_timer_ms = ENEMY_FIRE_PERIOD_MS - TICK_INTERVAL_MS;
        let result = run(&mut world, &mut next_seq, &mut state, &hero, &profile);
        assert_eq!(
            result,
            Err(SimError::MissingFiringPattern {
                kind: AircraftKind::Elite
            })
        );

        // Nothing from the failed tick is applied.
        assert_eq!(projectile_count(&world, Side::Player), 0);
        assert_eq!(projectile_count(&world, Side::Enemy), 0);
        assert_eq!(
            state.hero_fire_timer_ms,
            profile.hero_fire_period_ms - TICK_INTERVAL_MS
        );
        assert_eq!(
            state.enemy_fire_timer_ms,
            ENEMY_FIRE_PERIOD_MS - TICK_INTERVAL_MS
        );
    }
}
