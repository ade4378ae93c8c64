//! Kinematic integration system.
//!
//! Updates Position from Velocity once per tick (velocities are per tick) and
//! applies the playfield edge rules.

use hecs::World;

use skyraid_core::components::{Projectile, Validity};
use skyraid_core::constants::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use skyraid_core::types::{Position, Velocity};

/// What happens at the playfield edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRule {
    /// Aircraft and pickups: bounce off the side walls, expire past the bottom.
    Bounce,
    /// Projectiles: expire on leaving the playfield in any direction.
    Leave,
}

/// Advance one entity by one tick. Expired entities do not move.
pub fn advance(pos: &mut Position, vel: &mut Velocity, validity: &mut Validity, rule: EdgeRule) {
    if !validity.alive {
        return;
    }
    pos.x += vel.x;
    pos.y += vel.y;

    match rule {
        EdgeRule::Bounce => {
            if pos.x <= 0.0 || pos.x >= PLAYFIELD_WIDTH {
                vel.x = -vel.x;
            }
            if pos.y >= PLAYFIELD_HEIGHT {
                validity.alive = false;
            }
        }
        EdgeRule::Leave => {
            if !pos.inside_playfield() {
                validity.alive = false;
            }
        }
    }
}

/// Run kinematic integration for every entity with Position + Velocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel, validity, projectile)) in world.query_mut::<(
        &mut Position,
        &mut Velocity,
        &mut Validity,
        Option<&Projectile>,
    )>() {
        let rule = if projectile.is_some() {
            EdgeRule::Leave
        } else {
            EdgeRule::Bounce
        };
        advance(pos, vel, validity, rule);
    }
}
