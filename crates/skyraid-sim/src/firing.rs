//! Firing-pattern engine.
//!
//! Each pattern is a pure transform of the shooter's position and velocity
//! into a list of shots. Side ownership comes from the shooter's kind, never
//! from the pattern.

use glam::DVec2;

use skyraid_core::constants::*;
use skyraid_core::enums::{AircraftKind, Side};
use skyraid_core::error::SimError;
use skyraid_core::pattern::FiringPattern;
use skyraid_core::types::{Position, Velocity};

/// A projectile about to be spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub side: Side,
    pub position: Position,
    pub velocity: Velocity,
    pub damage: i32,
}

/// Fire an aircraft's assigned pattern.
///
/// An aircraft without a pattern is a wiring defect and is reported to the
/// caller. A pattern that produces nothing (`None`, zero count) is not.
pub fn fire_aircraft(
    kind: AircraftKind,
    pattern: Option<&FiringPattern>,
    position: Position,
    velocity: Velocity,
) -> Result<Vec<Shot>, SimError> {
    let pattern = pattern.ok_or(SimError::MissingFiringPattern { kind })?;
    Ok(fire(pattern, kind.side(), position, velocity))
}

/// Produce the shots for one volley of `pattern`.
pub fn fire(
    pattern: &FiringPattern,
    side: Side,
    position: Position,
    velocity: Velocity,
) -> Vec<Shot> {
    match *pattern {
        FiringPattern::None => Vec::new(),
        FiringPattern::Straight {
            count,
            damage,
            heading,
        } => {
            let sign = heading.sign();
            let n = count as f64;
            (0..count)
                .map(|i| Shot {
                    side,
                    position: position.offset(
                        (2.0 * i as f64 - n + 1.0) * STRAIGHT_SPACING,
                        sign * MUZZLE_OFFSET,
                    ),
                    velocity: Velocity::new(0.0, velocity.y + sign * BULLET_FORWARD_SPEED),
                    damage,
                })
                .collect()
        }
        FiringPattern::Scatter { damage, heading } => {
            let sign = heading.sign();
            let forward = velocity.y + sign * BULLET_FORWARD_SPEED;
            [-1.0, 0.0, 1.0]
                .into_iter()
                .map(|lane: f64| Shot {
                    side,
                    position: position.offset(lane * SCATTER_OFFSET, sign * MUZZLE_OFFSET),
                    velocity: Velocity::new(lane * SCATTER_LATERAL_SPEED, forward),
                    damage,
                })
                .collect()
        }
        FiringPattern::Circle {
            count,
            damage,
            speed,
        } => {
            if count == 0 {
                return Vec::new();
            }
            let step = std::f64::consts::TAU / count as f64;
            (0..count)
                .map(|i| {
                    let v = DVec2::from_angle(i as f64 * step) * speed;
                    Shot {
                        side,
                        position,
                        velocity: Velocity::new(v.x, v.y),
                        damage,
                    }
                })
                .collect()
        }
    }
}
