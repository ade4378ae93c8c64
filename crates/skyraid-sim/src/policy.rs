//! Per-class behavior table: score value, drop table and firing pattern for
//! every aircraft kind.

use skyraid_core::constants::{BOSS_DROP_SPREAD, CIRCLE_SHOT_COUNT, CIRCLE_SHOT_SPEED};
use skyraid_core::enums::{AircraftKind, Heading, PickupKind};
use skyraid_core::pattern::FiringPattern;

/// What a destroyed aircraft leaves behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropTable {
    /// Nothing.
    Nothing,
    /// Exactly one pickup picked by a uniform draw. Weights sum to 1.
    Weighted(&'static [(PickupKind, f64)]),
    /// Every listed pickup, each at a fixed horizontal offset.
    Fixed(&'static [(PickupKind, f64)]),
}

/// Behavior of one aircraft class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassPolicy {
    pub score: u32,
    pub drops: DropTable,
    pub pattern: FiringPattern,
}

const ELITE_DROPS: &[(PickupKind, f64)] = &[
    (PickupKind::Heal, 0.30),
    (PickupKind::Fire, 0.30),
    (PickupKind::Bomb, 0.25),
    (PickupKind::SuperFire, 0.15),
];

const ELITE_PLUS_DROPS: &[(PickupKind, f64)] = &[
    (PickupKind::Heal, 0.25),
    (PickupKind::Fire, 0.25),
    (PickupKind::Bomb, 0.25),
    (PickupKind::SuperFire, 0.25),
];

const BOSS_DROPS: &[(PickupKind, f64)] = &[
    (PickupKind::Heal, -BOSS_DROP_SPREAD),
    (PickupKind::Bomb, 0.0),
    (PickupKind::SuperFire, BOSS_DROP_SPREAD),
];

/// Look up the policy for an aircraft kind.
pub fn class_policy(kind: AircraftKind) -> ClassPolicy {
    match kind {
        AircraftKind::Hero => ClassPolicy {
            score: 0,
            drops: DropTable::Nothing,
            pattern: FiringPattern::hero_default(),
        },
        AircraftKind::Mob => ClassPolicy {
            score: 10,
            drops: DropTable::Nothing,
            pattern: FiringPattern::None,
        },
        AircraftKind::Elite => ClassPolicy {
            score: 50,
            drops: DropTable::Weighted(ELITE_DROPS),
            pattern: FiringPattern::Straight {
                count: 1,
                damage: 20,
                heading: Heading::Down,
            },
        },
        AircraftKind::ElitePlus => ClassPolicy {
            score: 100,
            drops: DropTable::Weighted(ELITE_PLUS_DROPS),
            pattern: FiringPattern::Scatter {
                damage: 30,
                heading: Heading::Down,
            },
        },
        AircraftKind::Boss => ClassPolicy {
            score: 300,
            drops: DropTable::Fixed(BOSS_DROPS),
            pattern: FiringPattern::Circle {
                count: CIRCLE_SHOT_COUNT,
                damage: 30,
                speed: CIRCLE_SHOT_SPEED,
            },
        },
    }
}
