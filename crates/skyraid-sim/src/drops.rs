//! Pickup drop rolls.

use skyraid_core::enums::{AircraftKind, PickupKind};

use crate::policy::{class_policy, DropTable};

/// A pickup to spawn, offset horizontally from the destroyed aircraft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drop {
    pub kind: PickupKind,
    pub dx: f64,
}

/// Map one uniform draw in `[0, 1)` to the drops for `kind`.
///
/// Weighted tables always yield exactly one pickup; a draw at or past the
/// cumulative total falls back to the last entry. Fixed tables ignore the draw.
pub fn roll(kind: AircraftKind, draw: f64) -> Vec<Drop> {
    match class_policy(kind).drops {
        DropTable::Nothing => Vec::new(),
        DropTable::Weighted(table) => {
            let mut cumulative = 0.0;
            for &(kind, weight) in table {
                cumulative += weight;
                if draw < cumulative {
                    return vec![Drop { kind, dx: 0.0 }];
                }
            }
            table
                .last()
                .map(|&(kind, _)| vec![Drop { kind, dx: 0.0 }])
                .unwrap_or_default()
        }
        DropTable::Fixed(table) => table
            .iter()
            .map(|&(kind, dx)| Drop { kind, dx })
            .collect(),
    }
}
