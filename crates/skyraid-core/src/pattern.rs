//! Firing pattern definitions.
//!
//! A pattern is plain data. The sim's firing module turns it into shots;
//! swapping a craft's pattern is just replacing this value.

use serde::{Deserialize, Serialize};

use crate::constants::{CIRCLE_SHOT_COUNT, CIRCLE_SHOT_SPEED, HERO_BULLET_DAMAGE};
use crate::enums::Heading;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FiringPattern {
    /// Never fires.
    None,
    /// `count` parallel shots spaced along the lateral axis.
    Straight {
        count: u32,
        damage: i32,
        heading: Heading,
    },
    /// Fixed three-shot fan.
    Scatter { damage: i32, heading: Heading },
    /// `count` shots spread evenly over a full revolution.
    Circle { count: u32, damage: i32, speed: f64 },
}

impl FiringPattern {
    /// The hero's pattern whenever no boost is active.
    pub fn hero_default() -> Self {
        FiringPattern::Straight {
            count: 1,
            damage: HERO_BULLET_DAMAGE,
            heading: Heading::Up,
        }
    }

    /// Pattern granted by a fire pickup.
    pub fn hero_scatter() -> Self {
        FiringPattern::Scatter {
            damage: HERO_BULLET_DAMAGE,
            heading: Heading::Up,
        }
    }

    /// Pattern granted by a super-fire pickup.
    pub fn hero_circle() -> Self {
        FiringPattern::Circle {
            count: CIRCLE_SHOT_COUNT,
            damage: HERO_BULLET_DAMAGE,
            speed: CIRCLE_SHOT_SPEED,
        }
    }
}
