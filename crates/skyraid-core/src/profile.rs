//! Difficulty profiles: the only configuration the simulation takes.
//!
//! Three built-in presets cover easy, normal and hard. A profile can also be
//! deserialized from JSON and checked with [`DifficultyProfile::validate`].

use serde::{Deserialize, Serialize};

use crate::enums::Difficulty;
use crate::error::ProfileError;

/// Starting HP and speed for one enemy class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassBaseline {
    pub hp: f64,
    /// Downward speed in pixels per tick.
    pub speed: f64,
}

/// When and how strong a boss appears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossPolicy {
    /// Score gained since the last boss before the next one may appear.
    pub score_threshold: u32,
    pub initial_hp: i32,
    /// Added per previous appearance. Zero keeps boss HP constant.
    #[serde(default)]
    pub hp_increment: i32,
}

/// Periodic, monotonic difficulty increase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EscalationPolicy {
    pub interval_ms: u64,
    pub hp_multiplier: f64,
    pub speed_multiplier: f64,
    /// Applied to the spawn cycle duration (below 1 speeds spawning up).
    pub cycle_multiplier: f64,
    pub cycle_floor_ms: u64,
    pub elite_probability_step: f64,
    pub elite_probability_cap: f64,
    pub max_enemies_step: u32,
    pub max_enemies_cap: u32,
}

/// A named difficulty profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    pub max_enemies: u32,
    pub cycle_duration_ms: u64,
    pub hero_fire_period_ms: u64,
    pub elite_probability: f64,
    pub mob: ClassBaseline,
    pub elite: ClassBaseline,
    pub elite_plus: ClassBaseline,
    #[serde(default)]
    pub boss: Option<BossPolicy>,
    #[serde(default)]
    pub escalation: Option<EscalationPolicy>,
}

const ELITE_PLUS_BASELINE: ClassBaseline = ClassBaseline {
    hp: 120.0,
    speed: 10.0,
};

impl DifficultyProfile {
    /// Built-in preset for a difficulty mode.
    pub fn preset(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::easy(),
            Difficulty::Normal => Self::normal(),
            Difficulty::Hard => Self::hard(),
        }
    }

    /// No boss, no escalation.
    pub fn easy() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            max_enemies: 3,
            cycle_duration_ms: 800,
            hero_fire_period_ms: 400,
            elite_probability: 0.2,
            mob: ClassBaseline {
                hp: 20.0,
                speed: 8.0,
            },
            elite: ClassBaseline {
                hp: 60.0,
                speed: 6.0,
            },
            elite_plus: ELITE_PLUS_BASELINE,
            boss: None,
            escalation: None,
        }
    }

    /// Constant-HP boss, escalation every 15 s.
    pub fn normal() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            max_enemies: 5,
            cycle_duration_ms: 600,
            hero_fire_period_ms: 300,
            elite_probability: 0.3,
            mob: ClassBaseline {
                hp: 30.0,
                speed: 10.0,
            },
            elite: ClassBaseline {
                hp: 80.0,
                speed: 8.0,
            },
            elite_plus: ELITE_PLUS_BASELINE,
            boss: Some(BossPolicy {
                score_threshold: 600,
                initial_hp: 500,
                hp_increment: 0,
            }),
            escalation: Some(EscalationPolicy {
                interval_ms: 15_000,
                hp_multiplier: 1.10,
                speed_multiplier: 1.08,
                cycle_multiplier: 0.92,
                cycle_floor_ms: 400,
                elite_probability_step: 0.03,
                elite_probability_cap: 0.5,
                max_enemies_step: 1,
                max_enemies_cap: 7,
            }),
        }
    }

    /// Boss HP grows with each appearance, escalation every 10 s.
    pub fn hard() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            max_enemies: 7,
            cycle_duration_ms: 400,
            hero_fire_period_ms: 200,
            elite_probability: 0.4,
            mob: ClassBaseline {
                hp: 40.0,
                speed: 12.0,
            },
            elite: ClassBaseline {
                hp: 100.0,
                speed: 10.0,
            },
            elite_plus: ELITE_PLUS_BASELINE,
            boss: Some(BossPolicy {
                score_threshold: 500,
                initial_hp: 600,
                hp_increment: 150,
            }),
            escalation: Some(EscalationPolicy {
                interval_ms: 10_000,
                hp_multiplier: 1.15,
                speed_multiplier: 1.10,
                cycle_multiplier: 0.90,
                cycle_floor_ms: 250,
                elite_probability_step: 0.04,
                elite_probability_cap: 0.7,
                max_enemies_step: 1,
                max_enemies_cap: 10,
            }),
        }
    }

    /// Check that the profile can drive a run.
    pub fn validate(&self) -> Result<(), ProfileError> {
        positive_u64("cycle_duration_ms", self.cycle_duration_ms)?;
        positive_u64("hero_fire_period_ms", self.hero_fire_period_ms)?;
        if self.max_enemies == 0 {
            return Err(ProfileError::NotPositive {
                field: "max_enemies",
            });
        }
        probability("elite_probability", self.elite_probability)?;
        // Enemies that never move down never leave the playfield.
        for (field, value) in [
            ("mob.hp", self.mob.hp),
            ("mob.speed", self.mob.speed),
            ("elite.hp", self.elite.hp),
            ("elite.speed", self.elite.speed),
            ("elite_plus.hp", self.elite_plus.hp),
            ("elite_plus.speed", self.elite_plus.speed),
        ] {
            positive_f64(field, value)?;
        }

        if let Some(boss) = &self.boss {
            if boss.score_threshold == 0 {
                return Err(ProfileError::NotPositive {
                    field: "boss.score_threshold",
                });
            }
            if boss.initial_hp <= 0 {
                return Err(ProfileError::NotPositive {
                    field: "boss.initial_hp",
                });
            }
            if boss.hp_increment < 0 {
                return Err(ProfileError::NonMonotonic {
                    field: "boss.hp_increment",
                    value: f64::from(boss.hp_increment),
                });
            }
        }

        if let Some(policy) = &self.escalation {
            positive_u64("escalation.interval_ms", policy.interval_ms)?;
            positive_u64("escalation.cycle_floor_ms", policy.cycle_floor_ms)?;
            probability(
                "escalation.elite_probability_cap",
                policy.elite_probability_cap,
            )?;
            if policy.hp_multiplier < 1.0 {
                return Err(ProfileError::NonMonotonic {
                    field: "hp_multiplier",
                    value: policy.hp_multiplier,
                });
            }
            if policy.speed_multiplier < 1.0 {
                return Err(ProfileError::NonMonotonic {
                    field: "speed_multiplier",
                    value: policy.speed_multiplier,
                });
            }
            if policy.cycle_multiplier <= 0.0 || policy.cycle_multiplier > 1.0 {
                return Err(ProfileError::NonMonotonic {
                    field: "cycle_multiplier",
                    value: policy.cycle_multiplier,
                });
            }
            if policy.elite_probability_step < 0.0 {
                return Err(ProfileError::NonMonotonic {
                    field: "elite_probability_step",
                    value: policy.elite_probability_step,
                });
            }
            if policy.elite_probability_cap < self.elite_probability {
                return Err(ProfileError::CapBelowStart {
                    field: "elite_probability_cap",
                });
            }
            if policy.max_enemies_cap < self.max_enemies {
                return Err(ProfileError::CapBelowStart {
                    field: "max_enemies_cap",
                });
            }
        }
        Ok(())
    }

    /// Boss HP for the given appearance (1-based). Saturates at `i32::MAX`.
    pub fn boss_hp(&self, appearance: u32) -> Option<i32> {
        self.boss.map(|boss| {
            let previous = i32::try_from(appearance.saturating_sub(1)).unwrap_or(i32::MAX);
            boss.initial_hp.saturating_add(boss.hp_increment.saturating_mul(previous))
        })
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::preset(Difficulty::default())
    }
}

fn positive_u64(field: &'static str, value: u64) -> Result<(), ProfileError> {
    if value == 0 {
        return Err(ProfileError::NotPositive { field });
    }
    Ok(())
}

fn positive_f64(field: &'static str, value: f64) -> Result<(), ProfileError> {
    if value.is_nan() || value <= 0.0 {
        return Err(ProfileError::NotPositive { field });
    }
    Ok(())
}

fn probability(field: &'static str, value: f64) -> Result<(), ProfileError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ProfileError::NotAProbability { field, value });
    }
    Ok(())
}
