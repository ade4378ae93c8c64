//! Error types shared by the simulation crates.

use thiserror::Error;

use crate::enums::AircraftKind;

/// Errors surfaced by `SimulationEngine::step`.
///
/// Only construction-time wiring defects end up here. Data inconsistencies
/// inside a tick are clamped instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    #[error("{kind:?} was asked to fire but has no firing pattern assigned")]
    MissingFiringPattern { kind: AircraftKind },
}

/// Rejected difficulty profile.
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must lie in [0, 1], got {value}")]
    NotAProbability { field: &'static str, value: f64 },
    #[error("escalation cap {field} is below its starting value")]
    CapBelowStart { field: &'static str },
    #[error("escalation multiplier {field} would make the run easier ({value})")]
    NonMonotonic { field: &'static str, value: f64 },
}
