//! Simulation engine for SKYRAID.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick interval,
//! and produces GameStateSnapshots for the frontend.

pub mod damage;
pub mod drops;
pub mod engine;
pub mod firing;
pub mod hero;
pub mod input;
pub mod policy;
pub mod run_state;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use input::HeroInput;
pub use skyraid_core as core;

#[cfg(test)]
mod tests;
