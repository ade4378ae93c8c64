//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! Per-run counters live in `RunState`; per-entity state lives in components.

pub mod cleanup;
pub mod collision;
pub mod difficulty;
pub mod movement;
pub mod snapshot;
pub mod spawner;
pub mod weapons;
