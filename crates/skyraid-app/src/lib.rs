//! SKYRAID application shell.
//!
//! Wires the simulation engine to a paced game loop thread, frame sinks
//! (event cues, score persistence) and command-line configuration.

pub mod config;
pub mod game_loop;
pub mod scoreboard;
pub mod sink;
pub mod state;

pub use skyraid_core as core;
