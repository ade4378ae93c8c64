//! Core types and definitions for the SKYRAID simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, firing patterns, difficulty profiles, commands, state
//! snapshots, events, and constants. It has no dependency on any runtime
//! framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod pattern;
pub mod profile;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
