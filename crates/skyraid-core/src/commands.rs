//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.
//! Hero movement does not go through here; it uses the latest-value input cell.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a fresh run (from the main menu or after game over).
    StartRun,
    /// Pause the simulation.
    Pause,
    /// Resume from pause.
    Resume,
    /// Abandon the current run and return to the main menu.
    EndRun,
}
