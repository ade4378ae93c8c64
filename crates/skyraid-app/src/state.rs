//! Application state shared between the input side and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use skyraid_core::commands::PlayerCommand;
use skyraid_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Queued on the engine for the next tick.
    PlayerCommand(PlayerCommand),
    /// Stop stepping and let the thread return.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` sits behind a `Mutex` so the state is `Sync`
/// - the sender is `None` until a loop is attached
/// - the latest snapshot is shared with the loop thread through an `Arc`
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Overwritten after every step.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a running loop's command channel.
    pub fn attach(&self, tx: mpsc::Sender<GameLoopCommand>) {
        if let Ok(mut slot) = self.command_tx.lock() {
            *slot = Some(tx);
        }
        if let Ok(mut running) = self.running.lock() {
            *running = true;
        }
    }

    /// Forward a command to the loop. Returns false if no loop is attached
    /// or the loop has already exited.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        let Ok(slot) = self.command_tx.lock() else {
            return false;
        };
        match slot.as_ref() {
            Some(tx) => tx.send(command).is_ok(),
            None => false,
        }
    }

    /// Ask the loop to stop and forget its channel.
    pub fn shutdown(&self) {
        self.send(GameLoopCommand::Shutdown);
        if let Ok(mut slot) = self.command_tx.lock() {
            *slot = None;
        }
        if let Ok(mut running) = self.running.lock() {
            *running = false;
        }
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|snapshot| snapshot.clone())
    }
}
