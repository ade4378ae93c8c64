//! Game loop thread: steps the simulation at the tick rate and hands every
//! snapshot to the frame sink.
//!
//! The engine is built by the caller and moved into the thread. Commands
//! arrive via `mpsc` channel. The latest snapshot is stored in shared state
//! for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skyraid_core::constants::TICK_INTERVAL_MS;
use skyraid_core::events::GameOverReport;
use skyraid_core::state::GameStateSnapshot;
use skyraid_sim::engine::SimulationEngine;

use crate::sink::FrameSink;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_millis(TICK_INTERVAL_MS);

#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// Zero steps as fast as possible.
    pub tick_duration: Duration,
    /// Stop after this many loop iterations.
    pub max_ticks: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_duration: TICK_DURATION,
            max_ticks: None,
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// The thread returns the game-over report if the run ended, or `None` if it
/// was shut down, hit the tick limit, or failed.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    config: LoopConfig,
    sink: Box<dyn FrameSink>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<Option<GameOverReport>>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skyraid-game-loop".into())
        .spawn(move || run_game_loop(engine, config, sink, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// Runs until the run ends, a Shutdown command, channel disconnect, or the
/// tick limit.
fn run_game_loop(
    mut engine: SimulationEngine,
    config: LoopConfig,
    mut sink: Box<dyn FrameSink>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> Option<GameOverReport> {
    let mut next_tick_time = Instant::now();
    let mut ticks: u64 = 0;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    tracing::info!(ticks, "game loop shut down");
                    return None;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return None,
            }
        }

        // 2. Advance one tick (engine handles phase gating internally)
        let snapshot = match engine.step() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, ticks, "simulation step failed");
                return None;
            }
        };
        ticks += 1;

        // 3. Hand the frame to the sink
        if let Err(e) = sink.on_frame(&snapshot) {
            tracing::warn!(error = %e, tick = snapshot.time.tick, "frame sink failed");
        }
        let report = if snapshot.terminal {
            snapshot.game_over.clone()
        } else {
            None
        };

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if let Some(report) = report {
            if let Err(e) = sink.on_game_over(&report) {
                tracing::warn!(error = %e, score = report.score, "game-over sink failed");
            }
            return Some(report);
        }
        if config.max_ticks.is_some_and(|max| ticks >= max) {
            tracing::info!(ticks, score = engine.score(), "tick limit reached");
            return None;
        }

        // 5. Sleep until next tick
        if config.tick_duration.is_zero() {
            continue;
        }
        next_tick_time += config.tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > config.tick_duration * 2 {
            // Too far behind; reset instead of catching up
            next_tick_time = now;
        }
    }
}
