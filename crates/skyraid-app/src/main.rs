//! skyraid: headless runner for the SKYRAID simulation.
//!
//! Usage:
//!   skyraid --difficulty hard --player ace
//!   skyraid --profile custom.json --seed 7 --max-ticks 5000 --unthrottled

use std::process;
use std::thread;

use skyraid_app::config::{self, CliOptions};
use skyraid_app::game_loop::{self, LoopConfig, TICK_DURATION};
use skyraid_app::scoreboard::Scoreboard;
use skyraid_app::sink::{EventLogSink, FrameSink, ScoreboardSink};
use skyraid_app::state::AppState;
use skyraid_core::commands::PlayerCommand;
use skyraid_core::constants::{HERO_SIZE, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use skyraid_sim::engine::{SimConfig, SimulationEngine};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match config::parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            process::exit(2);
        }
    };
    if options.help {
        print_usage();
        return;
    }

    if let Err(e) = run(&options) {
        tracing::error!(error = %e, "skyraid failed");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "skyraid: headless SKYRAID run with a scripted pilot\n\
         \n\
           --difficulty <easy|normal|hard>  Built-in profile (default: normal)\n\
           --profile <path>                 JSON difficulty profile (overrides --difficulty)\n\
           --seed <N>                       RNG seed (default: 42)\n\
           --player <name>                  Name recorded with the score (default: player)\n\
           --scores-dir <path>              Score file directory (default: scores)\n\
           --max-ticks <N>                  Stop after N ticks\n\
           --unthrottled                    Step as fast as possible\n"
    );
}

fn run(options: &CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let profile = options.resolve_profile()?;
    let difficulty = profile.difficulty;
    let mut engine = SimulationEngine::new(SimConfig {
        seed: options.seed,
        profile,
    })?;
    engine.queue_command(PlayerCommand::StartRun);
    let input = engine.input_handle();

    let board = Scoreboard::new(&options.scores_dir);
    let sinks: Vec<Box<dyn FrameSink>> = vec![
        Box::new(EventLogSink::default()),
        Box::new(ScoreboardSink::new(board.clone(), options.player.clone())),
    ];
    let loop_config = LoopConfig {
        tick_duration: if options.unthrottled {
            std::time::Duration::ZERO
        } else {
            TICK_DURATION
        },
        max_ticks: options.max_ticks,
    };

    let state = AppState::new();
    let (tx, handle) = game_loop::spawn_game_loop(
        engine,
        loop_config,
        Box::new(sinks),
        state.latest_snapshot.clone(),
    )?;
    state.attach(tx);

    // Scripted pilot: sweep the hero back and forth along the bottom edge.
    let mut frame: u64 = 0;
    while !handle.is_finished() {
        let (x, y) = sweep_position(frame);
        input.set(x, y);
        frame += 1;
        thread::sleep(TICK_DURATION);
    }

    let report = handle
        .join()
        .map_err(|_| "game loop thread panicked")?;
    state.shutdown();

    match report {
        Some(report) => tracing::info!(
            score = report.score,
            difficulty = report.difficulty.label(),
            seconds = report.elapsed_ms / 1000,
            "final score"
        ),
        None => {
            let score = state.latest().map(|s| s.score).unwrap_or(0);
            tracing::info!(score, "run stopped before game over");
        }
    }

    for entry in board.top(difficulty, 5)? {
        tracing::info!(
            rank = entry.rank,
            player = %entry.record.player,
            score = entry.record.score,
            "leaderboard"
        );
    }
    Ok(())
}

/// Triangle wave across the playfield, four pixels per frame.
fn sweep_position(frame: u64) -> (f64, f64) {
    let span = PLAYFIELD_WIDTH as u64;
    let phase = (frame * 4) % (2 * span);
    let x = if phase < span { phase } else { 2 * span - phase };
    (x as f64, PLAYFIELD_HEIGHT - HERO_SIZE.1)
}
