//! Game loop: runs the simulation engine and publishes snapshots.
//!
//! The threaded loop creates the engine inside its own thread. Commands
//! arrive via an `mpsc` channel and the latest snapshot is stored in shared
//! state for polling. The headless loop drives the engine directly with
//! the autopilot and never sleeps.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;

use raiders_core::commands::PlayerCommand;
use raiders_core::constants::TICK_RATE;
use raiders_core::enums::{GameOverReason, GamePhase};
use raiders_core::state::GameStateSnapshot;
use raiders_sim::{SessionContext, SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::state::{AppState, GameLoopCommand, LoopError};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Sleep between ticks to hold the tick rate.
    pub realtime: bool,
    /// Stop after this many ticks.
    pub tick_limit: Option<u64>,
}

/// Where a run ended up.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoopSummary {
    /// Engine ticks executed, including ticks spent in menus and pauses.
    pub ticks: u64,
    pub phase: GamePhase,
    pub game_over_reason: Option<GameOverReason>,
    pub level: u32,
    pub score: u32,
    pub best_score: u32,
}

impl LoopSummary {
    fn record(&mut self, snapshot: &GameStateSnapshot) {
        self.ticks += 1;
        self.phase = snapshot.phase;
        self.game_over_reason = snapshot.game_over_reason;
        self.level = snapshot.level;
        self.score = snapshot.score;
        self.best_score = snapshot.best_score;
    }
}

fn is_finished(phase: GamePhase) -> bool {
    matches!(phase, GamePhase::GameOver | GamePhase::Victory)
}

fn limit_reached(ticks: u64, limit: Option<u64>) -> bool {
    limit.is_some_and(|limit| ticks >= limit)
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle yielding the loop's summary.
pub fn spawn_game_loop(
    config: SimConfig,
    ctx: SessionContext,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    options: LoopOptions,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("raiders-game-loop".into())
        .spawn(move || {
            let mut engine = SimulationEngine::with_context(config, ctx);
            run_game_loop(&mut engine, cmd_rx, &latest_snapshot, options)
        })?;

    Ok((cmd_tx, handle))
}

/// The threaded loop. Runs until Shutdown, channel disconnect, or the
/// tick limit.
fn run_game_loop(
    engine: &mut SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    options: LoopOptions,
) -> LoopSummary {
    let mut summary = LoopSummary::default();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return summary,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return summary,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        summary.record(&snapshot);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if limit_reached(summary.ticks, options.tick_limit) {
            log::info!("Tick limit {} reached", summary.ticks);
            return summary;
        }

        // 4. Sleep until next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind, reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }
}

/// Play on the calling thread with the autopilot until the game ends or
/// the tick limit is reached.
pub fn run_headless(
    engine: &mut SimulationEngine,
    pilot: &Autopilot,
    tick_limit: Option<u64>,
) -> LoopSummary {
    let mut summary = LoopSummary::default();
    engine.queue_command(PlayerCommand::StartGame);

    while !limit_reached(summary.ticks, tick_limit) {
        let snapshot = engine.tick();
        summary.record(&snapshot);
        if is_finished(snapshot.phase) {
            break;
        }
        engine.queue_commands(pilot.commands(&snapshot));
    }
    summary
}

/// Run the threaded loop at the tick rate, steering it with the autopilot
/// from the calling thread.
pub fn run_realtime(
    config: SimConfig,
    ctx: SessionContext,
    tick_limit: Option<u64>,
    pilot: &Autopilot,
) -> Result<LoopSummary, LoopError> {
    let state = AppState::new();
    let options = LoopOptions {
        realtime: true,
        tick_limit,
    };
    let handle = state.start(config, ctx, options)?;
    state.send_command(PlayerCommand::StartGame)?;

    let mut last_tick = None;
    while !handle.is_finished() {
        std::thread::sleep(TICK_DURATION);
        let Some(snapshot) = state.snapshot()? else {
            continue;
        };
        if is_finished(snapshot.phase) {
            break;
        }
        if last_tick == Some(snapshot.time.tick) && snapshot.phase == GamePhase::Playing {
            continue;
        }
        last_tick = Some(snapshot.time.tick);
        for command in pilot.commands(&snapshot) {
            if state.send_command(command).is_err() {
                break;
            }
        }
    }

    state.shutdown()?;
    handle.join().map_err(|_| LoopError::Panicked)
}
