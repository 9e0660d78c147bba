//! Application state shared between the controlling thread and the game loop.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use raiders_core::commands::PlayerCommand;
use raiders_core::state::GameStateSnapshot;
use raiders_sim::{SessionContext, SimConfig};

use crate::game_loop::{self, LoopOptions, LoopSummary};

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("game loop already running")]
    AlreadyRunning,
    #[error("game loop not started")]
    NotStarted,
    #[error("game loop has stopped")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("game loop thread panicked")]
    Panicked,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` holds state that does not exist before `start`
/// - `Arc<Mutex<...>>` holds the latest snapshot, shared with the loop thread
pub struct AppState {
    /// `None` before `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
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

    /// Spawn the game loop thread if not already running.
    pub fn start(
        &self,
        config: SimConfig,
        ctx: SessionContext,
        options: LoopOptions,
    ) -> Result<JoinHandle<LoopSummary>, LoopError> {
        let mut running = self.running.lock().map_err(|_| LoopError::Poisoned)?;
        if *running {
            return Err(LoopError::AlreadyRunning);
        }

        let (cmd_tx, handle) =
            game_loop::spawn_game_loop(config, ctx, self.latest_snapshot.clone(), options)
                .map_err(LoopError::Spawn)?;

        *self.command_tx.lock().map_err(|_| LoopError::Poisoned)? = Some(cmd_tx);
        *running = true;
        Ok(handle)
    }

    /// Forward a player command to the simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), LoopError> {
        self.send(GameLoopCommand::PlayerCommand(command))
    }

    /// Latest snapshot, if the loop has ticked at least once.
    pub fn snapshot(&self) -> Result<Option<GameStateSnapshot>, LoopError> {
        let lock = self.latest_snapshot.lock().map_err(|_| LoopError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Ask the loop to stop. A loop that already stopped is not an error.
    pub fn shutdown(&self) -> Result<(), LoopError> {
        match self.send(GameLoopCommand::Shutdown) {
            Ok(()) | Err(LoopError::Disconnected) => {}
            Err(e) => return Err(e),
        }
        *self.command_tx.lock().map_err(|_| LoopError::Poisoned)? = None;
        *self.running.lock().map_err(|_| LoopError::Poisoned)? = false;
        Ok(())
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), LoopError> {
        let tx_lock = self.command_tx.lock().map_err(|_| LoopError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| LoopError::Disconnected),
            None => Err(LoopError::NotStarted),
        }
    }
}
