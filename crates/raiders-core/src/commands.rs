//! Player commands sent from the front end to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Leave the menu and begin at the configured starting level.
    StartGame,
    Pause,
    Resume,
    /// Regenerate the current level's wave and restore lives.
    RestartLevel,
    /// Start over from the configured starting level with a fresh score.
    Restart,

    // --- Ship ---
    MoveLeft,
    MoveRight,
    /// Fire a bullet if the cooldown has elapsed.
    Fire,
}
