//! Interfaces to the thin I/O collaborators around the simulation:
//! sprite lookup, sound playback, and high-score persistence.
//!
//! The simulation only ever talks to these traits. Null implementations
//! are provided for headless runs and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::{EnemyType, SoundCue};

/// Opaque sprite reference returned by a [`SpriteProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteHandle {
    pub id: u64,
    /// Rendered size in pixels. Used as the enemy hitbox.
    pub size: Vec2,
}

/// Looks up the sprite for an enemy type at a level.
pub trait SpriteProvider: Send {
    fn sprite(&self, enemy_type: EnemyType, level: u32) -> Option<SpriteHandle>;
}

/// Plays sound cues. Playback must never block the tick.
pub trait SoundSink: Send {
    fn play(&mut self, cue: SoundCue);
}

/// A finished session's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub level: u32,
}

/// Failure reported by a collaborator.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("{0} is unavailable")]
    Unavailable(&'static str),
    #[error(transparent)]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Records finished sessions.
pub trait ScoreSink: Send {
    /// Best score recorded so far.
    fn best(&self) -> Option<HighScoreEntry> {
        None
    }

    fn submit(&mut self, entry: HighScoreEntry) -> Result<(), CollaboratorError>;
}

/// Sprite provider with no sprites. Enemies fall back to the default size.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl SpriteProvider for NoSprites {
    fn sprite(&self, _enemy_type: EnemyType, _level: u32) -> Option<SpriteHandle> {
        None
    }
}

/// Sound sink that discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl SoundSink for Silence {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Score sink that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardScores;

impl ScoreSink for DiscardScores {
    fn submit(&mut self, _entry: HighScoreEntry) -> Result<(), CollaboratorError> {
        Ok(())
    }
}
