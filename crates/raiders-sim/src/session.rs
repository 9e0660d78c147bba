//! Session bookkeeping shared by the engine and the snapshot builder.

use raiders_core::enums::{GameOverReason, GamePhase, SoundCue};
use raiders_core::events::GameEvent;
use raiders_core::types::SimTime;

/// Scalar session state: phase, progress, and score.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub time: SimTime,
    pub phase: GamePhase,
    pub game_over_reason: Option<GameOverReason>,
    pub level: u32,
    pub score: u32,
    /// Best score known to the session, seeded from the score sink.
    pub best_score: u32,
    /// Ticks left in the level-complete or transition phase.
    pub phase_timer: u32,
    /// Whether this run's result has been handed to the score sink.
    pub score_submitted: bool,
}

impl SessionState {
    /// True once the run has ended, by defeat or victory.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Sound cue for a gameplay event, if it has one.
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::EnemyHit { .. } => Some(SoundCue::EnemyHit),
        GameEvent::EnemyDestroyed { .. } => Some(SoundCue::EnemyDestroyed),
        GameEvent::PlayerHit { .. } => Some(SoundCue::PlayerHit),
        GameEvent::LevelComplete { .. } => Some(SoundCue::LevelComplete),
        GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
        GameEvent::Victory { .. } => Some(SoundCue::Victory),
        GameEvent::EnemySpawned { .. }
        | GameEvent::InvasionReached { .. }
        | GameEvent::LevelStarted { .. } => None,
    }
}
