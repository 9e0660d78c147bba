//! Events emitted by the simulation for audio, UI, and scoring feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Gameplay events produced during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An enemy left the spawn queue and entered the field.
    EnemySpawned { enemy_type: EnemyType, position: Vec2 },
    /// A player bullet hit an enemy that survived.
    EnemyHit {
        enemy_type: EnemyType,
        position: Vec2,
        remaining_health: i32,
    },
    /// A player bullet destroyed an enemy. `position` is the enemy center.
    EnemyDestroyed {
        enemy_type: EnemyType,
        points: u32,
        position: Vec2,
    },
    /// An enemy bullet hit the player ship.
    PlayerHit { lives_remaining: u32 },
    /// An enemy reached the bottom zone. Emitted at most once per wave.
    InvasionReached { level: u32 },
    /// The level's formation was fully cleared.
    LevelComplete { level: u32 },
    /// A new level's wave was generated.
    LevelStarted {
        level: u32,
        formation: FormationKind,
        enemy_count: usize,
    },
    GameOver { reason: GameOverReason, score: u32 },
    Victory { score: u32 },
}
