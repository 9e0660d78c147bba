//! Game state snapshot: the complete visible state handed to the front end
//! after each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Rect, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub game_over_reason: Option<GameOverReason>,
    pub level: u32,
    pub score: u32,
    pub best_score: u32,
    pub wave: WaveView,
    pub enemies: Vec<EnemyView>,
    pub player: PlayerView,
    pub player_bullets: Vec<Rect>,
    pub enemy_bullets: Vec<Rect>,
    /// Ticks left on the level-complete banner or the transition.
    pub phase_timer: u32,
    pub summary: LevelSummary,
    pub events: Vec<GameEvent>,
    pub sounds: Vec<SoundCue>,
}

/// Formation progress for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub formation: FormationKind,
    pub formation_name: String,
    pub phase: WavePhase,
    /// Live enemies on the field.
    pub active: usize,
    /// Placements still waiting to spawn.
    pub queued: usize,
    /// `active + queued`.
    pub total_remaining: usize,
    pub max_active: usize,
    pub complete: bool,
}

/// A live enemy on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_type: EnemyType,
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    /// True while the damage flash is lit.
    pub flashing: bool,
    pub sprite_id: Option<u64>,
}

/// Player ship status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub lives: u32,
    pub invulnerable: bool,
    /// True while the hit flash is visible.
    pub flashing: bool,
}

/// Per-level difficulty description shown between levels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level: u32,
    pub tier: DifficultyTier,
    /// Horizontal speed increase over level 1, in whole percent.
    pub speed_increase_percent: u32,
    /// Descent speed increase over level 1, in whole percent.
    pub descent_increase_percent: u32,
    /// Shooting aggression increase over level 1, in whole percent.
    pub aggression_increase_percent: u32,
    /// Formation size increase over level 1, in whole percent.
    pub formation_size_increase_percent: u32,
    /// Concurrent enemy cap used by the wave.
    pub max_enemies: usize,
    pub spawn_delay_ticks: u32,
    pub special_count: usize,
    pub abilities: Vec<AbilityTag>,
    /// Most likely enemy type; the earliest type wins ties.
    pub dominant_type: EnemyType,
    pub formation: FormationKind,
}

impl EnemyView {
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}
