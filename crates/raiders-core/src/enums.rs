//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. The declaration order is the order in which the
/// distribution table is walked when picking a type.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum EnemyType {
    #[default]
    Basic,
    Scout,
    Warrior,
    Commander,
}

impl EnemyType {
    pub const ALL: [EnemyType; 4] = [
        EnemyType::Basic,
        EnemyType::Scout,
        EnemyType::Warrior,
        EnemyType::Commander,
    ];

    /// Position in the distribution table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn tag(self) -> &'static str {
        match self {
            EnemyType::Basic => "basic",
            EnemyType::Scout => "scout",
            EnemyType::Warrior => "warrior",
            EnemyType::Commander => "commander",
        }
    }
}

/// Special ability unlocked by level progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityTag {
    RapidFire,
    ShieldRegen,
    TeleportDodge,
    FormationShift,
    BossSpawn,
}

impl AbilityTag {
    pub const ALL: [AbilityTag; 5] = [
        AbilityTag::RapidFire,
        AbilityTag::ShieldRegen,
        AbilityTag::TeleportDodge,
        AbilityTag::FormationShift,
        AbilityTag::BossSpawn,
    ];

    /// First level at which the ability is active.
    pub fn unlock_level(self) -> u32 {
        match self {
            AbilityTag::RapidFire => 4,
            AbilityTag::ShieldRegen => 6,
            AbilityTag::TeleportDodge => 8,
            AbilityTag::FormationShift => 10,
            AbilityTag::BossSpawn => 12,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Small set of ability tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilitySet(u8);

impl AbilitySet {
    pub const EMPTY: AbilitySet = AbilitySet(0);

    /// Every ability whose unlock level is at or below `level`.
    pub fn unlocked_at(level: u32) -> Self {
        AbilityTag::ALL
            .into_iter()
            .filter(|tag| level >= tag.unlock_level())
            .fold(Self::EMPTY, Self::with)
    }

    pub fn with(self, tag: AbilityTag) -> Self {
        Self(self.0 | tag.bit())
    }

    pub fn insert(&mut self, tag: AbilityTag) {
        self.0 |= tag.bit();
    }

    pub fn contains(self, tag: AbilityTag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = AbilityTag> {
        AbilityTag::ALL
            .into_iter()
            .filter(move |tag| self.contains(*tag))
    }
}

/// Formation layout. Cycles with period 8 over levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationKind {
    #[default]
    Line,
    V,
    Arc,
    Triangle,
    Diamond,
    Spiral,
    Cross,
    Wave,
}

impl FormationKind {
    pub const ALL: [FormationKind; 8] = [
        FormationKind::Line,
        FormationKind::V,
        FormationKind::Arc,
        FormationKind::Triangle,
        FormationKind::Diamond,
        FormationKind::Spiral,
        FormationKind::Cross,
        FormationKind::Wave,
    ];

    /// Layout used by a level: `((level - 1) % 8) + 1`, levels below 1 act as 1.
    pub fn for_level(level: u32) -> Self {
        let index = (level.max(1) - 1) % Self::ALL.len() as u32;
        Self::ALL[index as usize]
    }

    /// 1-based layout number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            FormationKind::Line => "LINE",
            FormationKind::V => "V-SHAPE",
            FormationKind::Arc => "ARC",
            FormationKind::Triangle => "TRIANGLE",
            FormationKind::Diamond => "DIAMOND",
            FormationKind::Spiral => "SPIRAL",
            FormationKind::Cross => "CROSS",
            FormationKind::Wave => "WAVE",
        }
    }
}

/// Lifecycle of a single enemy. Only `Alive` enemies move, shoot, or
/// take damage; every other state is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    #[default]
    Alive,
    Destroyed,
    Escaped,
    Offscreen,
}

/// Wave progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Queue still holds placements.
    #[default]
    Spawning,
    /// Queue is empty, live enemies remain.
    Draining,
    /// Queue is empty and no live enemies remain.
    Complete,
}

/// Session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    LevelComplete,
    LevelTransition,
    Paused,
    GameOver,
    Victory,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// An enemy reached the bottom zone.
    Invasion,
    /// The player ran out of lives.
    NoLives,
}

/// Who fired a bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

impl BulletOwner {
    /// Vertical travel sign: player bullets go up, enemy bullets go down.
    pub fn direction(self) -> f32 {
        match self {
            BulletOwner::Player => -1.0,
            BulletOwner::Enemy => 1.0,
        }
    }
}

/// Difficulty tier shown in the level summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyTier {
    #[default]
    Rookie,
    Veteran,
    Elite,
    Legendary,
}

impl DifficultyTier {
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=3 => DifficultyTier::Rookie,
            4..=6 => DifficultyTier::Veteran,
            7..=10 => DifficultyTier::Elite,
            _ => DifficultyTier::Legendary,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyTier::Rookie => "ROOKIE",
            DifficultyTier::Veteran => "VETERAN",
            DifficultyTier::Elite => "ELITE",
            DifficultyTier::Legendary => "LEGENDARY",
        }
    }
}

/// Sound cue requested from the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    PlayerShoot,
    EnemyHit,
    EnemyDestroyed,
    PlayerHit,
    LevelComplete,
    LevelAdvance,
    GameOver,
    Victory,
}

impl SoundCue {
    /// Named tag the audio collaborator keys its samples by.
    pub fn tag(self) -> &'static str {
        match self {
            SoundCue::PlayerShoot => "player_shoot",
            SoundCue::EnemyHit => "alien_hit",
            SoundCue::EnemyDestroyed => "alien_destroy",
            SoundCue::PlayerHit => "player_hit",
            SoundCue::LevelComplete => "level_complete",
            SoundCue::LevelAdvance => "level_advance",
            SoundCue::GameOver => "game_over",
            SoundCue::Victory => "victory_sound",
        }
    }
}
