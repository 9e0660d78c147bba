//! Level difficulty model.
//!
//! Pure lookups except [`DifficultyModel::pick_enemy_type`], which draws from
//! a caller-supplied RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

use raiders_core::constants::MAX_TABLE_LEVEL;
use raiders_core::enums::{AbilitySet, AbilityTag, EnemyType};

/// Clamp a level into the tuned range `1..=MAX_TABLE_LEVEL`.
pub fn clamp_level(level: u32) -> u32 {
    level.clamp(1, MAX_TABLE_LEVEL)
}

/// Enemy stats. Used both for the unscaled base values and the
/// level-scaled result of [`DifficultyModel::stats_for`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: i32,
    /// Horizontal speed in pixels per tick.
    pub speed: f32,
    pub points: u32,
}

impl EnemyStats {
    /// Unscaled stats for a type.
    pub fn base(enemy_type: EnemyType) -> Self {
        let (health, speed, points) = match enemy_type {
            EnemyType::Basic => (1, 1.0, 10),
            EnemyType::Scout => (1, 1.5, 15),
            EnemyType::Warrior => (2, 0.8, 25),
            EnemyType::Commander => (3, 1.2, 50),
        };
        Self {
            health,
            speed,
            points,
        }
    }
}

/// Probability of each enemy type, stored in `EnemyType::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeDistribution([f64; 4]);

impl TypeDistribution {
    pub fn new(weights: [f64; 4]) -> Self {
        Self(weights)
    }

    /// Distribution for a level band: up to 3, up to 6, up to 10, above.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=3 => Self([0.7, 0.2, 0.1, 0.0]),
            4..=6 => Self([0.4, 0.3, 0.2, 0.1]),
            7..=10 => Self([0.3, 0.3, 0.3, 0.1]),
            _ => Self([0.2, 0.2, 0.3, 0.3]),
        }
    }

    pub fn probability(&self, enemy_type: EnemyType) -> f64 {
        self.0[enemy_type.index()]
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Highest-probability type. The earliest type wins ties.
    pub fn dominant(&self) -> EnemyType {
        EnemyType::ALL
            .into_iter()
            .fold(EnemyType::Basic, |best, candidate| {
                if self.probability(candidate) > self.probability(best) {
                    candidate
                } else {
                    best
                }
            })
    }

    /// Map a uniform draw in `[0, 1)` to a type by walking the cumulative
    /// distribution in fixed order. Residual mass from rounding falls to Basic.
    pub fn pick(&self, draw: f64) -> EnemyType {
        let mut cumulative = 0.0;
        for enemy_type in EnemyType::ALL {
            cumulative += self.probability(enemy_type);
            if draw <= cumulative {
                return enemy_type;
            }
        }
        EnemyType::Basic
    }
}

/// Tuning for one level. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub level: u32,
    /// Applied to each type's base horizontal speed.
    pub speed_multiplier: f32,
    /// Applied to each type's base health.
    pub health_multiplier: i32,
    pub spawn_delay_ticks: u32,
    pub distribution: TypeDistribution,
    pub abilities: AbilitySet,
    /// Concurrency cap from this table. The wave uses the spawn policy's cap.
    pub max_active_enemies: usize,
    /// Applied to point awards.
    pub bonus_multiplier: f32,
}

impl DifficultyConfig {
    pub fn build(level: u32) -> Self {
        let steps = level.max(1) - 1;
        Self {
            level,
            speed_multiplier: 1.0 + steps as f32 * 0.3,
            health_multiplier: 1 + (steps / 3) as i32,
            spawn_delay_ticks: 180u32.saturating_sub(steps * 8).max(60),
            distribution: TypeDistribution::for_level(level),
            abilities: AbilitySet::unlocked_at(level),
            max_active_enemies: (3 + steps as usize / 2).clamp(3, 6),
            bonus_multiplier: 1.0 + steps as f32 * 0.1,
        }
    }

    /// Scale a base point value by the bonus multiplier, rounding down.
    /// Computed in tenths so exact multiples never lose a point to float drift.
    pub fn scale_points(&self, base: u32) -> u32 {
        let tenths = 10 + (self.level.max(1) - 1);
        base * tenths / 10
    }
}

/// Per-level difficulty table.
#[derive(Debug, Clone)]
pub struct DifficultyModel {
    table: [DifficultyConfig; MAX_TABLE_LEVEL as usize],
}

impl Default for DifficultyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyModel {
    pub fn new() -> Self {
        Self {
            table: std::array::from_fn(|i| DifficultyConfig::build(i as u32 + 1)),
        }
    }

    /// Config for a level. Levels past the table reuse the last entry;
    /// level 0 is treated as level 1.
    pub fn config_for(&self, level: u32) -> &DifficultyConfig {
        &self.table[clamp_level(level) as usize - 1]
    }

    /// Draw an enemy type from the level's distribution.
    pub fn pick_enemy_type<R: Rng + ?Sized>(&self, level: u32, rng: &mut R) -> EnemyType {
        let draw: f64 = rng.gen();
        self.config_for(level).distribution.pick(draw)
    }

    /// Base stats for a type scaled by the level's multipliers.
    pub fn stats_for(&self, enemy_type: EnemyType, level: u32) -> EnemyStats {
        let config = self.config_for(level);
        let base = EnemyStats::base(enemy_type);
        EnemyStats {
            health: base.health * config.health_multiplier,
            speed: base.speed * config.speed_multiplier,
            points: config.scale_points(base.points),
        }
    }

    pub fn has_ability(&self, level: u32, tag: AbilityTag) -> bool {
        self.config_for(level).abilities.contains(tag)
    }
}
