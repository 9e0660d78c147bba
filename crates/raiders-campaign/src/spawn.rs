//! Spawn policy: how many enemies may be on the field at once, how often
//! they arrive, and how hard they push.

use serde::{Deserialize, Serialize};

use raiders_core::constants::MAX_TABLE_LEVEL;

use crate::difficulty::clamp_level;

/// Spawn tuning for one level. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub level: u32,
    /// Concurrency cap. Always at least 1.
    pub max_active_enemies: usize,
    pub spawn_delay_ticks: u32,
    /// Applied to enemy descent speed.
    pub speed_multiplier: f32,
    /// Applied to enemy shoot chance.
    pub aggression_multiplier: f64,
    /// Applied to formation element counts.
    pub formation_size_multiplier: f32,
}

impl SpawnConfig {
    pub fn build(level: u32) -> Self {
        let steps = level.max(1) - 1;
        let max_active_enemies: usize = match level {
            0 | 1 => 3,
            2 => 4,
            3..=5 => 5,
            6..=10 => 6,
            11..=15 => 7,
            _ => 8,
        };
        Self {
            level,
            max_active_enemies: max_active_enemies.max(1),
            spawn_delay_ticks: 180u32.saturating_sub(steps * 8).max(60),
            speed_multiplier: 1.0 + steps as f32 * 0.4,
            aggression_multiplier: 1.0 + steps as f64 * 0.5,
            formation_size_multiplier: 1.0 + steps as f32 * 0.3,
        }
    }
}

/// Per-level spawn table.
#[derive(Debug, Clone)]
pub struct SpawnPolicy {
    table: [SpawnConfig; MAX_TABLE_LEVEL as usize],
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnPolicy {
    pub fn new() -> Self {
        Self {
            table: std::array::from_fn(|i| SpawnConfig::build(i as u32 + 1)),
        }
    }

    pub fn config_for(&self, level: u32) -> &SpawnConfig {
        &self.table[clamp_level(level) as usize - 1]
    }

    pub fn max_active_enemies(&self, level: u32) -> usize {
        self.config_for(level).max_active_enemies.max(1)
    }

    pub fn spawn_delay(&self, level: u32) -> u32 {
        self.config_for(level).spawn_delay_ticks
    }

    pub fn speed_multiplier(&self, level: u32) -> f32 {
        self.config_for(level).speed_multiplier
    }

    pub fn aggression_multiplier(&self, level: u32) -> f64 {
        self.config_for(level).aggression_multiplier
    }

    pub fn formation_size_multiplier(&self, level: u32) -> f32 {
        self.config_for(level).formation_size_multiplier
    }
}
