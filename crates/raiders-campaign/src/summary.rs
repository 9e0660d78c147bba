//! Human-facing description of a level's difficulty.

use raiders_core::enums::{DifficultyTier, FormationKind};
use raiders_core::state::LevelSummary;

use crate::difficulty::{clamp_level, DifficultyModel};
use crate::spawn::SpawnPolicy;

/// Summarize a level from both tables. Percentages are whole-number
/// increases over level 1 and stop growing past the end of the tables.
pub fn level_summary(difficulty: &DifficultyModel, spawn: &SpawnPolicy, level: u32) -> LevelSummary {
    let config = difficulty.config_for(level);
    let spawn_config = spawn.config_for(level);
    let steps = clamp_level(level) - 1;

    LevelSummary {
        level,
        tier: DifficultyTier::for_level(level),
        speed_increase_percent: steps * 30,
        descent_increase_percent: steps * 40,
        aggression_increase_percent: steps * 50,
        formation_size_increase_percent: steps * 30,
        max_enemies: spawn.max_active_enemies(level),
        spawn_delay_ticks: spawn_config.spawn_delay_ticks,
        special_count: config.abilities.len(),
        abilities: config.abilities.iter().collect(),
        dominant_type: config.distribution.dominant(),
        formation: FormationKind::for_level(level),
    }
}
