//! Type-specific behavioral profiles.
//!
//! Consolidates per-type parameters for the enemy state machine.

use raiders_core::constants::*;
use raiders_core::enums::EnemyType;

/// How an enemy moves sideways.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalPattern {
    /// Constant speed, reversing at the field edges.
    Bounce { factor: f32 },
    /// `sin(tick * rate)` sway. `rate` is in radians per tick.
    Sine { factor: f32, rate: f32 },
}

/// Behavioral profile for an enemy type at a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyBehaviorProfile {
    /// Per-tick chance to fire before aggression scaling.
    pub base_shoot_chance: f64,
    pub pattern: HorizontalPattern,
}

/// Get the behavioral profile for a type. Scouts and commanders switch to
/// sinusoidal movement once the level is high enough.
pub fn get_profile(enemy_type: EnemyType, level: u32) -> EnemyBehaviorProfile {
    match enemy_type {
        EnemyType::Basic => EnemyBehaviorProfile {
            base_shoot_chance: 0.001,
            pattern: HorizontalPattern::Bounce { factor: 1.1 },
        },
        EnemyType::Scout => EnemyBehaviorProfile {
            base_shoot_chance: 0.0015,
            pattern: if level >= SCOUT_ZIGZAG_LEVEL {
                HorizontalPattern::Sine {
                    factor: 0.8,
                    rate: SCOUT_ZIGZAG_RATE,
                }
            } else {
                HorizontalPattern::Bounce { factor: 1.2 }
            },
        },
        EnemyType::Warrior => EnemyBehaviorProfile {
            base_shoot_chance: 0.0008,
            pattern: HorizontalPattern::Bounce { factor: 1.0 },
        },
        EnemyType::Commander => EnemyBehaviorProfile {
            base_shoot_chance: 0.002,
            pattern: if level >= COMMANDER_WEAVE_LEVEL {
                HorizontalPattern::Sine {
                    factor: 1.2,
                    rate: COMMANDER_WEAVE_RATE,
                }
            } else {
                HorizontalPattern::Bounce { factor: 0.9 }
            },
        },
    }
}

/// Per-tick fire chance for a type, scaled by the level's aggression.
pub fn shoot_chance(enemy_type: EnemyType, aggression_multiplier: f64) -> f64 {
    // Movement pattern does not affect shooting; any level gives the same base.
    get_profile(enemy_type, 1).base_shoot_chance * aggression_multiplier
}
