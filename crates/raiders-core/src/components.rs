//! ECS components for hecs entities, plus the plain-data bullet and ship
//! records owned directly by the engine.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::collaborators::SpriteHandle;
use crate::enums::*;
use crate::types::Rect;

/// Marker component: this entity is an enemy raider.
#[derive(Debug, Clone, Copy)]
pub struct Enemy;

/// Static description of an enemy, fixed at spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub enemy_type: EnemyType,
    /// Level the enemy was spawned for.
    pub level: u32,
    /// Points awarded when destroyed.
    pub points: u32,
    /// Per-tick base chance to fire, already scaled by aggression.
    pub shoot_chance: f64,
    pub abilities: AbilitySet,
}

/// Health and lifecycle state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitals {
    pub health: i32,
    pub max_health: i32,
    /// Ticks remaining on the damage flash.
    pub damage_flash: u32,
    pub phase: EnemyPhase,
}

/// Movement parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Motion {
    /// Horizontal pixels per tick before per-type multipliers.
    pub horizontal_speed: f32,
    /// Descent in pixels per tick.
    pub vertical_speed: f32,
    /// +1 moving right, -1 moving left.
    pub direction: f32,
}

/// Sprite chosen at spawn, if the provider had one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteRef(pub Option<SpriteHandle>);

/// A bullet in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub owner: BulletOwner,
    /// Pixels per tick.
    pub speed: f32,
}

/// The player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip {
    pub rect: Rect,
    pub lives: u32,
    pub max_lives: u32,
    /// Ticks of invulnerability remaining after a hit.
    pub invulnerable_ticks: u32,
    /// Ticks the hit flash remains visible.
    pub hit_flash_ticks: u32,
    /// Ticks until the next shot is allowed.
    pub fire_cooldown: u32,
}
