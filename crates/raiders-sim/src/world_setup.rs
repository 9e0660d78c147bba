//! Entity spawn factories.
//!
//! Builds enemy component bundles from the level tables and the sprite
//! provider, and the player's ship.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use raiders_core::components::*;
use raiders_core::constants::*;
use raiders_core::enums::*;
use raiders_core::types::{PlayField, Rect};
use raiders_enemy_ai::profiles::shoot_chance;
use raiders_procgen::Placement;

use crate::context::SessionContext;

/// Abilities that change how an individual enemy behaves.
const ENEMY_ABILITIES: [AbilityTag; 2] = [AbilityTag::RapidFire, AbilityTag::TeleportDodge];

/// Per-enemy subset of the level's unlocked abilities.
pub fn enemy_abilities(unlocked: AbilitySet) -> AbilitySet {
    ENEMY_ABILITIES
        .into_iter()
        .filter(|tag| unlocked.contains(*tag))
        .fold(AbilitySet::EMPTY, AbilitySet::with)
}

/// Spawn an enemy for a queued placement at the given level.
///
/// The sprite provider is always consulted. A sprite's size becomes the
/// hitbox; without one the default enemy size is used. The spawn x is
/// clamped for the final hitbox width.
pub fn spawn_enemy<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    ctx: &SessionContext,
    field: &PlayField,
    placement: Placement,
    level: u32,
) -> Entity {
    let enemy_type = placement.enemy_type;
    let stats = ctx.difficulty.stats_for(enemy_type, level);
    let spawn = ctx.spawn.config_for(level);
    let config = ctx.difficulty.config_for(level);

    let sprite = ctx.sprites.sprite(enemy_type, level);
    let size = sprite
        .map(|handle| handle.size)
        .filter(|size| size.x > 0.0 && size.y > 0.0)
        .unwrap_or(Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT));

    let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

    world.spawn((
        Enemy,
        Rect {
            pos: Vec2::new(
                field.clamp_x(placement.position.x, size.x),
                placement.position.y,
            ),
            size,
        },
        EnemyProfile {
            enemy_type,
            level,
            points: stats.points,
            shoot_chance: shoot_chance(enemy_type, spawn.aggression_multiplier),
            abilities: enemy_abilities(config.abilities),
        },
        Vitals {
            health: stats.health.max(1),
            max_health: stats.health.max(1),
            damage_flash: 0,
            phase: EnemyPhase::Alive,
        },
        Motion {
            horizontal_speed: stats.speed,
            vertical_speed: ENEMY_BASE_DESCENT * spawn.speed_multiplier,
            direction,
        },
        SpriteRef(sprite),
    ))
}

/// A fresh player ship centered at the bottom of the field.
pub fn spawn_player(field: &PlayField, lives: u32) -> PlayerShip {
    PlayerShip {
        rect: Rect::new(
            field.center_x() - PLAYER_WIDTH * 0.5,
            field.height - PLAYER_BOTTOM_OFFSET,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        ),
        lives,
        max_lives: lives,
        invulnerable_ticks: 0,
        hit_flash_ticks: 0,
        fire_cooldown: 0,
    }
}
