//! Enemy behavior state machine.
//!
//! Pure functions that advance an enemy by one tick, apply damage, decide
//! whether it fires, and classify how it left the field.
//! No ECS dependency; operates on plain data.

use rand::Rng;

use raiders_core::components::{Motion, Vitals};
use raiders_core::constants::*;
use raiders_core::enums::{AbilitySet, AbilityTag, EnemyPhase, EnemyType};
use raiders_core::types::{PlayField, Rect};

use crate::profiles::{get_profile, HorizontalPattern};

/// Input to the state machine for a single enemy.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    pub enemy_type: EnemyType,
    pub level: u32,
    pub abilities: AbilitySet,
    pub rect: Rect,
    pub motion: Motion,
    pub field: PlayField,
    /// Monotonic tick counter driving the sine phase.
    pub tick: u64,
}

/// Output of one movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStep {
    pub rect: Rect,
    pub direction: f32,
    pub teleported: bool,
}

/// Advance one tick: descend, move sideways by the type's pattern (or
/// teleport), then clamp to the field and reverse at the edges.
pub fn step<R: Rng + ?Sized>(ctx: &EnemyContext, rng: &mut R) -> EnemyStep {
    let width = ctx.rect.size.x;
    let max_x = ctx.field.max_x(width);
    let mut pos = ctx.rect.pos;
    let mut direction = ctx.motion.direction;

    pos.y += ctx.motion.vertical_speed;

    let teleported = ctx.abilities.contains(AbilityTag::TeleportDodge)
        && rng.gen::<f64>() < TELEPORT_CHANCE;

    if teleported {
        pos.x = if max_x > 0.0 {
            rng.gen_range(0.0..=max_x)
        } else {
            0.0
        };
    } else {
        pos.x += horizontal_delta(ctx);
        if pos.x <= 0.0 || pos.x >= max_x {
            direction = -direction;
            pos.x = pos.x.clamp(0.0, max_x);
        }
    }

    EnemyStep {
        rect: Rect {
            pos,
            size: ctx.rect.size,
        },
        direction,
        teleported,
    }
}

/// Sideways displacement for this tick under the type's pattern.
pub fn horizontal_delta(ctx: &EnemyContext) -> f32 {
    let speed = ctx.motion.horizontal_speed;
    match get_profile(ctx.enemy_type, ctx.level).pattern {
        HorizontalPattern::Bounce { factor } => ctx.motion.direction * speed * factor,
        HorizontalPattern::Sine { factor, rate } => {
            // Reduce the phase first so large tick counts keep f32 precision.
            let phase = (ctx.tick as f64 * rate as f64) % std::f64::consts::TAU;
            (phase as f32).sin() * speed * factor
        }
    }
}

/// Apply damage. Returns true when the enemy is destroyed.
pub fn take_damage(vitals: &mut Vitals, amount: i32) -> bool {
    vitals.health -= amount;
    vitals.damage_flash = DAMAGE_FLASH_TICKS;
    if vitals.health <= 0 {
        vitals.phase = EnemyPhase::Destroyed;
        true
    } else {
        false
    }
}

/// Count the damage flash down by one tick.
pub fn tick_flash(vitals: &mut Vitals) {
    vitals.damage_flash = vitals.damage_flash.saturating_sub(1);
}

/// Bernoulli fire decision. RapidFire adds a second, independent trial at
/// a reduced chance; the result is the OR of the two.
pub fn should_shoot<R: Rng + ?Sized>(shoot_chance: f64, abilities: AbilitySet, rng: &mut R) -> bool {
    let first = rng.gen::<f64>() < shoot_chance;
    if abilities.contains(AbilityTag::RapidFire) {
        first || rng.gen::<f64>() < shoot_chance * RAPID_FIRE_FACTOR
    } else {
        first
    }
}

/// Exact probability that [`should_shoot`] fires.
pub fn effective_shoot_chance(shoot_chance: f64, abilities: AbilitySet) -> f64 {
    let p = shoot_chance.clamp(0.0, 1.0);
    if abilities.contains(AbilityTag::RapidFire) {
        let p2 = (shoot_chance * RAPID_FIRE_FACTOR).clamp(0.0, 1.0);
        p + (1.0 - p) * p2
    } else {
        p
    }
}

/// How an enemy left play, if it did. Leaving the field (below it by more
/// than `offscreen_margin`, or entirely above it) is checked before reaching
/// the bottom zone.
pub fn classify_exit(
    rect: &Rect,
    field: &PlayField,
    bottom_margin: f32,
    offscreen_margin: f32,
) -> Option<EnemyPhase> {
    if rect.top() > field.height + offscreen_margin || rect.bottom() < 0.0 {
        Some(EnemyPhase::Offscreen)
    } else if rect.bottom() >= field.height - bottom_margin {
        Some(EnemyPhase::Escaped)
    } else {
        None
    }
}
