//! Enemy motion system: advances every live enemy by one tick.
//!
//! Calls the state machine from raiders-enemy-ai and writes the result
//! back into the ECS components.

use hecs::World;
use rand::Rng;

use raiders_core::components::{Enemy, EnemyProfile, Motion, Vitals};
use raiders_core::enums::EnemyPhase;
use raiders_core::types::{PlayField, Rect};

use raiders_enemy_ai::fsm::{step, tick_flash, EnemyContext};

/// Move live enemies and count down every damage flash.
pub fn run<R: Rng + ?Sized>(world: &mut World, field: &PlayField, tick: u64, rng: &mut R) {
    for (_entity, (_enemy, rect, motion, vitals, profile)) in
        world.query_mut::<(&Enemy, &mut Rect, &mut Motion, &mut Vitals, &EnemyProfile)>()
    {
        tick_flash(vitals);
        if vitals.phase != EnemyPhase::Alive {
            continue;
        }

        let ctx = EnemyContext {
            enemy_type: profile.enemy_type,
            level: profile.level,
            abilities: profile.abilities,
            rect: *rect,
            motion: *motion,
            field: *field,
            tick,
        };
        let out = step(&ctx, rng);
        *rect = out.rect;
        motion.direction = out.direction;
    }
}
