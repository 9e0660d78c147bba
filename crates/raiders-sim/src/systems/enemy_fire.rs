//! Enemy fire system: each live enemy rolls to shoot once per tick.

use hecs::World;
use rand::Rng;

use raiders_core::components::{Bullet, Enemy, EnemyProfile, Vitals};
use raiders_core::enums::EnemyPhase;
use raiders_core::types::Rect;

use raiders_enemy_ai::fsm::should_shoot;

use super::bullets::enemy_shot;

/// Returns the number of shots fired.
pub fn run<R: Rng + ?Sized>(world: &World, rng: &mut R, enemy_bullets: &mut Vec<Bullet>) -> usize {
    let before = enemy_bullets.len();
    let mut query = world.query::<(&Enemy, &Rect, &Vitals, &EnemyProfile)>();
    for (_entity, (_enemy, rect, vitals, profile)) in query.iter() {
        if vitals.phase != EnemyPhase::Alive {
            continue;
        }
        if should_shoot(profile.shoot_chance, profile.abilities, rng) {
            enemy_bullets.push(enemy_shot(rect, profile.level));
        }
    }
    enemy_bullets.len() - before
}
