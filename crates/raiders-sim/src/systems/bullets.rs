//! Bullet creation and flight.

use raiders_core::components::{Bullet, PlayerShip};
use raiders_core::constants::*;
use raiders_core::enums::BulletOwner;
use raiders_core::types::{PlayField, Rect};

/// Bullet fired from the top center of the player's ship.
pub fn player_shot(player: &PlayerShip) -> Bullet {
    Bullet {
        rect: Rect::new(
            player.rect.center().x - BULLET_WIDTH * 0.5,
            player.rect.top(),
            BULLET_WIDTH,
            BULLET_HEIGHT,
        ),
        owner: BulletOwner::Player,
        speed: BULLET_BASE_SPEED,
    }
}

/// Bullet fired from the bottom center of an enemy. Enemy bullets get
/// faster with each level.
pub fn enemy_shot(enemy: &Rect, level: u32) -> Bullet {
    let speedup = 1.0 + (level.max(1) - 1) as f32 * ENEMY_BULLET_SPEEDUP_PER_LEVEL;
    Bullet {
        rect: Rect::new(
            enemy.center().x - BULLET_WIDTH * 0.5,
            enemy.bottom(),
            BULLET_WIDTH,
            BULLET_HEIGHT,
        ),
        owner: BulletOwner::Enemy,
        speed: BULLET_BASE_SPEED * speedup,
    }
}

pub fn is_offscreen(bullet: &Bullet, field: &PlayField) -> bool {
    let y = bullet.rect.pos.y;
    y < -BULLET_OFFSCREEN_MARGIN || y > field.height + BULLET_OFFSCREEN_MARGIN
}

/// Move bullets one tick and drop those that left the field.
pub fn advance(bullets: &mut Vec<Bullet>, field: &PlayField) {
    for bullet in bullets.iter_mut() {
        bullet.rect.pos.y += bullet.speed * bullet.owner.direction();
    }
    bullets.retain(|bullet| !is_offscreen(bullet, field));
}
