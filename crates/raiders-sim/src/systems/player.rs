//! Player ship movement, firing, and timers.

use raiders_core::components::{Bullet, PlayerShip};
use raiders_core::constants::*;
use raiders_core::types::PlayField;

use super::bullets::player_shot;

/// Shift the ship sideways, keeping it inside the field.
pub fn move_by(player: &mut PlayerShip, dx: f32, field: &PlayField) {
    let x = field.clamp_x(player.rect.pos.x + dx, player.rect.size.x);
    player.rect.pos.x = x;
}

/// Fire if the cooldown has elapsed.
pub fn try_fire(player: &mut PlayerShip) -> Option<Bullet> {
    if player.fire_cooldown > 0 {
        return None;
    }
    player.fire_cooldown = FIRE_COOLDOWN_TICKS;
    Some(player_shot(player))
}

pub fn can_fire(player: &PlayerShip) -> bool {
    player.fire_cooldown == 0
}

pub fn is_invulnerable(player: &PlayerShip) -> bool {
    player.invulnerable_ticks > 0
}

/// Count down cooldown, invulnerability, and hit flash.
pub fn tick_timers(player: &mut PlayerShip) {
    player.fire_cooldown = player.fire_cooldown.saturating_sub(1);
    player.invulnerable_ticks = player.invulnerable_ticks.saturating_sub(1);
    player.hit_flash_ticks = player.hit_flash_ticks.saturating_sub(1);
}

/// Register a hit: lose a life and start the invulnerability window.
pub fn register_hit(player: &mut PlayerShip) {
    player.lives = player.lives.saturating_sub(1);
    player.invulnerable_ticks = INVULNERABILITY_TICKS;
    player.hit_flash_ticks = HIT_FLASH_TICKS;
}
