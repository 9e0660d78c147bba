//! Snapshot system: reads the wave's world and the session records and
//! builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use raiders_core::components::*;
use raiders_core::enums::*;
use raiders_core::events::GameEvent;
use raiders_core::state::*;
use raiders_core::types::Rect;

use crate::session::SessionState;
use crate::wave::WaveController;

/// Build a complete GameStateSnapshot from the current state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    session: &SessionState,
    wave: &WaveController,
    summary: LevelSummary,
    ship: &PlayerShip,
    player_bullets: &[Bullet],
    enemy_bullets: &[Bullet],
    events: Vec<GameEvent>,
    sounds: Vec<SoundCue>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: session.time,
        phase: session.phase,
        game_over_reason: session.game_over_reason,
        level: session.level,
        score: session.score,
        best_score: session.best_score,
        wave: build_wave(wave),
        enemies: build_enemies(wave.world()),
        player: build_player(ship),
        player_bullets: rects(player_bullets),
        enemy_bullets: rects(enemy_bullets),
        phase_timer: session.phase_timer,
        summary,
        events,
        sounds,
    }
}

fn build_wave(wave: &WaveController) -> WaveView {
    WaveView {
        formation: wave.formation_kind(),
        formation_name: wave.current_formation_name().to_string(),
        phase: wave.phase(),
        active: wave.active_enemy_count(),
        queued: wave.queued_count(),
        total_remaining: wave.total_remaining(),
        max_active: wave.max_active_enemies(),
        complete: wave.is_formation_complete(),
    }
}

/// Build EnemyView list from all live enemies.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(&Enemy, &Rect, &Vitals, &EnemyProfile, &SpriteRef)>()
        .iter()
        .filter(|(_, (_, _, vitals, _, _))| vitals.phase == EnemyPhase::Alive)
        .map(|(_, (_, rect, vitals, profile, sprite))| EnemyView {
            enemy_type: profile.enemy_type,
            rect: *rect,
            health: vitals.health,
            max_health: vitals.max_health,
            flashing: vitals.damage_flash > 0,
            sprite_id: sprite.0.map(|handle| handle.id),
        })
        .collect()
}

fn build_player(ship: &PlayerShip) -> PlayerView {
    PlayerView {
        rect: ship.rect,
        lives: ship.lives,
        invulnerable: ship.invulnerable_ticks > 0,
        flashing: ship.hit_flash_ticks > 0,
    }
}

fn rects(bullets: &[Bullet]) -> Vec<Rect> {
    bullets.iter().map(|bullet| bullet.rect).collect()
}
