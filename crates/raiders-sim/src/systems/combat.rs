//! Combat resolver: bullet-versus-enemy and bullet-versus-player hits.
//!
//! A player bullet damages at most one enemy per tick. At most one enemy
//! bullet hits the player per tick, and none while the player is
//! invulnerable.

use hecs::{Entity, World};

use raiders_core::components::{Bullet, Enemy, EnemyProfile, PlayerShip, Vitals};
use raiders_core::enums::EnemyPhase;
use raiders_core::events::GameEvent;
use raiders_core::types::Rect;

use raiders_enemy_ai::fsm::take_damage;

use super::player;

/// What happened during one resolve pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatOutcome {
    /// Points earned from destroyed enemies.
    pub points: u32,
    pub enemies_hit: u32,
    pub enemies_destroyed: u32,
    pub player_hit: bool,
}

/// Resolve every collision for this tick.
pub fn resolve(
    world: &mut World,
    player_bullets: &mut Vec<Bullet>,
    enemy_bullets: &mut Vec<Bullet>,
    ship: &mut PlayerShip,
    events: &mut Vec<GameEvent>,
) -> CombatOutcome {
    let mut outcome = CombatOutcome::default();
    let mut destroyed: Vec<Entity> = Vec::new();

    player_bullets.retain(|bullet| {
        match hit_enemy(world, &bullet.rect, events) {
            Some(HitResult::Damaged) => {
                outcome.enemies_hit += 1;
                false
            }
            Some(HitResult::Destroyed { entity, points }) => {
                outcome.enemies_hit += 1;
                outcome.enemies_destroyed += 1;
                outcome.points += points;
                destroyed.push(entity);
                false
            }
            None => true,
        }
    });

    for entity in destroyed {
        let _ = world.despawn(entity);
    }

    if !player::is_invulnerable(ship) {
        if let Some(index) = enemy_bullets
            .iter()
            .position(|bullet| bullet.rect.overlaps(&ship.rect))
        {
            enemy_bullets.remove(index);
            player::register_hit(ship);
            outcome.player_hit = true;
            events.push(GameEvent::PlayerHit {
                lives_remaining: ship.lives,
            });
        }
    }

    outcome
}

enum HitResult {
    Damaged,
    Destroyed { entity: Entity, points: u32 },
}

/// Apply one point of damage to the first live enemy the bullet overlaps.
fn hit_enemy(world: &mut World, bullet: &Rect, events: &mut Vec<GameEvent>) -> Option<HitResult> {
    let (entity, (_enemy, rect, vitals, profile)) = world
        .query_mut::<(&Enemy, &Rect, &mut Vitals, &EnemyProfile)>()
        .into_iter()
        .find(|(_, (_, rect, vitals, _))| {
            vitals.phase == EnemyPhase::Alive && rect.overlaps(bullet)
        })?;

    let position = rect.center();
    if take_damage(vitals, 1) {
        log::debug!(
            "{} destroyed at ({:.0}, {:.0}) for {} points",
            profile.enemy_type.tag(),
            position.x,
            position.y,
            profile.points
        );
        events.push(GameEvent::EnemyDestroyed {
            enemy_type: profile.enemy_type,
            points: profile.points,
            position,
        });
        Some(HitResult::Destroyed {
            entity,
            points: profile.points,
        })
    } else {
        events.push(GameEvent::EnemyHit {
            enemy_type: profile.enemy_type,
            position,
            remaining_health: vitals.health,
        });
        Some(HitResult::Damaged)
    }
}
