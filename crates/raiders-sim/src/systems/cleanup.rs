//! Cleanup system: classifies enemies that left play and removes them,
//! along with any enemy already in a terminal state.

use hecs::{Entity, World};

use raiders_core::components::{Enemy, Vitals};
use raiders_core::enums::EnemyPhase;
use raiders_core::types::Rect;

use raiders_enemy_ai::fsm::classify_exit;

use crate::wave::WaveBounds;

/// How many enemies left play this tick, by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExitTally {
    pub escaped: u32,
    pub offscreen: u32,
}

/// Remove enemies that reached the bottom zone or left the field.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, bounds: &WaveBounds, despawn_buffer: &mut Vec<Entity>) -> ExitTally {
    despawn_buffer.clear();
    let mut tally = ExitTally::default();

    for (entity, (_enemy, rect, vitals)) in world.query_mut::<(&Enemy, &Rect, &mut Vitals)>() {
        if vitals.phase == EnemyPhase::Alive {
            if let Some(exit) = classify_exit(
                rect,
                &bounds.field,
                bounds.bottom_margin,
                bounds.offscreen_margin,
            ) {
                vitals.phase = exit;
                match exit {
                    EnemyPhase::Escaped => tally.escaped += 1,
                    EnemyPhase::Offscreen => tally.offscreen += 1,
                    EnemyPhase::Alive | EnemyPhase::Destroyed => {}
                }
            }
        }
        if vitals.phase != EnemyPhase::Alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    tally
}
