//! Formation generation: layout selection, type assignment, and shuffling.

use std::collections::VecDeque;

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use raiders_campaign::{DifficultyModel, SpawnPolicy};
use raiders_core::enums::{EnemyType, FormationKind};
use raiders_core::types::PlayField;

use crate::layouts::{self, LayoutFrame};

/// One queued spawn: where the enemy appears and what it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top-left corner of the enemy.
    pub position: Vec2,
    pub enemy_type: EnemyType,
}

/// A level's spawn queue, consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct Formation {
    pub level: u32,
    pub kind: FormationKind,
    pub placements: VecDeque<Placement>,
}

impl Formation {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn pop_front(&mut self) -> Option<Placement> {
        self.placements.pop_front()
    }
}

/// Clamped positions of the level's layout in geometric order.
pub fn positions_for(level: u32, field: PlayField, spawn: &SpawnPolicy) -> Vec<Vec2> {
    let frame = LayoutFrame::new(field, spawn.formation_size_multiplier(level));
    layouts::positions(FormationKind::for_level(level), &frame)
        .into_iter()
        .map(|position| frame.clamp(position))
        .collect()
}

/// Build the level's formation.
///
/// Types are drawn per slot in geometric order, independent of position,
/// then the whole list is shuffled so spawn order does not follow the shape.
pub fn generate<R: Rng + ?Sized>(
    level: u32,
    field: PlayField,
    difficulty: &DifficultyModel,
    spawn: &SpawnPolicy,
    rng: &mut R,
) -> Formation {
    let kind = FormationKind::for_level(level);
    let mut placements: Vec<Placement> = positions_for(level, field, spawn)
        .into_iter()
        .map(|position| Placement {
            position,
            enemy_type: difficulty.pick_enemy_type(level, rng),
        })
        .collect();
    placements.shuffle(rng);

    log::info!(
        "Generated {} enemies for level {} ({} formation)",
        placements.len(),
        level,
        kind.name()
    );

    Formation {
        level,
        kind,
        placements: placements.into(),
    }
}
