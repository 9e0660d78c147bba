//! Session-scoped context: the tuning tables and the I/O collaborators.
//!
//! Built once per session and handed by reference to the wave controller
//! and the enemy factory. Nothing here is process-global.

use raiders_campaign::{DifficultyModel, SpawnPolicy};
use raiders_core::collaborators::*;

/// Everything a session needs besides its own mutable state.
pub struct SessionContext {
    pub difficulty: DifficultyModel,
    pub spawn: SpawnPolicy,
    pub sprites: Box<dyn SpriteProvider>,
    pub sounds: Box<dyn SoundSink>,
    pub scores: Box<dyn ScoreSink>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            difficulty: DifficultyModel::new(),
            spawn: SpawnPolicy::new(),
            sprites: Box::new(NoSprites),
            sounds: Box::new(Silence),
            scores: Box::new(DiscardScores),
        }
    }
}

impl SessionContext {
    pub fn with_sprites(mut self, sprites: impl SpriteProvider + 'static) -> Self {
        self.sprites = Box::new(sprites);
        self
    }

    pub fn with_sounds(mut self, sounds: impl SoundSink + 'static) -> Self {
        self.sounds = Box::new(sounds);
        self
    }

    pub fn with_scores(mut self, scores: impl ScoreSink + 'static) -> Self {
        self.scores = Box::new(scores);
        self
    }
}
