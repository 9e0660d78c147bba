//! Wave controller: one level's formation queue and its live enemies.
//!
//! Each update advances live enemies, removes those that left play,
//! reports an invasion at most once, and releases the next queued enemy
//! when the spawn timer has run out and the concurrency cap allows it.

use hecs::{Entity, World};
use rand::Rng;

use raiders_core::components::Enemy;
use raiders_core::constants::{BOTTOM_MARGIN, OFFSCREEN_MARGIN, TICK_RATE};
use raiders_core::enums::{FormationKind, WavePhase};
use raiders_core::events::GameEvent;
use raiders_core::types::{PlayField, Rect};
use raiders_procgen::{generate, Formation};

use crate::context::SessionContext;
use crate::systems;
use crate::world_setup;

/// Where enemies live and where they stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveBounds {
    pub field: PlayField,
    /// Bottom edge at `field.height - bottom_margin` counts as an invasion.
    pub bottom_margin: f32,
    /// Enemies this far past the bottom edge are simply gone.
    pub offscreen_margin: f32,
}

impl Default for WaveBounds {
    fn default() -> Self {
        Self {
            field: PlayField::default(),
            bottom_margin: BOTTOM_MARGIN,
            offscreen_margin: OFFSCREEN_MARGIN,
        }
    }
}

/// Result of one [`WaveController::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveStatus {
    pub phase: WavePhase,
    /// An enemy left the queue this tick.
    pub spawned: bool,
    /// Enemies that reached the bottom zone this tick.
    pub escaped: u32,
    /// The wave's single invasion signal fired this tick.
    pub invasion: bool,
    /// The wave's single completion signal fired this tick.
    pub completed: bool,
}

/// Orchestrates a level's formation and active enemies.
pub struct WaveController {
    level: u32,
    bounds: WaveBounds,
    formation: Formation,
    world: World,
    max_active: usize,
    spawn_delay: u32,
    spawn_timer: u32,
    invasion_reported: bool,
    completion_reported: bool,
    despawn_buffer: Vec<Entity>,
}

impl WaveController {
    /// Generate the level's formation and start an empty field.
    pub fn new<R: Rng + ?Sized>(
        level: u32,
        bounds: WaveBounds,
        ctx: &SessionContext,
        rng: &mut R,
    ) -> Self {
        let formation = generate(level, bounds.field, &ctx.difficulty, &ctx.spawn, rng);
        let wave = Self::from_formation(level, bounds, formation, ctx);
        log::info!(
            "Level {} wave: {} enemies in {} formation, max active {}, spawn delay {:.1}s",
            level,
            wave.queued_count(),
            wave.current_formation_name(),
            wave.max_active,
            wave.spawn_delay as f64 / TICK_RATE as f64
        );
        wave
    }

    /// Start from an already built formation.
    pub fn from_formation(
        level: u32,
        bounds: WaveBounds,
        formation: Formation,
        ctx: &SessionContext,
    ) -> Self {
        Self {
            level,
            bounds,
            formation,
            world: World::new(),
            max_active: ctx.spawn.max_active_enemies(level),
            spawn_delay: ctx.spawn.spawn_delay(level),
            spawn_timer: 0,
            invasion_reported: false,
            completion_reported: false,
            despawn_buffer: Vec::new(),
        }
    }

    /// A wave with nothing queued. Used before a session starts.
    pub fn idle(level: u32, bounds: WaveBounds, ctx: &SessionContext) -> Self {
        let formation = Formation {
            level,
            kind: FormationKind::for_level(level),
            placements: Default::default(),
        };
        let mut wave = Self::from_formation(level, bounds, formation, ctx);
        wave.completion_reported = true;
        wave
    }

    /// Advance one tick.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        tick: u64,
        ctx: &SessionContext,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> WaveStatus {
        // 1. Move live enemies
        systems::enemy_motion::run(&mut self.world, &self.bounds.field, tick, rng);

        // 2. Remove enemies that left play; escapes collapse into one signal per wave
        let exits = systems::cleanup::run(&mut self.world, &self.bounds, &mut self.despawn_buffer);
        let mut invasion = false;
        if exits.escaped > 0 && !self.invasion_reported {
            self.invasion_reported = true;
            invasion = true;
            log::info!(
                "Level {}: {} enemies reached the bottom zone",
                self.level,
                exits.escaped
            );
            events.push(GameEvent::InvasionReached { level: self.level });
        }

        // 3. Spawn
        let spawned = self.try_spawn(ctx, rng, events);

        // 4. Completion
        let completed = self.check_complete(events);

        WaveStatus {
            phase: self.phase(),
            spawned,
            escaped: exits.escaped,
            invasion,
            completed,
        }
    }

    fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        ctx: &SessionContext,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        self.spawn_timer = self.spawn_timer.saturating_sub(1);
        if self.spawn_timer > 0 || self.active_enemy_count() >= self.max_active {
            return false;
        }
        let Some(placement) = self.formation.pop_front() else {
            return false;
        };

        let entity = world_setup::spawn_enemy(
            &mut self.world,
            rng,
            ctx,
            &self.bounds.field,
            placement,
            self.level,
        );
        let position = self
            .world
            .get::<&Rect>(entity)
            .map_or(placement.position, |rect| rect.pos);
        self.spawn_timer = self.spawn_delay;
        log::debug!(
            "Spawned {} at ({:.0}, {:.0}), active {}/{}",
            placement.enemy_type.tag(),
            position.x,
            position.y,
            self.active_enemy_count(),
            self.max_active
        );
        events.push(GameEvent::EnemySpawned {
            enemy_type: placement.enemy_type,
            position,
        });
        true
    }

    /// Emit `LevelComplete` the first time the wave is found complete.
    /// Returns true only on that call.
    pub fn check_complete(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.completion_reported || !self.is_formation_complete() {
            return false;
        }
        self.completion_reported = true;
        events.push(GameEvent::LevelComplete { level: self.level });
        true
    }

    pub fn phase(&self) -> WavePhase {
        if !self.formation.is_empty() {
            WavePhase::Spawning
        } else if self.active_enemy_count() > 0 {
            WavePhase::Draining
        } else {
            WavePhase::Complete
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn bounds(&self) -> &WaveBounds {
        &self.bounds
    }

    /// Live enemies on the field.
    pub fn active_enemy_count(&self) -> usize {
        self.world.query::<&Enemy>().iter().count()
    }

    /// Placements still waiting to spawn.
    pub fn queued_count(&self) -> usize {
        self.formation.len()
    }

    /// Active plus queued.
    pub fn total_remaining(&self) -> usize {
        self.active_enemy_count() + self.queued_count()
    }

    /// Queue empty and no live enemies.
    pub fn is_formation_complete(&self) -> bool {
        self.formation.is_empty() && self.active_enemy_count() == 0
    }

    pub fn max_active_enemies(&self) -> usize {
        self.max_active
    }

    pub fn spawn_delay(&self) -> u32 {
        self.spawn_delay
    }

    pub fn formation_kind(&self) -> FormationKind {
        self.formation.kind
    }

    pub fn current_formation_name(&self) -> &'static str {
        self.formation.name()
    }

    /// True once any enemy of this wave has reached the bottom zone.
    pub fn invasion_reached(&self) -> bool {
        self.invasion_reported
    }

    /// Rectangles of the live enemies, in world iteration order.
    pub fn enemy_rects(&self) -> Vec<Rect> {
        self.world
            .query::<(&Enemy, &Rect)>()
            .iter()
            .map(|(_, (_, rect))| *rect)
            .collect()
    }

    /// Read-only access to the enemy world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for the combat resolver.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
