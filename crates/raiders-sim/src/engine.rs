//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the session context, the wave controller, the
//! player's ship and all bullets. It processes player commands, runs the
//! systems in a fixed order, drives the level flow, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use raiders_core::collaborators::HighScoreEntry;
use raiders_core::commands::PlayerCommand;
use raiders_core::components::{Bullet, PlayerShip};
use raiders_core::constants::*;
use raiders_core::enums::{GameOverReason, GamePhase, SoundCue};
use raiders_core::events::GameEvent;
use raiders_core::state::GameStateSnapshot;
use raiders_core::types::{PlayField, SimTime};

use crate::context::SessionContext;
use crate::session::{cue_for, SessionState};
use crate::systems;
use crate::wave::{WaveBounds, WaveController};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub field: PlayField,
    /// Level a new run starts at. Values below 1 act as 1.
    pub starting_level: u32,
    pub starting_lives: u32,
    pub bottom_margin: f32,
    pub offscreen_margin: f32,
    /// Completing this level wins the game. `None` plays forever.
    pub victory_level: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            field: PlayField::default(),
            starting_level: 1,
            starting_lives: PLAYER_LIVES,
            bottom_margin: BOTTOM_MARGIN,
            offscreen_margin: OFFSCREEN_MARGIN,
            victory_level: None,
        }
    }
}

impl SimConfig {
    pub fn bounds(&self) -> WaveBounds {
        WaveBounds {
            field: self.field,
            bottom_margin: self.bottom_margin,
            offscreen_margin: self.offscreen_margin,
        }
    }

    fn first_level(&self) -> u32 {
        self.starting_level.max(1)
    }

    fn lives(&self) -> u32 {
        self.starting_lives.max(1)
    }
}

/// The simulation engine. Owns all session state.
pub struct SimulationEngine {
    config: SimConfig,
    ctx: SessionContext,
    session: SessionState,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    wave: WaveController,
    ship: PlayerShip,
    player_bullets: Vec<Bullet>,
    enemy_bullets: Vec<Bullet>,
    events: Vec<GameEvent>,
    sounds: Vec<SoundCue>,
}

impl SimulationEngine {
    /// Create an engine with null collaborators.
    pub fn new(config: SimConfig) -> Self {
        Self::with_context(config, SessionContext::default())
    }

    /// Create an engine around an existing session context.
    pub fn with_context(config: SimConfig, ctx: SessionContext) -> Self {
        let level = config.first_level();
        let best_score = ctx.scores.best().map_or(0, |entry| entry.score);
        let wave = WaveController::idle(level, config.bounds(), &ctx);
        let ship = world_setup::spawn_player(&config.field, config.lives());

        Self {
            config,
            session: SessionState {
                level,
                best_score,
                ..SessionState::default()
            },
            ctx,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            wave,
            ship,
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            events: Vec::new(),
            sounds: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        match self.session.phase {
            GamePhase::Playing => {
                self.run_systems();
                self.session.time.advance(TICK_RATE);
            }
            GamePhase::LevelComplete => {
                self.run_level_complete();
                self.session.time.advance(TICK_RATE);
            }
            GamePhase::LevelTransition => {
                self.run_level_transition();
                self.session.time.advance(TICK_RATE);
            }
            GamePhase::Menu | GamePhase::Paused | GamePhase::GameOver | GamePhase::Victory => {}
        }

        let events = std::mem::take(&mut self.events);
        for cue in events.iter().filter_map(cue_for) {
            self.play(cue);
        }
        let sounds = std::mem::take(&mut self.sounds);

        systems::snapshot::build_snapshot(
            &self.session,
            &self.wave,
            raiders_campaign::level_summary(
                &self.ctx.difficulty,
                &self.ctx.spawn,
                self.session.level,
            ),
            &self.ship,
            &self.player_bullets,
            &self.enemy_bullets,
            events,
            sounds,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn time(&self) -> SimTime {
        self.session.time
    }

    pub fn level(&self) -> u32 {
        self.session.level
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn best_score(&self) -> u32 {
        self.session.best_score
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.session.game_over_reason
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn wave(&self) -> &WaveController {
        &self.wave
    }

    pub fn player(&self) -> &PlayerShip {
        &self.ship
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    #[cfg(test)]
    pub fn wave_mut(&mut self) -> &mut WaveController {
        &mut self.wave
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut PlayerShip {
        &mut self.ship
    }

    #[cfg(test)]
    pub fn enemy_bullets_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.enemy_bullets
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let phase = self.session.phase;
        match command {
            PlayerCommand::StartGame => {
                if phase == GamePhase::Menu {
                    self.start_run();
                }
            }
            PlayerCommand::Restart => {
                if phase != GamePhase::Menu {
                    self.start_run();
                }
            }
            PlayerCommand::RestartLevel => {
                if matches!(
                    phase,
                    GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver
                ) {
                    log::info!("Restarting level {}", self.session.level);
                    self.session.game_over_reason = None;
                    self.session.score_submitted = false;
                    self.begin_level(self.session.level);
                    self.session.phase = GamePhase::Playing;
                }
            }
            PlayerCommand::Pause => {
                if phase == GamePhase::Playing {
                    self.session.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if phase == GamePhase::Paused {
                    self.session.phase = GamePhase::Playing;
                }
            }
            PlayerCommand::MoveLeft => {
                if phase == GamePhase::Playing {
                    systems::player::move_by(&mut self.ship, -PLAYER_SPEED, &self.config.field);
                }
            }
            PlayerCommand::MoveRight => {
                if phase == GamePhase::Playing {
                    systems::player::move_by(&mut self.ship, PLAYER_SPEED, &self.config.field);
                }
            }
            PlayerCommand::Fire => {
                if phase == GamePhase::Playing {
                    if let Some(bullet) = systems::player::try_fire(&mut self.ship) {
                        self.player_bullets.push(bullet);
                        self.play(SoundCue::PlayerShoot);
                    }
                }
            }
        }
    }

    /// Fresh run from the configured starting level.
    fn start_run(&mut self) {
        self.session = SessionState {
            best_score: self.session.best_score,
            phase: GamePhase::Playing,
            ..SessionState::default()
        };
        self.begin_level(self.config.first_level());
        log::info!("Run started at level {}", self.session.level);
    }

    /// Build the level's wave, restore lives, and clear the field.
    fn begin_level(&mut self, level: u32) {
        self.session.level = level;
        self.session.phase_timer = 0;
        self.wave = WaveController::new(level, self.config.bounds(), &self.ctx, &mut self.rng);
        self.ship = world_setup::spawn_player(&self.config.field, self.config.lives());
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.events.push(GameEvent::LevelStarted {
            level,
            formation: self.wave.formation_kind(),
            enemy_count: self.wave.queued_count(),
        });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let field = self.config.field;

        // 1. Wave: enemy motion, exits, spawning
        let status = self.wave.update(
            self.session.time.tick,
            &self.ctx,
            &mut self.rng,
            &mut self.events,
        );
        if status.invasion {
            self.end_game(GameOverReason::Invasion);
            return;
        }
        // 2. Enemy fire
        systems::enemy_fire::run(self.wave.world(), &mut self.rng, &mut self.enemy_bullets);
        // 3. Bullet flight
        systems::bullets::advance(&mut self.player_bullets, &field);
        systems::bullets::advance(&mut self.enemy_bullets, &field);
        // 4. Player timers
        systems::player::tick_timers(&mut self.ship);
        // 5. Collisions
        let outcome = systems::combat::resolve(
            self.wave.world_mut(),
            &mut self.player_bullets,
            &mut self.enemy_bullets,
            &mut self.ship,
            &mut self.events,
        );
        self.session.score += outcome.points;
        // 6. Level flow
        if status.completed || self.wave.check_complete(&mut self.events) {
            self.complete_level();
        } else if self.ship.lives == 0 {
            self.end_game(GameOverReason::NoLives);
        }
    }

    fn complete_level(&mut self) {
        let level = self.session.level;
        log::info!("Level {} completed, score {}", level, self.session.score);

        if self.config.victory_level.is_some_and(|last| level >= last) {
            self.session.phase = GamePhase::Victory;
            self.events.push(GameEvent::Victory {
                score: self.session.score,
            });
            log::info!("Victory after level {}, final score {}", level, self.session.score);
            self.submit_score();
        } else {
            self.session.phase = GamePhase::LevelComplete;
            self.session.phase_timer = LEVEL_COMPLETE_TICKS;
        }
    }

    fn run_level_complete(&mut self) {
        self.session.phase_timer = self.session.phase_timer.saturating_sub(1);
        if self.session.phase_timer == 0 {
            self.begin_level(self.session.level + 1);
            self.session.phase = GamePhase::LevelTransition;
            self.session.phase_timer = LEVEL_TRANSITION_TICKS;
            self.play(SoundCue::LevelAdvance);
        }
    }

    fn run_level_transition(&mut self) {
        self.session.phase_timer = self.session.phase_timer.saturating_sub(1);
        if self.session.phase_timer == 0 {
            self.session.phase = GamePhase::Playing;
            log::info!("Level {} begins", self.session.level);
        }
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.session.phase = GamePhase::GameOver;
        self.session.game_over_reason = Some(reason);
        self.events.push(GameEvent::GameOver {
            reason,
            score: self.session.score,
        });
        log::info!(
            "Game over ({:?}) at level {}, score {}",
            reason,
            self.session.level,
            self.session.score
        );
        self.submit_score();
    }

    /// Hand the result to the score sink once per run, if it is a new best.
    fn submit_score(&mut self) {
        if self.session.score_submitted {
            return;
        }
        self.session.score_submitted = true;
        if self.session.score <= self.session.best_score {
            return;
        }
        self.session.best_score = self.session.score;
        let entry = HighScoreEntry {
            score: self.session.score,
            level: self.session.level,
        };
        if let Err(e) = self.ctx.scores.submit(entry) {
            log::warn!("Failed to record high score {}: {}", entry.score, e);
        }
    }

    fn play(&mut self, cue: SoundCue) {
        self.ctx.sounds.play(cue);
        self.sounds.push(cue);
    }
}
