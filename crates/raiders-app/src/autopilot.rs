//! Autopilot for headless runs.
//!
//! Starts the game from the menu, steers under the lowest enemy, and
//! fires every tick. The engine's cooldown decides which shots happen.

use raiders_core::commands::PlayerCommand;
use raiders_core::constants::PLAYER_SPEED;
use raiders_core::enums::GamePhase;
use raiders_core::state::GameStateSnapshot;

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Horizontal distance to the target that counts as aligned.
    pub dead_zone: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            dead_zone: PLAYER_SPEED,
        }
    }
}

impl Autopilot {
    /// Commands for the next tick, given the latest snapshot.
    pub fn commands(&self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        match snapshot.phase {
            GamePhase::Menu => vec![PlayerCommand::StartGame],
            GamePhase::Playing => self.steer(snapshot),
            _ => Vec::new(),
        }
    }

    fn steer(&self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::with_capacity(2);
        let ship_x = snapshot.player.rect.center().x;

        let lowest = snapshot
            .enemies
            .iter()
            .max_by(|a, b| a.rect.bottom().total_cmp(&b.rect.bottom()));
        if let Some(target) = lowest {
            let dx = target.center().x - ship_x;
            if dx < -self.dead_zone {
                commands.push(PlayerCommand::MoveLeft);
            } else if dx > self.dead_zone {
                commands.push(PlayerCommand::MoveRight);
            }
        }

        commands.push(PlayerCommand::Fire);
        commands
    }
}
