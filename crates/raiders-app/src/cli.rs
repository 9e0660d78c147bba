//! Command-line flags. Flags override values from the config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppConfig, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "raiders", version, about = "Cosmic Raiders headless runner")]
pub struct Cli {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Starting level
    #[arg(short, long)]
    pub level: Option<u32>,

    /// Stop after this many ticks
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// Run at the real tick rate on the game loop thread
    #[arg(long)]
    pub realtime: bool,

    /// Win after completing this level
    #[arg(long)]
    pub victory_level: Option<u32>,

    /// High-score file
    #[arg(long)]
    pub high_scores: Option<PathBuf>,
}

impl Cli {
    /// Load the config file, if any, and apply the flags on top.
    pub fn resolve(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.sim.seed = seed;
        }
        if let Some(level) = self.level {
            config.sim.starting_level = level.max(1);
        }
        if let Some(ticks) = self.ticks {
            config.tick_limit = Some(ticks);
        }
        if let Some(level) = self.victory_level {
            config.sim.victory_level = Some(level);
        }
        if let Some(path) = &self.high_scores {
            config.high_score_path = Some(path.clone());
        }
        config.realtime |= self.realtime;
    }
}
