//! Runner configuration loaded from an optional TOML file.
//!
//! Every key is optional. Missing keys take their defaults, and the
//! simulation settings live under a `[sim]` table.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use raiders_core::constants::TICK_RATE;
use raiders_sim::SimConfig;

/// Ten minutes of play at the fixed tick rate.
pub const DEFAULT_TICK_LIMIT: u64 = 10 * 60 * TICK_RATE as u64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    /// Leaderboard file. `None` keeps no scores.
    pub high_score_path: Option<PathBuf>,
    /// Stop after this many ticks. `None` runs until the game ends.
    pub tick_limit: Option<u64>,
    /// Pace the loop at the tick rate instead of running flat out.
    pub realtime: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            high_score_path: Some(PathBuf::from("high_scores.json")),
            tick_limit: Some(DEFAULT_TICK_LIMIT),
            realtime: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
