//! High-score leaderboard persisted as a JSON file.
//!
//! Tracks the top ten results. Saves go through a temporary file and an
//! atomic rename. A missing or unreadable file loads as an empty board.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use raiders_core::collaborators::{CollaboratorError, HighScoreEntry, ScoreSink};

/// Maximum number of high scores to keep.
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    /// Level reached.
    pub level: u32,
    /// Unix timestamp (seconds) when achieved.
    pub timestamp: u64,
}

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("failed to write high scores to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode high scores: {0}")]
    Encode(#[from] serde_json::Error),
}

/// High score leaderboard, sorted by score descending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<ScoreRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard.
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map_or(true, |e| score > e.score)
    }

    /// Rank a score would achieve (1-indexed), `None` if it doesn't qualify.
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score if it qualifies. Returns the rank achieved.
    pub fn add_score(&mut self, score: u32, level: u32, timestamp: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            ScoreRecord {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&ScoreRecord> {
        self.entries.first()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.top().map(|e| e.score)
    }

    /// Restore ordering and size limits on data read from disk.
    fn normalize(&mut self) {
        self.entries.retain(|e| e.score > 0);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

/// Leaderboard backed by a JSON file.
#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
    scores: HighScores,
}

impl HighScoreStore {
    /// Load the board at `path`. Never fails; problems are logged and the
    /// board starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = load(&path);
        Self { path, scores }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Add a result and persist the board if it made the list.
    pub fn record(&mut self, score: u32, level: u32) -> Result<Option<usize>, HighScoreError> {
        let Some(rank) = self.scores.add_score(score, level, now_secs()) else {
            return Ok(None);
        };
        log::info!("High score #{}: {} (level {})", rank, score, level);
        self.save()?;
        Ok(Some(rank))
    }

    /// Write the board through a temporary file and rename it into place.
    pub fn save(&self) -> Result<(), HighScoreError> {
        let json = serde_json::to_string_pretty(&self.scores)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_error(&tmp))?;
        fs::rename(&tmp, &self.path).map_err(io_error(&self.path))?;

        log::debug!(
            "High scores saved to {} ({} entries)",
            self.path.display(),
            self.scores.entries.len()
        );
        Ok(())
    }
}

impl ScoreSink for HighScoreStore {
    fn best(&self) -> Option<HighScoreEntry> {
        self.scores.top().map(|e| HighScoreEntry {
            score: e.score,
            level: e.level,
        })
    }

    fn submit(&mut self, entry: HighScoreEntry) -> Result<(), CollaboratorError> {
        self.record(entry.score, entry.level)
            .map(|_| ())
            .map_err(|e| CollaboratorError::Backend(Box::new(e)))
    }
}

fn load(path: &Path) -> HighScores {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No high scores at {}, starting fresh", path.display());
            return HighScores::new();
        }
        Err(e) => {
            log::warn!("Failed to read high scores from {}: {}", path.display(), e);
            return HighScores::new();
        }
    };

    match serde_json::from_str::<HighScores>(&text) {
        Ok(mut scores) => {
            scores.normalize();
            log::info!("Loaded {} high scores", scores.entries.len());
            scores
        }
        Err(e) => {
            log::warn!(
                "High score file {} is corrupt ({}), starting fresh",
                path.display(),
                e
            );
            HighScores::new()
        }
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> HighScoreError {
    let path = path.to_path_buf();
    move |source| HighScoreError::Io { path, source }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
