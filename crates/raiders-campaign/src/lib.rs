//! Campaign progression for Cosmic Raiders.
//!
//! Two per-level tables, both computed once and indexed by level:
//! the difficulty model (enemy stats, type mix, abilities) and the spawn
//! policy (concurrency cap, spawn cadence, descent, aggression, formation
//! size). Levels past the tables reuse their last entry.

pub mod difficulty;
pub mod spawn;
pub mod summary;

pub use difficulty::{clamp_level, DifficultyConfig, DifficultyModel, EnemyStats, TypeDistribution};
pub use spawn::{SpawnConfig, SpawnPolicy};
pub use summary::level_summary;
