//! Cosmic Raiders headless runner.
//!
//! This crate wires the simulation crates to a fixed-rate game loop
//! thread, a TOML config file, a JSON high-score store, and a simple
//! autopilot that plays the game without a front end.

pub mod audio;
pub mod autopilot;
pub mod cli;
pub mod config;
pub mod game_loop;
pub mod highscores;
pub mod state;

pub use raiders_core as core;
