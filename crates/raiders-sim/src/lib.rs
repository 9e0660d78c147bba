//! Simulation engine for Cosmic Raiders.
//!
//! The wave controller owns a hecs ECS world of live enemies plus the
//! level's spawn queue. The engine runs the wave, bullets, the combat
//! resolver, and the session flow at a fixed tick rate, and produces
//! `GameStateSnapshot`s for the front end.

pub mod context;
pub mod engine;
pub mod session;
pub mod systems;
pub mod wave;
pub mod world_setup;

pub use context::SessionContext;
pub use engine::{SimConfig, SimulationEngine};
pub use raiders_core as core;
pub use wave::{WaveBounds, WaveController, WaveStatus};

#[cfg(test)]
mod tests;
