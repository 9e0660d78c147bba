//! Enemy AI for Cosmic Raiders.
//!
//! Per-type behavior profiles and the enemy movement/combat state machine,
//! written as pure functions over plain data. The sim crate applies them
//! to ECS components.

pub mod fsm;
pub mod profiles;

pub use raiders_core as core;
