//! Core types and definitions for the Cosmic Raiders simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, commands, events, state snapshots, constants,
//! and the collaborator interfaces for sprites, sound, and high scores.
//! It has no dependency on any rendering or audio framework.

pub mod collaborators;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
