//! Systems that run each tick.
//!
//! Enemy systems take the wave's `&mut World` (or `&World` for read-only).
//! Bullet and player systems work on the plain records the engine owns.

pub mod bullets;
pub mod cleanup;
pub mod combat;
pub mod enemy_fire;
pub mod enemy_motion;
pub mod player;
pub mod snapshot;
