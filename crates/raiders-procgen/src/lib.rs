//! Procedural formation generation for Cosmic Raiders.
//!
//! Each level picks one of eight geometric layouts, scales it by the level's
//! formation size multiplier, assigns every slot an enemy type, and shuffles
//! the slots into the FIFO spawn queue consumed by the wave controller.

pub mod formations;
pub mod layouts;

pub use formations::{generate, Formation, Placement};
