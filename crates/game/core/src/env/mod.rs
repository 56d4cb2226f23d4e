//! Read-only data the rules consult but never modify.
//!
//! Oracles are supplied by the runtime (usually loaded by `game-content`) and
//! stay outside combat and character state.
mod tables;

pub use tables::{LevelRequirement, LevelTable, LevelTableOracle};
