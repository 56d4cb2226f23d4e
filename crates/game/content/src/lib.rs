//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML data files that feed the
//! combat and progression rules:
//! - Level requirement table (TOML)
//! - Game configuration (TOML)
//! - Enemy templates (RON)
//! - Card catalog (RON)
//! - Character archetypes (RON)
//! - Starting roster (RON)
//!
//! Content is consumed by the runtime and never appears in combat state.
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ArchetypeLoader, CardLoader, ConfigLoader, ContentBundle, ContentFactory, EnemyLoader,
    LevelLoader, LoadResult, RosterLoader,
};
