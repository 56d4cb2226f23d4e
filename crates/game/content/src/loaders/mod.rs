//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into game-core types. Catalogs keyed
//! by id reject duplicates so a typo in a data file fails loudly at startup.

pub mod archetypes;
pub mod cards;
pub mod config;
pub mod enemies;
pub mod factory;
pub mod levels;
pub mod roster;

pub use archetypes::ArchetypeLoader;
pub use cards::CardLoader;
pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use levels::LevelLoader;
pub use roster::RosterLoader;

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Fails on the first id that appears twice in `items`.
pub(crate) fn ensure_unique<'a, T, K>(
    catalog: &str,
    items: &'a [T],
    key: impl Fn(&'a T) -> K,
) -> LoadResult<()>
where
    K: Eq + Hash + Display,
{
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let id = key(item);
        if seen.contains(&id) {
            anyhow::bail!("Duplicate entry '{}' in {}", id, catalog);
        }
        seen.insert(id);
    }
    Ok(())
}
