//! Character archetype loader.

use std::path::Path;

use game_core::CharacterArchetype;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Archetype catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeCatalog {
    pub archetypes: Vec<CharacterArchetype>,
}

/// Loader for playable archetypes used during character creation.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterArchetype>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterArchetype>> {
        let catalog: ArchetypeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype catalog RON: {}", e))?;

        ensure_unique("archetype catalog", &catalog.archetypes, |a| &a.id)?;
        if let Some(archetype) = catalog
            .archetypes
            .iter()
            .find(|a| a.base_max_hp == 0 || a.base_max_energy == 0)
        {
            anyhow::bail!("Archetype '{}' must have positive base stats", archetype.id);
        }

        Ok(catalog.archetypes)
    }
}
