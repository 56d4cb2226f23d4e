//! Starting roster loader.
//!
//! The starting roster seeds a user's characters the first time the
//! persistence gateway has nothing stored for them.

use std::path::Path;

use game_core::CharacterRecord;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Roster structure for RON files. Records use their camelCase field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCatalog {
    pub characters: Vec<CharacterRecord>,
}

/// Loader for the default character roster.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterRecord>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterRecord>> {
        let catalog: RosterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        ensure_unique("starting roster", &catalog.characters, |c| &c.id)?;
        for character in &catalog.characters {
            if character.id.is_empty() {
                anyhow::bail!("Roster entry '{}' has an empty id", character.name);
            }
            if character.level < CharacterRecord::STARTING_LEVEL
                || character.max_hp == 0
                || character.max_energy == 0
            {
                anyhow::bail!("Roster entry '{}' has invalid stats", character.id);
            }
        }

        Ok(catalog.characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_records() {
        let roster = RosterLoader::parse(
            r#"(characters: [(
                characterId: "knight",
                name: "Valiant Knight",
                level: 3,
                xp: 250,
                maxHp: 100,
                maxEnergy: 50,
            )])"#,
        )
        .unwrap();

        assert_eq!(roster[0].id.as_str(), "knight");
        assert_eq!(roster[0].level, 3);
        assert!(roster[0].deck.is_empty());
    }

    #[test]
    fn rejects_level_zero() {
        let result = RosterLoader::parse(
            r#"(characters: [(
                characterId: "x", name: "X", level: 0, xp: 0, maxHp: 10, maxEnergy: 10,
            )])"#,
        );
        assert!(result.is_err());
    }
}
