//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::{
    CardDefinition, CharacterArchetype, CharacterRecord, EnemyTemplate, GameConfig, LevelTable,
};

use crate::loaders::{
    ArchetypeLoader, CardLoader, ConfigLoader, EnemyLoader, LevelLoader, LoadResult, RosterLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── levels.toml
/// ├── enemies.ron
/// ├── cards.ron
/// ├── archetypes.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

/// Everything the runtime needs to start a session.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub levels: LevelTable,
    pub enemies: Vec<EnemyTemplate>,
    pub cards: Vec<CardDefinition>,
    pub archetypes: Vec<CharacterArchetype>,
    pub roster: Vec<CharacterRecord>,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the level requirement table from `levels.toml`.
    pub fn load_levels(&self) -> LoadResult<LevelTable> {
        LevelLoader::load(&self.data_dir.join("levels.toml"))
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load the card catalog from `cards.ron`.
    pub fn load_cards(&self) -> LoadResult<Vec<CardDefinition>> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    /// Load playable archetypes from `archetypes.ron`.
    pub fn load_archetypes(&self) -> LoadResult<Vec<CharacterArchetype>> {
        ArchetypeLoader::load(&self.data_dir.join("archetypes.ron"))
    }

    /// Load the starting roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<CharacterRecord>> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Loads every data file, failing on the first one that is missing or invalid.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        let dir = self.data_dir.display();
        Ok(ContentBundle {
            config: self
                .load_config()
                .with_context(|| format!("loading config.toml from {dir}"))?,
            levels: self
                .load_levels()
                .with_context(|| format!("loading levels.toml from {dir}"))?,
            enemies: self
                .load_enemies()
                .with_context(|| format!("loading enemies.ron from {dir}"))?,
            cards: self
                .load_cards()
                .with_context(|| format!("loading cards.ron from {dir}"))?,
            archetypes: self
                .load_archetypes()
                .with_context(|| format!("loading archetypes.ron from {dir}"))?,
            roster: self
                .load_roster()
                .with_context(|| format!("loading roster.ron from {dir}"))?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{LevelTableOracle, StatGrowth};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_loads() {
        let bundle = ContentFactory::bundled().load_all().unwrap();

        assert_eq!(bundle.config.combat_reward_xp, 10);
        assert_eq!(bundle.config.growth, StatGrowth::default());
        assert!(bundle.levels.xp_required(2).is_some());
        assert!(!bundle.enemies.is_empty());
        assert!(!bundle.cards.is_empty());
        assert!(!bundle.archetypes.is_empty());

        let names: Vec<_> = bundle.roster.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Valiant Knight", "Arcane Mage", "Swift Ranger"]);
    }

    #[test]
    fn bundled_decks_reference_known_cards() {
        let bundle = ContentFactory::bundled().load_all().unwrap();
        let known = |id: &game_core::CardId| bundle.cards.iter().any(|card| &card.id == id);

        for record in &bundle.roster {
            assert!(record.deck.iter().all(known), "{} has an unknown card", record.id);
        }
        for enemy in &bundle.enemies {
            assert!(enemy.deck.iter().all(known), "{} has an unknown card", enemy.id);
        }
        for archetype in &bundle.archetypes {
            assert!(archetype.starting_deck.iter().all(known));
        }
    }

    #[test]
    fn missing_file_names_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_all().unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
