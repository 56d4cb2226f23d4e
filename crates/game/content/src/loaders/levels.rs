//! Level requirement table loader.

use std::path::Path;

use game_core::{LevelRequirement, LevelTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Level table structure for TOML files.
///
/// ```toml
/// [[levels]]
/// level = 2
/// xp_required = 100
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub levels: Vec<LevelRequirement>,
}

/// Loader for the level requirement table.
pub struct LevelLoader;

impl LevelLoader {
    pub fn load(path: &Path) -> LoadResult<LevelTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<LevelTable> {
        let catalog: LevelCatalog = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level table TOML: {}", e))?;

        ensure_unique("level table", &catalog.levels, |row| row.level)?;
        if let Some(row) = catalog.levels.iter().find(|row| row.level < 2) {
            anyhow::bail!(
                "Level table entry for level {} is invalid: characters start at level 1",
                row.level
            );
        }

        Ok(LevelTable::from_requirements(catalog.levels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::LevelTableOracle;

    #[test]
    fn parses_rows_in_any_order() {
        let table = LevelLoader::parse(
            r#"
            [[levels]]
            level = 3
            xp_required = 250

            [[levels]]
            level = 2
            xp_required = 100
            "#,
        )
        .unwrap();

        assert_eq!(table.xp_required(2), Some(100));
        assert_eq!(table.xp_required(3), Some(250));
        assert_eq!(table.max_level(), Some(3));
    }

    #[test]
    fn rejects_duplicate_levels() {
        let err = LevelLoader::parse(
            r#"
            [[levels]]
            level = 2
            xp_required = 100

            [[levels]]
            level = 2
            xp_required = 120
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("Duplicate entry '2'"));
    }

    #[test]
    fn rejects_starting_level_rows() {
        assert!(LevelLoader::parse("[[levels]]\nlevel = 1\nxp_required = 0\n").is_err());
    }
}
