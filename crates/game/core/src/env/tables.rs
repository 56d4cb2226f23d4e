use std::collections::BTreeMap;

/// Oracle exposing the XP requirement for each level.
pub trait LevelTableOracle: Send + Sync {
    /// XP needed to advance *into* `level`.
    ///
    /// `None` means `level` is past the end of the table (max level reached).
    fn xp_required(&self, level: u32) -> Option<u32>;
}

/// One row of the level table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelRequirement {
    pub level: u32,
    pub xp_required: u32,
}

/// Ordered level → XP requirement table.
///
/// Rows with a zero requirement are treated as missing so a malformed table
/// can never produce an endless level-up loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelTable {
    requirements: BTreeMap<u32, u32>,
}

impl LevelTable {
    /// A table without rows. Nobody can level up.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from rows. A later row for the same level wins.
    pub fn from_requirements(rows: impl IntoIterator<Item = LevelRequirement>) -> Self {
        Self {
            requirements: rows
                .into_iter()
                .map(|row| (row.level, row.xp_required))
                .collect(),
        }
    }

    /// Highest level listed in the table.
    pub fn max_level(&self) -> Option<u32> {
        self.requirements.keys().next_back().copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = LevelRequirement> + '_ {
        self.requirements
            .iter()
            .map(|(&level, &xp_required)| LevelRequirement { level, xp_required })
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl LevelTableOracle for LevelTable {
    fn xp_required(&self, level: u32) -> Option<u32> {
        self.requirements
            .get(&level)
            .copied()
            .filter(|&xp| xp > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_miss_past_the_end_and_on_zero_rows() {
        let table = LevelTable::from_requirements([
            LevelRequirement { level: 2, xp_required: 100 },
            LevelRequirement { level: 3, xp_required: 0 },
        ]);

        assert_eq!(table.xp_required(2), Some(100));
        assert_eq!(table.xp_required(3), None);
        assert_eq!(table.xp_required(4), None);
        assert_eq!(table.max_level(), Some(3));
        assert_eq!(LevelTable::empty().xp_required(2), None);
    }
}
