//! Experience and level-up rules.
//!
//! # Level-up loop
//!
//! ```text
//! xp += amount
//! while xp_required(level + 1) is defined and xp >= required:
//!     level += 1
//!     xp -= required              (overflow carries into the new level)
//!     max_hp += growth.max_hp_per_level
//!     max_energy += growth.max_energy_per_level
//! ```

use crate::config::StatGrowth;
use crate::env::LevelTableOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::state::CharacterRecord;

/// Rejected XP grants. The record is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("xp grant must be positive, got {0}")]
    NonPositiveAmount(i32),
}

impl GameError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "PROGRESSION_NON_POSITIVE_AMOUNT",
        }
    }
}

/// Result of one XP grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XpGrant {
    pub granted: u32,
    pub levels_gained: u32,
    /// Level after the grant.
    pub level: u32,
    /// XP after the grant, counted from the start of `level`.
    pub xp: u32,
}

impl XpGrant {
    /// A level-up changes the record in a way that must be persisted.
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Applies XP grants and resolves level-ups against a level table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progression {
    growth: StatGrowth,
}

impl Progression {
    pub fn new(growth: StatGrowth) -> Self {
        Self { growth }
    }

    pub fn growth(&self) -> StatGrowth {
        self.growth
    }

    /// Adds `amount` XP to `record` and resolves every level-up it pays for.
    ///
    /// # Arguments
    ///
    /// * `record` - Character receiving the XP
    /// * `amount` - XP to add; must be positive
    /// * `table` - Level requirement lookup
    pub fn grant_xp(
        &self,
        record: &mut CharacterRecord,
        amount: i32,
        table: &(impl LevelTableOracle + ?Sized),
    ) -> Result<XpGrant, ProgressionError> {
        if amount <= 0 {
            return Err(ProgressionError::NonPositiveAmount(amount));
        }
        let granted = amount.unsigned_abs();
        record.xp = record.xp.saturating_add(granted);

        let levels_gained = self.resolve_level_ups(record, table);

        Ok(XpGrant {
            granted,
            levels_gained,
            level: record.level,
            xp: record.xp,
        })
    }

    fn resolve_level_ups(
        &self,
        record: &mut CharacterRecord,
        table: &(impl LevelTableOracle + ?Sized),
    ) -> u32 {
        let mut levels_gained = 0;

        while let Some(required) = record
            .level
            .checked_add(1)
            .and_then(|next| table.xp_required(next))
        {
            if record.xp < required {
                break;
            }
            record.level += 1;
            record.xp -= required;
            record.max_hp = record.max_hp.saturating_add(self.growth.max_hp_per_level);
            record.max_energy = record
                .max_energy
                .saturating_add(self.growth.max_energy_per_level);
            levels_gained += 1;
        }

        levels_gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{LevelRequirement, LevelTable};
    use crate::state::CharacterId;

    fn table(rows: &[(u32, u32)]) -> LevelTable {
        LevelTable::from_requirements(rows.iter().map(|&(level, xp_required)| LevelRequirement {
            level,
            xp_required,
        }))
    }

    fn record(level: u32, xp: u32) -> CharacterRecord {
        CharacterRecord::new(CharacterId::from("c1"), "Ada", 50, 10).with_level(level, xp)
    }

    #[test]
    fn single_level_up_carries_overflow() {
        let mut character = record(1, 95);
        let grant = Progression::default()
            .grant_xp(&mut character, 10, &table(&[(2, 100)]))
            .unwrap();

        assert_eq!(grant.levels_gained, 1);
        assert_eq!(character.level, 2);
        assert_eq!(character.xp, 5);
        assert_eq!(character.max_hp, 60);
        assert_eq!(character.max_energy, 15);
    }

    #[test]
    fn one_grant_can_pay_for_several_levels() {
        let mut character = record(1, 0);
        let grant = Progression::default()
            .grant_xp(&mut character, 170, &table(&[(2, 100), (3, 50)]))
            .unwrap();

        assert_eq!(grant.levels_gained, 2);
        assert_eq!(character.level, 3);
        assert_eq!(character.xp, 20);
        assert_eq!(character.max_hp, 70);
        assert_eq!(character.max_energy, 20);
    }

    #[test]
    fn insufficient_xp_only_accumulates() {
        let mut character = record(1, 10);
        let grant = Progression::default()
            .grant_xp(&mut character, 20, &table(&[(2, 100)]))
            .unwrap();

        assert!(!grant.leveled_up());
        assert_eq!(character.level, 1);
        assert_eq!(character.xp, 30);
        assert_eq!(character.max_hp, 50);
    }

    #[test]
    fn max_level_stops_the_loop_and_keeps_xp() {
        let mut character = record(2, 0);
        let grant = Progression::default()
            .grant_xp(&mut character, 500, &table(&[(2, 100)]))
            .unwrap();

        assert_eq!(grant.levels_gained, 0);
        assert_eq!(character.level, 2);
        assert_eq!(character.xp, 500);
    }

    #[test]
    fn top_of_the_level_range_never_advances() {
        let mut character = record(u32::MAX, 0);
        let grant = Progression::default()
            .grant_xp(&mut character, 50, &table(&[(2, 10)]))
            .unwrap();

        assert_eq!(grant.levels_gained, 0);
        assert_eq!(character.level, u32::MAX);
        assert_eq!(character.xp, 50);
    }

    #[test]
    fn non_positive_grants_are_rejected_untouched() {
        let mut character = record(1, 95);
        let before = character.clone();

        for amount in [0, -5] {
            assert_eq!(
                Progression::default().grant_xp(&mut character, amount, &table(&[(2, 100)])),
                Err(ProgressionError::NonPositiveAmount(amount))
            );
        }
        assert_eq!(character, before);
    }

    #[test]
    fn custom_growth_is_applied_per_level() {
        let growth = StatGrowth {
            max_hp_per_level: 3,
            max_energy_per_level: 1,
        };
        let mut character = record(1, 0);
        Progression::new(growth)
            .grant_xp(&mut character, 30, &table(&[(2, 10), (3, 10), (4, 10)]))
            .unwrap();

        assert_eq!(character.level, 4);
        assert_eq!(character.max_hp, 59);
        assert_eq!(character.max_energy, 13);
    }
}
