//! Errors raised while seeding combatants and resolving effects.

use crate::error::{ErrorSeverity, GameError};
use crate::state::CombatantId;

use super::combatant::Side;

/// Data needed to seed combat was missing; a default was substituted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigurationError {
    #[error("no character data for {side} combatant {combatant}, using default max hp")]
    MissingCombatantData { combatant: CombatantId, side: Side },

    #[error("no level table assigned, level-ups are disabled")]
    MissingLevelTable,
}

impl GameError for ConfigurationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCombatantData { .. } => "CONFIG_MISSING_COMBATANT_DATA",
            Self::MissingLevelTable => "CONFIG_MISSING_LEVEL_TABLE",
        }
    }
}

/// A resolver call that had no effect.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveError {
    #[error("combatant {0} has no combat state")]
    TargetNotFound(CombatantId),
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TargetNotFound(_) => "RESOLVE_TARGET_NOT_FOUND",
        }
    }
}
