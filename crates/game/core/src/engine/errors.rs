//! Error types for the combat lifecycle.

use crate::combat::Side;
use crate::error::{ErrorSeverity, GameError};

use super::CombatPhase;

/// Lifecycle misuse of a [`CombatEngine`](super::CombatEngine).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("a combat is already active on this engine")]
    AlreadyActive,

    #[error("cannot start combat: {side} roster is empty")]
    EmptyRoster { side: Side },

    #[error("cannot start combat: {count} combatants exceed the handle range")]
    TooManyCombatants { count: usize },

    #[error("{operation} requires an active combat (phase: {phase})")]
    NotActive {
        operation: &'static str,
        phase: CombatPhase,
    },
}

impl CombatError {
    pub(crate) fn not_active(operation: &'static str, phase: CombatPhase) -> Self {
        Self::NotActive { operation, phase }
    }
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyActive | Self::EmptyRoster { .. } | Self::TooManyCombatants { .. } => {
                ErrorSeverity::Fatal
            }
            Self::NotActive { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyActive => "COMBAT_ALREADY_ACTIVE",
            Self::EmptyRoster { .. } => "COMBAT_EMPTY_ROSTER",
            Self::TooManyCombatants { .. } => "COMBAT_TOO_MANY_COMBATANTS",
            Self::NotActive { .. } => "COMBAT_NOT_ACTIVE",
        }
    }
}
