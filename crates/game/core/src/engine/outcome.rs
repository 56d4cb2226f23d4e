//! Values returned by the combat engine's lifecycle operations.

use crate::combat::{ConfigurationError, EffectKind, TickReport};
use crate::state::{CharacterId, CombatantId};

/// Handles created by `start_combat`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatStart {
    pub players: Vec<CombatantId>,
    pub enemies: Vec<CombatantId>,
    /// Seeds that were missing and replaced by defaults.
    pub issues: Vec<ConfigurationError>,
}

/// What happened to one resolved effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    Applied {
        kind: EffectKind,
        target: CombatantId,
    },
    Ignored(IgnoreReason),
}

impl Resolution {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Why an effect had no result.
#[derive(Clone, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoreReason {
    /// The target handle has no combat state.
    TargetNotFound(CombatantId),
    /// The source handle has no combat state.
    SourceNotFound(CombatantId),
    /// The effect kind is not understood by this build.
    UnsupportedEffect,
    /// `ApplyStatus` without a status kind.
    MissingStatusKind,
}

/// Per-combatant results of an end-of-turn tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnSummary {
    /// The turn that just ended, starting at 1.
    pub turn: u32,
    /// Combatants that were ticked. Defeated combatants are absent.
    pub ticked: Vec<(CombatantId, TickReport)>,
}

/// Final result of a combat, handed to reward processing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub player_won: bool,
    /// Turns completed before the combat ended.
    pub turns: u32,
    /// Every player-side character that took part, surviving or defeated.
    pub participants: Vec<CharacterId>,
}
