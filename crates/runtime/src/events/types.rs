//! Event types for different topics.

use game_core::{
    CharacterId, CharacterRecord, CombatOutcome, CombatStart, CombatantId, Resolution, TurnSummary,
};

/// Events related to the combat lifecycle.
#[derive(Debug, Clone)]
pub enum CombatEvent {
    /// Combatants were seeded and the combat is active.
    Started(CombatStart),

    /// An effect or card was resolved.
    ActionResolved {
        source: CombatantId,
        resolutions: Vec<Resolution>,
    },

    /// Status effects were ticked for every living combatant.
    TurnEnded(TurnSummary),

    /// The combat ended; rewards follow on the progression topic.
    Ended(CombatOutcome),
}

/// Events related to XP, levels, and persistence of character records.
#[derive(Debug, Clone)]
pub enum ProgressionEvent {
    /// XP was added to a character. Published for every accepted grant.
    XpGranted {
        character_id: CharacterId,
        amount: u32,
        level: u32,
        xp: u32,
    },

    /// A leveled-up record was saved by the gateway.
    ///
    /// Only published after the save succeeded, so listeners can treat the
    /// record as durable.
    LevelUp {
        record: CharacterRecord,
        levels_gained: u32,
    },

    /// Every save attempt failed. The in-memory record keeps the new level.
    SyncFailed {
        character_id: CharacterId,
        error: String,
    },
}
