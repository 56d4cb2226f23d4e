//! Deterministic combat and progression rules shared across clients.
//!
//! `game-core` defines the canonical rules (combatant state, status effects,
//! the combat lifecycle, XP and level-ups) and exposes pure APIs that the
//! runtime drives. Nothing here performs I/O or logs; every outcome is
//! returned to the caller. All combatant mutation flows through
//! [`engine::CombatEngine`], all record mutation through
//! [`progression::Progression`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod progression;
pub mod state;

pub use combat::{
    CardDefinition, CombatEffect, CombatantSnapshot, CombatantState, ConfigurationError,
    EffectKind, ResolveError, Side, TargetType, TickReport,
};
pub use config::{GameConfig, StatGrowth};
pub use engine::{
    CombatEngine, CombatError, CombatOutcome, CombatPhase, CombatStart, IgnoreReason, Resolution,
    TurnSummary,
};
pub use env::{LevelRequirement, LevelTable, LevelTableOracle};
pub use error::{ErrorSeverity, GameError};
pub use progression::{Progression, ProgressionError, XpGrant};
pub use state::{
    ActiveStatusEffect, AiBehavior, ArchetypeId, CardId, CharacterArchetype, CharacterId,
    CharacterRecord, CombatantId, EnemyId, EnemyTemplate, PassiveId, StatusEffectKind,
    StatusEffects, UserId,
};
