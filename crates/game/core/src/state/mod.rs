//! Persistent records, identifiers and status effect storage.
//!
//! Records are owned by the persistence layer; combat only ever reads them.
//! Status effects are combat-scoped and live inside each combatant.
pub mod ids;
pub mod record;
pub mod status;

pub use ids::{ArchetypeId, CardId, CharacterId, CombatantId, EnemyId, PassiveId, UserId};
pub use record::{AiBehavior, CharacterArchetype, CharacterRecord, EnemyTemplate};
pub use status::{ActiveStatusEffect, StatusEffectKind, StatusEffects, StatusTick};
