//! Combatant state, effect definitions and the action resolver.
//!
//! [`CombatantState`] holds the numbers; [`resolver`] routes effects to the
//! right combatant by handle. Turn sequencing lives in [`crate::engine`].
mod combatant;
mod effect;
mod errors;
pub mod resolver;

pub use combatant::{CombatantSeed, CombatantSnapshot, CombatantState, Side, TickReport};
pub use effect::{CardDefinition, CombatEffect, EffectKind, TargetType};
pub use errors::{ConfigurationError, ResolveError};
pub use resolver::Roster;
