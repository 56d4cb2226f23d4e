//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the combat engine, the persistence gateway, and save
//! tasks so clients can bubble them up with consistent context.
use thiserror::Error;

use game_core::{CardId, CharacterId, CombatError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("save task join failed")]
    SaveJoin(#[source] tokio::task::JoinError),

    #[error("session requires a character gateway before building")]
    MissingGateway,

    #[error("session requires a user id before building")]
    MissingUser,

    #[error("card {0} is not in the catalog")]
    UnknownCard(CardId),

    #[error("character {0} already exists")]
    DuplicateCharacter(CharacterId),
}
