//! Error types raised by gateway implementations.

use thiserror::Error;

use game_core::{CharacterId, UserId};

/// Errors surfaced by gateway implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("character store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("character {0} not found")]
    NotFound(CharacterId),

    #[error("character {character_id} is not owned by {owner}")]
    Forbidden {
        character_id: CharacterId,
        owner: UserId,
    },

    #[error("character id {0:?} cannot be stored")]
    InvalidId(CharacterId),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
