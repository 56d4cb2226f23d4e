//! Persistence contract for character records.

use async_trait::async_trait;

use game_core::{CharacterId, CharacterRecord, UserId};

use super::Result;

/// Remote store of a user's characters.
///
/// Implementations may be backed by an HTTP service, a database, files, or
/// memory. Every call may fail; callers decide whether to retry.
#[async_trait]
pub trait CharacterGateway: Send + Sync {
    /// All characters owned by `owner`, in creation order.
    async fn fetch_roster(&self, owner: &UserId) -> Result<Vec<CharacterRecord>>;

    /// One character by id, or `None` if it was never saved.
    async fn fetch_character(&self, id: &CharacterId) -> Result<Option<CharacterRecord>>;

    /// Inserts or replaces the record with the same id.
    ///
    /// Saving the same record twice has the same effect as saving it once.
    /// Saving a record owned by someone else fails with
    /// [`RepositoryError::Forbidden`](super::RepositoryError::Forbidden).
    async fn save_character(&self, owner: &UserId, record: &CharacterRecord) -> Result<()>;
}
