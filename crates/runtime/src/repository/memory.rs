//! In-memory CharacterGateway implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use game_core::{CharacterId, CharacterRecord, UserId};

use super::{CharacterGateway, RepositoryError, Result};

struct StoredCharacter {
    owner: UserId,
    created: u64,
    record: CharacterRecord,
}

#[derive(Default)]
struct Store {
    characters: HashMap<CharacterId, StoredCharacter>,
    next_seq: u64,
}

/// In-memory implementation of [`CharacterGateway`].
#[derive(Default)]
pub struct InMemoryGateway {
    store: RwLock<Store>,
}

impl InMemoryGateway {
    /// Create a new empty in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with `records` already owned by `owner`.
    pub fn with_characters(owner: &UserId, records: impl IntoIterator<Item = CharacterRecord>) -> Self {
        let mut store = Store::default();
        for record in records {
            store.upsert(owner, record);
        }
        Self {
            store: RwLock::new(store),
        }
    }

    /// Number of stored characters across all owners.
    pub fn len(&self) -> usize {
        self.store
            .read()
            .map(|store| store.characters.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Store {
    fn upsert(&mut self, owner: &UserId, record: CharacterRecord) {
        match self.characters.get_mut(&record.id) {
            Some(stored) => stored.record = record,
            None => {
                let created = self.next_seq;
                self.next_seq += 1;
                self.characters.insert(
                    record.id.clone(),
                    StoredCharacter {
                        owner: owner.clone(),
                        created,
                        record,
                    },
                );
            }
        }
    }
}

#[async_trait]
impl CharacterGateway for InMemoryGateway {
    async fn fetch_roster(&self, owner: &UserId) -> Result<Vec<CharacterRecord>> {
        let store = self
            .store
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut owned: Vec<&StoredCharacter> = store
            .characters
            .values()
            .filter(|stored| &stored.owner == owner)
            .collect();
        owned.sort_unstable_by_key(|stored| stored.created);

        Ok(owned.into_iter().map(|stored| stored.record.clone()).collect())
    }

    async fn fetch_character(&self, id: &CharacterId) -> Result<Option<CharacterRecord>> {
        let store = self
            .store
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(store.characters.get(id).map(|stored| stored.record.clone()))
    }

    async fn save_character(&self, owner: &UserId, record: &CharacterRecord) -> Result<()> {
        let mut store = self
            .store
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if let Some(stored) = store.characters.get(&record.id)
            && &stored.owner != owner
        {
            return Err(RepositoryError::Forbidden {
                character_id: record.id.clone(),
                owner: owner.clone(),
            });
        }

        store.upsert(owner, record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CharacterRecord {
        CharacterRecord::new(CharacterId::from(id), id, 50, 20)
    }

    #[tokio::test]
    async fn roster_keeps_creation_order_across_updates() {
        let owner = UserId::from("u1");
        let gateway = InMemoryGateway::with_characters(&owner, [record("b"), record("a")]);

        gateway
            .save_character(&owner, &record("b").with_level(4, 0))
            .await
            .unwrap();

        let roster = gateway.fetch_roster(&owner).await.unwrap();
        let ids: Vec<_> = roster.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(roster[0].level, 4);
    }

    #[tokio::test]
    async fn other_owners_cannot_overwrite() {
        let gateway = InMemoryGateway::with_characters(&UserId::from("u1"), [record("a")]);

        let err = gateway
            .save_character(&UserId::from("u2"), &record("a").with_level(9, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Forbidden { .. }));
        let stored = gateway.fetch_character(&CharacterId::from("a")).await.unwrap();
        assert_eq!(stored.unwrap().level, 1);
        assert!(gateway.fetch_roster(&UserId::from("u2")).await.unwrap().is_empty());
    }
}
