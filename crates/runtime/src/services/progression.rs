//! XP grants with asynchronous persistence of level-ups.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use game_core::{
    CharacterId, CharacterRecord, LevelTableOracle, Progression, UserId, XpGrant,
};

use super::persistence::{SavePolicy, save_with_retry};
use crate::api::{Result, RuntimeError};
use crate::events::{EventBus, ProgressionEvent};
use crate::repository::CharacterGateway;

/// How a detached save ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved { attempts: u32 },
    Failed { error: String },
    /// A newer snapshot of the character was already written; this one was
    /// dropped unsaved.
    Superseded,
}

/// Handle to a level-up save running in the background.
///
/// Dropping the ticket does not cancel the save; the task still finishes and
/// publishes its event.
#[derive(Debug)]
pub struct SaveTicket {
    character_id: CharacterId,
    handle: JoinHandle<SaveStatus>,
}

impl SaveTicket {
    pub fn character_id(&self) -> &CharacterId {
        &self.character_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the save task to finish.
    pub async fn wait(self) -> Result<SaveStatus> {
        self.handle.await.map_err(RuntimeError::SaveJoin)
    }
}

/// Result of one accepted XP grant.
#[derive(Debug)]
pub struct XpAward {
    pub character_id: CharacterId,
    pub grant: XpGrant,
    /// Present when the grant caused a level-up.
    pub save: Option<SaveTicket>,
}

/// Per-character save lanes.
///
/// Each lane holds the generation of the newest snapshot written for that
/// character. A save runs with its lane locked, so saves of one character
/// never overlap and a snapshot older than the one on record is skipped.
#[derive(Clone, Default)]
struct SaveLanes {
    lanes: Arc<Mutex<HashMap<CharacterId, Arc<Mutex<u64>>>>>,
}

impl SaveLanes {
    async fn lane(&self, id: &CharacterId) -> Arc<Mutex<u64>> {
        let mut lanes = self.lanes.lock().await;
        Arc::clone(lanes.entry(id.clone()).or_default())
    }
}

/// Everything a detached save task needs.
#[derive(Clone)]
struct SaveWorker {
    gateway: Arc<dyn CharacterGateway>,
    owner: UserId,
    policy: SavePolicy,
    events: EventBus,
    lanes: SaveLanes,
}

impl SaveWorker {
    /// Writes `record` unless a newer generation has landed, then announces it.
    async fn run(
        self,
        record: CharacterRecord,
        generation: u64,
        levels_gained: u32,
    ) -> SaveStatus {
        let lane = self.lanes.lane(&record.id).await;
        let mut landed = lane.lock().await;

        if *landed > generation {
            debug!(
                "Skipping save {} of {}: generation {} already written",
                generation, record.id, *landed
            );
            return SaveStatus::Superseded;
        }

        match save_with_retry(self.gateway.as_ref(), &self.owner, &record, self.policy).await {
            Ok(attempts) => {
                *landed = generation;
                self.events.publish(ProgressionEvent::LevelUp {
                    record,
                    levels_gained,
                });
                SaveStatus::Saved { attempts }
            }
            Err(e) => {
                error!("Level-up of {} was not synced: {}", record.id, e);
                let error = e.to_string();
                self.events.publish(ProgressionEvent::SyncFailed {
                    character_id: record.id,
                    error: error.clone(),
                });
                SaveStatus::Failed { error }
            }
        }
    }
}

/// Applies XP to cached records and persists level-ups through the gateway.
pub struct ProgressionService {
    progression: Progression,
    levels: Arc<dyn LevelTableOracle>,
    worker: SaveWorker,
    generation: AtomicU64,
}

impl ProgressionService {
    pub fn new(
        progression: Progression,
        levels: Arc<dyn LevelTableOracle>,
        gateway: Arc<dyn CharacterGateway>,
        owner: UserId,
        policy: SavePolicy,
        events: EventBus,
    ) -> Self {
        Self {
            progression,
            levels,
            worker: SaveWorker {
                gateway,
                owner,
                policy,
                events,
                lanes: SaveLanes::default(),
            },
            generation: AtomicU64::new(0),
        }
    }

    /// Grants `amount` XP to the roster entry `id`.
    ///
    /// Unknown ids and non-positive amounts are logged and ignored. A level-up
    /// spawns a save task; the cached record keeps its new level whether or
    /// not the save succeeds. Saves of the same character are written in
    /// grant order.
    pub fn grant_xp(
        &self,
        roster: &mut [CharacterRecord],
        id: &CharacterId,
        amount: i32,
    ) -> Option<XpAward> {
        let Some(record) = roster.iter_mut().find(|record| &record.id == id) else {
            warn!("Cannot grant {} XP: character {} is not in the roster", amount, id);
            return None;
        };

        let grant = match self.progression.grant_xp(record, amount, self.levels.as_ref()) {
            Ok(grant) => grant,
            Err(e) => {
                warn!("Ignoring XP grant for {}: {}", id, e);
                return None;
            }
        };

        debug!(
            "{} gained {} XP (level {}, {} XP)",
            id, grant.granted, grant.level, grant.xp
        );
        self.worker.events.publish(ProgressionEvent::XpGranted {
            character_id: id.clone(),
            amount: grant.granted,
            level: grant.level,
            xp: grant.xp,
        });

        let save = if grant.leveled_up() {
            info!(
                "{} reached level {} (+{} max HP, +{} max energy per level)",
                id,
                grant.level,
                self.progression.growth().max_hp_per_level,
                self.progression.growth().max_energy_per_level
            );
            self.spawn_save(record.clone(), grant.levels_gained)
        } else {
            None
        };

        Some(XpAward {
            character_id: id.clone(),
            grant,
            save,
        })
    }

    fn spawn_save(&self, record: CharacterRecord, levels_gained: u32) -> Option<SaveTicket> {
        let character_id = record.id.clone();

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("Cannot save {}: no async runtime available: {}", character_id, e);
                self.worker.events.publish(ProgressionEvent::SyncFailed {
                    character_id,
                    error: e.to_string(),
                });
                return None;
            }
        };

        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let handle = runtime.spawn(
            self.worker
                .clone()
                .run(record, generation, levels_gained),
        );

        Some(SaveTicket {
            character_id,
            handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryGateway;
    use crate::{Event, Topic};

    fn worker(gateway: Arc<InMemoryGateway>) -> SaveWorker {
        SaveWorker {
            gateway,
            owner: UserId::from("player-1"),
            policy: SavePolicy::default(),
            events: EventBus::new(),
            lanes: SaveLanes::default(),
        }
    }

    fn knight(level: u32) -> CharacterRecord {
        CharacterRecord::new(CharacterId::from("knight"), "Knight", 100, 50).with_level(level, 0)
    }

    #[tokio::test]
    async fn older_snapshot_is_skipped_after_a_newer_one_lands() {
        let gateway = Arc::new(InMemoryGateway::new());
        let worker = worker(gateway.clone());
        let mut events = worker.events.subscribe(Topic::Progression);

        let newer = worker.clone().run(knight(3), 2, 1).await;
        let older = worker.clone().run(knight(2), 1, 1).await;

        assert_eq!(newer, SaveStatus::Saved { attempts: 1 });
        assert_eq!(older, SaveStatus::Superseded);

        let stored = gateway
            .fetch_character(&CharacterId::from("knight"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.level, 3);

        assert!(matches!(
            events.recv().await.unwrap(),
            Event::Progression(ProgressionEvent::LevelUp { ref record, .. }) if record.level == 3
        ));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn lanes_are_kept_per_character() {
        let gateway = Arc::new(InMemoryGateway::new());
        let worker = worker(gateway.clone());

        let mut mage = knight(2);
        mage.id = CharacterId::from("mage");

        assert_eq!(
            worker.clone().run(knight(3), 5, 1).await,
            SaveStatus::Saved { attempts: 1 }
        );
        assert_eq!(
            worker.clone().run(mage, 4, 1).await,
            SaveStatus::Saved { attempts: 1 }
        );
    }
}
