#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use game_core::{
    CardDefinition, CardId, CharacterId, CharacterRecord, CombatEffect, EnemyId, EnemyTemplate,
    LevelRequirement, LevelTable, StatusEffectKind, TargetType, UserId,
};
use runtime::repository::Result;
use runtime::{
    CharacterGateway, GameSession, InMemoryGateway, RepositoryError, RuntimeConfig, SavePolicy,
};

pub const USER: &str = "player-1";

/// Gateway that fails the next `failures` saves before delegating.
pub struct FlakyGateway {
    inner: InMemoryGateway,
    failures: AtomicU32,
    save_calls: AtomicU32,
}

impl FlakyGateway {
    pub fn new(inner: InMemoryGateway, failures: u32) -> Self {
        Self {
            inner,
            failures: AtomicU32::new(failures),
            save_calls: AtomicU32::new(0),
        }
    }

    pub fn save_calls(&self) -> u32 {
        self.save_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CharacterGateway for FlakyGateway {
    async fn fetch_roster(&self, owner: &UserId) -> Result<Vec<CharacterRecord>> {
        self.inner.fetch_roster(owner).await
    }

    async fn fetch_character(&self, id: &CharacterId) -> Result<Option<CharacterRecord>> {
        self.inner.fetch_character(id).await
    }

    async fn save_character(&self, owner: &UserId, record: &CharacterRecord) -> Result<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(RepositoryError::Unavailable("connection reset".into()));
        }
        self.inner.save_character(owner, record).await
    }
}

/// Gateway that waits `delay` before every save.
pub struct SlowGateway {
    inner: InMemoryGateway,
    delay: Duration,
}

impl SlowGateway {
    pub fn new(inner: InMemoryGateway, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl CharacterGateway for SlowGateway {
    async fn fetch_roster(&self, owner: &UserId) -> Result<Vec<CharacterRecord>> {
        self.inner.fetch_roster(owner).await
    }

    async fn fetch_character(&self, id: &CharacterId) -> Result<Option<CharacterRecord>> {
        self.inner.fetch_character(id).await
    }

    async fn save_character(&self, owner: &UserId, record: &CharacterRecord) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.save_character(owner, record).await
    }
}

pub fn knight() -> CharacterRecord {
    CharacterRecord::new(CharacterId::from("knight"), "Valiant Knight", 100, 50).with_level(1, 95)
}

pub fn mage() -> CharacterRecord {
    CharacterRecord::new(CharacterId::from("mage"), "Arcane Mage", 75, 60).with_level(1, 0)
}

pub fn goblin() -> EnemyTemplate {
    EnemyTemplate {
        id: EnemyId::from("goblin"),
        name: "Goblin".into(),
        base_max_hp: 30,
        base_max_energy: 10,
        deck: vec![],
        behavior: Default::default(),
    }
}

pub fn cards() -> Vec<CardDefinition> {
    vec![
        CardDefinition {
            id: CardId::from("smite"),
            name: "Smite".into(),
            description: String::new(),
            energy_cost: 1,
            target: TargetType::EnemySingle,
            effects: vec![CombatEffect::damage(100)],
        },
        CardDefinition {
            id: CardId::from("ignite"),
            name: "Ignite".into(),
            description: String::new(),
            energy_cost: 1,
            target: TargetType::EnemySingle,
            effects: vec![CombatEffect::status(StatusEffectKind::Burn, 2, 3)],
        },
    ]
}

pub fn levels() -> LevelTable {
    LevelTable::from_requirements([
        LevelRequirement {
            level: 2,
            xp_required: 100,
        },
        LevelRequirement {
            level: 3,
            xp_required: 200,
        },
    ])
}

pub fn fast_config() -> RuntimeConfig {
    RuntimeConfig {
        save_policy: SavePolicy::default().with_retry_delay(Duration::from_millis(5)),
        ..RuntimeConfig::default()
    }
}

/// Session over `gateway` preloaded with the knight and mage.
pub async fn session_with(gateway: Arc<dyn CharacterGateway>) -> GameSession {
    let mut session = GameSession::builder()
        .config(fast_config())
        .gateway(gateway)
        .user(USER)
        .levels(levels())
        .enemies([goblin()])
        .cards(cards())
        .build()
        .unwrap();
    session.reload_roster().await.unwrap();
    session
}

pub fn seeded_gateway() -> InMemoryGateway {
    InMemoryGateway::with_characters(&UserId::from(USER), [knight(), mage()])
}
