//! Combat-scoped state of one participant.

use crate::config::GameConfig;
use crate::state::{
    ActiveStatusEffect, CharacterId, CharacterRecord, CombatantId, EnemyTemplate,
    StatusEffectKind, StatusEffects,
};

use super::errors::ConfigurationError;

/// Which team a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// The read-only data a combatant is seeded from.
#[derive(Clone, Copy, Debug)]
pub enum CombatantSeed<'a> {
    Character(&'a CharacterRecord),
    Enemy(&'a EnemyTemplate),
}

impl CombatantSeed<'_> {
    fn max_hp(&self) -> u32 {
        match self {
            Self::Character(record) => record.max_hp,
            Self::Enemy(template) => template.base_max_hp,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Character(record) => &record.name,
            Self::Enemy(template) => &template.name,
        }
    }

    fn origin(&self) -> Option<CharacterId> {
        match self {
            Self::Character(record) => Some(record.id.clone()),
            Self::Enemy(_) => None,
        }
    }
}

/// Damage, shield and status bookkeeping for one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    pub id: CombatantId,
    pub side: Side,
    pub name: String,
    current_hp: u32,
    max_hp: u32,
    current_shield: u32,
    status: StatusEffects,
    /// Record this combatant was seeded from (player side only).
    origin: Option<CharacterId>,
}

/// Result of ticking one combatant's status effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Total periodic damage applied (before shield absorption).
    pub damage: u32,
    pub expired: Vec<StatusEffectKind>,
}

impl CombatantState {
    /// Seeds a fresh combatant.
    ///
    /// Missing seed data never aborts combat: the combatant gets
    /// [`GameConfig::DEFAULT_MAX_HP`] and the configuration error is handed
    /// back for the caller to report.
    pub fn initialize(
        id: CombatantId,
        side: Side,
        seed: Option<CombatantSeed<'_>>,
    ) -> (Self, Option<ConfigurationError>) {
        let (max_hp, name, origin, issue) = match seed {
            Some(seed) => (seed.max_hp(), seed.name().to_owned(), seed.origin(), None),
            None => (
                GameConfig::DEFAULT_MAX_HP,
                format!("{side} {id}"),
                None,
                Some(ConfigurationError::MissingCombatantData { combatant: id, side }),
            ),
        };

        let state = Self {
            id,
            side,
            name,
            current_hp: max_hp,
            max_hp,
            current_shield: 0,
            status: StatusEffects::empty(),
            origin,
        };
        (state, issue)
    }

    /// Applies damage, draining the shield before health.
    pub fn take_damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.absorb(amount.unsigned_abs());
    }

    fn absorb(&mut self, amount: u32) {
        let shield_damage = amount.min(self.current_shield);
        self.current_shield -= shield_damage;
        self.current_hp = self.current_hp.saturating_sub(amount - shield_damage);
    }

    /// Adds to the shield pool. No upper bound.
    pub fn receive_shield(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.current_shield = self.current_shield.saturating_add(amount.unsigned_abs());
    }

    /// Applies or merges a status effect. See [`StatusEffects::apply`].
    pub fn receive_status_effect(&mut self, kind: StatusEffectKind, duration: i32, stacks: i32) {
        self.status.apply(kind, duration, stacks);
    }

    /// Runs periodic effects, decrements durations and drops expired effects.
    pub fn tick_status_effects(&mut self) -> TickReport {
        let tick = self.status.advance();
        let mut report = TickReport {
            damage: 0,
            expired: tick.expired.to_vec(),
        };
        for (_, damage) in tick.periodic {
            self.absorb(damage);
            report.damage += damage;
        }
        report
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn current_shield(&self) -> u32 {
        self.current_shield
    }

    pub fn status(&self) -> &StatusEffects {
        &self.status
    }

    pub fn origin(&self) -> Option<&CharacterId> {
        self.origin.as_ref()
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Copies the display-relevant state.
    pub fn snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            id: self.id,
            side: self.side,
            name: self.name.clone(),
            current_hp: self.current_hp,
            max_hp: self.max_hp,
            current_shield: self.current_shield,
            effects: self.status.iter().copied().collect(),
        }
    }
}

/// Read-only view of a combatant for UI consumers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub id: CombatantId,
    pub side: Side,
    pub name: String,
    pub current_hp: u32,
    pub max_hp: u32,
    pub current_shield: u32,
    pub effects: Vec<ActiveStatusEffect>,
}
