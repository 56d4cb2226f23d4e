//! Session context that owns one user's combat and progression state.
//!
//! A [`GameSession`] is built once through [`SessionBuilder`] with every
//! collaborator injected up front. It drives the combat engine, applies
//! rewards, and publishes what happened on the [`EventBus`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use game_content::ContentBundle;
use game_core::{
    CardDefinition, CardId, CharacterArchetype, CharacterId, CharacterRecord, CombatEffect,
    CombatEngine, CombatOutcome, CombatPhase, CombatStart, CombatantId, CombatantSnapshot,
    CombatantState, ConfigurationError, EnemyId, EnemyTemplate, GameConfig, LevelTable,
    LevelTableOracle, Progression, Resolution, Side, TurnSummary, UserId, XpGrant,
};

use crate::api::{Result, RuntimeError};
use crate::events::{CombatEvent, Event, EventBus, Topic};
use crate::repository::CharacterGateway;
use crate::services::{
    CombatRewards, ProgressionService, SavePolicy, SaveStatus, SaveTicket, XpAward,
    save_with_retry,
};

/// Runtime configuration shared across the session and its services.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub save_policy: SavePolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            save_policy: SavePolicy::default(),
        }
    }
}

/// One user's game: roster cache, active combat, catalogs, and event bus.
pub struct GameSession {
    user: UserId,
    gateway: Arc<dyn CharacterGateway>,
    save_policy: SavePolicy,
    engine: CombatEngine,
    roster: Vec<CharacterRecord>,
    starting_roster: Vec<CharacterRecord>,
    enemies: HashMap<EnemyId, EnemyTemplate>,
    cards: HashMap<CardId, CardDefinition>,
    progression: ProgressionService,
    rewards: CombatRewards,
    events: EventBus,
    pending_saves: Vec<SaveTicket>,
}

impl GameSession {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    // ===== roster =====

    /// Replaces the roster cache with what the gateway stores for this user.
    ///
    /// A user with no stored characters is given the starting roster, which
    /// is saved before it is used. Returns the number of characters loaded.
    pub async fn reload_roster(&mut self) -> Result<usize> {
        let mut roster = self.gateway.fetch_roster(&self.user).await?;

        if roster.is_empty() && !self.starting_roster.is_empty() {
            info!(
                "No characters stored for {}, seeding {} starting characters",
                self.user,
                self.starting_roster.len()
            );
            for record in &self.starting_roster {
                save_with_retry(self.gateway.as_ref(), &self.user, record, self.save_policy)
                    .await?;
            }
            roster = self.starting_roster.clone();
        }

        debug!("Roster for {} holds {} characters", self.user, roster.len());
        self.roster = roster;
        Ok(self.roster.len())
    }

    /// Creates a level 1 character from `archetype` and saves it.
    pub async fn create_character(
        &mut self,
        id: CharacterId,
        name: impl Into<String>,
        archetype: &CharacterArchetype,
    ) -> Result<&CharacterRecord> {
        if self.roster.iter().any(|record| record.id == id)
            || self.gateway.fetch_character(&id).await?.is_some()
        {
            return Err(RuntimeError::DuplicateCharacter(id));
        }

        let record = CharacterRecord::from_archetype(id, name, archetype);
        save_with_retry(self.gateway.as_ref(), &self.user, &record, self.save_policy).await?;
        info!(
            "Created {} ({}) from archetype {}",
            record.name, record.id, archetype.id
        );

        self.roster.push(record);
        let index = self.roster.len() - 1;
        Ok(&self.roster[index])
    }

    pub fn roster(&self) -> &[CharacterRecord] {
        &self.roster
    }

    pub fn character(&self, id: &CharacterId) -> Option<&CharacterRecord> {
        self.roster.iter().find(|record| &record.id == id)
    }

    // ===== catalogs =====

    pub fn enemy(&self, id: &EnemyId) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    pub fn card(&self, id: &CardId) -> Option<&CardDefinition> {
        self.cards.get(id)
    }

    // ===== combat =====

    /// Starts a combat between roster characters and catalog enemies.
    ///
    /// Ids that do not resolve are still seated with default stats and
    /// logged as configuration errors.
    pub fn start_combat(
        &mut self,
        players: &[CharacterId],
        enemies: &[EnemyId],
    ) -> Result<CombatStart> {
        let player_seeds: Vec<Option<&CharacterRecord>> = players
            .iter()
            .map(|id| self.roster.iter().find(|record| &record.id == id))
            .collect();
        let enemy_seeds: Vec<Option<&EnemyTemplate>> =
            enemies.iter().map(|id| self.enemies.get(id)).collect();

        let start = match self.engine.start_combat(&player_seeds, &enemy_seeds) {
            Ok(start) => start,
            Err(e) => {
                error!("Cannot start combat: {}", e);
                return Err(e.into());
            }
        };

        for issue in &start.issues {
            error!("Combat configuration error: {}", issue);
        }
        info!(
            "Combat started: {} players vs {} enemies",
            start.players.len(),
            start.enemies.len()
        );

        self.events.publish(CombatEvent::Started(start.clone()));
        Ok(start)
    }

    /// Applies one effect from `source` to `target`.
    pub fn resolve_action(
        &mut self,
        source: CombatantId,
        target: CombatantId,
        effect: &CombatEffect,
    ) -> Result<Resolution> {
        let resolution = self.engine.resolve_action(source, target, effect)?;
        log_resolution(source, &resolution);

        self.events.publish(CombatEvent::ActionResolved {
            source,
            resolutions: vec![resolution.clone()],
        });
        Ok(resolution)
    }

    /// Plays a catalog card from `source`.
    pub fn play_card(
        &mut self,
        source: CombatantId,
        target: CombatantId,
        card: &CardId,
    ) -> Result<Vec<Resolution>> {
        let Some(definition) = self.cards.get(card) else {
            warn!("{} tried to play unknown card {}", source, card);
            return Err(RuntimeError::UnknownCard(card.clone()));
        };

        let resolutions = self.engine.play_card(source, target, definition)?;
        debug!("{} played {}", source, definition.name);
        for resolution in &resolutions {
            log_resolution(source, resolution);
        }

        self.events.publish(CombatEvent::ActionResolved {
            source,
            resolutions: resolutions.clone(),
        });
        Ok(resolutions)
    }

    /// Ticks status effects and advances the turn counter.
    pub fn end_of_turn(&mut self) -> Result<TurnSummary> {
        let summary = self.engine.end_of_turn()?;

        for (id, report) in &summary.ticked {
            if report.damage > 0 {
                debug!("{} took {} periodic damage", id, report.damage);
            }
            for kind in &report.expired {
                debug!("{} is no longer affected by {}", id, kind);
            }
        }
        debug!("Turn {} ended", summary.turn);

        self.events.publish(CombatEvent::TurnEnded(summary.clone()));
        Ok(summary)
    }

    /// The side that has won, if the other side has nobody standing.
    pub fn victor(&self) -> Option<Side> {
        self.engine.victor()
    }

    /// Ends the combat and grants rewards when the players won.
    ///
    /// Returns the outcome with the XP grants it produced. Level-up saves keep
    /// running in the background; see [`wait_for_pending_saves`](Self::wait_for_pending_saves).
    pub fn end_combat(&mut self, player_won: bool) -> Result<(CombatOutcome, Vec<XpGrant>)> {
        let outcome = match self.engine.end_combat(player_won) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Ignoring end_combat: {}", e);
                return Err(e.into());
            }
        };

        info!(
            "Combat ended after {} turns ({})",
            outcome.turns,
            if player_won { "victory" } else { "defeat" }
        );
        self.events.publish(CombatEvent::Ended(outcome.clone()));

        let awards = self
            .rewards
            .on_combat_end(&outcome, &self.progression, &mut self.roster);
        let grants = self.track_awards(awards);

        Ok((outcome, grants))
    }

    pub fn phase(&self) -> CombatPhase {
        self.engine.phase()
    }

    pub fn turn(&self) -> u32 {
        self.engine.turn()
    }

    pub fn combatants(&self) -> impl Iterator<Item = &CombatantState> {
        self.engine.combatants()
    }

    pub fn snapshot(&self, id: CombatantId) -> Option<CombatantSnapshot> {
        self.engine.snapshot(id)
    }

    // ===== progression =====

    /// Grants XP to a roster character outside of combat rewards.
    ///
    /// Returns `None` when the id is unknown or the amount is not positive.
    pub fn grant_xp(&mut self, id: &CharacterId, amount: i32) -> Option<XpGrant> {
        let award = self.progression.grant_xp(&mut self.roster, id, amount)?;
        self.track_awards(vec![award]).pop()
    }

    fn track_awards(&mut self, awards: Vec<XpAward>) -> Vec<XpGrant> {
        self.pending_saves.retain(|ticket| !ticket.is_finished());
        awards
            .into_iter()
            .map(|award| {
                self.pending_saves.extend(award.save);
                award.grant
            })
            .collect()
    }

    /// Number of level-up saves started and not yet awaited.
    pub fn pending_saves(&self) -> usize {
        self.pending_saves.len()
    }

    /// Waits for every outstanding level-up save.
    pub async fn wait_for_pending_saves(&mut self) -> Result<Vec<(CharacterId, SaveStatus)>> {
        let mut statuses = Vec::with_capacity(self.pending_saves.len());
        for ticket in std::mem::take(&mut self.pending_saves) {
            let id = ticket.character_id().clone();
            statuses.push((id, ticket.wait().await?));
        }
        Ok(statuses)
    }

    // ===== events =====

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    /// Cloneable handle to the session's event bus.
    pub fn events(&self) -> EventBus {
        self.events.clone()
    }
}

fn log_resolution(source: CombatantId, resolution: &Resolution) {
    match resolution {
        Resolution::Applied { kind, target } => {
            debug!("{} applied {} to {}", source, kind, target)
        }
        Resolution::Ignored(reason) => warn!("Effect from {} ignored: {}", source, reason),
    }
}

/// Builder for [`GameSession`] with flexible configuration.
pub struct SessionBuilder {
    config: RuntimeConfig,
    gateway: Option<Arc<dyn CharacterGateway>>,
    user: Option<UserId>,
    levels: Option<Arc<dyn LevelTableOracle>>,
    enemies: Vec<EnemyTemplate>,
    cards: Vec<CardDefinition>,
    starting_roster: Vec<CharacterRecord>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            gateway: None,
            user: None,
            levels: None,
            enemies: Vec::new(),
            cards: Vec::new(),
            starting_roster: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required character gateway
    pub fn gateway(mut self, gateway: Arc<dyn CharacterGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Set required owning user
    pub fn user(mut self, user: impl Into<UserId>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the level requirement table
    pub fn levels(mut self, levels: impl LevelTableOracle + 'static) -> Self {
        self.levels = Some(Arc::new(levels));
        self
    }

    pub fn enemies(mut self, enemies: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        self.enemies.extend(enemies);
        self
    }

    pub fn cards(mut self, cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        self.cards.extend(cards);
        self
    }

    /// Characters given to a user who has none stored yet.
    pub fn starting_roster(mut self, roster: impl IntoIterator<Item = CharacterRecord>) -> Self {
        self.starting_roster.extend(roster);
        self
    }

    /// Applies everything a [`ContentBundle`] provides.
    pub fn content(mut self, content: ContentBundle) -> Self {
        self.config.game_config = content.config;
        self.levels(content.levels)
            .enemies(content.enemies)
            .cards(content.cards)
            .starting_roster(content.roster)
    }

    pub fn build(self) -> Result<GameSession> {
        let gateway = self.gateway.ok_or(RuntimeError::MissingGateway)?;
        let user = self.user.ok_or(RuntimeError::MissingUser)?;

        let levels = self.levels.unwrap_or_else(|| {
            error!("{}", ConfigurationError::MissingLevelTable);
            Arc::new(LevelTable::empty()) as Arc<dyn LevelTableOracle>
        });

        let events = EventBus::with_capacity(self.config.event_buffer_size);
        let game_config = &self.config.game_config;

        let progression = ProgressionService::new(
            Progression::new(game_config.growth),
            levels,
            Arc::clone(&gateway),
            user.clone(),
            self.config.save_policy,
            events.clone(),
        );

        Ok(GameSession {
            user,
            gateway,
            save_policy: self.config.save_policy,
            engine: CombatEngine::new(),
            roster: Vec::new(),
            starting_roster: self.starting_roster,
            enemies: self
                .enemies
                .into_iter()
                .map(|enemy| (enemy.id.clone(), enemy))
                .collect(),
            cards: self
                .cards
                .into_iter()
                .map(|card| (card.id.clone(), card))
                .collect(),
            progression,
            rewards: CombatRewards::new(game_config.combat_reward_xp),
            events,
            pending_saves: Vec::new(),
        })
    }
}
