//! Combat lifecycle and action resolution.
//!
//! The [`CombatEngine`] owns the combatants of a single combat and drives it
//! through `Setup → Active → Ended`. It is the only place combatant state is
//! mutated; callers resolve effects, end turns and end the combat through it
//! and receive plain values describing what happened.

mod errors;
mod outcome;

pub use errors::CombatError;
pub use outcome::{CombatOutcome, CombatStart, IgnoreReason, Resolution, TurnSummary};

use crate::combat::resolver::{self, Roster};
use crate::combat::{
    CardDefinition, CombatEffect, CombatantSeed, CombatantSnapshot, CombatantState, EffectKind,
    ResolveError, Side, TargetType,
};
use crate::state::{CharacterRecord, CombatantId, EnemyTemplate};

/// Lifecycle phase of a combat engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPhase {
    #[default]
    Setup,
    Active,
    Ended,
}

/// Single-combat state machine.
///
/// Not re-entrant: only one combat may be active at a time, and starting a
/// second one is rejected rather than overwriting the first. Once a combat
/// has ended the same engine can start a new one.
#[derive(Clone, Debug, Default)]
pub struct CombatEngine {
    phase: CombatPhase,
    roster: Roster,
    turn: u32,
}

impl CombatEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds every combatant and activates the combat.
    ///
    /// Player handles are assigned first, then enemies, counting up from 0.
    /// `None` entries are seeded with defaults and reported in
    /// [`CombatStart::issues`]. Handles are `u16`, so at most 65536
    /// combatants fit in one combat.
    pub fn start_combat(
        &mut self,
        players: &[Option<&CharacterRecord>],
        enemies: &[Option<&EnemyTemplate>],
    ) -> Result<CombatStart, CombatError> {
        if self.phase == CombatPhase::Active {
            return Err(CombatError::AlreadyActive);
        }
        if players.is_empty() {
            return Err(CombatError::EmptyRoster { side: Side::Player });
        }
        if enemies.is_empty() {
            return Err(CombatError::EmptyRoster { side: Side::Enemy });
        }

        let mut roster = Roster::new();
        let mut start = CombatStart {
            players: Vec::with_capacity(players.len()),
            enemies: Vec::with_capacity(enemies.len()),
            issues: Vec::new(),
        };

        let count = players.len() + enemies.len();
        let seeds = players
            .iter()
            .map(|p| (Side::Player, p.map(CombatantSeed::Character)))
            .chain(
                enemies
                    .iter()
                    .map(|e| (Side::Enemy, e.map(CombatantSeed::Enemy))),
            );

        for (index, (side, seed)) in seeds.enumerate() {
            let id = u16::try_from(index)
                .map(CombatantId)
                .map_err(|_| CombatError::TooManyCombatants { count })?;
            let (combatant, issue) = CombatantState::initialize(id, side, seed);
            start.issues.extend(issue);
            match side {
                Side::Player => start.players.push(id),
                Side::Enemy => start.enemies.push(id),
            }
            roster.push(combatant);
        }

        self.roster = roster;
        self.turn = 0;
        self.phase = CombatPhase::Active;
        Ok(start)
    }

    /// Applies one effect from `_source` to `target`.
    ///
    /// Effects do not scale with the source yet. Lookup failures and
    /// unsupported kinds are not errors: they come back as
    /// [`Resolution::Ignored`] with no state change.
    pub fn resolve_action(
        &mut self,
        _source: CombatantId,
        target: CombatantId,
        effect: &CombatEffect,
    ) -> Result<Resolution, CombatError> {
        self.ensure_active("resolve_action")?;
        Ok(self.apply_effect(target, effect))
    }

    /// Resolves every effect of `card` against its target set.
    ///
    /// `target` is only consulted for [`TargetType::EnemySingle`].
    pub fn play_card(
        &mut self,
        source: CombatantId,
        target: CombatantId,
        card: &CardDefinition,
    ) -> Result<Vec<Resolution>, CombatError> {
        self.ensure_active("play_card")?;

        let Some(source_side) = self.roster.get(source).map(|c| c.side) else {
            return Ok(vec![Resolution::Ignored(IgnoreReason::SourceNotFound(source))]);
        };

        let targets: Vec<CombatantId> = match card.target {
            TargetType::SelfTarget => vec![source],
            TargetType::EnemySingle => vec![target],
            TargetType::EnemyAll => self
                .roster
                .side(source_side.opposite())
                .filter(|c| c.is_alive())
                .map(|c| c.id)
                .collect(),
        };

        let mut resolutions = Vec::with_capacity(card.effects.len() * targets.len());
        for effect in &card.effects {
            for &target in &targets {
                resolutions.push(self.apply_effect(target, effect));
            }
        }
        Ok(resolutions)
    }

    fn apply_effect(&mut self, target: CombatantId, effect: &CombatEffect) -> Resolution {
        let result = match effect.kind {
            EffectKind::Damage => resolver::deal_damage(&mut self.roster, target, effect.value),
            EffectKind::Shield => resolver::apply_shield(&mut self.roster, target, effect.value),
            EffectKind::ApplyStatus => {
                let Some(kind) = effect.status else {
                    return Resolution::Ignored(IgnoreReason::MissingStatusKind);
                };
                resolver::apply_status_effect(
                    &mut self.roster,
                    target,
                    kind,
                    effect.duration,
                    effect.stacks,
                )
            }
            EffectKind::Unknown => return Resolution::Ignored(IgnoreReason::UnsupportedEffect),
        };

        match result {
            Ok(()) => Resolution::Applied {
                kind: effect.kind,
                target,
            },
            Err(ResolveError::TargetNotFound(id)) => {
                Resolution::Ignored(IgnoreReason::TargetNotFound(id))
            }
        }
    }

    /// Ticks status effects of every combatant that still has health.
    pub fn end_of_turn(&mut self) -> Result<TurnSummary, CombatError> {
        self.ensure_active("end_of_turn")?;

        let ticked = self
            .roster
            .iter_mut()
            .filter(|c| c.is_alive())
            .map(|c| (c.id, c.tick_status_effects()))
            .collect();

        self.turn += 1;
        Ok(TurnSummary {
            turn: self.turn,
            ticked,
        })
    }

    /// The side that has won, if the other side has nobody standing.
    pub fn victor(&self) -> Option<Side> {
        if self.phase != CombatPhase::Active {
            return None;
        }
        match (
            self.roster.has_living(Side::Player),
            self.roster.has_living(Side::Enemy),
        ) {
            (true, false) => Some(Side::Player),
            (false, true) => Some(Side::Enemy),
            _ => None,
        }
    }

    /// Ends the combat and releases every combatant.
    ///
    /// Only valid once per combat; a second call is rejected so rewards can
    /// never be granted twice.
    pub fn end_combat(&mut self, player_won: bool) -> Result<CombatOutcome, CombatError> {
        self.ensure_active("end_combat")?;

        let participants = self
            .roster
            .drain()
            .into_iter()
            .filter(|c| c.side == Side::Player)
            .filter_map(|c| c.origin().cloned())
            .collect();

        self.phase = CombatPhase::Ended;
        Ok(CombatOutcome {
            player_won,
            turns: self.turn,
            participants,
        })
    }

    fn ensure_active(&self, operation: &'static str) -> Result<(), CombatError> {
        if self.phase == CombatPhase::Active {
            Ok(())
        } else {
            Err(CombatError::not_active(operation, self.phase))
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    /// Number of completed turns in the current combat.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn combatants(&self) -> impl Iterator<Item = &CombatantState> {
        self.roster.iter()
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantState> {
        self.roster.get(id)
    }

    pub fn snapshot(&self, id: CombatantId) -> Option<CombatantSnapshot> {
        self.roster.get(id).map(CombatantState::snapshot)
    }
}
