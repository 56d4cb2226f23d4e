//! Scripted encounter that drives a session from start to rewards.
//!
//! Players cycle through their decks and focus the first standing enemy.
//! Enemies follow their [`AiBehavior`].

use anyhow::{Result, bail};
use tracing::{debug, info};

use game_core::{
    AiBehavior, CardDefinition, CardId, CharacterId, CombatOutcome, CombatantId,
    CombatantSnapshot, EffectKind, EnemyId, Side, TargetType, XpGrant,
};
use runtime::GameSession;

struct Actor {
    id: CombatantId,
    deck: Vec<CardId>,
    behavior: Option<AiBehavior>,
}

/// Runs one combat to completion or until `max_turns` turns have passed.
///
/// Running out of turns counts as a loss.
pub fn run_encounter(
    session: &mut GameSession,
    players: &[CharacterId],
    enemies: &[EnemyId],
    max_turns: u32,
) -> Result<(CombatOutcome, Vec<XpGrant>)> {
    let start = session.start_combat(players, enemies)?;

    let mut actors = Vec::with_capacity(start.players.len() + start.enemies.len());
    for (&id, character) in start.players.iter().zip(players) {
        let deck = session
            .character(character)
            .map(|record| record.deck.clone())
            .unwrap_or_default();
        actors.push(Actor {
            id,
            deck,
            behavior: None,
        });
    }
    for (&id, enemy) in start.enemies.iter().zip(enemies) {
        let template = session.enemy(enemy);
        actors.push(Actor {
            id,
            deck: template.map(|t| t.deck.clone()).unwrap_or_default(),
            behavior: Some(template.map(|t| t.behavior).unwrap_or_default()),
        });
    }

    let mut victor = None;
    while victor.is_none() && session.turn() < max_turns {
        let round = session.turn() as usize;

        for actor in &actors {
            let Some(me) = session.snapshot(actor.id).filter(|s| s.current_hp > 0) else {
                continue;
            };
            let Some(target) = first_standing(session, me.side.opposite()) else {
                break;
            };

            let card = match actor.behavior {
                None => actor.deck.get(round % actor.deck.len().max(1)),
                Some(behavior) => {
                    let hand: Vec<&CardDefinition> =
                        actor.deck.iter().filter_map(|id| session.card(id)).collect();
                    choose_enemy_card(behavior, &me, &hand).map(|card| &card.id)
                }
            };
            let Some(card) = card.cloned() else {
                debug!("{} has no playable card", me.name);
                continue;
            };

            session.play_card(actor.id, target.id, &card)?;
            info!(
                "{} plays {} on {} ({}/{} HP)",
                me.name,
                card,
                target.name,
                session.snapshot(target.id).map(|s| s.current_hp).unwrap_or(0),
                target.max_hp
            );

            victor = session.victor();
            if victor.is_some() {
                break;
            }
        }

        if victor.is_none() {
            session.end_of_turn()?;
            victor = session.victor();
        }
    }

    if victor.is_none() {
        info!("Turn limit of {} reached", max_turns);
    }
    Ok(session.end_combat(victor == Some(Side::Player))?)
}

fn first_standing(session: &GameSession, side: Side) -> Option<CombatantSnapshot> {
    session
        .combatants()
        .find(|c| c.side == side && c.is_alive())
        .map(|c| c.snapshot())
}

/// Picks the card an enemy plays this turn.
///
/// `Defensive` enemies below half health prefer a self-targeted card.
/// Otherwise the first card that deals damage is played.
fn choose_enemy_card<'a>(
    behavior: AiBehavior,
    me: &CombatantSnapshot,
    hand: &[&'a CardDefinition],
) -> Option<&'a CardDefinition> {
    let wounded = me.current_hp * 2 < me.max_hp;
    if behavior == AiBehavior::Defensive
        && wounded
        && let Some(card) = hand.iter().find(|c| c.target == TargetType::SelfTarget)
    {
        return Some(*card);
    }

    hand.iter()
        .find(|c| c.effects.iter().any(|e| e.kind == EffectKind::Damage))
        .or_else(|| hand.first())
        .copied()
}

/// Fails early when the requested ids cannot form a combat.
pub fn ensure_encounter(players: &[CharacterId], enemies: &[EnemyId]) -> Result<()> {
    if players.is_empty() {
        bail!("no characters in the roster to fight with");
    }
    if enemies.is_empty() {
        bail!("no enemies configured for the encounter");
    }
    Ok(())
}
