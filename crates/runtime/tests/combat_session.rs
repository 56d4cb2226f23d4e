//! End-to-end combat through the session: lifecycle, events, and rewards.

mod common;

use std::sync::Arc;

use common::*;
use game_core::{
    CardId, CharacterId, CombatEffect, CombatError, CombatPhase, CombatantId, EnemyId,
    IgnoreReason, Resolution, Side, StatusEffectKind,
};
use runtime::{CombatEvent, Event, GameSession, RuntimeError, Topic};

fn party() -> Vec<CharacterId> {
    vec![CharacterId::from("knight"), CharacterId::from("mage")]
}

const KNIGHT: CombatantId = CombatantId(0);
const GOBLIN: CombatantId = CombatantId(2);

#[tokio::test]
async fn won_combat_rewards_every_participant() {
    let mut session = session_with(Arc::new(seeded_gateway())).await;
    let mut combat_events = session.subscribe(Topic::Combat);

    let start = session
        .start_combat(&party(), &[EnemyId::from("goblin")])
        .unwrap();
    assert_eq!(start.players, vec![CombatantId(0), CombatantId(1)]);
    assert_eq!(start.enemies, vec![GOBLIN]);
    assert!(start.issues.is_empty());

    let resolutions = session
        .play_card(KNIGHT, GOBLIN, &CardId::from("smite"))
        .unwrap();
    assert!(resolutions.iter().all(Resolution::is_applied));
    assert_eq!(session.victor(), Some(Side::Player));

    let (outcome, grants) = session.end_combat(true).unwrap();
    assert_eq!(outcome.participants, party());
    assert_eq!(grants.len(), 2);

    // Knight: 95 + 10 crosses the 100 XP threshold.
    let knight = session.character(&CharacterId::from("knight")).unwrap();
    assert_eq!((knight.level, knight.xp), (2, 5));
    let mage = session.character(&CharacterId::from("mage")).unwrap();
    assert_eq!((mage.level, mage.xp), (1, 10));

    assert!(matches!(
        combat_events.recv().await.unwrap(),
        Event::Combat(CombatEvent::Started(_))
    ));
    assert!(matches!(
        combat_events.recv().await.unwrap(),
        Event::Combat(CombatEvent::ActionResolved { source: KNIGHT, .. })
    ));
    assert!(matches!(
        combat_events.recv().await.unwrap(),
        Event::Combat(CombatEvent::Ended(_))
    ));

    session.wait_for_pending_saves().await.unwrap();
}

#[tokio::test]
async fn lost_combat_grants_nothing() {
    let mut session = session_with(Arc::new(seeded_gateway())).await;
    let mut progression_events = session.subscribe(Topic::Progression);

    session
        .start_combat(&party(), &[EnemyId::from("goblin")])
        .unwrap();
    let (outcome, grants) = session.end_combat(false).unwrap();

    assert!(!outcome.player_won);
    assert!(grants.is_empty());
    assert_eq!(session.character(&CharacterId::from("knight")).unwrap().xp, 95);
    assert!(progression_events.try_recv().is_err());
}

#[tokio::test]
async fn ending_twice_rewards_once() {
    let mut session = session_with(Arc::new(seeded_gateway())).await;

    session
        .start_combat(&party(), &[EnemyId::from("goblin")])
        .unwrap();
    session.end_combat(true).unwrap();

    let err = session.end_combat(true).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Combat(CombatError::NotActive { .. })
    ));
    assert_eq!(session.character(&CharacterId::from("mage")).unwrap().xp, 10);
    assert_eq!(session.phase(), CombatPhase::Ended);

    session.wait_for_pending_saves().await.unwrap();
}

#[tokio::test]
async fn second_start_is_rejected_and_keeps_the_first() {
    let mut session = session_with(Arc::new(seeded_gateway())).await;

    session
        .start_combat(&party(), &[EnemyId::from("goblin")])
        .unwrap();
    session
        .resolve_action(KNIGHT, GOBLIN, &CombatEffect::damage(7))
        .unwrap();

    let err = session
        .start_combat(&[CharacterId::from("mage")], &[EnemyId::from("goblin")])
        .unwrap_err();

    assert!(matches!(err, RuntimeError::Combat(CombatError::AlreadyActive)));
    assert_eq!(session.combatants().count(), 3);
    assert_eq!(session.snapshot(GOBLIN).unwrap().current_hp, 23);
}

#[tokio::test]
async fn burn_ticks_at_end_of_turn_and_expires() {
    let mut session = session_with(Arc::new(seeded_gateway())).await;
    session
        .start_combat(&party(), &[EnemyId::from("goblin")])
        .unwrap();

    session
        .play_card(KNIGHT, GOBLIN, &CardId::from("ignite"))
        .unwrap();

    let first = session.end_of_turn().unwrap();
    assert_eq!(first.turn, 1);
    let goblin = session.snapshot(GOBLIN).unwrap();
    assert_eq!(goblin.current_hp, 27);
    assert_eq!(goblin.effects.len(), 1);
    assert_eq!(goblin.effects[0].duration, 1);

    let second = session.end_of_turn().unwrap();
    let (_, report) = second
        .ticked
        .iter()
        .find(|(id, _)| *id == GOBLIN)
        .unwrap();
    assert_eq!(report.expired, vec![StatusEffectKind::Burn]);
    let goblin = session.snapshot(GOBLIN).unwrap();
    assert_eq!(goblin.current_hp, 24);
    assert!(goblin.effects.is_empty());
}

#[tokio::test]
async fn unknown_ids_are_seeded_with_defaults() {
    let mut session = session_with(Arc::new(seeded_gateway())).await;

    let start = session
        .start_combat(&[CharacterId::from("ghost")], &[EnemyId::from("dragon")])
        .unwrap();

    assert_eq!(start.issues.len(), 2);
    let ghost = session.snapshot(start.players[0]).unwrap();
    assert_eq!(ghost.max_hp, 100);
    assert_eq!(ghost.current_hp, 100);
}

#[tokio::test]
async fn missing_targets_and_cards_do_not_change_state() {
    let mut session = session_with(Arc::new(seeded_gateway())).await;
    session
        .start_combat(&party(), &[EnemyId::from("goblin")])
        .unwrap();

    let resolution = session
        .resolve_action(KNIGHT, CombatantId(42), &CombatEffect::damage(5))
        .unwrap();
    assert_eq!(
        resolution,
        Resolution::Ignored(IgnoreReason::TargetNotFound(CombatantId(42)))
    );

    let err = session
        .play_card(KNIGHT, GOBLIN, &CardId::from("meteor"))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownCard(_)));
    assert_eq!(session.snapshot(GOBLIN).unwrap().current_hp, 30);
}

#[tokio::test]
async fn builder_requires_gateway_and_user() {
    let missing_gateway = GameSession::builder().user(USER).build();
    assert!(matches!(missing_gateway, Err(RuntimeError::MissingGateway)));

    let missing_user = GameSession::builder()
        .gateway(Arc::new(seeded_gateway()))
        .build();
    assert!(matches!(missing_user, Err(RuntimeError::MissingUser)));
}

#[tokio::test]
async fn empty_account_gets_the_starting_roster_once() {
    let gateway = Arc::new(FlakyGateway::new(runtime::InMemoryGateway::new(), 0));
    let build = || {
        GameSession::builder()
            .config(fast_config())
            .gateway(gateway.clone())
            .user(USER)
            .starting_roster([knight(), mage()])
            .build()
            .unwrap()
    };

    let mut first = build();
    assert_eq!(first.reload_roster().await.unwrap(), 2);
    assert_eq!(gateway.save_calls(), 2);

    let mut second = build();
    assert_eq!(second.reload_roster().await.unwrap(), 2);
    assert_eq!(gateway.save_calls(), 2);
    assert_eq!(second.roster()[0].id, CharacterId::from("knight"));
}

#[tokio::test]
async fn created_characters_start_at_level_one() {
    let mut session = session_with(Arc::new(seeded_gateway())).await;
    let archetype = game_core::CharacterArchetype {
        id: game_core::ArchetypeId::from("ranger"),
        base_max_hp: 70,
        base_max_energy: 50,
        starting_deck: vec![CardId::from("smite")],
    };

    let created = session
        .create_character(CharacterId::from("ranger-1"), "Swift Ranger", &archetype)
        .await
        .unwrap();
    assert_eq!((created.level, created.xp, created.max_hp), (1, 0, 70));

    let err = session
        .create_character(CharacterId::from("knight"), "Copy", &archetype)
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::DuplicateCharacter(_)));
    assert_eq!(session.roster().len(), 3);
}
