//! Skirmish client binary.
//!
//! Composition root that loads content, opens the character store, builds a
//! [`GameSession`](runtime::GameSession), and plays one scripted encounter.
//!
//! # Examples
//!
//! ```bash
//! GAME_USER_ID=alice MAX_TURNS=10 cargo run -p game-client
//! ```

mod config;
mod encounter;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;

use game_content::ContentFactory;
use game_core::{CharacterId, EnemyId};
use runtime::{Event, FileGateway, GameSession, ProgressionEvent, RuntimeConfig, Topic};

use config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config.log_dir, &config.session_id)?;

    tracing::info!("Starting skirmish for user {}", config.user_id);

    let content = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    }
    .load_all()?;
    tracing::info!(
        "Loaded {} enemies, {} cards, {} levels",
        content.enemies.len(),
        content.cards.len(),
        content.levels.len()
    );

    let gateway = FileGateway::open(&config.save_data_dir)
        .await
        .with_context(|| format!("opening {}", config.save_data_dir.display()))?;
    tracing::info!("Saving characters to {}", config.save_data_dir.display());

    let runtime_config = RuntimeConfig {
        save_policy: RuntimeConfig::default()
            .save_policy
            .with_retry_delay(config.save_retry_delay),
        ..RuntimeConfig::default()
    };

    let enemies: Vec<EnemyId> = content.enemies.iter().take(2).map(|e| e.id.clone()).collect();

    let mut session = GameSession::builder()
        .config(runtime_config)
        .content(content)
        .gateway(Arc::new(gateway))
        .user(config.user_id.as_str())
        .build()?;
    session.reload_roster().await?;

    let listener = tokio::spawn(report_progression(session.subscribe(Topic::Progression)));

    let players: Vec<CharacterId> = session.roster().iter().map(|r| r.id.clone()).collect();
    encounter::ensure_encounter(&players, &enemies)?;

    let (outcome, grants) =
        encounter::run_encounter(&mut session, &players, &enemies, config.max_turns)?;
    tracing::info!(
        "{} after {} turns, {} characters rewarded",
        if outcome.player_won { "Victory" } else { "Defeat" },
        outcome.turns,
        grants.len()
    );

    for (id, status) in session.wait_for_pending_saves().await? {
        tracing::debug!("Save of {} finished: {:?}", id, status);
    }

    for record in session.roster() {
        tracing::info!(
            "{}: level {} ({} XP), {} HP, {} energy",
            record.name,
            record.level,
            record.xp,
            record.max_hp,
            record.max_energy
        );
    }

    drop(session);
    listener.await?;

    tracing::info!("Skirmish complete");
    Ok(())
}

/// Logs progression events until the session's bus is dropped.
async fn report_progression(mut events: tokio::sync::broadcast::Receiver<Event>) {
    loop {
        match events.recv().await {
            Ok(Event::Progression(ProgressionEvent::LevelUp { record, .. })) => {
                tracing::info!("{} is now level {}", record.name, record.level);
            }
            Ok(Event::Progression(ProgressionEvent::SyncFailed { character_id, error })) => {
                tracing::warn!("Progress of {} was not saved: {}", character_id, error);
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!("Progression listener skipped {} events", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}
