//! Retrying save wrapper around the character gateway.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use game_core::{CharacterRecord, UserId};

use crate::repository::{CharacterGateway, RepositoryError};

/// How many times a save is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavePolicy {
    /// Total attempts including the first one.
    pub attempts: u32,
    pub retry_delay: Duration,
}

impl SavePolicy {
    pub const DEFAULT_ATTEMPTS: u32 = 2;
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }
}

impl Default for SavePolicy {
    fn default() -> Self {
        Self {
            attempts: Self::DEFAULT_ATTEMPTS,
            retry_delay: Self::DEFAULT_RETRY_DELAY,
        }
    }
}

/// Saves `record`, retrying on failure according to `policy`.
///
/// Attempts run sequentially. Returns the number of attempts used on success
/// or the last error once every attempt has failed.
pub async fn save_with_retry(
    gateway: &dyn CharacterGateway,
    owner: &UserId,
    record: &CharacterRecord,
    policy: SavePolicy,
) -> Result<u32, RepositoryError> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;

    loop {
        match gateway.save_character(owner, record).await {
            Ok(()) => {
                if attempt > 1 {
                    info!(
                        "Saved character {} after {} attempts",
                        record.id, attempt
                    );
                }
                return Ok(attempt);
            }
            Err(e) if attempt < attempts => {
                warn!(
                    "Failed to save character {} (attempt {}/{}): {}. Retrying in {:?}...",
                    record.id, attempt, attempts, e, policy.retry_delay
                );
                sleep(policy.retry_delay).await;
                attempt += 1;
            }
            Err(e) => {
                error!(
                    "Failed to save character {} after {} attempts: {}",
                    record.id, attempts, e
                );
                return Err(e);
            }
        }
    }
}
