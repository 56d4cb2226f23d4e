//! Post-combat reward processing.

use tracing::{info, warn};

use game_core::{CharacterRecord, CombatOutcome};

use super::progression::{ProgressionService, XpAward};

/// Grants a flat XP reward to every participant of a won combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatRewards {
    reward_xp: i32,
}

impl CombatRewards {
    pub fn new(reward_xp: i32) -> Self {
        Self { reward_xp }
    }

    pub fn reward_xp(&self) -> i32 {
        self.reward_xp
    }

    /// Grants the reward for `outcome`. A lost combat grants nothing.
    pub fn on_combat_end(
        &self,
        outcome: &CombatOutcome,
        progression: &ProgressionService,
        roster: &mut [CharacterRecord],
    ) -> Vec<XpAward> {
        if !outcome.player_won {
            info!("Combat lost after {} turns, no XP awarded", outcome.turns);
            return Vec::new();
        }
        if self.reward_xp <= 0 {
            warn!("Combat reward is {} XP, nothing to grant", self.reward_xp);
            return Vec::new();
        }

        info!(
            "Combat won after {} turns, granting {} XP to {} participants",
            outcome.turns,
            self.reward_xp,
            outcome.participants.len()
        );

        outcome
            .participants
            .iter()
            .filter_map(|id| progression.grant_xp(roster, id, self.reward_xp))
            .collect()
    }
}
