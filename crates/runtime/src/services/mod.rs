//! Progression, reward, and persistence services driven by the session.
mod persistence;
mod progression;
mod rewards;

pub use persistence::{SavePolicy, save_with_retry};
pub use progression::{ProgressionService, SaveStatus, SaveTicket, XpAward};
pub use rewards::CombatRewards;
