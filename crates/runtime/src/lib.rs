//! Async orchestration around the deterministic combat and progression rules.
//!
//! This crate wires the persistence gateway, the event bus, and the
//! progression services into a [`GameSession`] that clients drive.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session context and its builder
//! - [`api`] exposes the error types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`services`] applies XP, rewards and retrying saves
//! - [`repository`] provides the character gateway and its implementations
pub mod api;
pub mod events;
pub mod repository;
pub mod services;
pub mod session;

pub use api::{Result, RuntimeError};
pub use events::{CombatEvent, Event, EventBus, ProgressionEvent, Topic};
pub use repository::{CharacterGateway, FileGateway, InMemoryGateway, RepositoryError};
pub use services::{
    CombatRewards, ProgressionService, SavePolicy, SaveStatus, SaveTicket, XpAward,
    save_with_retry,
};
pub use session::{GameSession, RuntimeConfig, SessionBuilder};
