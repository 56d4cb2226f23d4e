//! Persistence adapters for character records.
//!
//! [`CharacterGateway`] is the contract the runtime saves through; the
//! in-memory and file implementations cover tests, local runs, and the demo
//! client. Remote backends implement the same trait.
mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileGateway;
pub use memory::InMemoryGateway;
pub use traits::CharacterGateway;
