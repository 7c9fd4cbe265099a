//! Sync engine: debounced outbound pushes, inbound snapshot application,
//! session lifecycle.
//!
//! Local edits and remote pushes are arbitrated with last-writer-wins
//! semantics at collection granularity; see [`coordinator::SyncCoordinator`].

pub mod coordinator;
pub mod debounce;

pub use coordinator::{PlannerEvent, SyncCoordinator};
pub use debounce::Debounce;
