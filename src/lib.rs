//! planner-core: collection state and debounced cloud sync for a personal
//! content-planning dashboard.
//!
//! The crate keeps five in-memory collections (ideas, events, cross-posts,
//! collaborators, merch) eventually consistent with one remote document per
//! authenticated user:
//! - local mutations arm a trailing debounce; one quiet period later the
//!   full snapshot is pushed,
//! - inbound subscription snapshots replace local collections wholesale
//!   (last writer wins at collection granularity),
//! - observers hear about changes over a broadcast channel and re-read.
//!
//! Rendering and input live outside; [`views`] provides the pure display
//! models they consume, and [`feeds`] the read-only inspiration feeds.

pub mod config;
pub mod error;
pub mod feeds;
pub mod model;
pub mod remote;
pub mod store;
pub mod sync;
pub mod views;

pub use config::SyncOptions;
pub use error::{FeedError, StateError, StoreError};
pub use model::{
    Collaborator, CollaboratorStatus, CollectionKey, CrossPost, CrossPostStatus, Document, Event,
    EventStatus, Idea, IdeaKind, IdeaStatus, MerchItem, MerchStatus,
};
pub use remote::{RemoteStore, Session, http::HttpStore, memory::MemoryStore};
pub use store::{
    CollaboratorDraft, CrossPostDraft, EventDraft, IdeaDraft, MerchDraft, PlannerState, StateHandle,
};
pub use sync::{PlannerEvent, SyncCoordinator};
