//! The remote document store boundary.
//!
//! [`RemoteStore`] is the seam the sync coordinator consumes: authentication,
//! a per-user document with field-level merge on write, and a push-based
//! snapshot subscription. Two implementations ship: [`http::HttpStore`] for a
//! JSON document service and [`memory::MemoryStore`] for tests and offline
//! use.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};

use crate::error::StoreError;
use crate::model::Document;

/// An authenticated user session. The uid partitions the remote store; one
/// writer session per uid is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Auth-change notification: `Some` on sign-in, `None` on sign-out.
pub type AuthEvent = Option<Session>;

/// Contract for the cloud document store.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Interactive sign-in. On success the store also emits an auth event.
    async fn sign_in(&self) -> Result<Session, StoreError>;

    /// Sign out, emitting an auth event.
    async fn sign_out(&self) -> Result<(), StoreError>;

    /// Register for auth changes. Any number of consumers may subscribe.
    fn auth_events(&self) -> broadcast::Receiver<AuthEvent>;

    /// Fetch the user's document, `None` when it does not exist yet.
    async fn load(&self, uid: &str) -> Result<Option<Document>, StoreError>;

    /// Persist a (partial) document with field-level merge semantics.
    async fn save(&self, uid: &str, doc: &Document) -> Result<(), StoreError>;

    /// Subscribe to document snapshots. Delivers the current document first
    /// (when one exists), then every subsequent write, the caller's own
    /// echoed writes included.
    async fn subscribe(&self, uid: &str) -> Result<mpsc::Receiver<Document>, StoreError>;
}
