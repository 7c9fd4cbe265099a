//! In-memory remote store.
//!
//! Behaves like the real document service (field-merge writes, snapshot
//! echo to subscribers, auth events) with builders and counters for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, broadcast, mpsc};

use super::{AuthEvent, RemoteStore, Session};
use crate::error::StoreError;
use crate::model::Document;

const SNAPSHOT_BUFFER: usize = 32;

/// In-memory [`RemoteStore`] implementation.
pub struct MemoryStore {
    user: Option<Session>,
    signed_in: AtomicBool,
    docs: Mutex<HashMap<String, Document>>,
    subscribers: Mutex<HashMap<String, Vec<mpsc::Sender<Document>>>>,
    auth_tx: broadcast::Sender<AuthEvent>,
    save_count: AtomicU32,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (auth_tx, _) = broadcast::channel(16);
        Self {
            user: None,
            signed_in: AtomicBool::new(false),
            docs: Mutex::new(HashMap::new()),
            subscribers: Mutex::new(HashMap::new()),
            auth_tx,
            save_count: AtomicU32::new(0),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Configure the account that `sign_in` authenticates as.
    pub fn with_user(mut self, session: Session) -> Self {
        self.user = Some(session);
        self
    }

    /// Make subsequent saves fail, as a dropped network would.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of saves attempted, including failed ones.
    pub fn save_count(&self) -> u32 {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Current stored document for a uid.
    pub async fn document(&self, uid: &str) -> Option<Document> {
        self.docs.lock().await.get(uid).cloned()
    }

    /// Simulate a write from elsewhere (another device, the console):
    /// merge it and notify subscribers, without counting as a local save.
    pub async fn push_remote(&self, uid: &str, doc: Document) {
        let merged = self.merge_into(uid, doc).await;
        self.notify(uid, merged).await;
    }

    async fn merge_into(&self, uid: &str, doc: Document) -> Document {
        let mut docs = self.docs.lock().await;
        let stored = docs.entry(uid.to_string()).or_default();
        stored.merge_from(doc);
        stored.clone()
    }

    async fn notify(&self, uid: &str, doc: Document) {
        let mut subs = self.subscribers.lock().await;
        let Some(senders) = subs.get_mut(uid) else {
            return;
        };
        let mut alive = Vec::with_capacity(senders.len());
        for tx in senders.drain(..) {
            if tx.send(doc.clone()).await.is_ok() {
                alive.push(tx);
            }
        }
        *senders = alive;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn sign_in(&self) -> Result<Session, StoreError> {
        let Some(session) = self.user.clone() else {
            return Err(StoreError::Auth("no account configured".to_string()));
        };
        self.signed_in.store(true, Ordering::SeqCst);
        let _ = self.auth_tx.send(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), StoreError> {
        self.signed_in.store(false, Ordering::SeqCst);
        let _ = self.auth_tx.send(None);
        Ok(())
    }

    fn auth_events(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_tx.subscribe()
    }

    async fn load(&self, uid: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.docs.lock().await.get(uid).cloned())
    }

    async fn save(&self, uid: &str, doc: &Document) -> Result<(), StoreError> {
        self.save_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Write("simulated network failure".to_string()));
        }
        let merged = self.merge_into(uid, doc.clone()).await;
        // Echo the write back to subscribers, own session included.
        self.notify(uid, merged).await;
        Ok(())
    }

    async fn subscribe(&self, uid: &str) -> Result<mpsc::Receiver<Document>, StoreError> {
        let (tx, rx) = mpsc::channel(SNAPSHOT_BUFFER);
        if let Some(doc) = self.docs.lock().await.get(uid).cloned() {
            let _ = tx.send(doc).await;
        }
        self.subscribers
            .lock()
            .await
            .entry(uid.to_string())
            .or_default()
            .push(tx);
        Ok(rx)
    }
}
