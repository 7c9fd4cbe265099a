//! Sync coordinator — keeps the local collection store and the remote
//! document eventually consistent.
//!
//! Outbound: every local mutation (re)arms a trailing debounce; when the
//! quiet period elapses the *current* full snapshot of all collections is
//! pushed, so a burst of edits costs one write. Inbound: subscription
//! snapshots replace local collections wholesale at collection granularity.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::SyncOptions;
use crate::error::StoreError;
use crate::model::{CollectionKey, Document};
use crate::remote::{RemoteStore, Session};
use crate::store::{PlannerState, StateHandle};
use crate::sync::debounce::Debounce;

/// Change notifications for presentation-layer observers.
///
/// Delivered over a broadcast channel so tests and any number of views can
/// subscribe without clobbering each other.
#[derive(Debug, Clone)]
pub enum PlannerEvent {
    /// A remote snapshot was applied; the named collections were replaced
    /// and every view bound to them should re-read.
    RemoteApplied { collections: Vec<CollectionKey> },

    /// The session started (`Some`) or ended (`None`). On end the state
    /// container has already been replaced wholesale.
    SessionChanged(Option<Session>),
}

/// Orchestrates debounced pushes and inbound snapshot application for one
/// user's document.
pub struct SyncCoordinator {
    state: StateHandle,
    store: Arc<dyn RemoteStore>,
    session: RwLock<Option<Session>>,
    debounce: Debounce,
    events: broadcast::Sender<PlannerEvent>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl SyncCoordinator {
    pub fn new(store: Arc<dyn RemoteStore>, options: SyncOptions) -> Arc<Self> {
        let (events, _) = broadcast::channel(options.event_capacity);
        Arc::new(Self {
            state: Arc::new(RwLock::new(PlannerState::default())),
            store,
            session: RwLock::new(None),
            debounce: Debounce::new(options.debounce),
            events,
            pump: Mutex::new(None),
        })
    }

    /// Shared handle to the collection store.
    pub fn state(&self) -> StateHandle {
        Arc::clone(&self.state)
    }

    /// Register an observer for change events.
    pub fn subscribe(&self) -> broadcast::Receiver<PlannerEvent> {
        self.events.subscribe()
    }

    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Apply a mutation to the store and schedule a debounced push.
    pub async fn mutate<R>(self: &Arc<Self>, f: impl FnOnce(&mut PlannerState) -> R) -> R {
        let result = {
            let mut state = self.state.write().await;
            f(&mut state)
        };
        self.notify_local_change();
        result
    }

    /// (Re)arm the debounce timer. Only the last call in a burst results in
    /// a push, and that push serializes the state as of firing time.
    pub fn notify_local_change(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.debounce.arm(async move { this.push_snapshot().await });
    }

    /// Serialize all collections and write the whole document.
    ///
    /// Without a session this is a no-op: edits stay memory-only until
    /// sign-in. Failures are logged and dropped without retry; the next
    /// local edit pushes the then-current state. A failed push with no further
    /// edits leaves local and remote diverged until the next edit.
    pub async fn push_snapshot(&self) {
        let Some(session) = self.session.read().await.clone() else {
            debug!("no session, push skipped");
            return;
        };

        let doc = self.state.read().await.snapshot(Some(&session.email));
        match self.store.save(&session.uid, &doc).await {
            Ok(()) => debug!(uid = %session.uid, "snapshot pushed"),
            Err(e) => warn!(uid = %session.uid, error = %e, "snapshot push failed, dropped"),
        }
    }

    /// Apply an inbound snapshot: last writer wins at collection
    /// granularity. Collections present in `doc` replace local state in
    /// full, including while local edits are pending.
    ///
    /// Known race: the incoming `updatedAt` is never compared against local
    /// edit recency. The debounce window is assumed long enough that a
    /// self-echoed snapshot does not overwrite a newer local edit; a second
    /// concurrent writer session can lose edits here.
    pub async fn on_remote_snapshot(&self, doc: Document) {
        let replaced = self.state.write().await.apply_snapshot(doc);
        debug!(collections = replaced.len(), "remote snapshot applied");
        let _ = self
            .events
            .send(PlannerEvent::RemoteApplied { collections: replaced });
    }

    /// Interactive sign-in, then start the session (subscription included).
    pub async fn sign_in(self: &Arc<Self>) -> Result<Session, StoreError> {
        let session = self.store.sign_in().await?;
        self.start_session(session.clone()).await;
        Ok(session)
    }

    /// Sign out and tear the session down. The state container is replaced
    /// wholesale; a fresh one is built on the next sign-in.
    pub async fn sign_out(self: &Arc<Self>) {
        if let Err(e) = self.store.sign_out().await {
            warn!(error = %e, "sign-out failed");
        }
        self.end_session().await;
    }

    /// Follow the store's auth events, so sessions started elsewhere (or
    /// expired remotely) are picked up. Spawn this once at startup.
    pub async fn run_auth_watcher(self: Arc<Self>) {
        let mut auth = self.store.auth_events();
        loop {
            match auth.recv().await {
                Ok(Some(session)) => self.start_session(session).await,
                Ok(None) => self.end_session().await,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "auth events lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    async fn start_session(self: &Arc<Self>, session: Session) {
        {
            let current = self.session.read().await;
            let pump_running = self.pump.lock().await.is_some();
            if pump_running
                && current.as_ref().map(|s| s.uid.as_str()) == Some(session.uid.as_str())
            {
                return;
            }
        }

        if let Some(previous) = self.pump.lock().await.take() {
            previous.abort();
        }
        *self.session.write().await = Some(session.clone());
        info!(uid = %session.uid, "session started");

        match self.store.subscribe(&session.uid).await {
            Ok(mut rx) => {
                let this = Arc::clone(self);
                let handle = tokio::spawn(async move {
                    while let Some(doc) = rx.recv().await {
                        this.on_remote_snapshot(doc).await;
                    }
                });
                *self.pump.lock().await = Some(handle);
            }
            // Local state keeps working; it just stops hearing from remote.
            Err(e) => warn!(uid = %session.uid, error = %e, "subscription failed"),
        }

        let _ = self.events.send(PlannerEvent::SessionChanged(Some(session)));
    }

    async fn end_session(&self) {
        let had_session = self.session.write().await.take().is_some();
        if let Some(pump) = self.pump.lock().await.take() {
            pump.abort();
        }
        self.debounce.cancel();
        if !had_session {
            return;
        }

        *self.state.write().await = PlannerState::default();
        info!("session ended, local state cleared");
        let _ = self.events.send(PlannerEvent::SessionChanged(None));
    }
}
