//! HTTP adapter for a JSON document service.
//!
//! Documents live at `{base}/documents/{namespace}/{uid}`; writes are
//! `PATCH`ed and merged field-level by the service. The snapshot
//! subscription is a poll loop that forwards the document whenever its
//! `updatedAt` stamp moves.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, header};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use super::{AuthEvent, RemoteStore, Session};
use crate::config::{DOCUMENT_NAMESPACE, SNAPSHOT_POLL_INTERVAL};
use crate::error::StoreError;
use crate::model::Document;

const SNAPSHOT_BUFFER: usize = 32;

/// [`RemoteStore`] backed by a JSON document service.
pub struct HttpStore {
    http: Client,
    base_url: String,
    api_token: Option<String>,
    poll_interval: Duration,
    auth_tx: broadcast::Sender<AuthEvent>,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        let (auth_tx, _) = broadcast::channel(16);
        Self {
            http,
            base_url: base_url.into(),
            api_token,
            poll_interval: SNAPSHOT_POLL_INTERVAL,
            auth_tx,
        }
    }

    /// Shorten the subscription poll interval (tests).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn document_url(&self, uid: &str) -> String {
        format!("{}/documents/{}/{}", self.base_url, DOCUMENT_NAMESPACE, uid)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// One document fetch, shared by `load` and the poll loop.
async fn fetch_document(request: RequestBuilder) -> Result<Option<Document>, StoreError> {
    let response = request
        .send()
        .await
        .map_err(|e| StoreError::Read(e.to_string()))?;

    match response.status() {
        StatusCode::NOT_FOUND => Ok(None),
        status if status.is_success() => {
            let doc = response
                .json::<Document>()
                .await
                .map_err(|e| StoreError::Read(e.to_string()))?;
            Ok(Some(doc))
        }
        status => Err(StoreError::Read(format!("document fetch returned {status}"))),
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn sign_in(&self) -> Result<Session, StoreError> {
        let url = format!("{}/auth/sign-in", self.base_url);
        let response = self
            .request(Method::POST, &url)
            .send()
            .await
            .map_err(|e| StoreError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Auth(format!(
                "sign-in returned {}",
                response.status()
            )));
        }

        let session = response
            .json::<Session>()
            .await
            .map_err(|e| StoreError::Auth(e.to_string()))?;

        let _ = self.auth_tx.send(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), StoreError> {
        let url = format!("{}/auth/sign-out", self.base_url);
        let response = self
            .request(Method::POST, &url)
            .send()
            .await
            .map_err(|e| StoreError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Auth(format!(
                "sign-out returned {}",
                response.status()
            )));
        }

        let _ = self.auth_tx.send(None);
        Ok(())
    }

    fn auth_events(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_tx.subscribe()
    }

    async fn load(&self, uid: &str) -> Result<Option<Document>, StoreError> {
        fetch_document(self.request(Method::GET, &self.document_url(uid))).await
    }

    async fn save(&self, uid: &str, doc: &Document) -> Result<(), StoreError> {
        let url = self.document_url(uid);
        let response = self
            .request(Method::PATCH, &url)
            .json(doc)
            .send()
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Write(format!(
                "document write returned {}",
                response.status()
            )));
        }
        debug!(uid, "document saved");
        Ok(())
    }

    async fn subscribe(&self, uid: &str) -> Result<mpsc::Receiver<Document>, StoreError> {
        let (tx, rx) = mpsc::channel(SNAPSHOT_BUFFER);
        let http = self.http.clone();
        let url = self.document_url(uid);
        let token = self.api_token.clone();
        let poll_interval = self.poll_interval;
        let uid = uid.to_string();

        tokio::spawn(async move {
            let mut last_stamp: Option<String> = None;
            let mut first = true;
            loop {
                if !first {
                    tokio::time::sleep(poll_interval).await;
                }
                first = false;

                let builder = match &token {
                    Some(t) => http.get(&url).bearer_auth(t),
                    None => http.get(&url),
                };
                let doc = match fetch_document(builder).await {
                    Ok(Some(doc)) => doc,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!(uid, error = %e, "snapshot poll failed");
                        continue;
                    }
                };

                if doc.updated_at == last_stamp && last_stamp.is_some() {
                    continue;
                }
                last_stamp = doc.updated_at.clone();
                if tx.send(doc).await.is_err() {
                    // Subscriber gone; stop polling.
                    break;
                }
            }
        });

        Ok(rx)
    }
}
