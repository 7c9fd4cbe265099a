//! Publication feeds via an RSS-to-JSON aggregation endpoint.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::RSS_AGGREGATOR_URL;
use crate::error::FeedError;

/// One entry of a publication feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    #[serde(rename = "pubDate", default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct AggregatorResponse {
    status: String,
    #[serde(default)]
    items: Vec<FeedItem>,
}

/// Client for the RSS-to-JSON aggregator.
pub struct RssClient {
    http: Client,
    base_url: String,
}

impl RssClient {
    pub fn new() -> Self {
        Self::with_base_url(RSS_AGGREGATOR_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the latest entries of one feed, as configured in
    /// [`crate::config::FEED_SOURCES`].
    pub async fn latest(&self, feed_url: &str) -> Result<Vec<FeedItem>, FeedError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("rss_url", feed_url)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Upstream(format!(
                "aggregator returned {}",
                response.status()
            )));
        }

        let body = response
            .json::<AggregatorResponse>()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        if body.status != "ok" {
            return Err(FeedError::Upstream(body.status));
        }
        debug!(feed_url, items = body.items.len(), "feed fetched");
        Ok(body.items)
    }
}

impl Default for RssClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_items() {
        let json = r#"{
            "status": "ok",
            "items": [
                {"title": "On anticipatory grief", "link": "https://example.com/a",
                 "pubDate": "2024-04-30 12:00:00", "description": "..."}
            ]
        }"#;
        let body: AggregatorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.status, "ok");
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.items[0].pub_date.as_deref(), Some("2024-04-30 12:00:00"));
    }

    #[test]
    fn error_status_has_no_items_requirement() {
        let body: AggregatorResponse =
            serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        assert_eq!(body.status, "error");
        assert!(body.items.is_empty());
    }
}
