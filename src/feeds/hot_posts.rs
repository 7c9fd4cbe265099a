//! Hot-posts client for the community forum API.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::{HOT_PAGE_SIZE, HOT_POSTS_BASE_URL};
use crate::error::FeedError;

/// A post from a community's hot listing.
#[derive(Debug, Clone, Deserialize)]
pub struct HotPost {
    pub title: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub num_comments: i64,
    /// Unix seconds.
    #[serde(default)]
    pub created_utc: f64,
    pub permalink: String,
    #[serde(default)]
    pub link_flair_text: Option<String>,
    #[serde(default)]
    pub stickied: bool,
}

impl HotPost {
    /// Absolute link to the post.
    pub fn url(&self) -> String {
        format!("{HOT_POSTS_BASE_URL}{}", self.permalink)
    }
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Deserialize)]
struct ListingChild {
    data: HotPost,
}

/// Client for the hot listing of a named community.
pub struct HotPostsClient {
    http: Client,
    base_url: String,
}

impl HotPostsClient {
    pub fn new() -> Self {
        Self::with_base_url(HOT_POSTS_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the hot page for a community, pinned posts excluded.
    pub async fn hot(&self, community: &str) -> Result<Vec<HotPost>, FeedError> {
        let url = format!("{}/r/{community}/hot.json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("limit", HOT_PAGE_SIZE)])
            .query(&[("raw_json", "1")])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Upstream(format!(
                "hot listing returned {}",
                response.status()
            )));
        }

        let listing = response
            .json::<Listing>()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        let posts: Vec<HotPost> = listing
            .data
            .children
            .into_iter()
            .map(|c| c.data)
            .filter(|p| !p.stickied)
            .collect();
        debug!(community, posts = posts.len(), "hot listing fetched");
        Ok(posts)
    }
}

impl Default for HotPostsClient {
    fn default() -> Self {
        Self::new()
    }
}
