//! Compiled-in configuration.
//!
//! The core takes no CLI flags, files, or environment variables; everything
//! tunable lives here as a constant, with [`SyncOptions`] as the one
//! injectable knob bundle for the coordinator.

use std::time::Duration;

/// Quiet period after the last local mutation before a push fires.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(1200);

/// Remote namespace the per-user document lives under.
pub const DOCUMENT_NAMESPACE: &str = "contentPlanner";

/// Interval between subscription polls in the HTTP adapter.
pub const SNAPSHOT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Hot-posts page size requested per community.
pub const HOT_PAGE_SIZE: u32 = 9;

/// Community shown when the trending view first opens.
pub const DEFAULT_COMMUNITY: &str = "GriefSupport";

/// Communities offered as trending tabs.
pub const COMMUNITIES: &[&str] = &["GriefSupport", "widowers", "Motherless", "CaregiverSupport"];

/// Base endpoint for the hot-posts feed.
pub const HOT_POSTS_BASE_URL: &str = "https://www.reddit.com";

/// RSS-to-JSON aggregation endpoint.
pub const RSS_AGGREGATOR_URL: &str = "https://api.rss2json.com/v1/api.json";

/// Publication feeds shown in the inspiration view.
pub const FEED_SOURCES: &[(&str, &str)] = &[
    ("What's Your Grief", "https://whatsyourgrief.com/feed/"),
    ("Modern Loss", "https://modernloss.com/feed/"),
    ("Refuge in Grief", "https://refugeingrief.com/feed/"),
    ("Option B", "https://optionb.org/feed"),
];

/// Longest edge the presentation layer resizes merch photos to before
/// encoding them into the document.
pub const MERCH_IMAGE_MAX_DIM: u32 = 600;

/// Cap on the encoded merch image payload. The whole document shares a
/// ~1 MiB remote size limit, so one photo may not eat all of it.
pub const MERCH_IMAGE_MAX_BYTES: usize = 700 * 1024;

/// Number of entries the upcoming list shows.
pub const UPCOMING_LIMIT: usize = 10;

/// Tunables for [`crate::sync::SyncCoordinator`].
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Trailing-debounce quiet period for outbound pushes.
    pub debounce: Duration,

    /// Capacity of the change-event broadcast channel.
    pub event_capacity: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            debounce: SAVE_DEBOUNCE,
            event_capacity: 64,
        }
    }
}
