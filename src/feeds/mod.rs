//! Read-only inspiration feeds: community hot posts and publication RSS,
//! both consumed through public JSON endpoints.
//!
//! Feed failures are returned to the caller (the view shows a retry
//! affordance); they never touch planner state.

pub mod hot_posts;
pub mod rss;

pub use hot_posts::{HotPost, HotPostsClient};
pub use rss::{FeedItem, RssClient};

/// Compact relative age for a post: `12m ago`, `3h ago`, `2d ago`.
pub fn age_label(epoch_secs: i64, now_secs: i64) -> String {
    let diff = (now_secs - epoch_secs).max(0);
    if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86_400 {
        format!("{}h ago", diff / 3600)
    } else {
        format!("{}d ago", diff / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_label_buckets() {
        let now = 1_700_000_000;
        assert_eq!(age_label(now - 59, now), "0m ago");
        assert_eq!(age_label(now - 1800, now), "30m ago");
        assert_eq!(age_label(now - 7200, now), "2h ago");
        assert_eq!(age_label(now - 3 * 86_400, now), "3d ago");
        // Clock skew never yields a negative age.
        assert_eq!(age_label(now + 500, now), "0m ago");
    }
}
