//! Record types for the five planner collections and the remote document.
//!
//! Everything here is plain data with `camelCase` wire names matching the
//! stored document. Status enumerations are closed per collection but keep an
//! opaque catch-all variant so an unrecognized value coming off the wire
//! renders unstyled instead of failing deserialization.

mod document;
mod idea;
mod merch;
mod promote;

pub use document::{CollectionKey, Document};
pub use idea::{Idea, IdeaKind, IdeaStatus};
pub use merch::{MerchItem, MerchStatus};
pub use promote::{Collaborator, CollaboratorStatus, CrossPost, CrossPostStatus, Event, EventStatus};

use chrono::Utc;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Generate a fresh opaque record id. Assigned once at creation, never reused.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current wall-clock time as unix milliseconds, the `createdAt` stamp unit.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today as an ISO calendar-date string (`YYYY-MM-DD`, UTC).
pub fn today_iso() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Older documents store `""` for unset optional strings; collapse those to
/// `None` so presence checks on `publishDate`/`url`/`series` stay correct.
pub(crate) fn empty_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(de)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_unique() {
        let a = new_record_id();
        let b = new_record_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn today_is_calendar_date_shaped() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
        assert_eq!(&today[7..8], "-");
    }
}
