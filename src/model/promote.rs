//! Promotion-tracker records: launch events, cross-post outreach, and
//! collaborator outreach.

use serde::{Deserialize, Serialize};

use super::empty_as_none;

/// A promotion or launch event on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub status: EventStatus,

    /// ISO calendar date (`YYYY-MM-DD`).
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Unix milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    #[default]
    Idea,
    Planned,
    Done,
    Other(String),
}

impl EventStatus {
    pub const KNOWN: [EventStatus; 3] = [EventStatus::Idea, EventStatus::Planned, EventStatus::Done];

    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Idea => "Idea",
            EventStatus::Planned => "Planned",
            EventStatus::Done => "Done",
            EventStatus::Other(s) => s,
        }
    }
}

impl From<String> for EventStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Idea" => EventStatus::Idea,
            "Planned" => EventStatus::Planned,
            "Done" => EventStatus::Done,
            _ => EventStatus::Other(s),
        }
    }
}

impl From<EventStatus> for String {
    fn from(s: EventStatus) -> Self {
        s.as_str().to_string()
    }
}

/// A publication or writer to pitch a cross-post to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossPost {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub status: CrossPostStatus,

    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Unix milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CrossPostStatus {
    #[default]
    Wishlist,
    ReachedOut,
    Confirmed,
    Other(String),
}

impl CrossPostStatus {
    pub const KNOWN: [CrossPostStatus; 3] = [
        CrossPostStatus::Wishlist,
        CrossPostStatus::ReachedOut,
        CrossPostStatus::Confirmed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CrossPostStatus::Wishlist => "Wishlist",
            CrossPostStatus::ReachedOut => "Reached Out",
            CrossPostStatus::Confirmed => "Confirmed",
            CrossPostStatus::Other(s) => s,
        }
    }
}

impl From<String> for CrossPostStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Wishlist" => CrossPostStatus::Wishlist,
            "Reached Out" => CrossPostStatus::ReachedOut,
            "Confirmed" => CrossPostStatus::Confirmed,
            _ => CrossPostStatus::Other(s),
        }
    }
}

impl From<CrossPostStatus> for String {
    fn from(s: CrossPostStatus) -> Self {
        s.as_str().to_string()
    }
}

/// A person to collaborate with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub id: String,

    /// The person's name.
    pub title: String,

    #[serde(default)]
    pub status: CollaboratorStatus,

    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Unix milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CollaboratorStatus {
    #[default]
    DreamList,
    ReachedOut,
    Confirmed,
    Other(String),
}

impl CollaboratorStatus {
    pub const KNOWN: [CollaboratorStatus; 3] = [
        CollaboratorStatus::DreamList,
        CollaboratorStatus::ReachedOut,
        CollaboratorStatus::Confirmed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CollaboratorStatus::DreamList => "Dream List",
            CollaboratorStatus::ReachedOut => "Reached Out",
            CollaboratorStatus::Confirmed => "Confirmed",
            CollaboratorStatus::Other(s) => s,
        }
    }
}

impl From<String> for CollaboratorStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Dream List" => CollaboratorStatus::DreamList,
            "Reached Out" => CollaboratorStatus::ReachedOut,
            "Confirmed" => CollaboratorStatus::Confirmed,
            _ => CollaboratorStatus::Other(s),
        }
    }
}

impl From<CollaboratorStatus> for String {
    fn from(s: CollaboratorStatus) -> Self {
        s.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaced_status_values_roundtrip() {
        let status: CrossPostStatus = serde_json::from_str(r#""Reached Out""#).unwrap();
        assert_eq!(status, CrossPostStatus::ReachedOut);
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""Reached Out""#);

        let status: CollaboratorStatus = serde_json::from_str(r#""Dream List""#).unwrap();
        assert_eq!(status, CollaboratorStatus::DreamList);
    }

    #[test]
    fn event_empty_date_collapses_to_none() {
        let event: Event = serde_json::from_str(
            r#"{"id": "e1", "title": "Launch party", "status": "Planned", "date": "", "createdAt": 5}"#,
        )
        .unwrap();
        assert_eq!(event.date, None);
        assert_eq!(event.status, EventStatus::Planned);
    }
}
