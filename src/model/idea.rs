//! The kanban idea record.

use serde::{Deserialize, Serialize};

use super::empty_as_none;

/// A content idea moving across the kanban board.
///
/// `id` and `created_at` are fixed at creation; edits rewrite the remaining
/// fields and refresh `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,

    /// Which channel the idea targets.
    #[serde(rename = "type", default)]
    pub kind: IdeaKind,

    #[serde(default)]
    pub status: IdeaStatus,

    /// ISO calendar date (`YYYY-MM-DD`). Lexicographic comparison is
    /// date-correct because of the fixed format.
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,

    /// Series or content-pillar label.
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Free-form format tag (e.g. listicle, interview).
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Unix milliseconds.
    #[serde(default)]
    pub created_at: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Channel an idea is written for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdeaKind {
    #[default]
    PrimaryChannel,
    ShortFormChannel,
    /// Unrecognized wire value, preserved verbatim.
    Other(String),
}

impl IdeaKind {
    pub fn as_str(&self) -> &str {
        match self {
            IdeaKind::PrimaryChannel => "primary-channel",
            IdeaKind::ShortFormChannel => "short-form-channel",
            IdeaKind::Other(s) => s,
        }
    }
}

impl From<String> for IdeaKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            // Records written before the type field existed default to the
            // primary channel.
            "primary-channel" | "" => IdeaKind::PrimaryChannel,
            "short-form-channel" => IdeaKind::ShortFormChannel,
            _ => IdeaKind::Other(s),
        }
    }
}

impl From<IdeaKind> for String {
    fn from(k: IdeaKind) -> Self {
        k.as_str().to_string()
    }
}

/// Pipeline stage of an idea, ordered idea → drafting → ready → published.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdeaStatus {
    #[default]
    Idea,
    Drafting,
    Ready,
    Published,
    /// Unrecognized wire value, preserved verbatim and rendered unstyled.
    Other(String),
}

impl IdeaStatus {
    /// Board columns in pipeline order.
    pub const KNOWN: [IdeaStatus; 4] = [
        IdeaStatus::Idea,
        IdeaStatus::Drafting,
        IdeaStatus::Ready,
        IdeaStatus::Published,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            IdeaStatus::Idea => "idea",
            IdeaStatus::Drafting => "drafting",
            IdeaStatus::Ready => "ready",
            IdeaStatus::Published => "published",
            IdeaStatus::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, IdeaStatus::Other(_))
    }
}

impl From<String> for IdeaStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "idea" => IdeaStatus::Idea,
            "drafting" => IdeaStatus::Drafting,
            "ready" => IdeaStatus::Ready,
            "published" => IdeaStatus::Published,
            _ => IdeaStatus::Other(s),
        }
    }
}

impl From<IdeaStatus> for String {
    fn from(s: IdeaStatus) -> Self {
        s.as_str().to_string()
    }
}

impl std::fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_known_values() {
        for status in IdeaStatus::KNOWN {
            let json = serde_json::to_string(&status).unwrap();
            let back: IdeaStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn unknown_status_is_preserved_not_fatal() {
        let status: IdeaStatus = serde_json::from_str(r#""percolating""#).unwrap();
        assert_eq!(status, IdeaStatus::Other("percolating".to_string()));
        assert!(!status.is_known());
        // Round-trips the original string back onto the wire.
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""percolating""#);
    }

    #[test]
    fn idea_wire_format_is_camel_case_with_type_alias() {
        let idea: Idea = serde_json::from_str(
            r#"{
                "id": "a1",
                "title": "Letters to my younger self",
                "type": "short-form-channel",
                "status": "drafting",
                "publishDate": "2024-05-01",
                "createdAt": 1714000000000
            }"#,
        )
        .unwrap();
        assert_eq!(idea.kind, IdeaKind::ShortFormChannel);
        assert_eq!(idea.status, IdeaStatus::Drafting);
        assert_eq!(idea.publish_date.as_deref(), Some("2024-05-01"));

        let json = serde_json::to_value(&idea).unwrap();
        assert_eq!(json["type"], "short-form-channel");
        assert_eq!(json["publishDate"], "2024-05-01");
        assert_eq!(json["createdAt"], 1714000000000i64);
    }

    #[test]
    fn missing_type_defaults_to_primary_channel() {
        let idea: Idea = serde_json::from_str(
            r#"{"id": "a2", "title": "Untyped", "status": "idea", "createdAt": 1}"#,
        )
        .unwrap();
        assert_eq!(idea.kind, IdeaKind::PrimaryChannel);
    }

    #[test]
    fn empty_publish_date_collapses_to_none() {
        let idea: Idea = serde_json::from_str(
            r#"{"id": "a3", "title": "Unscheduled", "status": "idea", "publishDate": "", "createdAt": 1}"#,
        )
        .unwrap();
        assert_eq!(idea.publish_date, None);
    }
}
