//! The whole-state document persisted remotely.

use serde::{Deserialize, Serialize};

use super::{Collaborator, CrossPost, Event, Idea, MerchItem};

/// The single remote record holding all of a user's collections.
///
/// Every collection field is individually optional because the store merges
/// at field level: a snapshot may carry only some collections, and absent
/// fields leave the remote (and, on the inbound path, local) side untouched.
/// An outbound push always fills all five.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideas: Option<Vec<Idea>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_posts: Option<Vec<CrossPost>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Vec<Collaborator>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merch: Option<Vec<MerchItem>>,

    /// RFC 3339 stamp of the write that produced this document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Email of the owning account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Document {
    /// Field-level merge: every field present in `incoming` replaces the
    /// corresponding field here; absent fields are left untouched. This is
    /// the store-side half of the last-writer-wins contract.
    pub fn merge_from(&mut self, incoming: Document) {
        let Document {
            ideas,
            events,
            cross_posts,
            collaborators,
            merch,
            updated_at,
            email,
        } = incoming;
        if let Some(v) = ideas {
            self.ideas = Some(v);
        }
        if let Some(v) = events {
            self.events = Some(v);
        }
        if let Some(v) = cross_posts {
            self.cross_posts = Some(v);
        }
        if let Some(v) = collaborators {
            self.collaborators = Some(v);
        }
        if let Some(v) = merch {
            self.merch = Some(v);
        }
        if let Some(v) = updated_at {
            self.updated_at = Some(v);
        }
        if let Some(v) = email {
            self.email = Some(v);
        }
    }
}

/// Names of the five tracked collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Ideas,
    Events,
    CrossPosts,
    Collaborators,
    Merch,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 5] = [
        CollectionKey::Ideas,
        CollectionKey::Events,
        CollectionKey::CrossPosts,
        CollectionKey::Collaborators,
        CollectionKey::Merch,
    ];

    /// Wire field name inside the document.
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKey::Ideas => "ideas",
            CollectionKey::Events => "events",
            CollectionKey::CrossPosts => "crossPosts",
            CollectionKey::Collaborators => "collaborators",
            CollectionKey::Merch => "merch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IdeaStatus, new_record_id, now_millis};

    fn idea(title: &str) -> Idea {
        Idea {
            id: new_record_id(),
            title: title.to_string(),
            kind: Default::default(),
            status: IdeaStatus::Idea,
            publish_date: None,
            series: None,
            notes: None,
            format: None,
            created_at: now_millis(),
            updated_at: None,
        }
    }

    #[test]
    fn partial_document_leaves_absent_collections_out() {
        let doc: Document = serde_json::from_str(
            r#"{"ideas": [], "updatedAt": "2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(doc.ideas, Some(vec![]));
        assert!(doc.events.is_none());
        assert!(doc.cross_posts.is_none());
        assert!(doc.merch.is_none());
    }

    #[test]
    fn merge_replaces_present_fields_only() {
        let mut stored = Document {
            ideas: Some(vec![idea("old")]),
            events: Some(vec![]),
            email: Some("a@example.com".to_string()),
            ..Default::default()
        };

        stored.merge_from(Document {
            ideas: Some(vec![idea("new"), idea("newer")]),
            ..Default::default()
        });

        assert_eq!(stored.ideas.as_ref().unwrap().len(), 2);
        assert_eq!(stored.events, Some(vec![]));
        assert_eq!(stored.email.as_deref(), Some("a@example.com"));
    }

    #[test]
    fn wire_field_is_cross_posts_camel_case() {
        let doc = Document {
            cross_posts: Some(vec![]),
            ..Default::default()
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("crossPosts").is_some());
        assert!(json.get("ideas").is_none());
    }
}
