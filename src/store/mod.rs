//! The local collection store.
//!
//! [`PlannerState`] owns the five in-memory collections. It is an explicit
//! container created by the sync coordinator at session start and replaced
//! wholesale on sign-out; consumers hold it through a shared [`StateHandle`]
//! rather than ambient globals.
//!
//! Mutations are synchronous and run to completion; nothing observes a
//! half-applied change. After mutating, callers notify the coordinator so it
//! can arm the debounced push.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::MERCH_IMAGE_MAX_BYTES;
use crate::error::StateError;
use crate::model::{
    Collaborator, CollaboratorStatus, CollectionKey, CrossPost, CrossPostStatus, Document, Event,
    EventStatus, Idea, IdeaKind, IdeaStatus, MerchItem, MerchStatus, new_record_id, now_millis,
};

/// Shared handle to the collection store.
pub type StateHandle = Arc<RwLock<PlannerState>>;

/// All five collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerState {
    pub ideas: Vec<Idea>,
    pub events: Vec<Event>,
    pub cross_posts: Vec<CrossPost>,
    pub collaborators: Vec<Collaborator>,
    pub merch: Vec<MerchItem>,
}

/// Field set collected by the idea editor. Used for both create and edit;
/// an edit overwrites these fields and nothing else.
#[derive(Debug, Clone, Default)]
pub struct IdeaDraft {
    pub title: String,
    pub kind: IdeaKind,
    pub status: IdeaStatus,
    pub publish_date: Option<String>,
    pub series: Option<String>,
    pub notes: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub status: EventStatus,
    pub date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CrossPostDraft {
    pub title: String,
    pub status: CrossPostStatus,
    pub url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CollaboratorDraft {
    pub title: String,
    pub status: CollaboratorStatus,
    pub url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MerchDraft {
    pub title: String,
    pub category: Option<String>,
    pub status: MerchStatus,
    pub price: Option<String>,
    pub notes: Option<String>,
    pub image: Option<String>,
}

impl PlannerState {
    // ── Ideas ──

    /// Create an idea with a fresh id and creation stamp. Returns the id.
    pub fn create_idea(&mut self, draft: IdeaDraft) -> String {
        let id = new_record_id();
        self.ideas.insert(
            0,
            Idea {
                id: id.clone(),
                title: draft.title,
                kind: draft.kind,
                status: draft.status,
                publish_date: draft.publish_date,
                series: draft.series,
                notes: draft.notes,
                format: draft.format,
                created_at: now_millis(),
                updated_at: None,
            },
        );
        id
    }

    /// Overwrite an idea's editable fields, preserving id and `created_at`
    /// and refreshing `updated_at`. Returns false when the id is unknown.
    pub fn update_idea(&mut self, id: &str, draft: IdeaDraft) -> bool {
        let Some(idea) = self.ideas.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        idea.title = draft.title;
        idea.kind = draft.kind;
        idea.status = draft.status;
        idea.publish_date = draft.publish_date;
        idea.series = draft.series;
        idea.notes = draft.notes;
        idea.format = draft.format;
        idea.updated_at = Some(now_millis());
        true
    }

    pub fn delete_idea(&mut self, id: &str) -> bool {
        let before = self.ideas.len();
        self.ideas.retain(|i| i.id != id);
        self.ideas.len() != before
    }

    /// Kanban drag: reassign status. Returns false (no push needed) when the
    /// idea is unknown or already in that column.
    pub fn move_idea(&mut self, id: &str, status: IdeaStatus) -> bool {
        let Some(idea) = self.ideas.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        if idea.status == status {
            return false;
        }
        idea.status = status;
        idea.updated_at = Some(now_millis());
        true
    }

    /// Calendar assignment: set or clear the publish date.
    pub fn schedule_idea(&mut self, id: &str, date: Option<String>) -> bool {
        let Some(idea) = self.ideas.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        idea.publish_date = date;
        idea.updated_at = Some(now_millis());
        true
    }

    // ── Events ──

    pub fn create_event(&mut self, draft: EventDraft) -> String {
        let id = new_record_id();
        self.events.insert(
            0,
            Event {
                id: id.clone(),
                title: draft.title,
                status: draft.status,
                date: draft.date,
                notes: draft.notes,
                created_at: now_millis(),
            },
        );
        id
    }

    pub fn update_event(&mut self, id: &str, draft: EventDraft) -> bool {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        event.title = draft.title;
        event.status = draft.status;
        event.date = draft.date;
        event.notes = draft.notes;
        true
    }

    pub fn delete_event(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }

    // ── Cross-posts ──

    pub fn create_cross_post(&mut self, draft: CrossPostDraft) -> String {
        let id = new_record_id();
        self.cross_posts.insert(
            0,
            CrossPost {
                id: id.clone(),
                title: draft.title,
                status: draft.status,
                url: draft.url,
                notes: draft.notes,
                created_at: now_millis(),
            },
        );
        id
    }

    pub fn update_cross_post(&mut self, id: &str, draft: CrossPostDraft) -> bool {
        let Some(cp) = self.cross_posts.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        cp.title = draft.title;
        cp.status = draft.status;
        cp.url = draft.url;
        cp.notes = draft.notes;
        true
    }

    pub fn delete_cross_post(&mut self, id: &str) -> bool {
        let before = self.cross_posts.len();
        self.cross_posts.retain(|c| c.id != id);
        self.cross_posts.len() != before
    }

    // ── Collaborators ──

    pub fn create_collaborator(&mut self, draft: CollaboratorDraft) -> String {
        let id = new_record_id();
        self.collaborators.insert(
            0,
            Collaborator {
                id: id.clone(),
                title: draft.title,
                status: draft.status,
                url: draft.url,
                notes: draft.notes,
                created_at: now_millis(),
            },
        );
        id
    }

    pub fn update_collaborator(&mut self, id: &str, draft: CollaboratorDraft) -> bool {
        let Some(c) = self.collaborators.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        c.title = draft.title;
        c.status = draft.status;
        c.url = draft.url;
        c.notes = draft.notes;
        true
    }

    pub fn delete_collaborator(&mut self, id: &str) -> bool {
        let before = self.collaborators.len();
        self.collaborators.retain(|c| c.id != id);
        self.collaborators.len() != before
    }

    // ── Merch ──

    pub fn create_merch(&mut self, draft: MerchDraft) -> Result<String, StateError> {
        check_image(draft.image.as_deref())?;
        let id = new_record_id();
        self.merch.insert(
            0,
            MerchItem {
                id: id.clone(),
                title: draft.title,
                category: draft.category,
                status: draft.status,
                price: draft.price,
                notes: draft.notes,
                image: draft.image,
                created_at: now_millis(),
            },
        );
        Ok(id)
    }

    pub fn update_merch(&mut self, id: &str, draft: MerchDraft) -> Result<bool, StateError> {
        check_image(draft.image.as_deref())?;
        let Some(item) = self.merch.iter_mut().find(|m| m.id == id) else {
            return Ok(false);
        };
        item.title = draft.title;
        item.category = draft.category;
        item.status = draft.status;
        item.price = draft.price;
        item.notes = draft.notes;
        item.image = draft.image;
        Ok(true)
    }

    pub fn delete_merch(&mut self, id: &str) -> bool {
        let before = self.merch.len();
        self.merch.retain(|m| m.id != id);
        self.merch.len() != before
    }

    // ── Snapshots ──

    /// Serialize the full current state for a push. All five collections are
    /// always included; the stamp is taken at call time.
    pub fn snapshot(&self, email: Option<&str>) -> Document {
        Document {
            ideas: Some(self.ideas.clone()),
            events: Some(self.events.clone()),
            cross_posts: Some(self.cross_posts.clone()),
            collaborators: Some(self.collaborators.clone()),
            merch: Some(self.merch.clone()),
            updated_at: Some(chrono::Utc::now().to_rfc3339()),
            email: email.map(str::to_string),
        }
    }

    /// Apply an inbound snapshot: each collection present in `doc` replaces
    /// the local collection in full; absent collections are untouched.
    /// Returns the keys that were replaced.
    pub fn apply_snapshot(&mut self, doc: Document) -> Vec<CollectionKey> {
        let mut replaced = Vec::new();
        if let Some(ideas) = doc.ideas {
            self.ideas = ideas;
            replaced.push(CollectionKey::Ideas);
        }
        if let Some(events) = doc.events {
            self.events = events;
            replaced.push(CollectionKey::Events);
        }
        if let Some(cross_posts) = doc.cross_posts {
            self.cross_posts = cross_posts;
            replaced.push(CollectionKey::CrossPosts);
        }
        if let Some(collaborators) = doc.collaborators {
            self.collaborators = collaborators;
            replaced.push(CollectionKey::Collaborators);
        }
        if let Some(merch) = doc.merch {
            self.merch = merch;
            replaced.push(CollectionKey::Merch);
        }
        replaced
    }
}

fn check_image(image: Option<&str>) -> Result<(), StateError> {
    match image {
        Some(data) if data.len() > MERCH_IMAGE_MAX_BYTES => Err(StateError::ImageTooLarge {
            bytes: data.len(),
            max: MERCH_IMAGE_MAX_BYTES,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> IdeaDraft {
        IdeaDraft {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn create_assigns_id_and_creation_stamp() {
        let mut state = PlannerState::default();
        let id = state.create_idea(draft("A"));

        let idea = state.ideas.iter().find(|i| i.id == id).unwrap();
        assert_eq!(idea.title, "A");
        assert_eq!(idea.status, IdeaStatus::Idea);
        assert!(idea.created_at > 0);
        assert!(idea.updated_at.is_none());
    }

    #[test]
    fn edit_preserves_id_and_created_at() {
        let mut state = PlannerState::default();
        let id = state.create_idea(draft("A"));
        let created_at = state.ideas[0].created_at;

        let changed = state.update_idea(
            &id,
            IdeaDraft {
                title: "A".to_string(),
                status: IdeaStatus::Ready,
                ..Default::default()
            },
        );

        assert!(changed);
        let idea = &state.ideas[0];
        assert_eq!(idea.id, id);
        assert_eq!(idea.created_at, created_at);
        assert_eq!(idea.status, IdeaStatus::Ready);
        assert!(idea.updated_at.is_some());
    }

    #[test]
    fn delete_removes_by_id() {
        let mut state = PlannerState::default();
        let id = state.create_idea(draft("A"));
        state.create_idea(draft("B"));

        assert!(state.delete_idea(&id));
        assert!(!state.delete_idea(&id));
        assert_eq!(state.ideas.len(), 1);
        assert!(state.ideas.iter().all(|i| i.id != id));
    }

    #[test]
    fn move_to_same_column_is_a_no_op() {
        let mut state = PlannerState::default();
        let id = state.create_idea(draft("A"));

        assert!(!state.move_idea(&id, IdeaStatus::Idea));
        assert!(state.move_idea(&id, IdeaStatus::Drafting));
        assert_eq!(state.ideas[0].status, IdeaStatus::Drafting);
    }

    #[test]
    fn snapshot_always_carries_all_five_collections() {
        let mut state = PlannerState::default();
        state.create_idea(draft("A"));

        let doc = state.snapshot(Some("me@example.com"));
        assert!(doc.ideas.is_some());
        assert!(doc.events.is_some());
        assert!(doc.cross_posts.is_some());
        assert!(doc.collaborators.is_some());
        assert!(doc.merch.is_some());
        assert_eq!(doc.email.as_deref(), Some("me@example.com"));
        assert!(doc.updated_at.is_some());
    }

    #[test]
    fn apply_snapshot_replaces_only_present_collections() {
        let mut state = PlannerState::default();
        state.create_idea(draft("local idea"));
        state.create_event(EventDraft {
            title: "local event".to_string(),
            ..Default::default()
        });

        let replaced = state.apply_snapshot(Document {
            ideas: Some(vec![]),
            ..Default::default()
        });

        assert_eq!(replaced, vec![CollectionKey::Ideas]);
        assert!(state.ideas.is_empty());
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn oversized_merch_image_is_rejected() {
        let mut state = PlannerState::default();
        let big = "x".repeat(MERCH_IMAGE_MAX_BYTES + 1);

        let err = state
            .create_merch(MerchDraft {
                title: "Poster".to_string(),
                image: Some(big),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, StateError::ImageTooLarge { .. }));
        assert!(state.merch.is_empty());
    }
}
