//! Merchandise list records.

use serde::{Deserialize, Serialize};

use super::empty_as_none;

/// A merchandise idea or product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchItem {
    pub id: String,
    pub title: String,

    /// Product category (sticker, mug, print…).
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub status: MerchStatus,

    /// Free-form price label as entered ("$24", "TBD").
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Product photo as an encoded data URL, already resized by the
    /// presentation layer to [`crate::config::MERCH_IMAGE_MAX_DIM`].
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Unix milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MerchStatus {
    #[default]
    JustAnIdea,
    InDevelopment,
    ReadyToLaunch,
    Selling,
    Other(String),
}

impl MerchStatus {
    pub const KNOWN: [MerchStatus; 4] = [
        MerchStatus::JustAnIdea,
        MerchStatus::InDevelopment,
        MerchStatus::ReadyToLaunch,
        MerchStatus::Selling,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            MerchStatus::JustAnIdea => "Just an Idea",
            MerchStatus::InDevelopment => "In Development",
            MerchStatus::ReadyToLaunch => "Ready to Launch",
            MerchStatus::Selling => "Selling",
            MerchStatus::Other(s) => s,
        }
    }
}

impl From<String> for MerchStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Just an Idea" => MerchStatus::JustAnIdea,
            "In Development" => MerchStatus::InDevelopment,
            "Ready to Launch" => MerchStatus::ReadyToLaunch,
            "Selling" => MerchStatus::Selling,
            _ => MerchStatus::Other(s),
        }
    }
}

impl From<MerchStatus> for String {
    fn from(s: MerchStatus) -> Self {
        s.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merch_status_roundtrips() {
        for status in MerchStatus::KNOWN {
            let json = serde_json::to_string(&status).unwrap();
            let back: MerchStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn merch_item_tolerates_unknown_status() {
        let item: MerchItem = serde_json::from_str(
            r#"{"id": "m1", "title": "Sticker pack", "status": "Discontinued", "createdAt": 2}"#,
        )
        .unwrap();
        assert_eq!(item.status, MerchStatus::Other("Discontinued".to_string()));
    }
}
