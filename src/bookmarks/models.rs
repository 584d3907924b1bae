//! Data models for study bookmarks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved study resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Uuid,

    pub title: String,

    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Pinned bookmarks sort ahead of the rest
    #[serde(default)]
    pub pinned: bool,

    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(title: String, url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            url,
            subject: None,
            pinned: false,
            created_at: Utc::now(),
        }
    }
}
