//! Storage operations for the revision planner.
//!
//! The whole collection lives as a single JSON document under the
//! `revisionItems` key and is rewritten on every change. Reads never fail:
//! missing or corrupt data comes back as an empty planner.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::storage::{load_json_or_default, store_json, KeyValueStore, StorageError};

use super::models::{CreateItemRequest, RevisionItem, StatusGroup, UpdateItemRequest};
use super::scheduler::{filter_group, sort_items};

/// Document key for the revision item collection.
pub const REVISION_ITEMS_KEY: &str = "revisionItems";

#[derive(Error, Debug)]
pub enum RevisionError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Chapter must not be empty")]
    EmptyChapter,

    #[error("Revision item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("{0} is not a scheduled revision day")]
    DateNotScheduled(NaiveDate),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, RevisionError>;

/// Storage manager for the revision planner.
pub struct RevisionStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> RevisionStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ==================== Item Operations ====================

    /// Load every item. Missing or malformed data yields an empty list.
    pub fn load_items(&self) -> Vec<RevisionItem> {
        load_json_or_default(&self.store, REVISION_ITEMS_KEY)
    }

    /// Persist the full item collection.
    pub fn save_items(&self, items: &[RevisionItem]) -> Result<()> {
        store_json(&self.store, REVISION_ITEMS_KEY, &items)?;
        Ok(())
    }

    /// Get a specific item.
    pub fn get_item(&self, item_id: Uuid) -> Result<RevisionItem> {
        self.load_items()
            .into_iter()
            .find(|item| item.id == item_id)
            .ok_or(RevisionError::ItemNotFound(item_id))
    }

    /// Create a new item and derive its revision schedule.
    ///
    /// `today` anchors the schedule when the request carries no explicit
    /// initial date.
    pub fn create_item(
        &self,
        request: CreateItemRequest,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<RevisionItem> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(RevisionError::EmptyTitle);
        }
        let chapter = request.chapter.trim();
        if chapter.is_empty() {
            return Err(RevisionError::EmptyChapter);
        }

        let initial_date = request.initial_date.unwrap_or(today);
        let mut item = RevisionItem::new(
            request.subject.trim().to_string(),
            chapter.to_string(),
            title.to_string(),
            initial_date,
            now,
        );
        item.notes = request.notes;
        item.importance = request.importance;

        let mut items = self.load_items();
        items.push(item.clone());
        self.save_items(&items)?;

        Ok(item)
    }

    /// Apply a partial update to an item.
    pub fn update_item(&self, item_id: Uuid, request: UpdateItemRequest) -> Result<RevisionItem> {
        let mut items = self.load_items();
        let item = items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(RevisionError::ItemNotFound(item_id))?;

        if let Some(title) = request.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(RevisionError::EmptyTitle);
            }
            item.title = title;
        }
        if let Some(chapter) = request.chapter {
            let chapter = chapter.trim().to_string();
            if chapter.is_empty() {
                return Err(RevisionError::EmptyChapter);
            }
            item.chapter = chapter;
        }
        if let Some(subject) = request.subject {
            item.subject = subject.trim().to_string();
        }
        if let Some(notes) = request.notes {
            item.notes = if notes.trim().is_empty() {
                None
            } else {
                Some(notes)
            };
        }
        if let Some(importance) = request.importance {
            item.importance = importance;
        }
        if let Some(active) = request.active {
            item.active = active;
        }

        let updated = item.clone();
        self.save_items(&items)?;
        Ok(updated)
    }

    /// Delete an item.
    pub fn delete_item(&self, item_id: Uuid) -> Result<()> {
        let mut items = self.load_items();
        let before = items.len();
        items.retain(|item| item.id != item_id);
        if items.len() == before {
            return Err(RevisionError::ItemNotFound(item_id));
        }
        self.save_items(&items)
    }

    // ==================== Revision Tracking ====================

    /// Mark a scheduled day as revised. Marking the same day twice is a
    /// no-op.
    pub fn mark_completed(&self, item_id: Uuid, date: NaiveDate) -> Result<RevisionItem> {
        let mut items = self.load_items();
        let item = items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(RevisionError::ItemNotFound(item_id))?;

        if !item.is_scheduled(date) {
            return Err(RevisionError::DateNotScheduled(date));
        }
        item.completed_revisions.insert(date);

        let updated = item.clone();
        self.save_items(&items)?;
        Ok(updated)
    }

    /// Undo a revision mark. Unmarking a day that was never marked is a
    /// no-op, whether or not the day is on the schedule.
    pub fn mark_incomplete(&self, item_id: Uuid, date: NaiveDate) -> Result<RevisionItem> {
        let mut items = self.load_items();
        let item = items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(RevisionError::ItemNotFound(item_id))?;

        item.completed_revisions.remove(&date);

        let updated = item.clone();
        self.save_items(&items)?;
        Ok(updated)
    }

    // ==================== Views ====================

    /// Items of one filter group, sorted for display.
    pub fn list_group(&self, group: StatusGroup, today: NaiveDate) -> Vec<RevisionItem> {
        let mut items = filter_group(&self.load_items(), group, today);
        sort_items(&mut items);
        items
    }
}
