//! Storage operations for bookmarks
//!
//! Bookmarks live as one JSON document under the `bookmarks` key. Reads
//! never fail: missing or corrupt data comes back as an empty collection.

use thiserror::Error;
use uuid::Uuid;

use crate::storage::{load_json_or_default, store_json, KeyValueStore, StorageError};

use super::models::Bookmark;

/// Document key for the bookmark collection.
pub const BOOKMARKS_KEY: &str = "bookmarks";

#[derive(Error, Debug)]
pub enum BookmarkError {
    #[error("Bookmark title must not be empty")]
    EmptyTitle,

    #[error("Bookmark URL must not be empty")]
    EmptyUrl,

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, BookmarkError>;

/// Storage manager for bookmarks.
pub struct BookmarkStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> BookmarkStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load every bookmark. Missing or malformed data yields an empty
    /// list.
    pub fn load_bookmarks(&self) -> Vec<Bookmark> {
        load_json_or_default(&self.store, BOOKMARKS_KEY)
    }

    /// Persist the full bookmark collection.
    pub fn save_bookmarks(&self, bookmarks: &[Bookmark]) -> Result<()> {
        store_json(&self.store, BOOKMARKS_KEY, &bookmarks)?;
        Ok(())
    }

    /// Add a bookmark.
    pub fn add_bookmark(
        &self,
        title: &str,
        url: &str,
        subject: Option<String>,
    ) -> Result<Bookmark> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BookmarkError::EmptyTitle);
        }
        let url = url.trim();
        if url.is_empty() {
            return Err(BookmarkError::EmptyUrl);
        }

        let mut bookmark = Bookmark::new(title.to_string(), url.to_string());
        bookmark.subject = subject;

        let mut bookmarks = self.load_bookmarks();
        bookmarks.push(bookmark.clone());
        self.save_bookmarks(&bookmarks)?;

        Ok(bookmark)
    }

    /// Bookmarks for display: pinned first, newest first within each half.
    pub fn list_bookmarks(&self, subject: Option<&str>) -> Vec<Bookmark> {
        let mut bookmarks: Vec<Bookmark> = self
            .load_bookmarks()
            .into_iter()
            .filter(|b| match subject {
                Some(s) => b
                    .subject
                    .as_deref()
                    .map_or(false, |x| x.eq_ignore_ascii_case(s)),
                None => true,
            })
            .collect();
        bookmarks.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then(b.created_at.cmp(&a.created_at))
        });
        bookmarks
    }

    /// Case-insensitive title and URL search.
    pub fn search(&self, query: &str) -> Vec<Bookmark> {
        let needle = query.to_lowercase();
        self.list_bookmarks(None)
            .into_iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle) || b.url.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Flip the pinned flag.
    pub fn toggle_pinned(&self, bookmark_id: Uuid) -> Result<Bookmark> {
        let mut bookmarks = self.load_bookmarks();
        let bookmark = bookmarks
            .iter_mut()
            .find(|b| b.id == bookmark_id)
            .ok_or(BookmarkError::BookmarkNotFound(bookmark_id))?;

        bookmark.pinned = !bookmark.pinned;

        let updated = bookmark.clone();
        self.save_bookmarks(&bookmarks)?;
        Ok(updated)
    }

    /// Delete a bookmark.
    pub fn delete_bookmark(&self, bookmark_id: Uuid) -> Result<()> {
        let mut bookmarks = self.load_bookmarks();
        let before = bookmarks.len();
        bookmarks.retain(|b| b.id != bookmark_id);
        if bookmarks.len() == before {
            return Err(BookmarkError::BookmarkNotFound(bookmark_id));
        }
        self.save_bookmarks(&bookmarks)
    }
}
