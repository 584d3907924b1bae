//! Bookmarks for study resources
//!
//! This module provides:
//! - Saved links with an optional subject tag
//! - Pinning and case-insensitive search

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{BookmarkError, BookmarkStorage, BOOKMARKS_KEY};
