//! Spaced revision planner
//!
//! This module provides:
//! - Revision items (one per studied chapter) with a fixed ladder of
//!   revision days: 1, 3, 7, 14, 30, 60 and 90 days after first study
//! - Completion tracking per scheduled day
//! - Status classification and filter groups for the planner views

pub mod models;
pub mod scheduler;
pub mod storage;

pub use models::*;
pub use scheduler::{
    classify_status, filter_group, in_group, schedule_dates, sort_items, REVISION_OFFSETS,
    UPCOMING_WINDOW_DAYS,
};
pub use storage::{RevisionError, RevisionStorage, REVISION_ITEMS_KEY};
