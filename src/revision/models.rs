//! Data structures for the revision planner.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::scheduler::schedule_dates;

/// How heavily a chapter weighs on the exam.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

/// Planner verdict for one item relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionStatus {
    Overdue,
    Today,
    Upcoming,
    Completed,
}

/// Filter groups offered by the planner list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusGroup {
    Due,
    Upcoming,
    Completed,
    All,
}

/// A chapter enrolled in the spaced revision plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionItem {
    pub id: Uuid,

    /// Subject the chapter belongs to (e.g. "Physics")
    pub subject: String,

    pub chapter: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub importance: Importance,

    /// Day the chapter was first studied; every revision day hangs off it
    pub initial_date: NaiveDate,

    /// Scheduled revision days, ascending
    pub revision_dates: Vec<NaiveDate>,

    /// Scheduled days already revised
    #[serde(default)]
    pub completed_revisions: BTreeSet<NaiveDate>,

    /// Inactive items are kept but hidden from the due and upcoming views
    #[serde(default = "default_active")]
    pub active: bool,

    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl RevisionItem {
    /// Create an item with its schedule derived from `initial_date`.
    pub fn new(
        subject: String,
        chapter: String,
        title: String,
        initial_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject,
            chapter,
            title,
            notes: None,
            importance: Importance::default(),
            initial_date,
            revision_dates: schedule_dates(initial_date),
            completed_revisions: BTreeSet::new(),
            active: true,
            created_at: now,
        }
    }

    /// Whether `date` is one of the scheduled revision days.
    pub fn is_scheduled(&self, date: NaiveDate) -> bool {
        self.revision_dates.contains(&date)
    }

    /// First scheduled day not yet revised.
    pub fn next_pending(&self) -> Option<NaiveDate> {
        self.revision_dates
            .iter()
            .find(|d| !self.completed_revisions.contains(d))
            .copied()
    }

    /// Every scheduled day has been revised.
    pub fn is_fully_completed(&self) -> bool {
        self.next_pending().is_none()
    }

    /// Number of scheduled days already revised.
    pub fn completed_count(&self) -> usize {
        self.revision_dates
            .iter()
            .filter(|d| self.completed_revisions.contains(d))
            .count()
    }
}

/// Payload for creating a revision item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub subject: String,

    pub chapter: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub importance: Importance,

    /// Defaults to the current day when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_date: Option<NaiveDate>,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// An empty string clears the notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
