//! Data models for flashcards

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A two-sided practice card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,

    /// Subject the card drills (e.g. "Chemistry")
    pub subject: String,

    pub front: String,

    pub back: String,

    /// Set once the card comes back easily; known cards leave the
    /// practice queue
    #[serde(default)]
    pub known: bool,

    #[serde(default)]
    pub times_reviewed: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(subject: String, front: String, back: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            subject,
            front,
            back,
            known: false,
            times_reviewed: 0,
            last_reviewed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Tally of cards by recall state.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStats {
    pub total_cards: usize,
    pub known_cards: usize,
    pub unknown_cards: usize,
}
