//! Storage operations for flashcards
//!
//! All cards live as one JSON document under the `flashcards` key. Reads
//! never fail: missing or corrupt data comes back as an empty collection.

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::storage::{load_json_or_default, store_json, KeyValueStore, StorageError};

use super::models::{CardStats, Flashcard};

/// Document key for the flashcard collection.
pub const FLASHCARDS_KEY: &str = "flashcards";

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("Card front must not be empty")]
    EmptyFront,

    #[error("Card back must not be empty")]
    EmptyBack,

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, FlashcardError>;

/// Storage manager for flashcard operations.
pub struct FlashcardStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> FlashcardStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ==================== Card Operations ====================

    /// Load every card. Missing or malformed data yields an empty list.
    pub fn load_cards(&self) -> Vec<Flashcard> {
        load_json_or_default(&self.store, FLASHCARDS_KEY)
    }

    /// Persist the full card collection.
    pub fn save_cards(&self, cards: &[Flashcard]) -> Result<()> {
        store_json(&self.store, FLASHCARDS_KEY, &cards)?;
        Ok(())
    }

    /// Create a new card.
    pub fn create_card(&self, subject: &str, front: &str, back: &str) -> Result<Flashcard> {
        let front = front.trim();
        if front.is_empty() {
            return Err(FlashcardError::EmptyFront);
        }
        let back = back.trim();
        if back.is_empty() {
            return Err(FlashcardError::EmptyBack);
        }

        let card = Flashcard::new(
            subject.trim().to_string(),
            front.to_string(),
            back.to_string(),
        );

        let mut cards = self.load_cards();
        cards.push(card.clone());
        self.save_cards(&cards)?;

        Ok(card)
    }

    /// Cards for one subject, or every card when `subject` is `None`.
    pub fn list_cards(&self, subject: Option<&str>) -> Vec<Flashcard> {
        self.load_cards()
            .into_iter()
            .filter(|card| match subject {
                Some(s) => card.subject.eq_ignore_ascii_case(s),
                None => true,
            })
            .collect()
    }

    /// Apply a partial update to a card.
    pub fn update_card(
        &self,
        card_id: Uuid,
        front: Option<String>,
        back: Option<String>,
        subject: Option<String>,
    ) -> Result<Flashcard> {
        let mut cards = self.load_cards();
        let card = cards
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or(FlashcardError::CardNotFound(card_id))?;

        if let Some(front) = front {
            let front = front.trim().to_string();
            if front.is_empty() {
                return Err(FlashcardError::EmptyFront);
            }
            card.front = front;
        }
        if let Some(back) = back {
            let back = back.trim().to_string();
            if back.is_empty() {
                return Err(FlashcardError::EmptyBack);
            }
            card.back = back;
        }
        if let Some(subject) = subject {
            card.subject = subject.trim().to_string();
        }
        card.updated_at = Utc::now();

        let updated = card.clone();
        self.save_cards(&cards)?;
        Ok(updated)
    }

    /// Delete a card.
    pub fn delete_card(&self, card_id: Uuid) -> Result<()> {
        let mut cards = self.load_cards();
        let before = cards.len();
        cards.retain(|card| card.id != card_id);
        if cards.len() == before {
            return Err(FlashcardError::CardNotFound(card_id));
        }
        self.save_cards(&cards)
    }

    // ==================== Practice ====================

    /// Record one showing of a card: `knew` marks it known, a miss puts
    /// it back in the unknown pile.
    pub fn record_review(&self, card_id: Uuid, knew: bool) -> Result<Flashcard> {
        let mut cards = self.load_cards();
        let card = cards
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or(FlashcardError::CardNotFound(card_id))?;

        card.known = knew;
        card.times_reviewed += 1;
        let now = Utc::now();
        card.last_reviewed_at = Some(now);
        card.updated_at = now;

        let updated = card.clone();
        self.save_cards(&cards)?;
        Ok(updated)
    }

    /// Flip a card between known and still-learning. Unlike
    /// [`record_review`](Self::record_review) this does not count as a
    /// showing of the card.
    pub fn toggle_known(&self, card_id: Uuid) -> Result<Flashcard> {
        let mut cards = self.load_cards();
        let card = cards
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or(FlashcardError::CardNotFound(card_id))?;

        card.known = !card.known;
        card.updated_at = Utc::now();

        let updated = card.clone();
        self.save_cards(&cards)?;
        Ok(updated)
    }

    /// Unknown cards in shuffled order, ready to drill.
    pub fn practice_queue(&self, subject: Option<&str>, rng: &mut impl Rng) -> Vec<Flashcard> {
        let mut queue: Vec<Flashcard> = self
            .list_cards(subject)
            .into_iter()
            .filter(|card| !card.known)
            .collect();
        queue.shuffle(rng);
        queue
    }

    /// Tally cards by recall state.
    pub fn stats(&self, subject: Option<&str>) -> CardStats {
        let cards = self.list_cards(subject);
        let known = cards.iter().filter(|card| card.known).count();
        CardStats {
            total_cards: cards.len(),
            known_cards: known,
            unknown_cards: cards.len() - known,
        }
    }
}
