//! Flashcards for quick recall practice
//!
//! This module provides:
//! - Card CRUD, grouped by subject
//! - A known/unknown recall flag per card
//! - A shuffled practice queue of the cards still unknown

pub mod models;
pub mod storage;

pub use models::*;
pub use storage::{FlashcardError, FlashcardStorage, FLASHCARDS_KEY};
