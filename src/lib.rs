//! Core library for prepdesk
//!
//! Storage-backed engines for exam preparation: a spaced revision planner,
//! daily and practice quizzes, flashcards and bookmarks. Persistence goes
//! through the `storage::KeyValueStore` trait, so the same engines run on
//! files in production and in memory under test.

pub mod bookmarks;
pub mod flashcards;
pub mod quiz;
pub mod revision;
pub mod storage;
