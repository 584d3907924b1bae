//! Daily and practice quizzes
//!
//! This module provides:
//! - An immutable question bank loaded from JSON
//! - A session state machine (answering, review marking, navigation,
//!   pause/resume) that produces scored attempts
//! - Attempt history with a one-per-day gate on daily quizzes
//! - Suspend/resume for unfinished runs

pub mod bank;
pub mod models;
pub mod session;
pub mod storage;

pub use bank::{BankError, QuestionBank};
pub use models::*;
pub use session::{QuizSession, SessionError};
pub use storage::{QuizError, QuizStorage, INCOMPLETE_QUIZ_KEY, QUIZ_ATTEMPTS_KEY};
