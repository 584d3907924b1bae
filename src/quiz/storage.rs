//! Storage operations for quiz attempts and suspended sessions.
//!
//! Attempt history lives under the `quizAttempts` key; an unfinished run
//! is parked under `incompleteQuiz` until it is resumed or discarded.
//! Reads never fail: missing or corrupt data comes back empty.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::storage::{load_json_or_default, store_json, KeyValueStore, StorageError};

use super::models::{AttemptSummary, QuizAttempt, QuizKind};
use super::session::SessionError;

/// Document key for the attempt history.
pub const QUIZ_ATTEMPTS_KEY: &str = "quizAttempts";

/// Document key for the suspended session, one at a time.
pub const INCOMPLETE_QUIZ_KEY: &str = "incompleteQuiz";

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Daily quiz already taken on {0}")]
    DailyAlreadyTaken(NaiveDate),

    #[error("No suspended quiz to resume")]
    NoSuspendedQuiz,

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, QuizError>;

/// Storage manager for quiz history and suspended sessions.
pub struct QuizStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> QuizStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ==================== Attempt History ====================

    /// Load every recorded attempt. Missing or malformed history reads as
    /// empty.
    pub fn load_attempts(&self) -> Vec<QuizAttempt> {
        load_json_or_default(&self.store, QUIZ_ATTEMPTS_KEY)
    }

    /// Persist the full attempt history.
    pub fn save_attempts(&self, attempts: &[QuizAttempt]) -> Result<()> {
        store_json(&self.store, QUIZ_ATTEMPTS_KEY, &attempts)?;
        Ok(())
    }

    /// Append one attempt to the history.
    pub fn record_attempt(&self, attempt: &QuizAttempt) -> Result<()> {
        let mut attempts = self.load_attempts();
        attempts.push(attempt.clone());
        self.save_attempts(&attempts)
    }

    // ==================== Daily Gating ====================

    /// Whether the daily slot for `date` and `subject` is already used.
    pub fn daily_taken_on(&self, date: NaiveDate, subject: Option<&str>) -> bool {
        self.load_attempts().iter().any(|attempt| {
            attempt.kind == QuizKind::Daily
                && attempt.date == date
                && subject_matches(attempt.subject.as_deref(), subject)
        })
    }

    /// Error unless the daily slot for `date` and `subject` is free.
    pub fn ensure_daily_available(&self, date: NaiveDate, subject: Option<&str>) -> Result<()> {
        if self.daily_taken_on(date, subject) {
            return Err(QuizError::DailyAlreadyTaken(date));
        }
        Ok(())
    }

    // ==================== Suspended Session ====================

    /// The parked unfinished run, if any. Malformed data reads as none.
    pub fn load_suspended(&self) -> Option<QuizAttempt> {
        let snapshot: Option<QuizAttempt> = load_json_or_default(&self.store, INCOMPLETE_QUIZ_KEY);
        snapshot.filter(|attempt| {
            if attempt.is_completed {
                log::warn!("Ignoring completed attempt {} parked as suspended", attempt.id);
            }
            !attempt.is_completed
        })
    }

    /// Park an unfinished run, replacing any previous one.
    pub fn save_suspended(&self, snapshot: &QuizAttempt) -> Result<()> {
        store_json(&self.store, INCOMPLETE_QUIZ_KEY, snapshot)?;
        Ok(())
    }

    /// Drop the parked run.
    pub fn clear_suspended(&self) -> Result<()> {
        self.store.remove(INCOMPLETE_QUIZ_KEY)?;
        Ok(())
    }

    // ==================== Summary ====================

    /// Aggregate the history, optionally narrowed to one subject.
    ///
    /// `today` anchors the daily streak: the streak survives until a full
    /// day passes without a daily quiz, so a quiz-free morning does not
    /// zero it.
    pub fn summary(&self, subject: Option<&str>, today: NaiveDate) -> AttemptSummary {
        let mut attempts = self.load_attempts();
        if let Some(wanted) = subject {
            attempts.retain(|attempt| {
                attempt
                    .subject
                    .as_deref()
                    .map_or(false, |s| s.eq_ignore_ascii_case(wanted))
            });
        }

        let mut summary = AttemptSummary {
            total_attempts: attempts.len(),
            ..AttemptSummary::default()
        };
        if attempts.is_empty() {
            return summary;
        }

        let mut accuracy_sum = 0.0;
        for attempt in &attempts {
            summary.total_questions += attempt.total_questions;
            summary.total_correct += attempt.score;
            let accuracy = attempt.accuracy();
            accuracy_sum += accuracy;
            if accuracy > summary.best_accuracy {
                summary.best_accuracy = accuracy;
            }
        }
        summary.average_accuracy = accuracy_sum / attempts.len() as f64;
        summary.daily_streak = daily_streak(&attempts, today);

        summary
    }
}

/// Consecutive days with a daily quiz, counting back from `today`. A
/// missing quiz today anchors the count on yesterday instead of breaking
/// the run.
fn daily_streak(attempts: &[QuizAttempt], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = attempts
        .iter()
        .filter(|attempt| attempt.kind == QuizKind::Daily)
        .map(|attempt| attempt.date)
        .collect();

    let mut anchor = today;
    if !days.contains(&anchor) {
        anchor -= Duration::days(1);
    }

    let mut streak = 0;
    while days.contains(&anchor) {
        streak += 1;
        anchor -= Duration::days(1);
    }
    streak
}

fn subject_matches(stored: Option<&str>, wanted: Option<&str>) -> bool {
    match (stored, wanted) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}
