//! Data structures for quizzes and attempts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Bank-wide identifier, stable across sessions
    pub id: String,

    pub subject: String,

    pub text: String,

    pub options: Vec<String>,

    /// Index into `options`
    pub correct_answer: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Answer and review state of one question within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionStatus {
    /// Never shown to the candidate
    NotVisited,
    /// Shown but no answer recorded
    NotAnswered,
    Answered,
    /// Flagged for review, no answer yet
    MarkedReview,
    /// Answered and still flagged for review
    AnsweredMarked,
}

/// Which slot an attempt fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    /// The once-per-day quiz; one attempt per subject per calendar day
    Daily,
    /// Free practice, unlimited attempts
    Practice,
}

/// Lifecycle of a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    InProgress,
    Paused,
    Completed,
}

/// Stored record of a quiz run, finished or suspended mid-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: Uuid,

    /// Calendar day the run started; daily gating keys off this
    pub date: NaiveDate,

    /// `None` means the quiz drew from every subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    pub kind: QuizKind,

    /// Correct answers so far
    pub score: u32,

    pub total_questions: usize,

    /// Active seconds; time spent paused is excluded
    pub time_spent_secs: u64,

    pub is_completed: bool,

    /// Where to resume a suspended run; absent once completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_question_index: Option<usize>,

    /// Chosen option per question, `None` where unanswered
    pub answers: Vec<Option<usize>>,

    pub question_statuses: Vec<QuestionStatus>,

    /// Bank ids of the drawn questions, in presented order
    pub question_ids: Vec<String>,
}

impl QuizAttempt {
    /// Score as a fraction of the questions asked, 0.0 to 1.0.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.score) / self.total_questions as f64
    }
}

/// Aggregate view over recorded attempts.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    pub total_attempts: usize,

    pub total_questions: usize,

    pub total_correct: u32,

    /// Mean per-attempt accuracy, 0.0 to 1.0
    pub average_accuracy: f64,

    pub best_accuracy: f64,

    /// Consecutive days with a daily quiz, counting back from today
    pub daily_streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_handles_empty_attempt() {
        let attempt = QuizAttempt {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            subject: None,
            kind: QuizKind::Practice,
            score: 0,
            total_questions: 0,
            time_spent_secs: 0,
            is_completed: true,
            last_question_index: None,
            answers: Vec::new(),
            question_statuses: Vec::new(),
            question_ids: Vec::new(),
        };
        assert_eq!(attempt.accuracy(), 0.0);
    }

    #[test]
    fn test_status_serializes_in_camel_case() {
        let json = serde_json::to_string(&QuestionStatus::AnsweredMarked).unwrap();
        assert_eq!(json, "\"answeredMarked\"");

        let back: QuestionStatus = serde_json::from_str("\"notVisited\"").unwrap();
        assert_eq!(back, QuestionStatus::NotVisited);
    }
}
