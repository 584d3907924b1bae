//! Immutable question bank.
//!
//! The bank is loaded once from a JSON array and never changes while the
//! application runs. Construction validates every question so sessions can
//! trust option indexes without rechecking.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::models::Question;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate question id: {0}")]
    DuplicateId(String),

    #[error("Question {0} needs at least two options")]
    TooFewOptions(String),

    #[error("Question {id} marks option {correct} correct but has only {options} options")]
    AnswerOutOfRange {
        id: String,
        correct: usize,
        options: usize,
    },
}

pub type Result<T> = std::result::Result<T, BankError>;

/// Read-only collection of questions, indexed by id.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
}

impl QuestionBank {
    /// Build a bank, rejecting questions a session could not run on.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(questions.len());
        for (index, question) in questions.iter().enumerate() {
            // A single-option question has nothing to choose between.
            if question.options.len() < 2 {
                return Err(BankError::TooFewOptions(question.id.clone()));
            }
            if question.correct_answer >= question.options.len() {
                return Err(BankError::AnswerOutOfRange {
                    id: question.id.clone(),
                    correct: question.correct_answer,
                    options: question.options.len(),
                });
            }
            if by_id.insert(question.id.clone(), index).is_some() {
                return Err(BankError::DuplicateId(question.id.clone()));
            }
        }
        Ok(Self { questions, by_id })
    }

    /// Load a bank from a JSON array file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let questions: Vec<Question> = serde_json::from_str(&content)?;
        Self::new(questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look a question up by its bank id.
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id).map(|&index| &self.questions[index])
    }

    /// Every distinct subject in the bank, sorted.
    pub fn subjects(&self) -> Vec<String> {
        let mut subjects: Vec<String> = self
            .questions
            .iter()
            .map(|q| q.subject.clone())
            .collect();
        subjects.sort();
        subjects.dedup();
        subjects
    }

    /// Questions for one subject, or the whole bank when `subject` is
    /// `None`. Subject matching ignores ASCII case.
    pub fn for_subject(&self, subject: Option<&str>) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| match subject {
                Some(s) => q.subject.eq_ignore_ascii_case(s),
                None => true,
            })
            .cloned()
            .collect()
    }
}
