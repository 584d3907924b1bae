//! Quiz session state machine.
//!
//! A session runs `InProgress` ⇄ `Paused` until advancing past the last
//! question completes it. Every mutating call names the state it needs and
//! fails fast otherwise, so question statuses and the score only ever
//! change through the transitions below.

use chrono::{DateTime, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use super::bank::QuestionBank;
use super::models::{Question, QuestionStatus, QuizAttempt, QuizKind, SessionState};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No questions to quiz on")]
    NoQuestions,

    #[error("Question {0} was already answered")]
    AlreadyAnswered(usize),

    #[error("Option {given} is out of range for a question with {options} options")]
    InvalidOption { given: usize, options: usize },

    #[error("Question index {given} is out of range for {count} questions")]
    IndexOutOfRange { given: usize, count: usize },

    #[error("Session is not in progress")]
    NotInProgress,

    #[error("Session is not paused")]
    NotPaused,

    #[error("Attempt is already completed")]
    AlreadyCompleted,

    #[error("Question {0} is no longer in the bank")]
    UnknownQuestion(String),

    #[error("Stored session does not line up with its questions")]
    SnapshotMismatch,
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// A quiz run from first question to scored completion.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    date: NaiveDate,
    subject: Option<String>,
    kind: QuizKind,
    state: SessionState,
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<Option<usize>>,
    statuses: Vec<QuestionStatus>,
    score: u32,
    /// Instant the current active stretch began (start or last resume)
    segment_started_at: DateTime<Utc>,
    /// Active seconds banked by earlier stretches
    banked_secs: u64,
}

impl QuizSession {
    // ==================== Lifecycle ====================

    /// Start a session over the bank, optionally narrowed to one subject.
    ///
    /// Questions are shuffled and capped at `count`; asking for more than
    /// the bank holds simply gives every matching question.
    pub fn start(
        bank: &QuestionBank,
        subject: Option<&str>,
        count: usize,
        kind: QuizKind,
        today: NaiveDate,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let mut questions = bank.for_subject(subject);
        if questions.is_empty() || count == 0 {
            return Err(SessionError::NoQuestions);
        }

        questions.shuffle(rng);
        questions.truncate(count);

        let total = questions.len();
        let mut statuses = vec![QuestionStatus::NotVisited; total];
        statuses[0] = QuestionStatus::NotAnswered;

        Ok(Self {
            id: Uuid::new_v4(),
            date: today,
            subject: subject.map(str::to_string),
            kind,
            state: SessionState::InProgress,
            questions,
            current_index: 0,
            answers: vec![None; total],
            statuses,
            score: 0,
            segment_started_at: now,
            banked_secs: 0,
        })
    }

    /// Rebuild a session from a suspended snapshot, resolving questions
    /// through the bank. The score is recomputed from the stored answers.
    pub fn resume_from(
        snapshot: &QuizAttempt,
        bank: &QuestionBank,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if snapshot.is_completed {
            return Err(SessionError::AlreadyCompleted);
        }

        let total = snapshot.question_ids.len();
        if total == 0
            || snapshot.answers.len() != total
            || snapshot.question_statuses.len() != total
        {
            return Err(SessionError::SnapshotMismatch);
        }

        let current_index = snapshot.last_question_index.unwrap_or(0);
        if current_index >= total {
            return Err(SessionError::SnapshotMismatch);
        }

        let mut questions = Vec::with_capacity(total);
        for id in &snapshot.question_ids {
            match bank.get(id) {
                Some(question) => questions.push(question.clone()),
                None => return Err(SessionError::UnknownQuestion(id.clone())),
            }
        }

        let score = questions
            .iter()
            .zip(&snapshot.answers)
            .filter(|(question, answer)| **answer == Some(question.correct_answer))
            .count() as u32;

        let mut session = Self {
            id: snapshot.id,
            date: snapshot.date,
            subject: snapshot.subject.clone(),
            kind: snapshot.kind,
            state: SessionState::InProgress,
            questions,
            current_index,
            answers: snapshot.answers.clone(),
            statuses: snapshot.question_statuses.clone(),
            score,
            segment_started_at: now,
            banked_secs: snapshot.time_spent_secs,
        };
        session.mark_visited(current_index);
        Ok(session)
    }

    /// Suspend the run for later resumption. Legal while in progress or
    /// paused; the active stretch is banked so the gap until resumption
    /// costs no time.
    pub fn suspend(&mut self, now: DateTime<Utc>) -> Result<QuizAttempt> {
        match self.state {
            SessionState::InProgress => self.bank_segment(now),
            SessionState::Paused => {}
            SessionState::Completed => return Err(SessionError::AlreadyCompleted),
        }
        self.state = SessionState::Paused;
        Ok(self.to_attempt(false))
    }

    // ==================== Answering ====================

    /// Record the answer for the current question and score it.
    ///
    /// Each question is scored exactly once; a second submission is
    /// rejected rather than silently re-scored. Returns whether the chosen
    /// option was correct.
    pub fn submit_answer(&mut self, option: usize) -> Result<bool> {
        self.require_in_progress()?;

        let index = self.current_index;
        if self.answers[index].is_some() {
            return Err(SessionError::AlreadyAnswered(index));
        }

        let question = &self.questions[index];
        if option >= question.options.len() {
            return Err(SessionError::InvalidOption {
                given: option,
                options: question.options.len(),
            });
        }

        self.answers[index] = Some(option);
        let correct = option == question.correct_answer;
        if correct {
            self.score += 1;
        }

        self.statuses[index] = match self.statuses[index] {
            QuestionStatus::NotVisited | QuestionStatus::NotAnswered | QuestionStatus::Answered => {
                QuestionStatus::Answered
            }
            QuestionStatus::MarkedReview | QuestionStatus::AnsweredMarked => {
                QuestionStatus::AnsweredMarked
            }
        };

        Ok(correct)
    }

    /// Flip the review flag on the question at `index`, keeping the
    /// answered half of its status intact. The cursor does not move, so
    /// any question can be flagged from anywhere in the run.
    pub fn toggle_marked(&mut self, index: usize) -> Result<QuestionStatus> {
        self.require_in_progress()?;

        if index >= self.questions.len() {
            return Err(SessionError::IndexOutOfRange {
                given: index,
                count: self.questions.len(),
            });
        }

        let next = match self.statuses[index] {
            QuestionStatus::NotVisited | QuestionStatus::NotAnswered => {
                QuestionStatus::MarkedReview
            }
            QuestionStatus::MarkedReview => QuestionStatus::NotAnswered,
            QuestionStatus::Answered => QuestionStatus::AnsweredMarked,
            QuestionStatus::AnsweredMarked => QuestionStatus::Answered,
        };
        self.statuses[index] = next;
        Ok(next)
    }

    // ==================== Navigation ====================

    /// Move to the next question. On the last question the session
    /// completes and the scored attempt is returned.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Option<QuizAttempt>> {
        self.require_in_progress()?;

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.mark_visited(self.current_index);
            Ok(None)
        } else {
            self.bank_segment(now);
            self.state = SessionState::Completed;
            Ok(Some(self.to_attempt(true)))
        }
    }

    /// Jump straight to the question at `index`.
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        self.require_in_progress()?;

        if index >= self.questions.len() {
            return Err(SessionError::IndexOutOfRange {
                given: index,
                count: self.questions.len(),
            });
        }
        self.current_index = index;
        self.mark_visited(index);
        Ok(())
    }

    // ==================== Clock ====================

    /// Pause the clock. Only a running session can pause.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.require_in_progress()?;
        self.bank_segment(now);
        self.state = SessionState::Paused;
        Ok(())
    }

    /// Resume a paused session.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.state != SessionState::Paused {
            return Err(SessionError::NotPaused);
        }
        self.segment_started_at = now;
        self.state = SessionState::InProgress;
        Ok(())
    }

    /// Active seconds so far, pauses excluded.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        match self.state {
            SessionState::InProgress => {
                let segment = now.signed_duration_since(self.segment_started_at);
                self.banked_secs + segment.num_seconds().max(0) as u64
            }
            _ => self.banked_secs,
        }
    }

    // ==================== Accessors ====================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn statuses(&self) -> &[QuestionStatus] {
        &self.statuses
    }

    /// Correct answers so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Fraction of questions answered correctly so far, 0.0 to 1.0.
    /// Valid in any state; unanswered questions count against it.
    pub fn accuracy(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        f64::from(self.score) / self.questions.len() as f64
    }

    // ==================== Internals ====================

    fn require_in_progress(&self) -> Result<()> {
        if self.state != SessionState::InProgress {
            return Err(SessionError::NotInProgress);
        }
        Ok(())
    }

    fn mark_visited(&mut self, index: usize) {
        if self.statuses[index] == QuestionStatus::NotVisited {
            self.statuses[index] = QuestionStatus::NotAnswered;
        }
    }

    fn bank_segment(&mut self, now: DateTime<Utc>) {
        let segment = now.signed_duration_since(self.segment_started_at);
        self.banked_secs += segment.num_seconds().max(0) as u64;
        self.segment_started_at = now;
    }

    fn to_attempt(&self, completed: bool) -> QuizAttempt {
        QuizAttempt {
            id: self.id,
            date: self.date,
            subject: self.subject.clone(),
            kind: self.kind,
            score: self.score,
            total_questions: self.questions.len(),
            time_spent_secs: self.banked_secs,
            is_completed: completed,
            last_question_index: if completed {
                None
            } else {
                Some(self.current_index)
            },
            answers: self.answers.clone(),
            question_statuses: self.statuses.clone(),
            question_ids: self.questions.iter().map(|q| q.id.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: &str, subject: &str, correct: usize) -> Question {
        Question {
            id: id.to_string(),
            subject: subject.to_string(),
            text: format!("Question {}", id),
            options: vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            correct_answer: correct,
            explanation: None,
            difficulty: None,
        }
    }

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![
            question("p1", "Physics", 0),
            question("p2", "Physics", 1),
            question("p3", "Physics", 2),
            question("c1", "Chemistry", 0),
            question("c2", "Chemistry", 3),
        ])
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, h, m, s).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn physics_session(count: usize) -> QuizSession {
        QuizSession::start(
            &bank(),
            Some("Physics"),
            count,
            QuizKind::Practice,
            date(2024, 1, 15),
            at(9, 0, 0),
            &mut rng(),
        )
        .unwrap()
    }

    #[test]
    fn test_start_draws_only_from_the_subject() {
        let session = physics_session(10);

        assert_eq!(session.len(), 3);
        assert!(session
            .questions()
            .iter()
            .all(|q| q.subject == "Physics"));
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_start_caps_at_available_questions() {
        let session = physics_session(2);
        assert_eq!(session.len(), 2);

        let whole_bank = QuizSession::start(
            &bank(),
            None,
            100,
            QuizKind::Practice,
            date(2024, 1, 15),
            at(9, 0, 0),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(whole_bank.len(), 5);
    }

    #[test]
    fn test_start_fails_on_empty_selection() {
        let err = QuizSession::start(
            &bank(),
            Some("Biology"),
            5,
            QuizKind::Practice,
            date(2024, 1, 15),
            at(9, 0, 0),
            &mut rng(),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::NoQuestions);

        let err = QuizSession::start(
            &bank(),
            None,
            0,
            QuizKind::Practice,
            date(2024, 1, 15),
            at(9, 0, 0),
            &mut rng(),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::NoQuestions);
    }

    #[test]
    fn test_start_shuffles_with_the_given_rng() {
        let a = QuizSession::start(
            &bank(),
            None,
            5,
            QuizKind::Practice,
            date(2024, 1, 15),
            at(9, 0, 0),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let b = QuizSession::start(
            &bank(),
            None,
            5,
            QuizKind::Practice,
            date(2024, 1, 15),
            at(9, 0, 0),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();

        let ids = |s: &QuizSession| -> Vec<String> {
            s.questions().iter().map(|q| q.id.clone()).collect()
        };
        // Same seed, same order; the draw is a permutation of the bank
        assert_eq!(ids(&a), ids(&b));
        let mut sorted = ids(&a);
        sorted.sort();
        assert_eq!(sorted, vec!["c1", "c2", "p1", "p2", "p3"]);
    }

    #[test]
    fn test_first_question_counts_as_visited() {
        let session = physics_session(3);
        assert_eq!(session.statuses()[0], QuestionStatus::NotAnswered);
        assert_eq!(session.statuses()[1], QuestionStatus::NotVisited);
    }

    #[test]
    fn test_submit_scores_once_and_rejects_the_second_try() {
        let mut session = physics_session(3);
        let correct = session.current_question().correct_answer;

        assert_eq!(session.submit_answer(correct), Ok(true));
        assert_eq!(session.score(), 1);
        assert_eq!(session.statuses()[0], QuestionStatus::Answered);

        // A second submission must not re-score
        assert_eq!(
            session.submit_answer(correct),
            Err(SessionError::AlreadyAnswered(0))
        );
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_submit_rejects_out_of_range_option() {
        let mut session = physics_session(3);
        assert_eq!(
            session.submit_answer(4),
            Err(SessionError::InvalidOption {
                given: 4,
                options: 4
            })
        );
        assert_eq!(session.answers()[0], None);
    }

    #[test]
    fn test_wrong_answer_records_without_scoring() {
        let mut session = physics_session(3);
        let correct = session.current_question().correct_answer;
        let wrong = (correct + 1) % 4;

        assert_eq!(session.submit_answer(wrong), Ok(false));
        assert_eq!(session.score(), 0);
        assert_eq!(session.answers()[0], Some(wrong));
        assert_eq!(session.statuses()[0], QuestionStatus::Answered);
    }

    #[test]
    fn test_toggle_marked_walks_all_four_states() {
        let mut session = physics_session(3);

        // Unanswered: flag on, flag off
        assert_eq!(session.toggle_marked(0), Ok(QuestionStatus::MarkedReview));
        assert_eq!(session.toggle_marked(0), Ok(QuestionStatus::NotAnswered));

        // Flag then answer: the flag survives the submission
        session.toggle_marked(0).unwrap();
        let correct = session.current_question().correct_answer;
        session.submit_answer(correct).unwrap();
        assert_eq!(session.statuses()[0], QuestionStatus::AnsweredMarked);

        // Answered: flag off, flag on
        assert_eq!(session.toggle_marked(0), Ok(QuestionStatus::Answered));
        assert_eq!(session.toggle_marked(0), Ok(QuestionStatus::AnsweredMarked));
    }

    #[test]
    fn test_toggle_marked_reaches_any_question_without_moving() {
        let mut session = physics_session(3);

        // Flag the last question while still sitting on the first
        assert_eq!(session.toggle_marked(2), Ok(QuestionStatus::MarkedReview));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.statuses()[2], QuestionStatus::MarkedReview);
        assert_eq!(session.toggle_marked(2), Ok(QuestionStatus::NotAnswered));

        assert_eq!(
            session.toggle_marked(3),
            Err(SessionError::IndexOutOfRange { given: 3, count: 3 })
        );
    }

    #[test]
    fn test_advance_completes_on_the_last_question() {
        let mut session = physics_session(2);
        let correct = session.current_question().correct_answer;
        session.submit_answer(correct).unwrap();

        assert_eq!(session.advance(at(9, 1, 0)), Ok(None));
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.statuses()[1], QuestionStatus::NotAnswered);

        let attempt = session.advance(at(9, 2, 30)).unwrap().unwrap();
        assert_eq!(session.state(), SessionState::Completed);
        assert!(attempt.is_completed);
        assert_eq!(attempt.last_question_index, None);
        assert_eq!(attempt.score, 1);
        assert_eq!(attempt.total_questions, 2);
        assert_eq!(attempt.time_spent_secs, 150);
        assert_eq!(attempt.date, date(2024, 1, 15));

        // Nothing moves once completed
        assert_eq!(session.advance(at(9, 3, 0)), Err(SessionError::NotInProgress));
        assert_eq!(session.submit_answer(0), Err(SessionError::NotInProgress));
    }

    #[test]
    fn test_jump_to_is_bounds_checked() {
        let mut session = physics_session(3);

        session.jump_to(2).unwrap();
        assert_eq!(session.current_index(), 2);
        assert_eq!(session.statuses()[2], QuestionStatus::NotAnswered);

        assert_eq!(
            session.jump_to(3),
            Err(SessionError::IndexOutOfRange { given: 3, count: 3 })
        );
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn test_pause_stops_the_clock_and_blocks_mutation() {
        let mut session = physics_session(3);

        session.pause(at(9, 0, 40)).unwrap();
        assert_eq!(session.state(), SessionState::Paused);
        assert_eq!(session.submit_answer(0), Err(SessionError::NotInProgress));
        assert_eq!(session.jump_to(1), Err(SessionError::NotInProgress));
        assert_eq!(session.toggle_marked(0), Err(SessionError::NotInProgress));
        assert_eq!(session.pause(at(9, 1, 0)), Err(SessionError::NotInProgress));

        // Ten paused minutes cost nothing
        session.resume(at(9, 10, 40)).unwrap();
        assert_eq!(session.resume(at(9, 10, 41)), Err(SessionError::NotPaused));

        session.jump_to(2).unwrap();
        let attempt = session.advance(at(9, 11, 0)).unwrap().unwrap();
        assert_eq!(attempt.time_spent_secs, 60);
    }

    #[test]
    fn test_elapsed_tracks_only_active_stretches() {
        let mut session = physics_session(3);
        assert_eq!(session.elapsed_secs(at(9, 0, 30)), 30);

        session.pause(at(9, 0, 30)).unwrap();
        assert_eq!(session.elapsed_secs(at(9, 5, 0)), 30);

        session.resume(at(9, 5, 0)).unwrap();
        assert_eq!(session.elapsed_secs(at(9, 5, 15)), 45);
    }

    #[test]
    fn test_suspend_and_resume_round_trip() {
        let bank = bank();
        let mut session = QuizSession::start(
            &bank,
            Some("Physics"),
            3,
            QuizKind::Daily,
            date(2024, 1, 15),
            at(9, 0, 0),
            &mut rng(),
        )
        .unwrap();

        let correct = session.current_question().correct_answer;
        session.submit_answer(correct).unwrap();
        session.advance(at(9, 0, 20)).unwrap();
        session.toggle_marked(1).unwrap();

        let snapshot = session.suspend(at(9, 0, 45)).unwrap();
        assert_eq!(session.state(), SessionState::Paused);
        assert!(!snapshot.is_completed);
        assert_eq!(snapshot.last_question_index, Some(1));
        assert_eq!(snapshot.time_spent_secs, 45);
        assert_eq!(snapshot.score, 1);

        let resumed = QuizSession::resume_from(&snapshot, &bank, at(14, 0, 0)).unwrap();
        assert_eq!(resumed.state(), SessionState::InProgress);
        assert_eq!(resumed.current_index(), 1);
        assert_eq!(resumed.score(), 1);
        assert_eq!(resumed.statuses()[1], QuestionStatus::MarkedReview);
        // The suspended afternoon does not count as quiz time
        assert_eq!(resumed.elapsed_secs(at(14, 0, 5)), 50);
        assert_eq!(resumed.id(), session.id());
    }

    #[test]
    fn test_resume_rejects_unusable_snapshots() {
        let bank = bank();
        let mut session = physics_session(2);
        let snapshot = session.suspend(at(9, 1, 0)).unwrap();

        let mut completed = snapshot.clone();
        completed.is_completed = true;
        assert_eq!(
            QuizSession::resume_from(&completed, &bank, at(10, 0, 0)).unwrap_err(),
            SessionError::AlreadyCompleted
        );

        let mut unknown = snapshot.clone();
        unknown.question_ids[0] = "gone".to_string();
        assert_eq!(
            QuizSession::resume_from(&unknown, &bank, at(10, 0, 0)).unwrap_err(),
            SessionError::UnknownQuestion("gone".to_string())
        );

        let mut mismatched = snapshot.clone();
        mismatched.answers.pop();
        assert_eq!(
            QuizSession::resume_from(&mismatched, &bank, at(10, 0, 0)).unwrap_err(),
            SessionError::SnapshotMismatch
        );

        let mut out_of_range = snapshot;
        out_of_range.last_question_index = Some(9);
        assert_eq!(
            QuizSession::resume_from(&out_of_range, &bank, at(10, 0, 0)).unwrap_err(),
            SessionError::SnapshotMismatch
        );
    }

    #[test]
    fn test_suspending_a_completed_run_is_rejected() {
        let mut session = physics_session(1);
        session.advance(at(9, 0, 10)).unwrap();
        assert_eq!(
            session.suspend(at(9, 0, 11)).unwrap_err(),
            SessionError::AlreadyCompleted
        );
    }

    #[test]
    fn test_straight_run_grades_every_question_once() {
        let questions: Vec<Question> = (1..=10usize)
            .map(|n| question(&format!("b{}", n), "Physics", n % 4))
            .collect();
        let bank = QuestionBank::new(questions).unwrap();
        let mut session = QuizSession::start(
            &bank,
            None,
            10,
            QuizKind::Practice,
            date(2024, 1, 15),
            at(9, 0, 0),
            &mut rng(),
        )
        .unwrap();

        // First five answered right, last five wrong, no detours.
        for turn in 0..10 {
            let correct = session.current_question().correct_answer;
            let option_count = session.current_question().options.len();
            let picked = if turn < 5 {
                correct
            } else {
                (correct + 1) % option_count
            };
            assert_eq!(session.submit_answer(picked).unwrap(), turn < 5);

            let outcome = session.advance(at(9, 5, 0)).unwrap();
            if turn == 9 {
                let attempt = outcome.unwrap();
                assert_eq!(attempt.score, 5);
                assert!(attempt.is_completed);
                assert_eq!(attempt.last_question_index, None);
            } else {
                assert!(outcome.is_none());
            }
        }

        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.score(), 5);
        assert!((session.accuracy() - 0.5).abs() < f64::EPSILON);
        assert!(session
            .statuses()
            .iter()
            .all(|&status| status == QuestionStatus::Answered));
    }
}
