use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Result};
use chrono::{DateTime, Local, Utc};

use prepdesk::quiz::{QuestionStatus, QuizAttempt, QuizError, QuizKind, QuizSession, SessionError};

use crate::app::App;
use crate::OutputFormat;

/// How an interactive run ended.
enum LoopOutcome {
    Completed(QuizAttempt),
    Suspended(QuizAttempt),
}

pub fn run_start(
    app: &App,
    bank_path: Option<&Path>,
    subject: Option<&str>,
    count: usize,
    daily: bool,
) -> Result<()> {
    if let Some(pending) = app.quiz.load_suspended() {
        bail!(
            "A suspended quiz from {} exists. `prepdesk quiz resume` continues it, `prepdesk quiz discard` drops it.",
            pending.date
        );
    }

    let bank = app.question_bank(bank_path)?;
    let today = Local::now().date_naive();
    let kind = if daily {
        app.quiz.ensure_daily_available(today, subject)?;
        QuizKind::Daily
    } else {
        QuizKind::Practice
    };

    let mut session = QuizSession::start(
        &bank,
        subject,
        count,
        kind,
        today,
        Utc::now(),
        &mut rand::thread_rng(),
    )?;

    match subject {
        Some(subject) => println!("{} questions on {}. Type h for commands.", session.len(), subject),
        None => println!(
            "{} questions across all subjects. Type h for commands.",
            session.len()
        ),
    }

    let outcome = run_interactive(&mut session)?;
    conclude(app, outcome)
}

pub fn run_resume(app: &App, bank_path: Option<&Path>) -> Result<()> {
    let snapshot = match app.quiz.load_suspended() {
        Some(snapshot) => snapshot,
        None => return Err(QuizError::NoSuspendedQuiz.into()),
    };

    let bank = app.question_bank(bank_path)?;
    let mut session = match QuizSession::resume_from(&snapshot, &bank, Utc::now()) {
        Ok(session) => session,
        Err(err @ (SessionError::UnknownQuestion(_) | SessionError::SnapshotMismatch)) => {
            app.quiz.clear_suspended()?;
            bail!("Suspended quiz no longer matches the question bank ({}); discarded.", err);
        }
        Err(err) => return Err(err.into()),
    };

    println!(
        "Resuming quiz from {} at question {}/{}. Type h for commands.",
        snapshot.date,
        session.current_index() + 1,
        session.len()
    );

    let outcome = run_interactive(&mut session)?;
    conclude(app, outcome)
}

pub fn run_discard(app: &App) -> Result<()> {
    match app.quiz.load_suspended() {
        Some(pending) => {
            app.quiz.clear_suspended()?;
            println!("Discarded suspended quiz from {}.", pending.date);
        }
        None => println!("No suspended quiz."),
    }
    Ok(())
}

pub fn run_history(
    app: &App,
    subject: Option<&str>,
    limit: usize,
    format: &OutputFormat,
) -> Result<()> {
    let mut attempts = app.quiz.load_attempts();
    if let Some(subject) = subject {
        attempts.retain(|attempt| {
            attempt
                .subject
                .as_deref()
                .map_or(false, |s| s.eq_ignore_ascii_case(subject))
        });
    }
    attempts.reverse();
    attempts.truncate(limit);

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = attempts
                .iter()
                .map(|attempt| {
                    serde_json::json!({
                        "id": attempt.id.to_string(),
                        "date": attempt.date.to_string(),
                        "subject": attempt.subject,
                        "kind": kind_label(attempt.kind),
                        "score": attempt.score,
                        "totalQuestions": attempt.total_questions,
                        "accuracy": attempt.accuracy(),
                        "timeSpentSecs": attempt.time_spent_secs,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if attempts.is_empty() {
                println!("No attempts recorded.");
                return Ok(());
            }

            println!(
                "{:<12} {:<9} {:<14} {:<7} {:<5} {}",
                "Date", "Kind", "Subject", "Score", "Acc", "Time"
            );
            for attempt in &attempts {
                println!(
                    "{:<12} {:<9} {:<14} {:<7} {:<5} {}",
                    attempt.date.to_string(),
                    kind_label(attempt.kind),
                    attempt.subject.as_deref().unwrap_or("all"),
                    format!("{}/{}", attempt.score, attempt.total_questions),
                    format!("{:.0}%", attempt.accuracy() * 100.0),
                    format_duration(attempt.time_spent_secs)
                );
            }
            println!("\n{} attempts shown", attempts.len());
        }
    }

    Ok(())
}

pub fn run_summary(app: &App, subject: Option<&str>, format: &OutputFormat) -> Result<()> {
    let today = Local::now().date_naive();
    let summary = app.quiz.summary(subject, today);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Plain => {
            if summary.total_attempts == 0 {
                match subject {
                    Some(subject) => println!("No attempts recorded for {}.", subject),
                    None => println!("No attempts recorded."),
                }
                return Ok(());
            }

            println!("Attempts:       {}", summary.total_attempts);
            println!("Questions:      {}", summary.total_questions);
            println!("Correct:        {}", summary.total_correct);
            println!("Avg accuracy:   {:.1}%", summary.average_accuracy * 100.0);
            println!("Best accuracy:  {:.1}%", summary.best_accuracy * 100.0);
            println!(
                "Daily streak:   {} {}",
                summary.daily_streak,
                if summary.daily_streak == 1 { "day" } else { "days" }
            );
        }
    }

    Ok(())
}

pub fn run_subjects(app: &App, bank_path: Option<&Path>, format: &OutputFormat) -> Result<()> {
    let bank = app.question_bank(bank_path)?;
    let subjects = bank.subjects();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = subjects
                .iter()
                .map(|subject| {
                    serde_json::json!({
                        "subject": subject,
                        "questions": bank.for_subject(Some(subject)).len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if subjects.is_empty() {
                println!("The question bank is empty.");
                return Ok(());
            }

            for subject in &subjects {
                println!(
                    "{:<20} {} questions",
                    subject,
                    bank.for_subject(Some(subject)).len()
                );
            }
            println!("\n{} subjects, {} questions total", subjects.len(), bank.len());
        }
    }

    Ok(())
}

fn run_interactive(session: &mut QuizSession) -> Result<LoopOutcome> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();
    drive_session(session, &mut input, &mut output, Utc::now)
}

fn conclude(app: &App, outcome: LoopOutcome) -> Result<()> {
    match outcome {
        LoopOutcome::Completed(attempt) => {
            app.quiz.record_attempt(&attempt)?;
            app.quiz.clear_suspended()?;
            println!();
            println!(
                "Done! Score {}/{} ({:.0}%) in {}",
                attempt.score,
                attempt.total_questions,
                attempt.accuracy() * 100.0,
                format_duration(attempt.time_spent_secs)
            );
        }
        LoopOutcome::Suspended(attempt) => {
            app.quiz.save_suspended(&attempt)?;
            println!();
            println!(
                "Suspended at question {} with {} on the clock. `prepdesk quiz resume` picks it up.",
                attempt.last_question_index.map_or(1, |i| i + 1),
                format_duration(attempt.time_spent_secs)
            );
        }
    }
    Ok(())
}

/// Read commands from `input` until the session completes or suspends.
///
/// The clock is injected so tests can pin elapsed time.
fn drive_session<R: BufRead, W: Write>(
    session: &mut QuizSession,
    input: &mut R,
    output: &mut W,
    mut clock: impl FnMut() -> DateTime<Utc>,
) -> Result<LoopOutcome> {
    let mut needs_question = true;
    loop {
        if needs_question {
            print_question(session, output)?;
            needs_question = false;
        }

        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            let attempt = session.suspend(clock())?;
            return Ok(LoopOutcome::Suspended(attempt));
        }
        let line = line.trim();

        match line {
            "" => {}
            "q" => {
                let attempt = session.suspend(clock())?;
                return Ok(LoopOutcome::Suspended(attempt));
            }
            "n" => match session.advance(clock())? {
                Some(attempt) => return Ok(LoopOutcome::Completed(attempt)),
                None => needs_question = true,
            },
            "m" => {
                let status = session.toggle_marked(session.current_index())?;
                writeln!(output, "Status: {}", status_label(status))?;
            }
            "s" => print_progress(session, output)?,
            "h" | "?" => print_help(output)?,
            _ => {
                if let Some(rest) = line.strip_prefix('g') {
                    match rest.trim().parse::<usize>() {
                        Ok(number) if number >= 1 => match session.jump_to(number - 1) {
                            Ok(()) => needs_question = true,
                            Err(_) => {
                                writeln!(output, "Questions go from 1 to {}.", session.len())?
                            }
                        },
                        _ => writeln!(output, "Usage: g <question number>")?,
                    }
                } else if let Ok(choice) = line.parse::<usize>() {
                    handle_answer(session, choice, output)?;
                } else {
                    writeln!(output, "Unknown command \"{}\". h lists commands.", line)?;
                }
            }
        }
    }
}

fn handle_answer<W: Write>(session: &mut QuizSession, choice: usize, output: &mut W) -> Result<()> {
    if choice == 0 {
        writeln!(output, "Options are numbered from 1.")?;
        return Ok(());
    }

    match session.submit_answer(choice - 1) {
        Ok(true) => {
            writeln!(output, "Correct!")?;
            let question = session.current_question();
            if let Some(explanation) = &question.explanation {
                writeln!(output, "  {}", explanation)?;
            }
        }
        Ok(false) => {
            let question = session.current_question();
            let correct = question.correct_answer;
            writeln!(
                output,
                "Wrong. Correct answer: {}. {}",
                correct + 1,
                question.options[correct]
            )?;
            if let Some(explanation) = &question.explanation {
                writeln!(output, "  {}", explanation)?;
            }
        }
        Err(SessionError::AlreadyAnswered(_)) => {
            writeln!(output, "That one is already answered. n moves on.")?;
        }
        Err(SessionError::InvalidOption { options, .. }) => {
            writeln!(output, "Options go from 1 to {}.", options)?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn print_question<W: Write>(session: &QuizSession, output: &mut W) -> Result<()> {
    let index = session.current_index();
    let question = session.current_question();

    writeln!(output)?;
    writeln!(
        output,
        "Question {}/{} [{}]",
        index + 1,
        session.len(),
        status_label(session.statuses()[index])
    )?;
    if session.subject().is_none() {
        writeln!(output, "({})", question.subject)?;
    }
    writeln!(output, "{}", question.text)?;
    for (i, option) in question.options.iter().enumerate() {
        let marker = if session.answers()[index] == Some(i) { "*" } else { " " };
        writeln!(output, " {}{}. {}", marker, i + 1, option)?;
    }
    Ok(())
}

fn print_progress<W: Write>(session: &QuizSession, output: &mut W) -> Result<()> {
    writeln!(
        output,
        "Score so far: {}/{} ({:.0}%)",
        session.score(),
        session.len(),
        session.accuracy() * 100.0
    )?;
    for (i, status) in session.statuses().iter().enumerate() {
        let cursor = if i == session.current_index() { ">" } else { " " };
        writeln!(output, " {} {:>2}. {}", cursor, i + 1, status_label(*status))?;
    }
    Ok(())
}

fn print_help<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "Commands:")?;
    writeln!(output, "  <number>  answer with that option")?;
    writeln!(output, "  n         next question (finishes the quiz on the last one)")?;
    writeln!(output, "  g <num>   jump to a question")?;
    writeln!(output, "  m         toggle the review mark")?;
    writeln!(output, "  s         show progress")?;
    writeln!(output, "  q         suspend and quit")?;
    Ok(())
}

fn status_label(status: QuestionStatus) -> &'static str {
    match status {
        QuestionStatus::NotVisited => "not visited",
        QuestionStatus::NotAnswered => "unanswered",
        QuestionStatus::Answered => "answered",
        QuestionStatus::MarkedReview => "marked",
        QuestionStatus::AnsweredMarked => "answered, marked",
    }
}

fn kind_label(kind: QuizKind) -> &'static str {
    match kind {
        QuizKind::Daily => "daily",
        QuizKind::Practice => "practice",
    }
}

fn format_duration(secs: u64) -> String {
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use chrono::{Duration, TimeZone};
    use prepdesk::quiz::{Question, QuestionBank};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: &str, correct: usize) -> Question {
        Question {
            id: id.to_string(),
            subject: "physics".to_string(),
            text: format!("Question {}", id),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: correct,
            explanation: None,
            difficulty: None,
        }
    }

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![question("q1", 0), question("q2", 1), question("q3", 2)])
            .unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::seconds(secs)
    }

    fn session() -> QuizSession {
        let mut rng = StdRng::seed_from_u64(7);
        QuizSession::start(
            &bank(),
            None,
            3,
            QuizKind::Practice,
            at(0).date_naive(),
            at(0),
            &mut rng,
        )
        .unwrap()
    }

    fn drive(session: &mut QuizSession, script: &str, end_secs: i64) -> (LoopOutcome, String) {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        let outcome =
            drive_session(session, &mut input, &mut output, || at(end_secs)).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn answering_every_question_completes_the_run() {
        let mut session = session();
        let (outcome, _) = drive(&mut session, "1\nn\n1\nn\n1\nn\n", 150);
        match outcome {
            LoopOutcome::Completed(attempt) => {
                assert!(attempt.is_completed);
                assert_eq!(attempt.total_questions, 3);
                assert_eq!(attempt.time_spent_secs, 150);
                assert!(attempt.answers.iter().all(|answer| answer.is_some()));
            }
            LoopOutcome::Suspended(_) => panic!("run should have completed"),
        }
    }

    #[test]
    fn quitting_suspends_with_the_clock_banked() {
        let mut session = session();
        let (outcome, _) = drive(&mut session, "1\nq\n", 90);
        match outcome {
            LoopOutcome::Suspended(attempt) => {
                assert!(!attempt.is_completed);
                assert_eq!(attempt.time_spent_secs, 90);
                assert_eq!(attempt.last_question_index, Some(0));
            }
            LoopOutcome::Completed(_) => panic!("run should have suspended"),
        }
    }

    #[test]
    fn end_of_input_suspends_instead_of_crashing() {
        let mut session = session();
        let (outcome, _) = drive(&mut session, "", 30);
        assert!(matches!(outcome, LoopOutcome::Suspended(_)));
    }

    #[test]
    fn double_answer_is_reported_and_the_run_continues() {
        let mut session = session();
        let (outcome, output) = drive(&mut session, "1\n2\nn\n1\nn\n1\nn\n", 60);
        assert!(output.contains("already answered"));
        assert!(matches!(outcome, LoopOutcome::Completed(_)));
    }

    #[test]
    fn jump_moves_to_the_requested_question() {
        let mut session = session();
        let (outcome, _) = drive(&mut session, "g 3\nq\n", 10);
        match outcome {
            LoopOutcome::Suspended(attempt) => {
                assert_eq!(attempt.last_question_index, Some(2));
            }
            LoopOutcome::Completed(_) => panic!("run should have suspended"),
        }
    }

    #[test]
    fn bad_jump_and_bad_option_leave_the_session_usable() {
        let mut session = session();
        let (outcome, output) = drive(&mut session, "g 9\n7\nq\n", 10);
        assert!(output.contains("Questions go from 1 to 3."));
        assert!(output.contains("Options go from 1 to 4."));
        assert!(matches!(outcome, LoopOutcome::Suspended(_)));
    }

    #[test]
    fn marking_for_review_is_reflected_in_the_snapshot() {
        let mut session = session();
        let (outcome, output) = drive(&mut session, "m\nq\n", 5);
        assert!(output.contains("marked"));
        match outcome {
            LoopOutcome::Suspended(attempt) => {
                assert_eq!(attempt.question_statuses[0], QuestionStatus::MarkedReview);
            }
            LoopOutcome::Completed(_) => panic!("run should have suspended"),
        }
    }

    #[test]
    fn wrong_answer_reveals_the_correct_option() {
        let mut session = session();
        let correct = session.current_question().correct_answer;
        let wrong = (correct + 1) % 4;
        let script = format!("{}\nq\n", wrong + 1);
        let (outcome, output) = drive(&mut session, &script, 20);
        assert!(output.contains("Wrong. Correct answer:"));
        match outcome {
            LoopOutcome::Suspended(attempt) => assert_eq!(attempt.score, 0),
            LoopOutcome::Completed(_) => panic!("run should have suspended"),
        }
    }
}
