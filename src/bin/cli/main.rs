mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "prepdesk", about = "Exam preparation planner CLI", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Spaced revision planner
    #[command(subcommand)]
    Revision(RevisionCommand),

    /// Daily and practice quizzes
    #[command(subcommand)]
    Quiz(QuizCommand),

    /// Flashcards
    #[command(subcommand)]
    Cards(CardCommand),

    /// Study bookmarks
    #[command(subcommand)]
    Bookmarks(BookmarkCommand),
}

#[derive(Subcommand)]
enum RevisionCommand {
    /// Enroll a chapter in the revision plan
    Add {
        /// What to revise, e.g. "Ray diagrams"
        title: String,
        /// Subject the chapter belongs to
        #[arg(long)]
        subject: String,
        /// Chapter name
        #[arg(long)]
        chapter: String,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Exam weight of the chapter
        #[arg(long, value_enum, default_value = "medium")]
        importance: ImportanceArg,
        /// First-study date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// List items in a planner view
    List {
        /// Which view to show
        #[arg(long, value_enum, default_value = "due")]
        group: GroupArg,
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Show one item with its full schedule
    Show {
        /// Item id (prefix is enough)
        id: String,
    },

    /// Mark a revision day as done
    Done {
        /// Item id (prefix is enough)
        id: String,
        /// Which scheduled day (defaults to the next unfinished one)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Undo a revision mark
    Undo {
        /// Item id (prefix is enough)
        id: String,
        /// Which scheduled day to unmark
        #[arg(long)]
        date: chrono::NaiveDate,
    },

    /// Edit an item
    Edit {
        /// Item id (prefix is enough)
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        chapter: Option<String>,
        /// New notes; an empty string clears them
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, value_enum)]
        importance: Option<ImportanceArg>,
        /// Show or hide the item in due/upcoming views
        #[arg(long)]
        active: Option<bool>,
    },

    /// Put a shelved item back in the planner views
    Activate {
        /// Item id (prefix is enough)
        id: String,
    },

    /// Remove an item
    Remove {
        /// Item id (prefix is enough)
        id: String,
    },
}

#[derive(Subcommand)]
enum QuizCommand {
    /// Start a quiz
    Start {
        /// Restrict questions to one subject
        #[arg(long)]
        subject: Option<String>,
        /// How many questions to draw
        #[arg(long, default_value = "10")]
        count: usize,
        /// Take today's daily quiz (one per subject per day)
        #[arg(long)]
        daily: bool,
        /// Question bank file (default: questions.json in the data dir)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Resume the suspended quiz
    Resume {
        /// Question bank file (default: questions.json in the data dir)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Drop the suspended quiz
    Discard,

    /// Show past attempts
    History {
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
        /// Maximum attempts to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Aggregate statistics over past attempts
    Summary {
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// List subjects available in the question bank
    Subjects {
        /// Question bank file (default: questions.json in the data dir)
        #[arg(long)]
        bank: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CardCommand {
    /// Add a flashcard
    Add {
        /// Front of the card (the prompt)
        front: String,
        /// Back of the card (the answer)
        back: String,
        /// Subject the card drills
        #[arg(long)]
        subject: String,
    },

    /// List cards
    List {
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Reword a card or move it to another subject
    Edit {
        /// Card id (prefix is enough)
        id: String,
        /// New front text
        #[arg(long)]
        front: Option<String>,
        /// New back text
        #[arg(long)]
        back: Option<String>,
        /// New subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Flip a card between known and still-learning
    Known {
        /// Card id (prefix is enough)
        id: String,
    },

    /// Drill the cards you do not know yet
    Practice {
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Show recall statistics
    Stats {
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Remove a card
    Remove {
        /// Card id (prefix is enough)
        id: String,
    },
}

#[derive(Subcommand)]
enum BookmarkCommand {
    /// Save a study resource
    Add {
        /// Display title
        title: String,
        /// Resource URL
        url: String,
        /// Subject tag
        #[arg(long)]
        subject: Option<String>,
    },

    /// List bookmarks, pinned first
    List {
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Search titles and URLs
    Search {
        /// Search query
        query: String,
    },

    /// Pin or unpin a bookmark
    Pin {
        /// Bookmark id (prefix is enough)
        id: String,
    },

    /// Remove a bookmark
    Remove {
        /// Bookmark id (prefix is enough)
        id: String,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum GroupArg {
    Due,
    Upcoming,
    Completed,
    All,
}

impl GroupArg {
    fn to_group(self) -> prepdesk::revision::StatusGroup {
        use prepdesk::revision::StatusGroup;
        match self {
            GroupArg::Due => StatusGroup::Due,
            GroupArg::Upcoming => StatusGroup::Upcoming,
            GroupArg::Completed => StatusGroup::Completed,
            GroupArg::All => StatusGroup::All,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ImportanceArg {
    Low,
    Medium,
    High,
}

impl ImportanceArg {
    fn to_importance(self) -> prepdesk::revision::Importance {
        use prepdesk::revision::Importance;
        match self {
            ImportanceArg::Low => Importance::Low,
            ImportanceArg::Medium => Importance::Medium,
            ImportanceArg::High => Importance::High,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.data_dir.as_deref())?;

    match cli.command {
        Command::Revision(subcmd) => match subcmd {
            RevisionCommand::Add {
                title,
                subject,
                chapter,
                notes,
                importance,
                date,
            } => commands::revision::run_add(
                &app,
                prepdesk::revision::CreateItemRequest {
                    subject,
                    chapter,
                    title,
                    notes,
                    importance: importance.to_importance(),
                    initial_date: date,
                },
                &cli.format,
            )?,
            RevisionCommand::List { group, subject } => commands::revision::run_list(
                &app,
                group.to_group(),
                subject.as_deref(),
                &cli.format,
            )?,
            RevisionCommand::Show { id } => commands::revision::run_show(&app, &id, &cli.format)?,
            RevisionCommand::Done { id, date } => {
                commands::revision::run_done(&app, &id, date, &cli.format)?
            }
            RevisionCommand::Undo { id, date } => {
                commands::revision::run_undo(&app, &id, date, &cli.format)?
            }
            RevisionCommand::Edit {
                id,
                title,
                subject,
                chapter,
                notes,
                importance,
                active,
            } => commands::revision::run_edit(
                &app,
                &id,
                prepdesk::revision::UpdateItemRequest {
                    title,
                    subject,
                    chapter,
                    notes,
                    importance: importance.map(ImportanceArg::to_importance),
                    active,
                },
                &cli.format,
            )?,
            RevisionCommand::Activate { id } => {
                commands::revision::run_activate(&app, &id, &cli.format)?
            }
            RevisionCommand::Remove { id } => commands::revision::run_remove(&app, &id)?,
        },
        Command::Quiz(subcmd) => match subcmd {
            QuizCommand::Start {
                subject,
                count,
                daily,
                bank,
            } => commands::quiz::run_start(
                &app,
                bank.as_deref(),
                subject.as_deref(),
                count,
                daily,
            )?,
            QuizCommand::Resume { bank } => commands::quiz::run_resume(&app, bank.as_deref())?,
            QuizCommand::Discard => commands::quiz::run_discard(&app)?,
            QuizCommand::History { subject, limit } => {
                commands::quiz::run_history(&app, subject.as_deref(), limit, &cli.format)?
            }
            QuizCommand::Summary { subject } => {
                commands::quiz::run_summary(&app, subject.as_deref(), &cli.format)?
            }
            QuizCommand::Subjects { bank } => {
                commands::quiz::run_subjects(&app, bank.as_deref(), &cli.format)?
            }
        },
        Command::Cards(subcmd) => match subcmd {
            CardCommand::Add {
                front,
                back,
                subject,
            } => commands::cards::run_add(&app, &subject, &front, &back, &cli.format)?,
            CardCommand::List { subject } => {
                commands::cards::run_list(&app, subject.as_deref(), &cli.format)?
            }
            CardCommand::Edit {
                id,
                front,
                back,
                subject,
            } => commands::cards::run_edit(&app, &id, front, back, subject, &cli.format)?,
            CardCommand::Known { id } => commands::cards::run_known(&app, &id, &cli.format)?,
            CardCommand::Practice { subject } => {
                commands::cards::run_practice(&app, subject.as_deref())?
            }
            CardCommand::Stats { subject } => {
                commands::cards::run_stats(&app, subject.as_deref(), &cli.format)?
            }
            CardCommand::Remove { id } => commands::cards::run_remove(&app, &id)?,
        },
        Command::Bookmarks(subcmd) => match subcmd {
            BookmarkCommand::Add {
                title,
                url,
                subject,
            } => commands::bookmarks::run_add(&app, &title, &url, subject, &cli.format)?,
            BookmarkCommand::List { subject } => {
                commands::bookmarks::run_list(&app, subject.as_deref(), &cli.format)?
            }
            BookmarkCommand::Search { query } => {
                commands::bookmarks::run_search(&app, &query, &cli.format)?
            }
            BookmarkCommand::Pin { id } => commands::bookmarks::run_pin(&app, &id)?,
            BookmarkCommand::Remove { id } => commands::bookmarks::run_remove(&app, &id)?,
        },
    }

    Ok(())
}
