use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use prepdesk::bookmarks::{Bookmark, BookmarkStorage};
use prepdesk::flashcards::{Flashcard, FlashcardStorage};
use prepdesk::quiz::{QuestionBank, QuizStorage};
use prepdesk::revision::{RevisionItem, RevisionStorage};
use prepdesk::storage::FileStore;

/// Shared application state for CLI commands
pub struct App {
    pub revision: RevisionStorage<FileStore>,
    pub quiz: QuizStorage<FileStore>,
    pub cards: FlashcardStorage<FileStore>,
    pub bookmarks: BookmarkStorage<FileStore>,
    data_dir: PathBuf,
}

impl App {
    /// Initialize from the given or default data directory
    pub fn new(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => FileStore::default_data_dir().context("Failed to get data directory")?,
        };
        let store = FileStore::open(&data_dir)
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;

        Ok(Self {
            revision: RevisionStorage::new(store.clone()),
            quiz: QuizStorage::new(store.clone()),
            cards: FlashcardStorage::new(store.clone()),
            bookmarks: BookmarkStorage::new(store),
            data_dir,
        })
    }

    /// Load the question bank from `path`, or from `questions.json` in the
    /// data directory
    pub fn question_bank(&self, path: Option<&Path>) -> Result<QuestionBank> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => self.data_dir.join("questions.json"),
        };
        QuestionBank::load(&path)
            .with_context(|| format!("Failed to load question bank from {}", path.display()))
    }

    /// Find a revision item by id prefix
    pub fn find_revision_item(&self, id_prefix: &str) -> Result<RevisionItem> {
        let prefix = id_prefix.to_lowercase();
        let items = self.revision.load_items();
        let matches: Vec<&RevisionItem> = items
            .iter()
            .filter(|item| item.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!("No revision item with id starting '{}'", id_prefix),
            1 => Ok(matches[0].clone()),
            n => bail!("Ambiguous id '{}': {} items match", id_prefix, n),
        }
    }

    /// Find a flashcard by id prefix
    pub fn find_card(&self, id_prefix: &str) -> Result<Flashcard> {
        let prefix = id_prefix.to_lowercase();
        let cards = self.cards.load_cards();
        let matches: Vec<&Flashcard> = cards
            .iter()
            .filter(|card| card.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!("No flashcard with id starting '{}'", id_prefix),
            1 => Ok(matches[0].clone()),
            n => bail!("Ambiguous id '{}': {} cards match", id_prefix, n),
        }
    }

    /// Find a bookmark by id prefix
    pub fn find_bookmark(&self, id_prefix: &str) -> Result<Bookmark> {
        let prefix = id_prefix.to_lowercase();
        let bookmarks = self.bookmarks.load_bookmarks();
        let matches: Vec<&Bookmark> = bookmarks
            .iter()
            .filter(|b| b.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!("No bookmark with id starting '{}'", id_prefix),
            1 => Ok(matches[0].clone()),
            n => bail!("Ambiguous id '{}': {} bookmarks match", id_prefix, n),
        }
    }
}
