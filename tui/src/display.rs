//! Display State Types
//!
//! Presentation state for the book list, derived from [`LibraryMessage`]s.
//! The TUI is a thin client: the displayed book set is always a local copy
//! of the last successful list fetch, mutated only when the service
//! confirms a delete or returns a freshly added book.

use std::time::Duration;

use serde_json::Value;

use library_core::Book;

use crate::backend::LibraryMessage;

/// How long a transient notice stays on screen
const NOTICE_DURATION: Duration = Duration::from_secs(5);

/// Metadata field that never renders on a card
const RESERVED_FORMATS_KEY: &str = "formats";

/// Load phase of the book list
///
/// A failed first fetch is terminal for the session: the error panel
/// replaces the grid and no automatic retry happens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    /// Waiting for the first list response
    Loading,
    /// Book list available
    Ready,
    /// List fetch failed; the message renders in the error panel
    Failed(String),
}

/// Notice severity, for status-bar styling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Confirmation (e.g. book added)
    Success,
    /// Failure (e.g. delete failed)
    Error,
}

/// A transient status-bar notice
#[derive(Clone, Debug)]
pub struct Notice {
    /// Notice text
    pub text: String,
    /// Severity
    pub kind: NoticeKind,
    /// Time left on screen
    remaining: Duration,
}

/// The book-list display state
#[derive(Debug)]
pub struct LibraryDisplay {
    /// Current load phase
    pub phase: LoadPhase,
    /// Local copy of the last successful list fetch
    pub books: Vec<Book>,
    /// Selected book index (clamped into `books`)
    pub selected: usize,
    /// Pending transient notice (if any)
    pub notice: Option<Notice>,
}

impl Default for LibraryDisplay {
    fn default() -> Self {
        Self {
            phase: LoadPhase::Loading,
            books: Vec::new(),
            selected: 0,
            notice: None,
        }
    }
}

impl LibraryDisplay {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a list-related message to update display state
    ///
    /// Add/analysis results are owned by their modals; the app routes them
    /// there and forwards only the list-affecting messages here.
    pub fn apply_message(&mut self, msg: &LibraryMessage) {
        match msg {
            LibraryMessage::BooksLoaded(books) => {
                self.phase = LoadPhase::Ready;
                self.books = books.clone();
                self.clamp_selection();
            }
            LibraryMessage::BooksFailed(error) => {
                self.phase = LoadPhase::Failed(format!(
                    "Failed to fetch books. Please try again later. ({error})"
                ));
            }
            LibraryMessage::BookAdded(book) => {
                self.upsert_book(book.clone());
                self.set_notice(format!("Added {}", book.title()), NoticeKind::Success);
            }
            LibraryMessage::BookDeleted { id } => {
                self.remove_book(id);
            }
            LibraryMessage::DeleteFailed { id, error } => {
                self.set_notice(
                    format!("Failed to delete book {id}: {error}"),
                    NoticeKind::Error,
                );
            }
            // Modal-owned results
            LibraryMessage::AddFailed(_)
            | LibraryMessage::AnalysisReady { .. }
            | LibraryMessage::AnalysisFailed { .. } => {}
        }
    }

    /// Append a book, replacing any existing entry with the same id
    pub fn upsert_book(&mut self, book: Book) {
        match self.books.iter_mut().find(|b| b.id == book.id) {
            Some(existing) => *existing = book,
            None => self.books.push(book),
        }
        self.phase = LoadPhase::Ready;
    }

    /// Remove a book by id; an absent id is a no-op
    pub fn remove_book(&mut self, id: &str) {
        self.books.retain(|b| b.id != id);
        self.clamp_selection();
    }

    /// The currently selected book
    pub fn selected_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.books.len() {
            self.selected += 1;
        }
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Show a transient notice
    pub fn set_notice(&mut self, text: String, kind: NoticeKind) {
        self.notice = Some(Notice {
            text,
            kind,
            remaining: NOTICE_DURATION,
        });
    }

    /// Update timers, expiring the notice
    pub fn update(&mut self, delta: Duration) {
        if let Some(ref mut notice) = self.notice {
            notice.remaining = notice.remaining.saturating_sub(delta);
            if notice.remaining.is_zero() {
                self.notice = None;
            }
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.books.len() {
            self.selected = self.books.len().saturating_sub(1);
        }
    }
}

// ============================================================================
// Card Metadata Formatting
// ============================================================================

/// How a metadata value should render on a card
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetadataValue {
    /// Plain text
    Text(String),
    /// An external link (author webpages)
    Link(String),
}

/// Metadata entries for a book card, in source order
///
/// The reserved `formats` field never renders; everything else becomes a
/// (label, value) pair.
pub fn metadata_entries(book: &Book) -> Vec<(String, MetadataValue)> {
    book.book_metadata
        .iter()
        .filter(|(key, _)| key.as_str() != RESERVED_FORMATS_KEY)
        .map(|(key, value)| (format_metadata_key(key), format_metadata_value(key, value)))
        .collect()
}

/// Field keys render capitalized, with underscores as spaces
pub fn format_metadata_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

/// Render a metadata value for display
pub fn format_metadata_value(key: &str, value: &Value) -> MetadataValue {
    if key == "author_webpage" {
        if let Value::String(url) = value {
            return MetadataValue::Link(url.clone());
        }
    }

    match value {
        Value::Null => MetadataValue::Text("-".to_string()),
        Value::Bool(true) => MetadataValue::Text("Yes".to_string()),
        Value::Bool(false) => MetadataValue::Text("No".to_string()),
        Value::String(s) => MetadataValue::Text(s.clone()),
        Value::Object(_) | Value::Array(_) => MetadataValue::Text(
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        ),
        other => MetadataValue::Text(other.to_string()),
    }
}
