//! Message Types

use library_core::Book;

/// Results of spawned API calls, delivered to the app loop
///
/// Analysis results carry the generation counter of the session that
/// requested them so the modal can discard late arrivals from a closed or
/// superseded session.
#[derive(Clone, Debug)]
pub enum LibraryMessage {
    /// Book list fetched successfully
    BooksLoaded(Vec<Book>),
    /// Book list fetch failed (terminal for this session)
    BooksFailed(String),
    /// The service added a book and returned it
    BookAdded(Book),
    /// Add request failed
    AddFailed(String),
    /// The service confirmed a delete
    BookDeleted {
        /// Id of the deleted book
        id: String,
    },
    /// Delete request failed
    DeleteFailed {
        /// Id of the book that was not deleted
        id: String,
        /// Failure text for the notice
        error: String,
    },
    /// Analysis text fetched successfully
    AnalysisReady {
        /// Analysis session that requested this fetch
        generation: u64,
        /// Raw analysis text
        text: String,
    },
    /// Analysis fetch failed
    AnalysisFailed {
        /// Analysis session that requested this fetch
        generation: u64,
        /// Failure text for the error section
        error: String,
    },
}
