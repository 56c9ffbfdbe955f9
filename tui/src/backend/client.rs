//! Library Handle
//!
//! Thin wrapper around [`LibraryClient`] for the app loop. Every operation
//! spawns a task; the result comes back as a [`LibraryMessage`] through the
//! handle's channel. The app drains the channel once per frame with
//! [`LibraryHandle::recv_all`], so all state mutation stays on the app loop
//! and a slow response can never touch state that no longer wants it.

use std::sync::Arc;

use tokio::sync::mpsc;

use library_core::LibraryClient;

use super::messages::LibraryMessage;

/// Channel capacity; a handful of in-flight calls at most
const CHANNEL_SIZE: usize = 64;

/// Handle for issuing library service calls from the app loop
pub struct LibraryHandle {
    /// Shared client, cloned into spawned tasks
    client: Arc<LibraryClient>,
    /// Sender cloned into spawned tasks
    tx: mpsc::Sender<LibraryMessage>,
    /// Receiver drained by the app loop
    rx: mpsc::Receiver<LibraryMessage>,
}

impl LibraryHandle {
    /// Create a new handle around a client
    pub fn new(client: LibraryClient) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_SIZE);
        Self {
            client: Arc::new(client),
            tx,
            rx,
        }
    }

    /// Fetch the book list
    pub fn fetch_books(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let msg = match client.list_books().await {
                Ok(books) => LibraryMessage::BooksLoaded(books),
                Err(e) => {
                    tracing::warn!(error = %e, "book list fetch failed");
                    LibraryMessage::BooksFailed(e.to_string())
                }
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Add a book by identifier
    pub fn add_book(&self, book_id: String) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let msg = match client.add_book(&book_id).await {
                Ok(book) => LibraryMessage::BookAdded(book),
                Err(e) => {
                    tracing::warn!(error = %e, book_id, "add book failed");
                    LibraryMessage::AddFailed(e.to_string())
                }
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Delete a book by identifier
    pub fn delete_book(&self, book_id: String) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let msg = match client.delete_book(&book_id).await {
                Ok(()) => LibraryMessage::BookDeleted { id: book_id },
                Err(e) => {
                    tracing::warn!(error = %e, book_id, "delete book failed");
                    LibraryMessage::DeleteFailed {
                        id: book_id,
                        error: e.to_string(),
                    }
                }
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Fetch the analysis for a book, tagged with its session generation
    pub fn fetch_analysis(&self, book_id: String, generation: u64) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let msg = match client.fetch_analysis(&book_id).await {
                Ok(text) => LibraryMessage::AnalysisReady { generation, text },
                Err(e) => {
                    tracing::warn!(error = %e, book_id, "analysis fetch failed");
                    LibraryMessage::AnalysisFailed {
                        generation,
                        error: e.to_string(),
                    }
                }
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Receive all pending messages (non-blocking)
    pub fn recv_all(&mut self) -> Vec<LibraryMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }
}
