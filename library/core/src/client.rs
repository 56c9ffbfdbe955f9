//! Library Service Client
//!
//! One HTTP round trip per operation against a fixed base endpoint. The
//! remote service owns all business logic; this client only shapes requests
//! and surfaces failures.
//!
//! # Service API
//!
//! - `GET /books` - list all books
//! - `POST /books` - add a book by identifier (`{"book_id": id}`)
//! - `DELETE /books` - delete a book; the id travels in the request body,
//!   which is unusual but required for compatibility with the service
//! - `GET /analyze-book/{id}` - AI literary analysis as free text

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::book::Book;
use crate::error::ApiError;

/// Default service endpoint
const DEFAULT_BASE_URL: &str = "https://gutenberg-explorer-back-1b3df3bcf947.herokuapp.com";

/// Request timeout; the analyze endpoint generates text and can be slow
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the library service
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("GUTENSHELF_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

/// Body for add/delete requests
#[derive(Debug, Serialize)]
struct BookIdBody<'a> {
    book_id: &'a str,
}

/// Client for the remote library service
#[derive(Clone)]
pub struct LibraryClient {
    /// Base URL, without trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl LibraryClient {
    /// Create a new client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create from configuration
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// Create from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_config(&ClientConfig::from_env())
    }

    /// Get the books endpoint URL
    fn books_url(&self) -> String {
        format!("{}/books", self.base_url)
    }

    /// Get the analyze endpoint URL for a book
    fn analyze_url(&self, book_id: &str) -> String {
        format!("{}/analyze-book/{}", self.base_url, book_id)
    }

    /// Fetch all books
    pub async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let response = self.http_client.get(self.books_url()).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Add a book by identifier; the service resolves it into metadata
    pub async fn add_book(&self, book_id: &str) -> Result<Book, ApiError> {
        let response = self
            .http_client
            .post(self.books_url())
            .json(&BookIdBody { book_id })
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Delete a book; the id goes in the request body
    pub async fn delete_book(&self, book_id: &str) -> Result<(), ApiError> {
        let response = self
            .http_client
            .delete(self.books_url())
            .json(&BookIdBody { book_id })
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Fetch the literary analysis for a book as raw text
    ///
    /// The endpoint answers either `{"analysis": "..."}` or a bare string,
    /// depending on the service variant; both shapes are accepted.
    pub async fn fetch_analysis(&self, book_id: &str) -> Result<String, ApiError> {
        let response = self
            .http_client
            .get(self.analyze_url(book_id))
            .send()
            .await?;
        let response = check_status(response).await?;
        let body = response.text().await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(map)) => {
                if let Some(text) = map.get("analysis").and_then(Value::as_str) {
                    return Ok(text.to_string());
                }
                Ok(body)
            }
            Ok(Value::String(text)) => Ok(text),
            _ => Ok(body),
        }
    }
}

/// Map non-2xx responses to [`ApiError::Status`] with the body as diagnostics
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%status, %body, "library service returned an error");
    Err(ApiError::Status { status, body })
}
