//! Book Wire Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A library entry as the service stores it
///
/// The id is assigned by the remote service when the book is added and is
/// immutable from the client's perspective. Metadata is a free-form mapping
/// whose keys depend on what the service could extract for the title.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Remote-assigned identifier
    pub id: String,
    /// Extracted metadata (title, authors, language, ...)
    #[serde(default)]
    pub book_metadata: Map<String, Value>,
}

impl Book {
    /// The display title, falling back when the service extracted none
    pub fn title(&self) -> &str {
        self.book_metadata
            .get("title")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled Book")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn book_json(s: &str) -> Book {
        serde_json::from_str(s).expect("valid book json")
    }

    #[test]
    fn test_book_deserialize() {
        let book = book_json(r#"{"id":"1234","book_metadata":{"title":"T","publisher":"P"}}"#);
        assert_eq!(book.id, "1234");
        assert_eq!(book.title(), "T");
        assert_eq!(
            book.book_metadata.get("publisher"),
            Some(&Value::String("P".to_string()))
        );
    }

    #[test]
    fn test_book_missing_metadata_defaults_empty() {
        let book = book_json(r#"{"id":"9"}"#);
        assert!(book.book_metadata.is_empty());
        assert_eq!(book.title(), "Untitled Book");
    }

    #[test]
    fn test_book_title_fallbacks() {
        let book = book_json(r#"{"id":"1","book_metadata":{"title":""}}"#);
        assert_eq!(book.title(), "Untitled Book");

        let book = book_json(r#"{"id":"1","book_metadata":{"title":42}}"#);
        assert_eq!(book.title(), "Untitled Book");
    }

    #[test]
    fn test_book_roundtrip() {
        let book = book_json(r#"{"id":"77","book_metadata":{"title":"Frankenstein"}}"#);
        let json = serde_json::to_string(&book).expect("serialize");
        assert_eq!(book_json(&json), book);
    }
}
