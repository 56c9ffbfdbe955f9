//! Add Book Modal
//!
//! A one-field form: type a Project Gutenberg book id, press Enter to
//! submit. Input is locked while the request is in flight; on success the
//! modal clears and closes, on failure it stays open with an inline error
//! so the id can be corrected and resubmitted.

use ratatui::buffer::Buffer;
use ratatui::style::{Modifier, Style};

use crate::theme;

use super::analysis::draw_border;

/// The add-book form state
#[derive(Debug, Default)]
pub struct AddBookModal {
    /// Whether the modal is on screen
    pub open: bool,
    /// Book id being typed
    pub book_id: String,
    /// Whether a submit is in flight
    pub submitting: bool,
    /// Inline error from the last failed submit
    pub error: Option<String>,
}

impl AddBookModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the form with a fresh field
    pub fn open(&mut self) {
        self.open = true;
        self.book_id.clear();
        self.submitting = false;
        self.error = None;
    }

    /// Close the form, dropping input and error
    pub fn close(&mut self) {
        self.open = false;
        self.book_id.clear();
        self.submitting = false;
        self.error = None;
    }

    /// Append a typed character; ignored while submitting
    pub fn push_char(&mut self, c: char) {
        if self.submitting {
            return;
        }
        self.book_id.push(c);
        self.error = None;
    }

    /// Delete the last character; ignored while submitting
    pub fn pop_char(&mut self) {
        if self.submitting {
            return;
        }
        self.book_id.pop();
    }

    /// Begin a submit, returning the id to send
    ///
    /// Returns `None` when the field is empty (trimmed) or a submit is
    /// already in flight.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.submitting {
            return None;
        }
        let id = self.book_id.trim().to_string();
        if id.is_empty() {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(id)
    }

    /// The submit succeeded; clear and close
    pub fn submit_ok(&mut self) {
        self.close();
    }

    /// The submit failed; stay open with the error inline
    pub fn submit_err(&mut self, error: String) {
        self.submitting = false;
        self.error = Some(format!("Failed to add book. {error}"));
    }

    /// Render into the modal's layer buffer
    pub fn render(&self, buf: &mut Buffer) {
        let area = buf.area;
        if area.width < 8 || area.height < 5 {
            return;
        }

        draw_border(buf, area, theme::BORDER_GRAY);

        let header = "Add Book";
        let header_x = area.x + (area.width.saturating_sub(header.len() as u16)) / 2;
        buf.set_string(
            header_x,
            area.y,
            header,
            Style::default()
                .fg(theme::SHELF_GOLD)
                .add_modifier(Modifier::BOLD),
        );

        let inner_x = area.x + 2;
        let inner_width = area.width.saturating_sub(4) as usize;

        buf.set_string(
            inner_x,
            area.y + 2,
            "Book ID:",
            Style::default().fg(theme::LABEL_TAN),
        );

        // Field shows the tail of long input, with a cursor cell
        let field_width = inner_width.saturating_sub(1).max(1);
        let shown: String = self
            .book_id
            .chars()
            .rev()
            .take(field_width)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        let field = format!("{shown}_");
        buf.set_string(
            inner_x,
            area.y + 3,
            &field,
            Style::default().fg(theme::PAGE_WHITE),
        );

        let status_y = area.y + area.height - 2;
        if self.submitting {
            buf.set_string(
                inner_x,
                status_y,
                "Adding...",
                Style::default().fg(theme::BUSY_BLUE),
            );
        } else if let Some(ref error) = self.error {
            let shown: String = error.chars().take(inner_width).collect();
            buf.set_string(inner_x, status_y, &shown, Style::default().fg(theme::ERROR_RED));
        } else {
            buf.set_string(
                inner_x,
                status_y,
                "Enter add  Esc cancel",
                Style::default().fg(theme::DIM_GRAY),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_typing_builds_id() {
        let mut modal = AddBookModal::new();
        modal.open();
        modal.push_char('1');
        modal.push_char('2');
        modal.push_char('3');
        modal.pop_char();
        assert_eq!(modal.book_id, "12");
    }

    #[test]
    fn test_empty_submit_rejected() {
        let mut modal = AddBookModal::new();
        modal.open();
        assert_eq!(modal.begin_submit(), None);
        modal.push_char(' ');
        assert_eq!(modal.begin_submit(), None);
        assert!(!modal.submitting);
    }

    #[test]
    fn test_submit_trims_and_locks_input() {
        let mut modal = AddBookModal::new();
        modal.open();
        for c in " 1234 ".chars() {
            modal.push_char(c);
        }
        assert_eq!(modal.begin_submit(), Some("1234".to_string()));
        assert!(modal.submitting);

        // Locked: typing and resubmitting are ignored until a response.
        modal.push_char('9');
        assert_eq!(modal.book_id, " 1234 ");
        assert_eq!(modal.begin_submit(), None);
    }

    #[test]
    fn test_success_clears_and_closes() {
        let mut modal = AddBookModal::new();
        modal.open();
        modal.push_char('7');
        modal.begin_submit();
        modal.submit_ok();
        assert!(!modal.open);
        assert_eq!(modal.book_id, "");
        assert!(modal.error.is_none());
    }

    #[test]
    fn test_failure_stays_open_with_error() {
        let mut modal = AddBookModal::new();
        modal.open();
        modal.push_char('7');
        modal.begin_submit();
        modal.submit_err("service returned 404: not found".to_string());

        assert!(modal.open);
        assert!(!modal.submitting);
        assert_eq!(modal.book_id, "7");
        assert!(modal.error.as_ref().is_some_and(|e| e.contains("404")));

        // The id can be edited and resubmitted.
        modal.pop_char();
        modal.push_char('8');
        assert_eq!(modal.begin_submit(), Some("8".to_string()));
    }

    #[test]
    fn test_typing_clears_stale_error() {
        let mut modal = AddBookModal::new();
        modal.open();
        modal.push_char('7');
        modal.begin_submit();
        modal.submit_err("boom".to_string());
        modal.push_char('7');
        assert!(modal.error.is_none());
    }

    #[test]
    fn test_reopen_starts_fresh() {
        let mut modal = AddBookModal::new();
        modal.open();
        modal.push_char('7');
        modal.close();
        modal.open();
        assert_eq!(modal.book_id, "");
        assert!(modal.error.is_none());
    }
}
