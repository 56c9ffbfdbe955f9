//! Analysis Modal
//!
//! The literary-analysis overlay: request the analysis, show a loading
//! line, then reveal the parsed sections word by word. Each open is a new
//! session tagged with a generation counter; results carrying a stale
//! generation are discarded, so closing the modal mid-fetch orphans the
//! in-flight request instead of resurfacing it later.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::StatefulWidget;

use library_core::{sectionize, AnalysisSection};

use crate::theme;
use crate::widgets::{SectionList, SectionListState};

/// Lifecycle of an analysis session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalysisPhase {
    /// No session active
    Closed,
    /// Request in flight
    Loading,
    /// Sections parsed, reveal in progress
    Revealing,
    /// Every word visible
    Done,
}

/// The analysis overlay state machine
#[derive(Debug)]
pub struct AnalysisModal {
    /// Current phase
    pub phase: AnalysisPhase,
    /// Book the active session is for
    pub book_id: Option<String>,
    /// Session counter; bumped on every open and close
    generation: u64,
    /// Reveal state, present in Revealing/Done
    revealer: Option<super::Revealer>,
    /// Scroll state for the section list
    pub scroll: SectionListState,
}

impl Default for AnalysisModal {
    fn default() -> Self {
        Self {
            phase: AnalysisPhase::Closed,
            book_id: None,
            generation: 0,
            revealer: None,
            scroll: SectionListState::default(),
        }
    }
}

impl AnalysisModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the overlay should be on screen
    pub fn is_open(&self) -> bool {
        self.phase != AnalysisPhase::Closed
    }

    /// Start a session for a book; returns the generation to tag the fetch
    pub fn open(&mut self, book_id: String) -> u64 {
        self.generation += 1;
        self.phase = AnalysisPhase::Loading;
        self.book_id = Some(book_id);
        self.revealer = None;
        self.scroll = SectionListState::default();
        self.generation
    }

    /// Close the session, orphaning any in-flight fetch
    pub fn close(&mut self) {
        self.generation += 1;
        self.phase = AnalysisPhase::Closed;
        self.book_id = None;
        self.revealer = None;
        self.scroll = SectionListState::default();
    }

    /// Apply fetched analysis text; stale or post-close results are dropped
    pub fn apply_analysis(&mut self, generation: u64, text: &str) {
        if generation != self.generation || self.phase != AnalysisPhase::Loading {
            tracing::debug!(generation, "discarding stale analysis result");
            return;
        }
        let sections = sectionize(text);
        self.revealer = Some(super::Revealer::new(&sections));
        self.phase = AnalysisPhase::Revealing;
    }

    /// Apply a fetch failure as a fully revealed error section
    pub fn apply_error(&mut self, generation: u64, error: &str) {
        if generation != self.generation || self.phase != AnalysisPhase::Loading {
            tracing::debug!(generation, "discarding stale analysis failure");
            return;
        }
        let sections = vec![AnalysisSection {
            title: "Error".to_string(),
            content: format!("Failed to fetch analysis. {error}"),
        }];
        let mut revealer = super::Revealer::new(&sections);
        revealer.reveal_all();
        self.revealer = Some(revealer);
        self.phase = AnalysisPhase::Done;
    }

    /// Advance the reveal
    pub fn update(&mut self, delta: Duration) {
        if self.phase != AnalysisPhase::Revealing {
            return;
        }
        if let Some(ref mut revealer) = self.revealer {
            revealer.update(delta);
            if revealer.is_done() {
                self.phase = AnalysisPhase::Done;
            }
        }
    }

    /// Sections as currently visible
    pub fn visible_sections(&self) -> Vec<AnalysisSection> {
        self.revealer
            .as_ref()
            .map(|r| r.visible_sections())
            .unwrap_or_default()
    }

    /// Render into the modal's layer buffer
    pub fn render(&mut self, buf: &mut Buffer) {
        let area = buf.area;
        if area.width < 4 || area.height < 4 {
            return;
        }

        draw_border(buf, area, theme::BORDER_GRAY);

        let header = "Literary Analysis";
        let header_x = area.x + (area.width.saturating_sub(header.len() as u16)) / 2;
        buf.set_string(
            header_x,
            area.y,
            header,
            Style::default()
                .fg(theme::SHELF_GOLD)
                .add_modifier(Modifier::BOLD),
        );

        let inner = Rect::new(
            area.x + 2,
            area.y + 2,
            area.width.saturating_sub(4),
            area.height.saturating_sub(4),
        );

        match self.phase {
            AnalysisPhase::Loading => {
                buf.set_string(
                    inner.x,
                    inner.y,
                    "Analyzing the text...",
                    Style::default().fg(theme::BUSY_BLUE),
                );
            }
            AnalysisPhase::Revealing | AnalysisPhase::Done => {
                let sections = self.visible_sections();
                SectionList::new(&sections)
                    .title_style(
                        Style::default()
                            .fg(theme::SHELF_GOLD)
                            .add_modifier(Modifier::BOLD),
                    )
                    .rule_style(Style::default().fg(theme::BORDER_GRAY))
                    .content_style(Style::default().fg(theme::PAGE_WHITE))
                    .render(inner, buf, &mut self.scroll);
            }
            AnalysisPhase::Closed => {}
        }

        let hint = " Esc close  PgUp/PgDn scroll ";
        if (hint.len() as u16) < area.width {
            buf.set_string(
                area.x + 1,
                area.y + area.height - 1,
                hint,
                Style::default().fg(theme::DIM_GRAY),
            );
        }
    }
}

/// Draw a simple box border around an area
pub(crate) fn draw_border(buf: &mut Buffer, area: Rect, color: ratatui::style::Color) {
    let style = Style::default().fg(color);
    let right = area.x + area.width - 1;
    let bottom = area.y + area.height - 1;

    for x in area.x..=right {
        buf.set_string(x, area.y, "─", style);
        buf.set_string(x, bottom, "─", style);
    }
    for y in area.y..=bottom {
        buf.set_string(area.x, y, "│", style);
        buf.set_string(right, y, "│", style);
    }
    buf.set_string(area.x, area.y, "┌", style);
    buf.set_string(right, area.y, "┐", style);
    buf.set_string(area.x, bottom, "└", style);
    buf.set_string(right, bottom, "┘", style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open_starts_loading_with_new_generation() {
        let mut modal = AnalysisModal::new();
        let g1 = modal.open("42".to_string());
        assert_eq!(modal.phase, AnalysisPhase::Loading);
        assert_eq!(modal.book_id.as_deref(), Some("42"));

        modal.close();
        let g2 = modal.open("42".to_string());
        assert!(g2 > g1);
    }

    #[test]
    fn test_analysis_parses_and_starts_reveal() {
        let mut modal = AnalysisModal::new();
        let generation = modal.open("42".to_string());
        modal.apply_analysis(generation, "Theme: love. Characters: Alice, Bob.");

        assert_eq!(modal.phase, AnalysisPhase::Revealing);
        let sections = modal.visible_sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Theme");
        assert_eq!(sections[0].content, "");
    }

    #[test]
    fn test_reveal_runs_to_done() {
        let mut modal = AnalysisModal::new();
        let generation = modal.open("42".to_string());
        modal.apply_analysis(generation, "Theme: love. Characters: Alice, Bob.");

        modal.update(Duration::from_secs(10));
        assert_eq!(modal.phase, AnalysisPhase::Done);
        let sections = modal.visible_sections();
        assert_eq!(sections[0].content, "love.");
        assert_eq!(sections[1].content, "Alice, Bob.");
    }

    #[test]
    fn test_stale_result_discarded_after_close() {
        let mut modal = AnalysisModal::new();
        let generation = modal.open("42".to_string());
        modal.close();

        modal.apply_analysis(generation, "Theme: love.");
        assert_eq!(modal.phase, AnalysisPhase::Closed);
        assert!(modal.visible_sections().is_empty());
    }

    #[test]
    fn test_stale_result_discarded_after_reopen() {
        let mut modal = AnalysisModal::new();
        let old = modal.open("1".to_string());
        modal.close();
        let _new = modal.open("2".to_string());

        modal.apply_analysis(old, "Theme: wrong book.");
        assert_eq!(modal.phase, AnalysisPhase::Loading);
    }

    #[test]
    fn test_error_shows_fully_revealed_error_section() {
        let mut modal = AnalysisModal::new();
        let generation = modal.open("42".to_string());
        modal.apply_error(generation, "service returned 500: boom");

        assert_eq!(modal.phase, AnalysisPhase::Done);
        let sections = modal.visible_sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Error");
        assert!(sections[0].content.contains("boom"));
    }

    #[test]
    fn test_stale_error_discarded() {
        let mut modal = AnalysisModal::new();
        let generation = modal.open("42".to_string());
        modal.close();
        modal.apply_error(generation, "late failure");
        assert_eq!(modal.phase, AnalysisPhase::Closed);
    }

    #[test]
    fn test_render_loading_line() {
        let mut modal = AnalysisModal::new();
        modal.open("42".to_string());

        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        modal.render(&mut buf);

        let row: String = (0..40)
            .map(|x| buf.content[buf.index_of(x, 2)].symbol().to_string())
            .collect();
        assert!(row.contains("Analyzing the text..."));
    }
}
