//! SectionList Widget
//!
//! A borderless, scrollable list of titled analysis sections: heading line,
//! separator rule, wrapped content, blank line between sections.

use library_core::AnalysisSection;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;

/// State for a scrollable section list
#[derive(Debug, Default)]
pub struct SectionListState {
    /// Scroll offset (lines from the bottom, 0 = follow latest)
    pub scroll_offset: usize,
    /// Total content lines at the last render
    pub total_lines: usize,
}

impl SectionListState {
    /// Scroll by delta (positive = towards older lines)
    pub fn scroll(&mut self, delta: i32) {
        let new_offset = self.scroll_offset as i32 + delta;
        self.scroll_offset = (new_offset.max(0) as usize).min(self.total_lines.saturating_sub(1));
    }

    /// Jump back to the newest lines
    pub fn follow_bottom(&mut self) {
        self.scroll_offset = 0;
    }
}

/// A scrollable render of analysis sections
pub struct SectionList<'a> {
    sections: &'a [AnalysisSection],
    title_style: Style,
    content_style: Style,
    rule_style: Style,
}

impl<'a> SectionList<'a> {
    pub fn new(sections: &'a [AnalysisSection]) -> Self {
        Self {
            sections,
            title_style: Style::default(),
            content_style: Style::default(),
            rule_style: Style::default(),
        }
    }

    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    pub fn content_style(mut self, style: Style) -> Self {
        self.content_style = style;
        self
    }

    pub fn rule_style(mut self, style: Style) -> Self {
        self.rule_style = style;
        self
    }

    /// Flatten sections into styled lines wrapped to the given width
    fn build_lines(&self, width: usize) -> Vec<(String, Style)> {
        let mut lines = Vec::new();
        for section in self.sections {
            if !section.title.is_empty() {
                lines.push((section.title.clone(), self.title_style));
                lines.push(("─".repeat(width.min(24)), self.rule_style));
            }
            for line in section.content.lines() {
                if line.is_empty() {
                    lines.push((String::new(), self.content_style));
                    continue;
                }
                for wrapped in wrap(line, width.max(1)) {
                    lines.push((wrapped.to_string(), self.content_style));
                }
            }
            lines.push((String::new(), self.content_style));
        }
        lines
    }
}

impl<'a> StatefulWidget for SectionList<'a> {
    type State = SectionListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.build_lines(area.width as usize);
        state.total_lines = lines.len();

        // Window anchored to the bottom so the reveal stays in view
        let height = area.height as usize;
        let max_scroll = lines.len().saturating_sub(height);
        state.scroll_offset = state.scroll_offset.min(max_scroll);

        let visible_end = lines.len().saturating_sub(state.scroll_offset);
        let visible_start = visible_end.saturating_sub(height);

        for (i, (line, style)) in lines[visible_start..visible_end].iter().enumerate() {
            let y = area.y + i as u16;
            let display: String = line.chars().take(area.width as usize).collect();
            buf.set_string(area.x, y, &display, *style);
        }
    }
}
