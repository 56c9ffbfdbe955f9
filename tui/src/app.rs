//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize)
//! - LibraryHandle for service calls
//! - LibraryDisplay and the modals for presentation state
//!
//! All state mutation happens on the app loop: spawned API calls report
//! back as [`LibraryMessage`]s, drained once per frame and routed to the
//! display or to the modal that owns the result.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::Terminal;

use library_core::LibraryClient;

use crate::backend::{LibraryHandle, LibraryMessage};
use crate::compositor::{Compositor, LayerId};
use crate::display::{metadata_entries, LibraryDisplay, LoadPhase, MetadataValue, NoticeKind};
use crate::modals::{AddBookModal, AnalysisModal};
use crate::theme;

/// Status bar height (lines)
const STATUS_HEIGHT: u16 = 1;

/// Add-book modal dimensions
const ADD_MODAL_WIDTH: u16 = 40;
const ADD_MODAL_HEIGHT: u16 = 7;

/// A rendered line: spans of styled text laid out left to right
type Spans = Vec<(String, Style)>;

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Service Integration ===
    /// Handle for spawned library service calls
    library: LibraryHandle,
    /// Book-list display state
    display: LibraryDisplay,

    // === Modals ===
    /// Add-book form
    add_modal: AddBookModal,
    /// Analysis overlay
    analysis_modal: AnalysisModal,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,

    // === List Scroll State ===
    /// First visible line of the book list
    list_scroll: usize,
    /// Total rendered list lines (for scroll bounds)
    total_lines: usize,
    /// Snap the scroll to the selected card on next render
    follow_selection: bool,

    // === Misc State ===
    /// Last frame time (for animations)
    last_frame: Instant,
    /// Terminal size
    size: (u16, u16),
}

/// Layer IDs for UI regions
struct AppLayers {
    list: LayerId,
    status: LayerId,
    add_modal: LayerId,
    analysis_modal: LayerId,
}

impl App {
    /// Create a new App instance
    pub fn new() -> anyhow::Result<Self> {
        let size = crossterm::terminal::size()?;
        let area = Rect::new(0, 0, size.0, size.1);

        let mut compositor = Compositor::new(area);

        // Create layers with z-ordering
        let list = compositor.create_layer(
            Rect::new(0, 0, area.width, area.height.saturating_sub(STATUS_HEIGHT)),
            0,
        );
        let status = compositor.create_layer(
            Rect::new(0, area.height.saturating_sub(STATUS_HEIGHT), area.width, STATUS_HEIGHT),
            10,
        );

        let add_bounds = Self::centered(area, ADD_MODAL_WIDTH, ADD_MODAL_HEIGHT);
        let add_modal_layer = compositor.create_layer(add_bounds, 50);
        compositor.set_visible(add_modal_layer, false);

        let analysis_bounds = Self::analysis_bounds(area);
        let analysis_modal_layer = compositor.create_layer(analysis_bounds, 50);
        compositor.set_visible(analysis_modal_layer, false);

        let layers = AppLayers {
            list,
            status,
            add_modal: add_modal_layer,
            analysis_modal: analysis_modal_layer,
        };

        let library = LibraryHandle::new(LibraryClient::from_env());

        Ok(Self {
            running: true,
            library,
            display: LibraryDisplay::new(),
            add_modal: AddBookModal::new(),
            analysis_modal: AnalysisModal::new(),
            compositor,
            layers,
            list_scroll: 0,
            total_lines: 0,
            follow_selection: false,
            last_frame: Instant::now(),
            size: (size.0, size.1),
        })
    }

    /// Centered modal bounds, clamped to the terminal
    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let w = width.min(area.width);
        let h = height.min(area.height);
        Rect::new(
            (area.width.saturating_sub(w)) / 2,
            (area.height.saturating_sub(h)) / 2,
            w,
            h,
        )
    }

    /// Analysis modal bounds: most of the screen, with a margin
    fn analysis_bounds(area: Rect) -> Rect {
        let w = area.width.saturating_sub(8).max(20).min(area.width);
        let h = area.height.saturating_sub(4).max(8).min(area.height);
        Self::centered(area, w, h)
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // ~20 FPS keeps the word reveal smooth
        let frame_duration = Duration::from_millis(50);

        let mut event_stream = EventStream::new();

        // Kick off the initial list fetch before the first frame
        self.library.fetch_books();
        self.render(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key)
                            }
                            Event::Resize(w, h) => self.handle_resize(w, h),
                            _ => {}
                        }
                    }
                }

                // Frame tick
                _ = tokio::time::sleep(Duration::from_millis(16)) => {}
            }

            // Receive and process messages from spawned API calls
            self.process_messages();

            // Update animations and display state
            self.update();

            // Render
            self.render(terminal)?;

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        Ok(())
    }

    /// Process all pending messages from spawned API calls
    fn process_messages(&mut self) {
        for msg in self.library.recv_all() {
            match &msg {
                LibraryMessage::BookAdded(_) => {
                    self.add_modal.submit_ok();
                    self.display.apply_message(&msg);
                    // Refresh so the list matches the service's view
                    self.library.fetch_books();
                }
                LibraryMessage::AddFailed(error) => {
                    self.add_modal.submit_err(error.clone());
                }
                LibraryMessage::AnalysisReady { generation, text } => {
                    self.analysis_modal.apply_analysis(*generation, text);
                }
                LibraryMessage::AnalysisFailed { generation, error } => {
                    self.analysis_modal.apply_error(*generation, error);
                }
                other => {
                    // A fresh list snaps the window back to the selected card
                    if matches!(other, LibraryMessage::BooksLoaded(_)) {
                        self.follow_selection = true;
                    }
                    self.display.apply_message(other);
                }
            }
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: event::KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        // The topmost open modal captures input
        if self.add_modal.open {
            self.handle_add_modal_key(key);
            return;
        }
        if self.analysis_modal.is_open() {
            self.handle_analysis_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.running = false;
            }
            KeyCode::Char('a') => {
                self.add_modal.open();
            }
            KeyCode::Char('d') => {
                if let Some(book) = self.display.selected_book() {
                    self.library.delete_book(book.id.clone());
                }
            }
            KeyCode::Enter => {
                if let Some(book) = self.display.selected_book() {
                    let id = book.id.clone();
                    let generation = self.analysis_modal.open(id.clone());
                    self.library.fetch_analysis(id, generation);
                }
            }
            KeyCode::Up => {
                self.display.select_prev();
                self.follow_selection = true;
            }
            KeyCode::Down => {
                self.display.select_next();
                self.follow_selection = true;
            }
            KeyCode::PageUp => {
                let page = (self.size.1 / 2) as usize;
                self.list_scroll = self.list_scroll.saturating_sub(page);
            }
            KeyCode::PageDown => {
                let page = (self.size.1 / 2) as usize;
                let max_scroll = self.total_lines.saturating_sub(1);
                self.list_scroll = (self.list_scroll + page).min(max_scroll);
            }
            _ => {}
        }
    }

    /// Keys while the add-book form is open
    fn handle_add_modal_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Esc => self.add_modal.close(),
            KeyCode::Enter => {
                if let Some(id) = self.add_modal.begin_submit() {
                    self.library.add_book(id);
                }
            }
            KeyCode::Backspace => self.add_modal.pop_char(),
            KeyCode::Char(c) => self.add_modal.push_char(c),
            _ => {}
        }
    }

    /// Keys while the analysis overlay is open
    fn handle_analysis_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Esc => self.analysis_modal.close(),
            KeyCode::PageUp => self.analysis_modal.scroll.scroll(5),
            KeyCode::PageDown => self.analysis_modal.scroll.scroll(-5),
            KeyCode::Up => self.analysis_modal.scroll.scroll(1),
            KeyCode::Down => self.analysis_modal.scroll.scroll(-1),
            KeyCode::End => self.analysis_modal.scroll.follow_bottom(),
            _ => {}
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let area = Rect::new(0, 0, width, height);

        self.compositor.resize(area);

        self.compositor.move_layer(self.layers.list, 0, 0);
        self.compositor.resize_layer(
            self.layers.list,
            width,
            height.saturating_sub(STATUS_HEIGHT),
        );

        self.compositor
            .move_layer(self.layers.status, 0, height.saturating_sub(STATUS_HEIGHT));
        self.compositor
            .resize_layer(self.layers.status, width, STATUS_HEIGHT);

        let add_bounds = Self::centered(area, ADD_MODAL_WIDTH, ADD_MODAL_HEIGHT);
        self.compositor
            .move_layer(self.layers.add_modal, add_bounds.x, add_bounds.y);
        self.compositor
            .resize_layer(self.layers.add_modal, add_bounds.width, add_bounds.height);

        let analysis_bounds = Self::analysis_bounds(area);
        self.compositor.move_layer(
            self.layers.analysis_modal,
            analysis_bounds.x,
            analysis_bounds.y,
        );
        self.compositor.resize_layer(
            self.layers.analysis_modal,
            analysis_bounds.width,
            analysis_bounds.height,
        );
    }

    /// Update animations and state
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        self.display.update(delta);
        self.analysis_modal.update(delta);

        // Sync modal layer visibility
        self.compositor
            .set_visible(self.layers.add_modal, self.add_modal.open);
        self.compositor
            .set_visible(self.layers.analysis_modal, self.analysis_modal.is_open());
    }

    /// Render the UI
    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        self.render_list();
        self.render_status();
        self.render_modals();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    let idx = output.index_of(x, y);
                    if idx < output.content.len() {
                        buf[(x, y)] = output.content[idx].clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    /// Render the book list layer
    fn render_list(&mut self) {
        let height = self.size.1.saturating_sub(STATUS_HEIGHT) as usize;
        let width = self.size.0 as usize;
        if width < 10 || height < 3 {
            return;
        }

        // Build card lines, remembering where the selected card starts/ends
        let mut all_lines: Vec<Spans> = Vec::new();
        let mut selected_range = (0usize, 0usize);

        match &self.display.phase {
            LoadPhase::Loading => {
                all_lines.push(vec![(
                    "Loading books...".to_string(),
                    Style::default().fg(theme::BUSY_BLUE),
                )]);
            }
            LoadPhase::Failed(message) => {
                for line in textwrap::wrap(message, width.saturating_sub(4)) {
                    all_lines.push(vec![(
                        line.to_string(),
                        Style::default().fg(theme::ERROR_RED),
                    )]);
                }
            }
            LoadPhase::Ready if self.display.books.is_empty() => {
                all_lines.push(vec![(
                    "No books yet. Press 'a' to add one by its Project Gutenberg id.".to_string(),
                    Style::default().fg(theme::INK_GRAY),
                )]);
            }
            LoadPhase::Ready => {
                for (i, book) in self.display.books.iter().enumerate() {
                    let selected = i == self.display.selected;
                    let start = all_lines.len();

                    let marker = if selected { "▌ " } else { "  " };
                    let marker_style = Style::default().fg(theme::SELECT_CYAN);
                    let title_style = Style::default()
                        .fg(theme::SHELF_GOLD)
                        .add_modifier(Modifier::BOLD);

                    all_lines.push(vec![
                        (marker.to_string(), marker_style),
                        (book.title().to_string(), title_style),
                    ]);
                    all_lines.push(vec![
                        ("  ".to_string(), marker_style),
                        (format!("ID: {}", book.id), Style::default().fg(theme::INK_GRAY)),
                    ]);

                    for (label, value) in metadata_entries(book) {
                        if label == "Title" {
                            continue;
                        }
                        let value_span = match value {
                            MetadataValue::Link(url) => (
                                url,
                                Style::default()
                                    .fg(theme::LINK_BLUE)
                                    .add_modifier(Modifier::UNDERLINED),
                            ),
                            MetadataValue::Text(text) => {
                                // Pretty-printed values keep only their first line
                                let first = text.lines().next().unwrap_or("").to_string();
                                (first, Style::default().fg(theme::PAGE_WHITE))
                            }
                        };
                        all_lines.push(vec![
                            ("  ".to_string(), marker_style),
                            (format!("{label}: "), Style::default().fg(theme::LABEL_TAN)),
                            value_span,
                        ]);
                    }

                    all_lines.push(Vec::new());
                    if selected {
                        selected_range = (start, all_lines.len());
                    }
                }
            }
        }

        self.total_lines = all_lines.len();

        // Snap scroll so the selected card stays in view
        if self.follow_selection {
            self.follow_selection = false;
            self.list_scroll = snap_scroll(self.list_scroll, height, selected_range);
        }

        let (visible_start, visible_end) = list_window(self.list_scroll, height, self.total_lines);
        self.list_scroll = visible_start;

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.list) {
            buf.reset();
            let area = buf.area;

            for (i, spans) in all_lines[visible_start..visible_end].iter().enumerate() {
                let y = i as u16;
                if y >= area.height {
                    break;
                }
                let mut x = area.x + 1;
                for (text, style) in spans {
                    if x >= area.width {
                        break;
                    }
                    let remaining = (area.width - x) as usize;
                    let shown: String = text.chars().take(remaining).collect();
                    buf.set_string(x, y, &shown, *style);
                    x += shown.chars().count() as u16;
                }
            }
        }
    }

    /// Render the status bar
    fn render_status(&mut self) {
        let notice = self.display.notice.as_ref().map(|n| (n.text.clone(), n.kind));

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            buf.reset();
            let area = buf.area;

            if let Some((text, kind)) = notice {
                let color = match kind {
                    NoticeKind::Success => theme::SUCCESS_GREEN,
                    NoticeKind::Error => theme::ERROR_RED,
                };
                buf.set_string(area.x, area.y, format!(" {text}"), Style::default().fg(color));
                return;
            }

            let hints = " a add | d delete | Enter analyze | Up/Down select | Esc quit";
            buf.set_string(area.x, area.y, hints, Style::default().fg(theme::DIM_GRAY));
        }
    }

    /// Render modal layers
    fn render_modals(&mut self) {
        if self.add_modal.open {
            if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.add_modal) {
                buf.reset();
                self.add_modal.render(buf);
            }
        }
        if self.analysis_modal.is_open() {
            // Split borrows: take the buffer out of the compositor mutably
            // while the modal renders into it.
            let layer = self.layers.analysis_modal;
            let modal = &mut self.analysis_modal;
            if let Some(buf) = self.compositor.layer_buffer_mut(layer) {
                buf.reset();
                modal.render(buf);
            }
        }
    }
}

/// Visible line range for a top-anchored window
///
/// The list reads top to bottom; scroll 0 shows the first books. The start
/// is clamped so the window never runs past the end of the list.
fn list_window(scroll: usize, height: usize, total: usize) -> (usize, usize) {
    let start = scroll.min(total.saturating_sub(height));
    let end = (start + height).min(total);
    (start, end)
}

/// Scroll offset that keeps a line range fully in view
fn snap_scroll(scroll: usize, height: usize, range: (usize, usize)) -> usize {
    let (start, end) = range;
    if start < scroll {
        start
    } else if end > scroll + height {
        end.saturating_sub(height)
    } else {
        scroll
    }
}
