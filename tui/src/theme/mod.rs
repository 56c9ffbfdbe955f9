//! Theme and Colors
//!
//! Gutenshelf's palette: warm paper tones for book cards, parchment accents
//! for headings, and muted grays for chrome.

use ratatui::style::Color;

// ============================================================================
// Library Palette
// ============================================================================

/// Book titles and section headings
pub const SHELF_GOLD: Color = Color::Rgb(222, 184, 96);

/// Book identifiers and secondary labels
pub const INK_GRAY: Color = Color::Rgb(140, 140, 140);

/// Metadata field labels
pub const LABEL_TAN: Color = Color::Rgb(200, 170, 130);

/// Metadata values
pub const PAGE_WHITE: Color = Color::Rgb(225, 225, 215);

/// External links (author webpages)
pub const LINK_BLUE: Color = Color::Rgb(120, 170, 255);

/// Selected card marker
pub const SELECT_CYAN: Color = Color::Rgb(110, 220, 220);

// ============================================================================
// UI Colors
// ============================================================================

/// Modal borders and separators
pub const BORDER_GRAY: Color = Color::Rgb(100, 100, 100);

/// Status bar and dim hints
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error text
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Success / confirmation text
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

/// Loading / in-progress text
pub const BUSY_BLUE: Color = Color::Rgb(150, 180, 255);
