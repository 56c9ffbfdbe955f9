//! Gutenshelf TUI - Terminal interface for a personal book library
//!
//! This crate provides a full-screen terminal UI over the remote library
//! service: a scrollable book list, an add-by-id modal, and an analysis
//! modal with a typewriter-style progressive reveal.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering with z-ordering for modal overlays
//! - **Display**: Book-list presentation state driven by backend messages
//! - **Modals**: Self-contained add-book and analysis state machines
//! - **Backend**: Spawned API calls reporting back over an mpsc channel
//!
//! The TUI is a thin client: all business logic lives in the remote service,
//! reached through `library-core`.

pub mod app;
pub mod backend;
pub mod compositor;
pub mod display;
pub mod modals;
pub mod theme;
pub mod widgets;

pub use app::App;
