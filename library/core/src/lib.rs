//! Library Core - Headless client layer for Gutenshelf
//!
//! This crate talks to the remote book-library service and owns the wire
//! model, completely independent of any UI framework. It can drive a TUI,
//! web UI, or run headless for testing.
//!
//! # Key Types
//!
//! - [`LibraryClient`]: the four remote operations (list, add, delete, analyze)
//! - [`Book`]: a library entry (remote-assigned id + metadata mapping)
//! - [`AnalysisSection`]: a titled fragment of an analysis, produced by
//!   [`sectionize`]
//! - [`ApiError`]: transport failures surfaced to the caller
//!
//! All business logic (book storage, metadata extraction, analysis
//! generation) lives in the remote service. This crate is a pure
//! request/response client: no retries, no caching, no persistence.

pub mod analysis;
pub mod book;
pub mod client;
pub mod error;

pub use analysis::{sectionize, AnalysisSection};
pub use book::Book;
pub use client::{ClientConfig, LibraryClient};
pub use error::ApiError;
