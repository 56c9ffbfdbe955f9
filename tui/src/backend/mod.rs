//! Backend Integration
//!
//! Communication with the remote library service. API calls are spawned
//! onto the runtime and report back as [`LibraryMessage`]s over a channel,
//! which the app drains once per frame.

mod client;
mod messages;

pub use client::LibraryHandle;
pub use messages::LibraryMessage;
