//! Modal Overlays
//!
//! Self-contained state machines for the add-book form and the analysis
//! view. Each modal owns its input state and renders into a compositor
//! layer; the app shows and hides the layers.

mod add_book;
mod analysis;
mod reveal;

pub use add_book::AddBookModal;
pub use analysis::{AnalysisModal, AnalysisPhase};
pub use reveal::Revealer;
