//! Reusable Widgets

mod section_view;

pub use section_view::{SectionList, SectionListState};
