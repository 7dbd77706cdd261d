//! Headless DOM - the creation context elements are mounted into.
//!
//! - [`Document`] - node arena, tree operations, listeners, dispatch
//! - [`TagPolicy`] - which tag names a document creates
//! - [`to_css_property`] - camelCase to kebab-case style names

mod document;
mod node;
mod style;
mod tags;

pub use document::{Document, DocumentConfig, EventHandler, ListenerId};
pub use style::to_css_property;
pub use tags::{HTML_TAGS, TagPolicy, is_custom_element_name, is_valid_tag_name};
