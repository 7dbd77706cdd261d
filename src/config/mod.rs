//! Element configuration - partial property sets and how they merge.
//!
//! - [`ElementConfig`] - ordered key/value config with a builder API
//! - [`ConfigValue`] - the value shapes a key can hold
//! - [`merge`] - table-driven combination of default and override configs

mod element_config;
mod merger;
mod value;

pub use element_config::*;
pub use merger::*;
pub use value::*;
