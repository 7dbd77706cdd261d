//! Error type shared by the selector parser, the config merger and the mount pipeline.
//!
//! Every error is deterministic: retrying the same call with the same input
//! reproduces it, so nothing here is retried internally.

use thiserror::Error;

pub const ERROR_INVALID_SELECTOR: &str = "invalid_selector";
pub const ERROR_ELEMENT_CREATION: &str = "element_creation";
pub const ERROR_CONFIG_MERGE: &str = "config_merge";

/// Errors raised while defining, invoking or mounting an element.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Malformed selector string. Raised at factory definition time.
    #[error("invalid selector `{selector}` at byte {position}: {reason}")]
    InvalidSelector {
        selector: String,
        position: usize,
        reason: String,
    },

    /// The document refused to create an element. Raised at mount time.
    #[error("cannot create element `{tag}`: {reason}")]
    ElementCreation { tag: String, reason: String },

    /// A config key holds a value of the wrong shape (e.g. `style` as text).
    #[error("invalid config key `{key}`: expected {expected}, found {found}")]
    ConfigMerge {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl DomError {
    /// Machine-readable code, stable across message wording changes.
    pub fn stable_code(&self) -> &'static str {
        match self {
            Self::InvalidSelector { .. } => ERROR_INVALID_SELECTOR,
            Self::ElementCreation { .. } => ERROR_ELEMENT_CREATION,
            Self::ConfigMerge { .. } => ERROR_CONFIG_MERGE,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DomError>;
