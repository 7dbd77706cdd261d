//! Selector Parser - `tag.class#id` strings to structured selectors.
//!
//! Grammar:
//!
//! ```text
//! selector := tag ( "." name | "#" name )*
//! tag      := [A-Za-z] [A-Za-z0-9-]*
//! name     := [A-Za-z0-9_-]+
//! ```
//!
//! Class and id tokens may interleave in any order. Classes accumulate left to
//! right (duplicates ignored). If several `#id` tokens appear, the last wins.
//! The tag name is lower-cased; class and id names keep their case.
//!
//! Parsing is purely syntactic and never touches a document.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;

use crate::error::{DomError, Result};

/// A parsed element selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag_name: String,
    id: Option<String>,
    class_names: IndexSet<String>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self> {
        let bytes = input.as_bytes();

        // Tag name
        let tag_end = scan(bytes, 0, is_tag_byte);
        if tag_end == 0 || !bytes[0].is_ascii_alphabetic() {
            return Err(invalid(input, 0, "expected a tag name"));
        }
        let tag_name = input[..tag_end].to_ascii_lowercase();

        let mut id = None;
        let mut class_names = IndexSet::new();
        let mut pos = tag_end;

        while pos < bytes.len() {
            let marker = bytes[pos];
            if marker != b'.' && marker != b'#' {
                return Err(invalid(
                    input,
                    pos,
                    &format!("unexpected character `{}`", input[pos..].chars().next().unwrap_or('?')),
                ));
            }
            let start = pos + 1;
            let end = scan(bytes, start, is_name_byte);
            if end == start {
                let what = if marker == b'.' { "class" } else { "id" };
                return Err(invalid(input, pos, &format!("empty {what} name")));
            }
            let name = &input[start..end];
            if marker == b'.' {
                class_names.insert(name.to_string());
            } else if let Some(previous) = id.replace(name.to_string()) {
                log::debug!("selector `{input}`: id `{previous}` replaced by `{name}`");
            }
            pos = end;
        }

        Ok(Self { tag_name, id, class_names })
    }

    /// Selector for a bare tag. The name must already be a valid, lower-case tag.
    pub(crate) fn from_tag(tag_name: &'static str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            id: None,
            class_names: IndexSet::new(),
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Class names in first-seen order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.class_names.iter().map(String::as_str)
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class_names.contains(name)
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Canonical form: `tag.class1.class2#id`.
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag_name)?;
        for class in &self.class_names {
            write!(f, ".{class}")?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        Ok(())
    }
}

fn scan(bytes: &[u8], start: usize, accept: fn(u8) -> bool) -> usize {
    let mut end = start;
    while end < bytes.len() && accept(bytes[end]) {
        end += 1;
    }
    end
}

fn is_tag_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn invalid(selector: &str, position: usize, reason: &str) -> DomError {
    DomError::InvalidSelector {
        selector: selector.to_string(),
        position,
        reason: reason.to_string(),
    }
}
