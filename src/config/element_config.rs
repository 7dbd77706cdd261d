//! ElementConfig - the partial property set attached to a factory or an invocation.
//!
//! A config is an ordered map from key to [`ConfigValue`]. Every key is
//! optional. The reserved keys below get dedicated treatment at mount time,
//! everything else is passed through to the element as a DOM property.
//!
//! | key           | shape             | applied as                       |
//! |---------------|-------------------|----------------------------------|
//! | `style`       | map               | one inline style per entry       |
//! | `class`       | text or tokens    | added to the class list          |
//! | `classToggle` | flags             | class added (true) / removed     |
//! | `attributes`  | map               | `setAttribute` per entry         |
//! | `name`        | map               | output renaming table            |
//!
//! The DOM spellings of the class list, a `className` key and a `class` entry
//! under `attributes`, join the same class union instead of replacing it.
//!
//! # Example
//!
//! ```ignore
//! let config = ElementConfig::new()
//!     .style("backgroundColor", "red")
//!     .class("foo bar")
//!     .attr("title", "Greeting")
//!     .name("click", "greet");
//! ```

use indexmap::IndexMap;

use super::value::ConfigValue;

pub const STYLE: &str = "style";
pub const CLASS: &str = "class";
/// DOM property spelling of `class`.
pub const CLASS_NAME: &str = "className";
pub const CLASS_TOGGLE: &str = "classToggle";
pub const ATTRIBUTES: &str = "attributes";
pub const NAME: &str = "name";

/// Keys with dedicated mount-time handling. Never applied as DOM properties.
pub const RESERVED_KEYS: &[&str] = &[STYLE, CLASS, CLASS_TOGGLE, ATTRIBUTES, NAME];

/// Partial element configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementConfig {
    entries: IndexMap<String, ConfigValue>,
}

impl ElementConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set one inline style property (`backgroundColor` or `background-color`).
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_into_map(STYLE, property.into(), value.into());
        self
    }

    /// Add whitespace-separated static classes.
    pub fn class(mut self, classes: &str) -> Self {
        let mut tokens = self.entries.get(CLASS).map(ConfigValue::tokens).unwrap_or_default();
        for token in classes.split_whitespace() {
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }
        self.entries.insert(CLASS.to_string(), ConfigValue::Tokens(tokens));
        self
    }

    /// Force a class on or off after static classes are applied.
    pub fn class_toggle(mut self, class: impl Into<String>, on: bool) -> Self {
        let slot = self
            .entries
            .entry(CLASS_TOGGLE.to_string())
            .or_insert_with(|| ConfigValue::Flags(IndexMap::new()));
        if !matches!(slot, ConfigValue::Flags(_)) {
            *slot = ConfigValue::Flags(IndexMap::new());
        }
        if let ConfigValue::Flags(flags) = slot {
            flags.insert(class.into(), on);
        }
        self
    }

    /// Set an HTML attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_into_map(ATTRIBUTES, name.into(), value.into());
        self
    }

    /// Rename a default output stream (`click` -> `output`).
    pub fn name(mut self, default_name: impl Into<String>, output: impl Into<String>) -> Self {
        self.insert_into_map(NAME, default_name.into(), output.into());
        self
    }

    /// Set a DOM property passthrough (`value`, `disabled`, `href`, ...).
    pub fn prop(self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value)
    }

    /// Set a raw key. No shape checking happens here; the merger rejects
    /// mismatched shapes for reserved keys.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    fn insert_into_map(&mut self, key: &str, name: String, value: String) {
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| ConfigValue::Map(IndexMap::new()));
        if !matches!(slot, ConfigValue::Map(_)) {
            *slot = ConfigValue::Map(IndexMap::new());
        }
        if let ConfigValue::Map(map) = slot {
            map.insert(name, value);
        }
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn entries_mut(&mut self) -> &mut IndexMap<String, ConfigValue> {
        &mut self.entries
    }

    /// Inline style entries in insertion order.
    pub fn style_entries(&self) -> Vec<(&str, &str)> {
        self.map_pairs(STYLE)
    }

    /// Attribute entries in insertion order.
    pub fn attribute_entries(&self) -> Vec<(&str, &str)> {
        self.map_pairs(ATTRIBUTES)
    }

    /// Output renaming table (`default name -> output name`).
    pub fn naming(&self) -> Option<&IndexMap<String, String>> {
        match self.entries.get(NAME) {
            Some(ConfigValue::Map(map)) => Some(map),
            _ => None,
        }
    }

    /// Static class tokens from the `class` key.
    pub fn class_tokens(&self) -> Vec<String> {
        self.entries.get(CLASS).map(ConfigValue::tokens).unwrap_or_default()
    }

    /// Class tokens given through `className` or an `attributes.class` entry.
    pub fn class_alias_tokens(&self) -> Vec<String> {
        let mut tokens = self
            .entries
            .get(CLASS_NAME)
            .map(ConfigValue::tokens)
            .unwrap_or_default();
        if let Some(ConfigValue::Map(attributes)) = self.entries.get(ATTRIBUTES) {
            if let Some(classes) = attributes.get(CLASS) {
                tokens.extend(classes.split_whitespace().map(str::to_string));
            }
        }
        tokens
    }

    /// `classToggle` entries in insertion order.
    pub fn class_toggles(&self) -> Vec<(&str, bool)> {
        match self.entries.get(CLASS_TOGGLE) {
            Some(ConfigValue::Flags(flags)) => {
                flags.iter().map(|(k, v)| (k.as_str(), *v)).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Non-reserved keys, applied as DOM properties.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.iter().filter(|(key, _)| !RESERVED_KEYS.contains(key))
    }

    fn map_pairs(&self, key: &str) -> Vec<(&str, &str)> {
        match self.entries.get(key) {
            Some(ConfigValue::Map(map)) => {
                map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
            }
            _ => Vec::new(),
        }
    }
}
