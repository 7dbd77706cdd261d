//! Config values - the loosely-shaped payload of an [`ElementConfig`](super::ElementConfig) key.

use indexmap::IndexMap;

/// A single config value.
///
/// Keys accept different shapes (`style` wants a [`Map`](ConfigValue::Map),
/// `class` wants text or tokens). The merger checks shapes against its
/// policy table before combining anything.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Plain text (`"foo bar"`, `"/home"`).
    Text(String),
    /// Boolean property (`disabled`, `checked`).
    Bool(bool),
    /// Numeric property (`tabIndex`, `value` of a range input).
    Number(f64),
    /// Ordered token list (class names).
    Tokens(Vec<String>),
    /// Name to text mapping (`style`, `attributes`, `name`).
    Map(IndexMap<String, String>),
    /// Name to boolean mapping (`classToggle`).
    Flags(IndexMap<String, bool>),
}

/// Shape tag of a [`ConfigValue`], used in policy checks and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Text,
    Bool,
    Number,
    Tokens,
    Map,
    Flags,
}

impl ValueShape {
    pub fn name(self) -> &'static str {
        match self {
            ValueShape::Text => "text",
            ValueShape::Bool => "bool",
            ValueShape::Number => "number",
            ValueShape::Tokens => "tokens",
            ValueShape::Map => "map",
            ValueShape::Flags => "flags",
        }
    }
}

impl ConfigValue {
    pub fn shape(&self) -> ValueShape {
        match self {
            ConfigValue::Text(_) => ValueShape::Text,
            ConfigValue::Bool(_) => ValueShape::Bool,
            ConfigValue::Number(_) => ValueShape::Number,
            ConfigValue::Tokens(_) => ValueShape::Tokens,
            ConfigValue::Map(_) => ValueShape::Map,
            ConfigValue::Flags(_) => ValueShape::Flags,
        }
    }

    /// Text rendering for scalar values, as a DOM property would stringify them.
    ///
    /// Returns `None` for the structured shapes.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ConfigValue::Text(s) => Some(s.clone()),
            ConfigValue::Bool(b) => Some(b.to_string()),
            ConfigValue::Number(n) => Some(format_number(*n)),
            ConfigValue::Tokens(tokens) => Some(tokens.join(" ")),
            ConfigValue::Map(_) | ConfigValue::Flags(_) => None,
        }
    }

    /// Whitespace-separated tokens of a `Text` or `Tokens` value.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            ConfigValue::Text(s) => s.split_whitespace().map(str::to_string).collect(),
            ConfigValue::Tokens(tokens) => tokens
                .iter()
                .flat_map(|t| t.split_whitespace())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Integral numbers print without a fractional part (`3`, not `3.0`).
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Number(f64::from(value))
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(value: Vec<String>) -> Self {
        ConfigValue::Tokens(value)
    }
}

impl From<IndexMap<String, String>> for ConfigValue {
    fn from(value: IndexMap<String, String>) -> Self {
        ConfigValue::Map(value)
    }
}

impl From<IndexMap<String, bool>> for ConfigValue {
    fn from(value: IndexMap<String, bool>) -> Self {
        ConfigValue::Flags(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_split_whitespace() {
        let v = ConfigValue::from("foo  bar\tbaz");
        assert_eq!(v.tokens(), vec!["foo", "bar", "baz"]);

        let v = ConfigValue::Tokens(vec!["a b".to_string(), "c".to_string()]);
        assert_eq!(v.tokens(), vec!["a", "b", "c"]);

        assert!(ConfigValue::Bool(true).tokens().is_empty());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(ConfigValue::from(3).as_text(), Some("3".to_string()));
        assert_eq!(ConfigValue::from(0.5).as_text(), Some("0.5".to_string()));
        assert_eq!(ConfigValue::from(true).as_text(), Some("true".to_string()));
        assert_eq!(ConfigValue::Map(IndexMap::new()).as_text(), None);
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(ConfigValue::from("x").shape().name(), "text");
        assert_eq!(ConfigValue::Flags(IndexMap::new()).shape().name(), "flags");
    }
}
