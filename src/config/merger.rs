//! Property Merger - combine a default config with an override config.
//!
//! Merging is driven by [`MERGE_POLICY`], one row per key with special
//! treatment. Keys not in the table are shallow-overridden. Making another
//! key deep-mergeable is a one-row change.
//!
//! ```text
//! style        DeepObject   override wins per CSS property, base-only kept
//! classToggle  DeepObject   override wins per class
//! class        Union        base tokens then override tokens, de-duplicated
//! className    Union        same as class
//! attributes   Shallow      override replaces the whole map
//! name         Shallow      override replaces the whole table
//! (other)      Shallow      override replaces the value
//! ```

use indexmap::{IndexMap, IndexSet};

use super::element_config::{
    ATTRIBUTES, CLASS, CLASS_NAME, CLASS_TOGGLE, ElementConfig, NAME, STYLE,
};
use super::value::{ConfigValue, ValueShape};
use crate::error::{DomError, Result};

/// How two values for the same key combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Override replaces base.
    Shallow,
    /// Entry-wise merge of two maps; override wins per entry.
    DeepObject,
    /// Token union, base order first.
    Union,
}

/// Merge rule and accepted value shapes for one key.
#[derive(Debug, Clone, Copy)]
pub struct KeyPolicy {
    pub key: &'static str,
    pub strategy: MergeStrategy,
    pub accepts: &'static [ValueShape],
    pub expected: &'static str,
}

pub const MERGE_POLICY: &[KeyPolicy] = &[
    KeyPolicy {
        key: STYLE,
        strategy: MergeStrategy::DeepObject,
        accepts: &[ValueShape::Map],
        expected: "map",
    },
    KeyPolicy {
        key: CLASS_TOGGLE,
        strategy: MergeStrategy::DeepObject,
        accepts: &[ValueShape::Flags],
        expected: "flags",
    },
    KeyPolicy {
        key: CLASS,
        strategy: MergeStrategy::Union,
        accepts: &[ValueShape::Text, ValueShape::Tokens],
        expected: "text or tokens",
    },
    KeyPolicy {
        key: CLASS_NAME,
        strategy: MergeStrategy::Union,
        accepts: &[ValueShape::Text, ValueShape::Tokens],
        expected: "text or tokens",
    },
    KeyPolicy {
        key: ATTRIBUTES,
        strategy: MergeStrategy::Shallow,
        accepts: &[ValueShape::Map],
        expected: "map",
    },
    KeyPolicy {
        key: NAME,
        strategy: MergeStrategy::Shallow,
        accepts: &[ValueShape::Map],
        expected: "map",
    },
];

/// Policy row for a key, if it has one.
pub fn policy_for(key: &str) -> Option<&'static KeyPolicy> {
    MERGE_POLICY.iter().find(|policy| policy.key == key)
}

/// Merge strategy for a key (`Shallow` when the key has no policy row).
pub fn strategy_for(key: &str) -> MergeStrategy {
    policy_for(key).map_or(MergeStrategy::Shallow, |policy| policy.strategy)
}

/// Check every policy-covered key holds an accepted shape.
pub fn validate(config: &ElementConfig) -> Result<()> {
    for (key, value) in config.iter() {
        if let Some(policy) = policy_for(key) {
            let shape = value.shape();
            if !policy.accepts.contains(&shape) {
                return Err(DomError::ConfigMerge {
                    key: key.to_string(),
                    expected: policy.expected,
                    found: shape.name(),
                });
            }
        }
    }
    Ok(())
}

/// Merge `over` into `base`, returning the resolved config.
///
/// Pure: neither input is modified. Keys present on only one side are copied
/// unchanged, so `merge(cfg, {}) == cfg` and `merge({}, cfg) == cfg`.
pub fn merge(base: &ElementConfig, over: &ElementConfig) -> Result<ElementConfig> {
    validate(base)?;
    validate(over)?;

    let mut resolved = base.clone();
    let entries = resolved.entries_mut();
    for (key, value) in over.iter() {
        match entries.get_mut(key) {
            None => {
                entries.insert(key.to_string(), value.clone());
            }
            Some(existing) => match strategy_for(key) {
                MergeStrategy::Shallow => *existing = value.clone(),
                MergeStrategy::DeepObject => deep_merge(existing, value),
                MergeStrategy::Union => *existing = union(existing, value),
            },
        }
    }
    Ok(resolved)
}

fn deep_merge(existing: &mut ConfigValue, over: &ConfigValue) {
    match (existing, over) {
        (ConfigValue::Map(base), ConfigValue::Map(over)) => {
            for (k, v) in over {
                base.insert(k.clone(), v.clone());
            }
        }
        (ConfigValue::Flags(base), ConfigValue::Flags(over)) => {
            for (k, v) in over {
                base.insert(k.clone(), *v);
            }
        }
        (existing, over) => *existing = over.clone(),
    }
}

fn union(existing: &ConfigValue, over: &ConfigValue) -> ConfigValue {
    let tokens: IndexSet<String> = existing.tokens().into_iter().chain(over.tokens()).collect();
    ConfigValue::Tokens(tokens.into_iter().collect())
}

/// Final class list: selector classes, then config tokens (`class`, then
/// `className` and `attributes.class`), de-duplicated.
pub fn class_union<'a>(
    selector_classes: impl IntoIterator<Item = &'a str>,
    config: &ElementConfig,
) -> Vec<String> {
    let mut classes: IndexSet<String> = selector_classes.into_iter().map(str::to_string).collect();
    classes.extend(config.class_tokens());
    classes.extend(config.class_alias_tokens());
    classes.into_iter().collect()
}

/// Style map of a resolved config, for callers that want a lookup table.
pub fn style_map(config: &ElementConfig) -> IndexMap<String, String> {
    config
        .style_entries()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
