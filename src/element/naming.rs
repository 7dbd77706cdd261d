//! Named Output Mapper - rename default output streams.

use indexmap::IndexMap;

use crate::stream::Stream;
use crate::types::DomEvent;

/// Rename `defaults` through `table` (`default name -> output name`).
///
/// Names absent from the table keep their key. No value is dropped, except
/// when two entries end on the same key: the later one (in `defaults` order)
/// wins. Table entries for names not in `defaults` are ignored.
pub fn apply_naming<V>(
    defaults: IndexMap<String, V>,
    table: &IndexMap<String, String>,
) -> IndexMap<String, V> {
    for requested in table.keys() {
        if !defaults.contains_key(requested) {
            log::debug!("apply_naming: no default output named `{requested}`, entry ignored");
        }
    }

    let mut renamed = IndexMap::with_capacity(defaults.len());
    for (name, value) in defaults {
        let key = table.get(&name).cloned().unwrap_or(name);
        if renamed.contains_key(&key) {
            log::warn!("apply_naming: output `{key}` assigned twice, last one wins");
        }
        renamed.insert(key, value);
    }
    renamed
}

/// Output streams of a mounted element, keyed by (renamed) output name.
#[derive(Clone, Default)]
pub struct Outputs {
    streams: IndexMap<String, Stream<DomEvent>>,
}

impl Outputs {
    pub(crate) fn new(streams: IndexMap<String, Stream<DomEvent>>) -> Self {
        Self { streams }
    }

    pub fn get(&self, name: &str) -> Option<&Stream<DomEvent>> {
        self.streams.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.streams.contains_key(name)
    }

    /// Output names in element event order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.streams.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Stream<DomEvent>)> {
        self.streams.iter().map(|(k, v)| (k.as_str(), v))
    }
}
