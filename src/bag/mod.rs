//! The parameter bag container and its recursive path operations.

use crate::error::{Error, Result};
use crate::types::{Map, Options, Separator, Value};
use std::fmt;

/// Key-value parameter container with flat and multi-level addressing.
///
/// In multi-level mode, keys containing the configured separator address
/// nested maps segment by segment. Keys are case-folded on every insertion
/// and lookup, so `set("Foo", ..)` and `get("FOO")` refer to the same entry.
#[derive(Clone, Default)]
pub struct ParameterBag {
    data: Map,
    multi_level: bool,
    separator: Separator,
}

/// A source accepted by [`ParameterBag::merge`].
///
/// Only maps can be merged; a non-map [`Value`] is carried through so that
/// `merge` can reject it with a descriptive error.
#[derive(Debug, Clone)]
pub enum MergeSource {
    Map(Map),
    Value(Value),
}

impl From<Map> for MergeSource {
    fn from(map: Map) -> Self {
        MergeSource::Map(map)
    }
}

impl From<Value> for MergeSource {
    fn from(value: Value) -> Self {
        match value {
            Value::Map(map) => MergeSource::Map(map),
            other => MergeSource::Value(other),
        }
    }
}

impl From<ParameterBag> for MergeSource {
    fn from(bag: ParameterBag) -> Self {
        MergeSource::Map(bag.data)
    }
}

impl From<&ParameterBag> for MergeSource {
    fn from(bag: &ParameterBag) -> Self {
        MergeSource::Map(bag.all().clone())
    }
}

impl ParameterBag {
    /// Creates a bag from an initial map and options.
    ///
    /// When `options.multi_level` is unset, the mode is inferred from the
    /// data: multi-level iff any top-level value is itself a map. The data is
    /// normalized once with the inferred mode and the default separator;
    /// options applied afterwards do not trigger re-normalization.
    pub fn new(data: Map, options: Options) -> Self {
        let mut bag = Self::default();
        if !data.is_empty() {
            bag.multi_level = data.values().any(Value::is_map);
            bag.data = normalize_map(data, bag.multi_level, bag.separator.as_str());
        }
        bag.apply_options(options);
        bag
    }

    /// Whether separator-bearing keys are treated as paths.
    pub fn multi_level(&self) -> bool {
        self.multi_level
    }

    /// The configured path separator.
    pub fn separator(&self) -> &str {
        self.separator.as_str()
    }

    fn apply_options(&mut self, options: Options) {
        if let Some(multi_level) = options.multi_level {
            self.multi_level = multi_level;
        }
        if let Some(separator) = options.separator {
            // An empty separator is ignored, keeping the current one.
            if let Ok(separator) = Separator::try_from(separator) {
                self.separator = separator;
            }
        }
    }

    fn normalize(&self, key: &str) -> String {
        normalize_key(key, self.multi_level, self.separator.as_str())
    }
}

/// Lookup operations.
impl ParameterBag {
    /// Returns whether `key` resolves to a stored value.
    ///
    /// Any stored value counts as present, including `Value::Null` and empty
    /// maps.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Resolves `key` to a stored value.
    ///
    /// In multi-level mode a key containing the separator is walked segment
    /// by segment; a missing segment or a non-map intermediate yields `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let key = self.normalize(key);
        if self.multi_level && key.contains(self.separator.as_str()) {
            get_path(&self.data, &key, self.separator.as_str())
        } else {
            self.data.get(&key)
        }
    }
}

/// Write operations.
impl ParameterBag {
    /// Stores `value` under `key`, overwriting any prior value.
    ///
    /// Map values are normalized recursively before storage. In multi-level
    /// mode, missing intermediate maps along the path are created, and a
    /// non-map intermediate is replaced by a map.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let key = self.normalize(key);
        let value = match value.into() {
            Value::Map(map) => {
                Value::Map(normalize_map(map, self.multi_level, self.separator.as_str()))
            }
            other => other,
        };
        if self.multi_level && key.contains(self.separator.as_str()) {
            set_path(&mut self.data, &key, self.separator.as_str(), value);
        } else {
            self.data.insert(key, value);
        }
        self
    }

    /// Removes one or more keys. Absent keys are silently skipped.
    ///
    /// Removing a nested leaf does not prune intermediate maps that become
    /// empty; they remain reachable as empty maps.
    pub fn remove<I, K>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            let key = self.normalize(key.as_ref());
            if self.multi_level && key.contains(self.separator.as_str()) {
                remove_path(&mut self.data, &key, self.separator.as_str());
            } else {
                self.data.remove(&key);
            }
        }
        self
    }

    /// Merges one or more sources into the bag, later sources winning on
    /// top-level key collisions. Existing data has the lowest priority.
    ///
    /// The union is shallow: a nested map is replaced wholesale by a later
    /// source's value for the same top-level key. All sources are validated
    /// and normalized before any state changes, so an invalid source leaves
    /// the bag untouched.
    pub fn merge<I>(&mut self, sources: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = MergeSource>,
    {
        let mut normalized = Vec::new();
        for source in sources {
            let map = match source {
                MergeSource::Map(map) => map,
                MergeSource::Value(Value::Map(map)) => map,
                MergeSource::Value(other) => return Err(Error::InvalidArgument(other.kind())),
            };
            if map.is_empty() {
                continue;
            }
            normalized.push(normalize_map(map, self.multi_level, self.separator.as_str()));
        }
        for map in normalized {
            self.data.extend(map);
        }
        Ok(self)
    }
}

/// Lifecycle operations.
impl ParameterBag {
    /// The full current contents. Mutation goes through `set`/`remove`/`merge`.
    pub fn all(&self) -> &Map {
        &self.data
    }

    /// Empties the data, keeping mode and separator.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Empties the data and resets the configuration to flat mode with the
    /// default separator.
    pub fn close(&mut self) {
        self.data.clear();
        self.multi_level = false;
        self.separator = Separator::default();
    }
}

impl fmt::Debug for ParameterBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterBag")
            .field("multi_level", &self.multi_level)
            .field("separator", &self.separator.as_str())
            .field("data", &self.data)
            .finish()
    }
}

/// Lower-cases `key`; in multi-level mode also strips leading and trailing
/// separator occurrences.
fn normalize_key(key: &str, multi_level: bool, separator: &str) -> String {
    let lower = key.to_lowercase();
    if multi_level {
        trim_separator(&lower, separator).to_owned()
    } else {
        lower
    }
}

/// Normalizes every key at every depth of `map`.
fn normalize_map(map: Map, multi_level: bool, separator: &str) -> Map {
    map.into_iter()
        .map(|(key, value)| {
            let key = normalize_key(&key, multi_level, separator);
            let value = match value {
                Value::Map(inner) => Value::Map(normalize_map(inner, multi_level, separator)),
                other => other,
            };
            (key, value)
        })
        .collect()
}

/// Strips repeated occurrences of `separator` from both ends of `key`.
///
/// The separator is matched as a whole string, not as a character set.
fn trim_separator<'a>(mut key: &'a str, separator: &str) -> &'a str {
    while let Some(rest) = key.strip_prefix(separator) {
        key = rest;
    }
    while let Some(rest) = key.strip_suffix(separator) {
        key = rest;
    }
    key
}

fn get_path<'a>(map: &'a Map, key: &str, separator: &str) -> Option<&'a Value> {
    match key.split_once(separator) {
        Some((id, rest)) => match map.get(id)? {
            Value::Map(child) => get_path(child, rest, separator),
            _ => None,
        },
        None => map.get(key),
    }
}

fn set_path(map: &mut Map, key: &str, separator: &str, value: Value) {
    let Some((id, rest)) = key.split_once(separator) else {
        map.insert(key.to_owned(), value);
        return;
    };
    match map.get_mut(id) {
        Some(Value::Map(child)) => set_path(child, rest, separator, value),
        // Absent or non-map intermediate: materialize a fresh map.
        _ => {
            let mut child = Map::new();
            set_path(&mut child, rest, separator, value);
            map.insert(id.to_owned(), Value::Map(child));
        }
    }
}

fn remove_path(map: &mut Map, key: &str, separator: &str) {
    match key.split_once(separator) {
        Some((id, rest)) => {
            // Absent or non-map intermediates make this a no-op; emptied
            // children are intentionally left in place.
            if let Some(Value::Map(child)) = map.get_mut(id) {
                remove_path(child, rest, separator);
            }
        }
        None => {
            map.remove(key);
        }
    }
}
