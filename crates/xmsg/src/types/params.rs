use std::collections::HashMap;

use serde::Deserialize;

use super::Value;
use crate::parser::Index;

/// The runtime values a template reads from.
///
/// Decimal indices (`{0}`) read from a positional list; `:name` indices
/// (`{:name}`) read from a named map. A positional index can also be read
/// from a named map, where it is looked up by its decimal string.
///
/// Deserializes from a JSON array (positional) or object (named).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Params {
    Positional(Vec<Value>),
    Named(HashMap<String, Value>),
}

/// The outcome of looking up an index in a parameter source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Value),
    Missing,
    /// A `:name` index was read from a positional list.
    WrongSourceKind,
}

impl Params {
    /// An empty positional source.
    pub fn none() -> Self {
        Params::Positional(Vec::new())
    }

    /// Look up the value for an index.
    pub fn lookup(&self, index: &Index) -> Lookup<'_> {
        let found = match (self, index) {
            (Params::Positional(values), Index::Position(n)) => values.get(*n),
            (Params::Named(values), Index::Named(name)) => values.get(name),
            (Params::Named(values), Index::Position(n)) => values.get(&n.to_string()),
            (Params::Positional(_), Index::Named(_)) => return Lookup::WrongSourceKind,
        };
        found.map_or(Lookup::Missing, Lookup::Found)
    }

    pub fn len(&self) -> usize {
        match self {
            Params::Positional(values) => values.len(),
            Params::Named(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Params {
    fn default() -> Self {
        Params::none()
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Params::Positional(values)
    }
}

impl From<HashMap<String, Value>> for Params {
    fn from(values: HashMap<String, Value>) -> Self {
        Params::Named(values)
    }
}

impl FromIterator<Value> for Params {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Params::Positional(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Params::Named(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
