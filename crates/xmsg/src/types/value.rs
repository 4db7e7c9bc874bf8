use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Deserialize;

/// A runtime value that can be passed as a template parameter.
///
/// Scalars are rendered by plain and number tokens and select branches in
/// choice and map tokens. A `Map` carries decoration attributes for anchor
/// and link tokens (`href`, `class`, `style`, `title`).
///
/// # Example
///
/// ```
/// use xmsg::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let link = Value::attributes([("href", "example.com"), ("class", "nav")]);
///
/// assert_eq!(count.to_string(), "42");
/// assert_eq!(name.as_string(), Some("Alice"));
/// assert!(link.as_map().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean, rendered as `true` or `false`.
    Bool(bool),

    /// An integer number (used for plural selection).
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),

    /// A string-keyed mapping, used for decoration attributes.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Builds a `Map` value from string key/value pairs.
    pub fn attributes<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Get this value as a string, if it is one.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a map, if it is one.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Interprets the value as a number, parsing numeric strings.
    pub fn to_numeric(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(_) | Value::Map(_) => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

// From implementations for common types

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as i64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}
