use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A scalar field value held by an [`Entity`](crate::Entity).
///
/// Mappings are stored in a `BTreeMap`, so iterating (and rendering) a mapping
/// always yields its keys in sorted order regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ScalarValue>),
    Map(BTreeMap<String, ScalarValue>),
}

impl ScalarValue {
    /// An empty mapping, e.g. for `demographics: {}`.
    #[must_use]
    pub fn empty_map() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// Short lowercase name of the value's shape, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the first non-finite float found inside this value, if any,
    /// together with the relative path to it (`""` for the value itself).
    pub fn find_non_finite(&self) -> Option<(String, f64)> {
        match self {
            Self::Float(f) if !f.is_finite() => Some((String::new(), *f)),
            Self::List(items) => items.iter().enumerate().find_map(|(i, item)| {
                item.find_non_finite()
                    .map(|(rest, f)| (format!("[{i}]{rest}"), f))
            }),
            Self::Map(entries) => entries.iter().find_map(|(key, item)| {
                item.find_non_finite()
                    .map(|(rest, f)| (format!(".{key}{rest}"), f))
            }),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "<{}>", self.kind_name()),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for ScalarValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<ScalarValue>> for ScalarValue {
    fn from(v: Vec<ScalarValue>) -> Self {
        Self::List(v)
    }
}

impl From<BTreeMap<String, ScalarValue>> for ScalarValue {
    fn from(v: BTreeMap<String, ScalarValue>) -> Self {
        Self::Map(v)
    }
}
