//! Translation tree values.
//!
//! A translation document is a nested JSON object whose leaves are strings,
//! arrays of strings, or (rarely) plain scalars. `TranslationValue` mirrors
//! that shape as an explicit sum type so every consumer branches with an
//! exhaustive `match`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A nested mapping level of a translation tree, in document order.
pub type TranslationMap = IndexMap<String, TranslationValue>;

/// Non-text leaf values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Null,
}

/// Any value found in a translation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationValue {
    Text(String),
    List(Vec<String>),
    Map(TranslationMap),
    Scalar(Scalar),
}

/// The structural kind of a [`TranslationValue`], used to compare trees
/// across languages without comparing their content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueShape {
    Text,
    List,
    Map,
    Scalar,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueShape::Text => "text",
            ValueShape::List => "list",
            ValueShape::Map => "map",
            ValueShape::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

impl TranslationValue {
    pub fn shape(&self) -> ValueShape {
        match self {
            TranslationValue::Text(_) => ValueShape::Text,
            TranslationValue::List(_) => ValueShape::List,
            TranslationValue::Map(_) => ValueShape::Map,
            TranslationValue::Scalar(_) => ValueShape::Scalar,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TranslationValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            TranslationValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&TranslationMap> {
        match self {
            TranslationValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_list(self) -> Vec<String> {
        match self {
            TranslationValue::List(items) => items,
            _ => Vec::new(),
        }
    }

    /// Walk `segments` from this value, one map level per segment.
    ///
    /// Returns `None` as soon as a segment is missing or the current value
    /// is not a map.
    pub fn lookup<'a, I>(&self, segments: I) -> Option<&TranslationValue>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self;
        for segment in segments {
            current = match current {
                TranslationValue::Map(map) => map.get(segment)?,
                TranslationValue::Text(_)
                | TranslationValue::List(_)
                | TranslationValue::Scalar(_) => return None,
            };
        }
        Some(current)
    }

    /// Convenience wrapper around [`lookup`](Self::lookup) for a dotted path.
    pub fn lookup_path(&self, path: &str) -> Option<&TranslationValue> {
        self.lookup(path.split('.'))
    }

    /// Collect every leaf path (dotted) under this value together with its
    /// shape. Maps are descended into; empty maps are reported as leaves.
    pub fn leaf_paths(&self) -> Vec<(String, ValueShape)> {
        let mut out = Vec::new();
        collect_leaves(self, String::new(), &mut out);
        out
    }
}

fn collect_leaves(value: &TranslationValue, prefix: String, out: &mut Vec<(String, ValueShape)>) {
    match value {
        TranslationValue::Map(map) if !map.is_empty() => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_leaves(child, path, out);
            }
        }
        other => out.push((prefix, other.shape())),
    }
}

impl From<&str> for TranslationValue {
    fn from(text: &str) -> Self {
        TranslationValue::Text(text.to_string())
    }
}

impl From<String> for TranslationValue {
    fn from(text: String) -> Self {
        TranslationValue::Text(text)
    }
}

impl From<Vec<String>> for TranslationValue {
    fn from(items: Vec<String>) -> Self {
        TranslationValue::List(items)
    }
}

impl fmt::Display for TranslationValue {
    /// Text renders as-is, lists join with ", ", maps and scalars render as JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationValue::Text(text) => f.write_str(text),
            TranslationValue::List(items) => f.write_str(&items.join(", ")),
            TranslationValue::Map(_) | TranslationValue::Scalar(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}
