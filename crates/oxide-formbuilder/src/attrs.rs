//! HTML attribute values and ordered attribute bags.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single attribute value: either a scalar string or a list of tokens.
///
/// Lists are rendered space-joined, which is what `class`-like attributes
/// expect. JSON numbers deserialize into their string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "RawAttrValue")]
pub enum AttrValue {
    /// A plain string value.
    Single(String),
    /// A list of tokens.
    List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAttrValue {
    Single(String),
    Number(serde_json::Number),
    List(Vec<String>),
}

impl From<RawAttrValue> for AttrValue {
    fn from(raw: RawAttrValue) -> Self {
        match raw {
            RawAttrValue::Single(value) => Self::Single(value),
            RawAttrValue::Number(n) => Self::Single(n.to_string()),
            RawAttrValue::List(values) => Self::List(values),
        }
    }
}

impl AttrValue {
    /// Returns the value as it appears inside the quoted attribute.
    pub fn joined(&self) -> String {
        match self {
            Self::Single(value) => value.clone(),
            Self::List(values) => values.join(" "),
        }
    }

    /// Returns the scalar value, if this is not a list.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::List(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Insertion-ordered HTML attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    attrs: IndexMap<String, AttrValue>,
}

impl Attributes {
    /// Creates an empty attribute bag.
    pub fn new() -> Self {
        Self {
            attrs: IndexMap::new(),
        }
    }

    /// Sets an attribute, keeping its original position if it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Removes an attribute, preserving the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.attrs.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Renders attributes as `key="value"` pairs separated by single spaces.
    pub fn to_html(&self) -> String {
        self.attrs
            .iter()
            .map(|(k, v)| format!(r#"{k}="{}""#, html_escape(&v.joined())))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(key, value);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.set(key, value);
        }
        attrs
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
