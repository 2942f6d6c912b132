//! Attribute values returned by an attribute service.
//!
//! An attribute that occurs once is reported as a bare string and an
//! attribute that occurs several times as a list. Callers that would rather
//! not care can use [`AttributeMap::values`], which always yields a slice.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Value of one named attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Exactly one value was returned.
    Single(String),
    /// Zero or several values were returned, in document order.
    Multi(Vec<String>),
}

impl AttributeValue {
    /// Collapses accumulated values: one value becomes [`Self::Single`].
    #[must_use]
    pub fn from_values(mut values: Vec<String>) -> Self {
        if values.len() == 1 {
            Self::Single(values.remove(0))
        } else {
            Self::Multi(values)
        }
    }

    /// Returns the value if exactly one was returned.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(_) => None,
        }
    }

    /// Returns all values as a slice regardless of shape.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }

    /// Converts into a list regardless of shape.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(value) => vec![value],
            Self::Multi(values) => values,
        }
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if no values were returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Multi(values.into_iter().map(str::to_string).collect())
    }
}

/// Attribute name to value mapping, in the order names were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, AttributeValue)>,
}

impl AttributeMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a map from `(name, values)` occurrences.
    ///
    /// Values of repeated names are appended to the first occurrence, then
    /// every name holding exactly one value is collapsed to a single string.
    pub fn accumulate<I>(occurrences: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
        for (name, values) in occurrences {
            match grouped.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, acc)) => acc.extend(values),
                None => grouped.push((name, values)),
            }
        }

        Self {
            entries: grouped
                .into_iter()
                .map(|(name, values)| (name, AttributeValue::from_values(values)))
                .collect(),
        }
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Returns all values of an attribute; empty if the name is absent.
    #[must_use]
    pub fn values(&self, name: &str) -> &[String] {
        self.get(name)
            .map(AttributeValue::as_slice)
            .unwrap_or_default()
    }

    /// Returns the first value of an attribute.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    /// Returns true if the attribute was returned.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over attribute names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates over `(name, value)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of distinct attribute names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no attributes were returned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts into a uniformly list-valued mapping.
    #[must_use]
    pub fn into_lists(self) -> Vec<(String, Vec<String>)> {
        self.entries
            .into_iter()
            .map(|(name, value)| (name, value.into_vec()))
            .collect()
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
