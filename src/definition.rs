//! definition
//!
//! The declarative input an enumeration is built from.
//!
//! # Shape
//!
//! An [`EnumDefinition`] is an ordered map from key to [`EntrySpec`]. A spec
//! is either the positional pair shorthand `[value, text]` or a record with
//! a required `value` field and arbitrary additional fields. Iteration order
//! over a definition is always insertion/definition order.
//!
//! # Example
//!
//! ```
//! use enumtable::{EnumDefinition, EntrySpec};
//! use serde_json::json;
//!
//! // Built incrementally
//! let def = EnumDefinition::new()
//!     .pair("TYPE_A", 0, "Type A")
//!     .entry("TYPE_B", json!({ "value": 1, "text": "Type B", "extra": "X" }));
//!
//! assert_eq!(def.keys().collect::<Vec<_>>(), ["TYPE_A", "TYPE_B"]);
//!
//! // Or parsed, preserving key order
//! let parsed: EnumDefinition =
//!     serde_json::from_str(r#"{ "TYPE_A": [0, "Type A"], "TYPE_B": { "value": 1 } }"#).unwrap();
//! assert!(matches!(parsed.get("TYPE_A"), Some(EntrySpec::Pair(_))));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enumeration::{DefinitionError, Enumeration};

/// One definition entry: pair shorthand or record form.
///
/// The two forms are interchangeable; `[v, t]` means `{ "value": v, "text": t }`.
/// A pair's missing second element simply yields an entry without `text`,
/// and elements past the second are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntrySpec {
    /// Positional `[value, text]` shorthand.
    Pair(Vec<Value>),
    /// Record with a `value` field and arbitrary named fields.
    Record(IndexMap<String, Value>),
}

impl EntrySpec {
    /// Create a pair spec from a value and text.
    pub fn pair(value: impl Into<Value>, text: impl Into<Value>) -> Self {
        EntrySpec::Pair(vec![value.into(), text.into()])
    }

    /// Create a pair spec carrying only a value.
    pub fn value_only(value: impl Into<Value>) -> Self {
        EntrySpec::Pair(vec![value.into()])
    }

    /// Create a record spec from named fields.
    ///
    /// # Example
    ///
    /// ```
    /// use enumtable::EntrySpec;
    /// use serde_json::json;
    ///
    /// let spec = EntrySpec::record([("value", json!(2)), ("text", json!("Type C"))]);
    /// assert_eq!(spec.to_record().get("value"), Some(&json!(2)));
    /// ```
    pub fn record<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        EntrySpec::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Normalize the spec to record form.
    ///
    /// Pairs become `{ "value": .., "text": .. }` with absent elements
    /// omitted; records are returned as-is. Extension merges operate on this
    /// form so that a pair override replaces the same fields a record
    /// override would.
    pub fn to_record(&self) -> IndexMap<String, Value> {
        match self {
            EntrySpec::Pair(items) => {
                let mut record = IndexMap::new();
                if let Some(value) = items.first() {
                    record.insert("value".to_string(), value.clone());
                }
                if let Some(text) = items.get(1) {
                    record.insert("text".to_string(), text.clone());
                }
                record
            }
            EntrySpec::Record(fields) => fields.clone(),
        }
    }
}

impl From<Value> for EntrySpec {
    /// Convert a JSON value into a spec.
    ///
    /// Arrays become pairs and objects become records. Any other shape has
    /// no `value` field to offer and normalizes to an empty record, which
    /// fails construction the same way `{}` does.
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => EntrySpec::Pair(items),
            Value::Object(map) => EntrySpec::Record(map.into_iter().collect()),
            _ => EntrySpec::Record(IndexMap::new()),
        }
    }
}

/// An ordered, declarative enumeration definition.
///
/// Keys map to [`EntrySpec`]s; insertion order is preserved and becomes the
/// built enumeration's collection order. Inserting an existing key replaces
/// its spec without moving it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumDefinition {
    entries: IndexMap<String, EntrySpec>,
}

impl EnumDefinition {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `[value, text]` pair entry, consuming and returning the
    /// definition for chaining.
    pub fn pair(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        text: impl Into<Value>,
    ) -> Self {
        self.entries
            .insert(key.into(), EntrySpec::pair(value, text));
        self
    }

    /// Add an entry with an explicit spec, consuming and returning the
    /// definition for chaining.
    ///
    /// Accepts anything convertible to [`EntrySpec`], including
    /// `serde_json::Value` literals.
    pub fn entry(mut self, key: impl Into<String>, spec: impl Into<EntrySpec>) -> Self {
        self.entries.insert(key.into(), spec.into());
        self
    }

    /// Insert an entry in place.
    ///
    /// Returns the previous spec if the key was already defined.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        spec: impl Into<EntrySpec>,
    ) -> Option<EntrySpec> {
        self.entries.insert(key.into(), spec.into())
    }

    /// Build the enumeration this definition describes.
    ///
    /// Shorthand for [`Enumeration::new`].
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::MissingValue`] if any entry lacks a
    /// non-null value.
    pub fn build(self) -> Result<Enumeration, DefinitionError> {
        Enumeration::new(self)
    }

    /// Get the spec for a key.
    pub fn get(&self, key: &str) -> Option<&EntrySpec> {
        self.entries.get(key)
    }

    /// Iterate keys in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate entries in definition order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, EntrySpec> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the definition has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for EnumDefinition {
    type Item = (String, EntrySpec);
    type IntoIter = indexmap::map::IntoIter<String, EntrySpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a EnumDefinition {
    type Item = (&'a String, &'a EntrySpec);
    type IntoIter = indexmap::map::Iter<'a, String, EntrySpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, S> FromIterator<(K, S)> for EnumDefinition
where
    K: Into<String>,
    S: Into<EntrySpec>,
{
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        let mut definition = EnumDefinition::new();
        for (key, spec) in iter {
            definition.insert(key, spec);
        }
        definition
    }
}
