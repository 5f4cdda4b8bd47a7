//! enumeration
//!
//! Construction of immutable enumerations and the views they expose.
//!
//! # Construction
//!
//! [`Enumeration::new`] consumes an [`EnumDefinition`] and, for each key in
//! definition order, normalizes the spec into an [`EnumEntry`], forces the
//! entry's key to the defining key, rejects entries without a non-null
//! value, and registers the entry in every derived view. A failed entry
//! aborts construction before any enumeration is returned, so partial
//! state is never visible to the caller.
//!
//! # Immutability
//!
//! An [`Enumeration`]'s fields are private and no `&mut` accessor exists;
//! every view hands out shared references. Post-construction mutation is a
//! compile error rather than a runtime check.
//!
//! # Derived tables
//!
//! For every field name other than `value` that appears on any entry, the
//! enumeration keeps a table mapping an entry's value to that field's
//! content. `text` is one instance of this mechanism. A field present on
//! some entries only yields a sparse table. When two entries share a value,
//! the later one in definition order overwrites the earlier one's slot in
//! every value-keyed table; the by-key views are unaffected.
//!
//! # Example
//!
//! ```
//! use enumtable::{EnumDefinition, Enumeration, EnumValue};
//! use serde_json::json;
//!
//! let e = Enumeration::new(
//!     EnumDefinition::new()
//!         .pair("TYPE_A", 0, "Type A")
//!         .entry("TYPE_B", json!({ "value": 1, "text": "Type B", "extra": "X" })),
//! )
//! .unwrap();
//!
//! assert_eq!(e.value("TYPE_A"), Some(&EnumValue::from(0)));
//! assert_eq!(e.text(&EnumValue::from(1)), Some(&json!("Type B")));
//! assert_eq!(e.table("extra").unwrap().get(&EnumValue::from(1)), Some(&json!("X")));
//! assert_eq!(e.get("TYPE_B").unwrap().key(), "TYPE_B");
//! ```

use std::any::Any;

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use crate::definition::{EntrySpec, EnumDefinition};
use crate::entry::EnumEntry;
use crate::value::EnumValue;

/// Errors from building an enumeration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// An entry's normalized spec lacked a defined, non-null value.
    #[error(
        "the value of `{key}` is required, define it as the first pair element \
         or the `value` field of a record"
    )]
    MissingValue { key: String },
}

/// An immutable, richly-annotated enumeration.
///
/// Built in one step from an [`EnumDefinition`]; exposes value-by-key,
/// per-field value-keyed tables, an ordered collection, and a per-key entry
/// accessor. Derive new enumerations with [`extend`](Enumeration::extend).
#[derive(Debug, Clone, PartialEq)]
pub struct Enumeration {
    values: IndexMap<String, EnumValue>,
    tables: IndexMap<String, IndexMap<EnumValue, Value>>,
    entries: IndexMap<String, EnumEntry>,
}

impl Enumeration {
    /// Build an enumeration from a definition.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::MissingValue`] naming the offending key if
    /// any entry's spec lacks a defined, non-null value.
    ///
    /// # Example
    ///
    /// ```
    /// use enumtable::{DefinitionError, EnumDefinition, Enumeration};
    /// use serde_json::json;
    ///
    /// let err = Enumeration::new(EnumDefinition::new().entry("BAD", json!({}))).unwrap_err();
    /// assert_eq!(err, DefinitionError::MissingValue { key: "BAD".into() });
    /// ```
    pub fn new(definition: EnumDefinition) -> Result<Self, DefinitionError> {
        let mut values = IndexMap::new();
        let mut tables: IndexMap<String, IndexMap<EnumValue, Value>> = IndexMap::new();
        let mut entries: IndexMap<String, EnumEntry> = IndexMap::new();

        for (key, spec) in definition {
            let entry = normalize(key, spec)?;

            values.insert(entry.key().to_string(), entry.value().clone());
            for (field, content) in entry.fields() {
                let table = tables.entry(field.to_string()).or_default();
                if table.insert(entry.value().clone(), content.clone()).is_some() {
                    debug!(
                        key = entry.key(),
                        field,
                        value = %entry.value(),
                        "value collision, later entry overwrites the slot"
                    );
                }
            }
            entries.insert(entry.key().to_string(), entry);
        }

        trace!(
            entries = entries.len(),
            tables = tables.len(),
            "enumeration built"
        );

        Ok(Self {
            values,
            tables,
            entries,
        })
    }

    /// The key → value map, in definition order.
    pub fn values(&self) -> &IndexMap<String, EnumValue> {
        &self.values
    }

    /// The value for a key.
    pub fn value(&self, key: &str) -> Option<&EnumValue> {
        self.values.get(key)
    }

    /// The value-keyed table for a field name, if any entry carried the
    /// field.
    pub fn table(&self, field: &str) -> Option<&IndexMap<EnumValue, Value>> {
        self.tables.get(field)
    }

    /// The `text` content registered for a value.
    ///
    /// Shorthand for `table("text")` followed by a lookup.
    pub fn text(&self, value: &EnumValue) -> Option<&Value> {
        self.tables.get("text")?.get(value)
    }

    /// The entry for a key.
    pub fn get(&self, key: &str) -> Option<&EnumEntry> {
        self.entries.get(key)
    }

    /// Check whether a key is defined.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate keys in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate entries in definition order.
    ///
    /// Every call starts a fresh pass over the collection.
    pub fn iter(&self) -> indexmap::map::Values<'_, String, EnumEntry> {
        self.entries.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the enumeration has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Derive a new enumeration by merging override specs into this one's
    /// entries.
    ///
    /// Equivalent to the free function [`extend`]; both routes share the
    /// same merge and construction logic. See [`extend`] for the merge
    /// semantics.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::MissingValue`] if a merged entry ends up
    /// without a non-null value (possible only for keys new in `overrides`).
    pub fn extend(&self, overrides: &EnumDefinition) -> Result<Enumeration, DefinitionError> {
        extend(self, overrides)
    }
}

impl<'a> IntoIterator for &'a Enumeration {
    type Item = &'a EnumEntry;
    type IntoIter = indexmap::map::Values<'a, String, EnumEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Derive a new enumeration from `source` with `overrides` merged in.
///
/// For each key in `overrides`' own order, the merged spec is a shallow
/// merge: the source entry's record form (empty when the key is new) with
/// the override's record form written on top, override fields winning
/// wholesale. The merged definition is then built with [`Enumeration::new`].
/// Keys of `source` that `overrides` does not name are not carried over.
///
/// `source` is never mutated; the result is a wholly separate enumeration.
///
/// # Example
///
/// ```
/// use enumtable::{extend, EnumDefinition};
/// use serde_json::json;
///
/// let e = EnumDefinition::new()
///     .pair("A", 0, "Type A")
///     .pair("B", 1, "Type B")
///     .build()
///     .unwrap();
///
/// let e2 = extend(
///     &e,
///     &EnumDefinition::new()
///         .entry("A", json!({ "extra": "X" }))
///         .entry("C", json!({ "value": 2 })),
/// )
/// .unwrap();
///
/// // A keeps its value and text, gains the extra field
/// let a = e2.get("A").unwrap();
/// assert_eq!(a.text(), Some(&json!("Type A")));
/// assert_eq!(a.field("extra"), Some(&json!("X")));
///
/// // B was not named and is not carried over
/// assert!(e2.get("B").is_none());
///
/// // The source is untouched
/// assert_eq!(e.get("A").unwrap().field("extra"), None);
/// ```
pub fn extend(
    source: &Enumeration,
    overrides: &EnumDefinition,
) -> Result<Enumeration, DefinitionError> {
    let mut merged = EnumDefinition::new();

    for (key, spec) in overrides {
        let mut record = source
            .get(key)
            .map(EnumEntry::to_record)
            .unwrap_or_default();
        for (name, content) in spec.to_record() {
            record.insert(name, content);
        }
        merged.insert(key.clone(), EntrySpec::Record(record));
    }

    Enumeration::new(merged)
}

/// Check whether a candidate is an [`Enumeration`] built by this crate.
///
/// The check is by concrete type, so a hand-rolled record with
/// similarly-named fields can never pass.
///
/// # Example
///
/// ```
/// use enumtable::{is_enumeration, EnumDefinition};
/// use serde_json::json;
///
/// let e = EnumDefinition::new().build().unwrap();
/// assert!(is_enumeration(&e));
/// assert!(!is_enumeration(&json!({ "value": {}, "text": {} })));
/// ```
pub fn is_enumeration(candidate: &dyn Any) -> bool {
    candidate.is::<Enumeration>()
}

/// Normalize a spec into an entry, forcing the defining key.
fn normalize(key: String, spec: EntrySpec) -> Result<EnumEntry, DefinitionError> {
    let mut fields = IndexMap::new();
    let mut value = None;

    match spec {
        EntrySpec::Pair(items) => {
            let mut items = items.into_iter();
            value = items.next();
            if let Some(text) = items.next() {
                fields.insert("text".to_string(), text);
            }
        }
        EntrySpec::Record(record) => {
            for (name, content) in record {
                match name.as_str() {
                    "value" => value = Some(content),
                    // The defining key always wins over a `key` field.
                    "key" => {}
                    _ => {
                        fields.insert(name, content);
                    }
                }
            }
        }
    }

    match value {
        None | Some(Value::Null) => Err(DefinitionError::MissingValue { key }),
        Some(value) => Ok(EnumEntry::new(key, EnumValue::from(value), fields)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn types_ab() -> Enumeration {
        EnumDefinition::new()
            .pair("TYPE_A", 0, "Type A")
            .pair("TYPE_B", 1, "Type B")
            .build()
            .unwrap()
    }

    mod construct {
        use super::*;

        #[test]
        fn round_trip() {
            let e = Enumeration::new(
                EnumDefinition::new()
                    .entry("TYPE_A", json!({ "value": 0, "text": "Type A" }))
                    .entry("TYPE_B", json!({ "value": 1, "text": "Type B" })),
            )
            .unwrap();

            assert_eq!(e.value("TYPE_A"), Some(&EnumValue::from(0)));
            assert_eq!(e.value("TYPE_B"), Some(&EnumValue::from(1)));
            assert_eq!(e.text(&EnumValue::from(0)), Some(&json!("Type A")));
            assert_eq!(e.text(&EnumValue::from(1)), Some(&json!("Type B")));
        }

        #[test]
        fn shorthand_equivalent_to_record_form() {
            let shorthand = types_ab();
            let longhand = Enumeration::new(
                EnumDefinition::new()
                    .entry("TYPE_A", json!({ "value": 0, "text": "Type A" }))
                    .entry("TYPE_B", json!({ "value": 1, "text": "Type B" })),
            )
            .unwrap();

            assert_eq!(shorthand, longhand);
        }

        #[test]
        fn per_key_accessor_returns_full_entry() {
            let e = types_ab();
            let a = e.get("TYPE_A").unwrap();

            assert_eq!(a.key(), "TYPE_A");
            assert_eq!(a.value(), &EnumValue::from(0));
            assert_eq!(a.text(), Some(&json!("Type A")));
            assert!(e.get("TYPE_Z").is_none());
        }

        #[test]
        fn empty_pair_rejected() {
            let err = Enumeration::new(EnumDefinition::new().entry("TYPE_A", json!([])))
                .unwrap_err();
            assert_eq!(
                err,
                DefinitionError::MissingValue {
                    key: "TYPE_A".into()
                }
            );
        }

        #[test]
        fn empty_record_rejected() {
            let err = Enumeration::new(EnumDefinition::new().entry("TYPE_A", json!({})))
                .unwrap_err();
            assert_eq!(
                err,
                DefinitionError::MissingValue {
                    key: "TYPE_A".into()
                }
            );
        }

        #[test]
        fn null_value_rejected() {
            let err =
                Enumeration::new(EnumDefinition::new().entry("N", json!({ "value": null })))
                    .unwrap_err();
            assert_eq!(err, DefinitionError::MissingValue { key: "N".into() });
        }

        #[test]
        fn error_message_names_the_key() {
            let err = Enumeration::new(EnumDefinition::new().entry("ORPHAN", json!({})))
                .unwrap_err();
            assert!(err.to_string().contains("ORPHAN"));
        }

        #[test]
        fn pair_without_text_leaves_text_absent() {
            let e = Enumeration::new(EnumDefinition::new().entry("A", json!([0]))).unwrap();

            assert_eq!(e.get("A").unwrap().text(), None);
            assert!(e.table("text").is_none());
        }

        #[test]
        fn value_collision_last_definition_wins() {
            let e = Enumeration::new(
                EnumDefinition::new().pair("A", 0, "x").pair("B", 0, "y"),
            )
            .unwrap();

            // Both keys keep their value...
            assert_eq!(e.value("A"), Some(&EnumValue::from(0)));
            assert_eq!(e.value("B"), Some(&EnumValue::from(0)));
            // ...but the value-keyed slot belongs to the later entry.
            assert_eq!(e.text(&EnumValue::from(0)), Some(&json!("y")));
        }

        #[test]
        fn partially_present_fields_yield_sparse_tables() {
            let e = Enumeration::new(
                EnumDefinition::new()
                    .entry("A", json!({ "value": 0, "extra": "only A" }))
                    .entry("B", json!({ "value": 1, "text": "Type B" })),
            )
            .unwrap();

            let extra = e.table("extra").unwrap();
            assert_eq!(extra.len(), 1);
            assert_eq!(extra.get(&EnumValue::from(0)), Some(&json!("only A")));
            assert!(extra.get(&EnumValue::from(1)).is_none());

            let text = e.table("text").unwrap();
            assert_eq!(text.len(), 1);
        }

        #[test]
        fn key_field_on_spec_cannot_override_defining_key() {
            let e = Enumeration::new(
                EnumDefinition::new().entry("REAL", json!({ "value": 0, "key": "FAKE" })),
            )
            .unwrap();

            let entry = e.get("REAL").unwrap();
            assert_eq!(entry.key(), "REAL");
            assert_eq!(entry.field("key"), None);
            assert!(e.get("FAKE").is_none());
        }

        #[test]
        fn non_scalar_values_are_usable_table_keys() {
            let e = Enumeration::new(
                EnumDefinition::new().entry("PAIR", json!({ "value": [1, 2], "text": "pair" })),
            )
            .unwrap();

            let key = EnumValue::from(json!([1, 2]));
            assert_eq!(e.text(&key), Some(&json!("pair")));
        }

        #[test]
        fn empty_definition_builds_empty_enumeration() {
            let e = EnumDefinition::new().build().unwrap();
            assert!(e.is_empty());
            assert_eq!(e.len(), 0);
            assert!(e.iter().next().is_none());
        }
    }

    mod extension {
        use super::*;

        #[test]
        fn merge_preserves_base_and_applies_overrides() {
            let e = types_ab();
            let e2 = e
                .extend(
                    &EnumDefinition::new()
                        .entry("TYPE_A", json!({ "extra": "Extra Information" }))
                        .entry("TYPE_C", json!({ "value": 2 })),
                )
                .unwrap();

            let a = e2.get("TYPE_A").unwrap();
            assert_eq!(a.value(), &EnumValue::from(0));
            assert_eq!(a.text(), Some(&json!("Type A")));
            assert_eq!(a.field("extra"), Some(&json!("Extra Information")));

            let c = e2.get("TYPE_C").unwrap();
            assert_eq!(c.value(), &EnumValue::from(2));
            assert_eq!(c.text(), None);
        }

        #[test]
        fn source_is_untouched() {
            let e = types_ab();
            let before = e.clone();

            let _e2 = e
                .extend(&EnumDefinition::new().entry("TYPE_A", json!({ "extra": "X" })))
                .unwrap();

            assert_eq!(e, before);
            assert_eq!(e.get("TYPE_A").unwrap().field("extra"), None);
        }

        #[test]
        fn static_and_instance_routes_agree() {
            let e = types_ab();
            let overrides = EnumDefinition::new()
                .entry("TYPE_A", json!({ "extra": "X" }))
                .entry("TYPE_C", json!({ "value": 2 }));

            let via_method = e.extend(&overrides).unwrap();
            let via_free_fn = extend(&e, &overrides).unwrap();

            assert_eq!(via_method, via_free_fn);
        }

        #[test]
        fn keys_absent_from_overrides_are_dropped() {
            let e = types_ab();
            let e2 = e
                .extend(&EnumDefinition::new().entry("TYPE_A", json!({ "extra": "X" })))
                .unwrap();

            assert!(e2.get("TYPE_B").is_none());
            assert_eq!(e2.len(), 1);
        }

        #[test]
        fn override_order_becomes_collection_order() {
            let e = types_ab();
            let e2 = e
                .extend(
                    &EnumDefinition::new()
                        .entry("TYPE_C", json!({ "value": 2 }))
                        .entry("TYPE_A", json!({ "extra": "X" })),
                )
                .unwrap();

            assert_eq!(e2.keys().collect::<Vec<_>>(), ["TYPE_C", "TYPE_A"]);
        }

        #[test]
        fn pair_override_replaces_value_and_text_wholesale() {
            let e = Enumeration::new(
                EnumDefinition::new()
                    .entry("A", json!({ "value": 0, "text": "old", "extra": "kept" })),
            )
            .unwrap();

            let e2 = e
                .extend(&EnumDefinition::new().entry("A", json!([9, "new"])))
                .unwrap();

            let a = e2.get("A").unwrap();
            assert_eq!(a.value(), &EnumValue::from(9));
            assert_eq!(a.text(), Some(&json!("new")));
            // Non-overridden fields survive the shallow merge.
            assert_eq!(a.field("extra"), Some(&json!("kept")));
        }

        #[test]
        fn new_key_without_value_fails() {
            let e = types_ab();
            let err = e
                .extend(&EnumDefinition::new().entry("TYPE_X", json!({ "text": "no value" })))
                .unwrap_err();

            assert_eq!(
                err,
                DefinitionError::MissingValue {
                    key: "TYPE_X".into()
                }
            );
        }

        #[test]
        fn source_survives_failed_extension() {
            let e = types_ab();
            let before = e.clone();

            let _ = e.extend(&EnumDefinition::new().entry("BAD", json!({})));

            assert_eq!(e, before);
        }
    }

    mod identity {
        use super::*;
        use std::collections::HashMap;

        #[test]
        fn built_enumeration_passes() {
            let e = EnumDefinition::new().build().unwrap();
            assert!(is_enumeration(&e));
        }

        #[test]
        fn lookalike_records_fail() {
            assert!(!is_enumeration(&json!({ "value": {}, "text": {}, "array": [] })));

            let map: HashMap<String, i64> = HashMap::new();
            assert!(!is_enumeration(&map));
        }

        #[test]
        fn absent_values_fail() {
            assert!(!is_enumeration(&()));
            assert!(!is_enumeration(&Option::<Enumeration>::None));
        }
    }

    mod iteration {
        use super::*;

        #[test]
        fn yields_entries_in_definition_order() {
            let e = types_ab();
            let entries: Vec<_> = e.iter().collect();

            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].key(), "TYPE_A");
            assert_eq!(entries[0].value(), &EnumValue::from(0));
            assert_eq!(entries[0].text(), Some(&json!("Type A")));
            assert_eq!(entries[1].key(), "TYPE_B");
        }

        #[test]
        fn passes_are_independent_and_restartable() {
            let e = types_ab();

            let first: Vec<_> = e.iter().map(EnumEntry::key).collect();
            let second: Vec<_> = e.iter().map(EnumEntry::key).collect();

            assert_eq!(first, second);
            assert_eq!(first, ["TYPE_A", "TYPE_B"]);
        }

        #[test]
        fn reference_loops_work() {
            let e = types_ab();
            let mut seen = Vec::new();
            for entry in &e {
                seen.push(entry.key().to_string());
            }
            assert_eq!(seen, ["TYPE_A", "TYPE_B"]);
        }
    }
}
