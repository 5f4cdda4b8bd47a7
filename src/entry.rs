//! entry
//!
//! The canonical per-key record an enumeration holds for each defined key.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::value::EnumValue;

/// One enumeration entry: `key`, `value`, and every other field the spec
/// carried, in spec order.
///
/// Entries are created only during construction
/// ([`Enumeration::new`](crate::Enumeration::new)); the defining key always
/// wins over any `key` field on the input spec. `text` is an ordinary field
/// and is present only when the spec supplied it.
///
/// Serialization flattens the extra fields beside `key` and `value`, so an
/// entry serializes back to the record shape it was defined with:
///
/// ```
/// use enumtable::EnumDefinition;
/// use serde_json::json;
///
/// let e = EnumDefinition::new().pair("A", 0, "Type A").build().unwrap();
/// let entry = e.get("A").unwrap();
/// assert_eq!(
///     serde_json::to_value(entry).unwrap(),
///     json!({ "key": "A", "value": 0, "text": "Type A" })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumEntry {
    key: String,
    value: EnumValue,
    #[serde(flatten)]
    fields: IndexMap<String, Value>,
}

impl EnumEntry {
    pub(crate) fn new(key: String, value: EnumValue, fields: IndexMap<String, Value>) -> Self {
        Self { key, value, fields }
    }

    /// The defining key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entry's value.
    pub fn value(&self) -> &EnumValue {
        &self.value
    }

    /// The entry's `text` field, when present.
    pub fn text(&self) -> Option<&Value> {
        self.fields.get("text")
    }

    /// Look up a field other than `value` by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterate the entry's fields other than `value`, in spec order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Export the entry as a record spec: `value` first, then every other
    /// field. The key is not included; construction re-forces it.
    ///
    /// This is the base that extension merges overrides onto.
    pub fn to_record(&self) -> IndexMap<String, Value> {
        let mut record = IndexMap::with_capacity(self.fields.len() + 1);
        record.insert("value".to_string(), Value::from(self.value.clone()));
        for (name, content) in &self.fields {
            record.insert(name.clone(), content.clone());
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> EnumEntry {
        let mut fields = IndexMap::new();
        fields.insert("text".to_string(), json!("Type A"));
        fields.insert("extra".to_string(), json!([1, 2]));
        EnumEntry::new("A".to_string(), EnumValue::from(0), fields)
    }

    #[test]
    fn accessors() {
        let entry = sample();
        assert_eq!(entry.key(), "A");
        assert_eq!(entry.value(), &EnumValue::from(0));
        assert_eq!(entry.text(), Some(&json!("Type A")));
        assert_eq!(entry.field("extra"), Some(&json!([1, 2])));
        assert_eq!(entry.field("missing"), None);
    }

    #[test]
    fn fields_iterate_in_spec_order() {
        let names: Vec<_> = sample().fields().map(|(name, _)| name.to_string()).collect();
        assert_eq!(names, ["text", "extra"]);
    }

    #[test]
    fn to_record_leads_with_value() {
        let record = sample().to_record();
        let names: Vec<_> = record.keys().cloned().collect();
        assert_eq!(names, ["value", "text", "extra"]);
        assert_eq!(record.get("value"), Some(&json!(0)));
        assert!(!record.contains_key("key"));
    }

    #[test]
    fn serializes_flat() {
        assert_eq!(
            serde_json::to_value(sample()).unwrap(),
            json!({ "key": "A", "value": 0, "text": "Type A", "extra": [1, 2] })
        );
    }
}
