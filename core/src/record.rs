//! Typed records produced by validation.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// A validated field value.
///
/// Serializes to the plain JSON value (`null`, boolean, number or string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent optional field without a default.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Text value (strings, enum members, emails, URLs).
    Text(String),
}

impl FieldValue {
    /// Returns `true` for [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the text if this is a [`FieldValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`FieldValue::Integer`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`FieldValue::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts to a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Integer(n) => Value::from(*n),
            FieldValue::Text(text) => Value::String(text.clone()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Ordered mapping of field name to validated value.
///
/// Keeps insertion order, which for validated records is the spec's field
/// declaration order. Serializes as a JSON object in that order.
///
/// # Examples
///
/// ```
/// use request_schema_core::{FieldValue, Record};
///
/// let mut record = Record::new();
/// record.insert("name", FieldValue::Null);
/// record.insert("age", FieldValue::Integer(25));
///
/// assert_eq!(record.field_names(), vec!["name", "age"]);
/// assert_eq!(record.get("age").and_then(FieldValue::as_i64), Some(25));
/// assert_eq!(
///     serde_json::to_string(&record).unwrap(),
///     r#"{"name":null,"age":25}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, FieldValue)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a value, replacing any existing value for `name` in place.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up a value by field name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the record holds a value for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Gets all field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(key, _)| key.as_str()).collect()
    }

    /// Iterates over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts to a JSON object.
    pub fn to_json(&self) -> Value {
        let map = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = Record::new();
        record.insert("a", FieldValue::Integer(1));
        record.insert("b", FieldValue::Integer(2));
        record.insert("a", FieldValue::Integer(3));

        assert_eq!(record.len(), 2);
        assert_eq!(record.field_names(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&FieldValue::Integer(3)));
    }

    #[test]
    fn test_serialize_keeps_order() {
        let record: Record = [
            ("zeta", FieldValue::from("z")),
            ("alpha", FieldValue::Bool(true)),
        ]
        .into_iter()
        .collect();

        let raw = serde_json::to_string(&record).unwrap();
        assert_eq!(raw, r#"{"zeta":"z","alpha":true}"#);
    }

    #[test]
    fn test_field_value_untagged_deserialize() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[null, true, 7, "seven"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::Bool(true),
                FieldValue::Integer(7),
                FieldValue::Text("seven".into()),
            ]
        );
    }

    #[test]
    fn test_to_json() {
        let mut record = Record::new();
        record.insert("first_name", FieldValue::from("Miguel"));
        record.insert("hair_color", FieldValue::Null);
        assert_eq!(
            record.to_json(),
            serde_json::json!({"first_name": "Miguel", "hair_color": null})
        );
    }
}
