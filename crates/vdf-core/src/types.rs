//! The decoded value tree.
//!
//! [`VdfValue`] is the closed set of node kinds the decoder produces and the
//! encoder accepts. Objects are kept in insertion order by [`VdfObject`],
//! since key order decides the layout of the re-encoded stream.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// A decoded VDF node.
///
/// `Array`, `Boolean` and `Timestamp` never appear on the wire. They are
/// coercions of objects and integers applied by the decoder according to its
/// [`DecoderConfig`](crate::DecoderConfig), and the encoder folds them back
/// into objects and integers.
#[derive(Debug, Clone, PartialEq)]
pub enum VdfValue {
    Object(VdfObject),
    /// An object whose keys all started with a digit, in declared order.
    Array(Vec<VdfValue>),
    String(String),
    Integer(i32),
    Boolean(bool),
    /// Unix epoch seconds of a date property.
    Timestamp(DateTime<Utc>),
}

impl VdfValue {
    pub fn is_composite(&self) -> bool {
        matches!(self, VdfValue::Object(_) | VdfValue::Array(_))
    }

    pub fn as_object(&self) -> Option<&VdfObject> {
        match self {
            VdfValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[VdfValue]> {
        match self {
            VdfValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VdfValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer this value is written as: integers as-is, booleans as
    /// 0/1, timestamps as epoch seconds. `None` for strings and composites,
    /// and for timestamps outside the `i32` range.
    pub fn as_wire_int(&self) -> Option<i32> {
        match self {
            VdfValue::Integer(n) => Some(*n),
            VdfValue::Boolean(b) => Some(i32::from(*b)),
            VdfValue::Timestamp(ts) => i32::try_from(ts.timestamp()).ok(),
            _ => None,
        }
    }

    /// Look up `key` in an object. Returns `None` for every other variant.
    pub fn get(&self, key: &str) -> Option<&VdfValue> {
        self.as_object().and_then(|obj| obj.get(key))
    }
}

impl From<VdfObject> for VdfValue {
    fn from(obj: VdfObject) -> Self {
        VdfValue::Object(obj)
    }
}

impl From<Vec<VdfValue>> for VdfValue {
    fn from(items: Vec<VdfValue>) -> Self {
        VdfValue::Array(items)
    }
}

impl From<String> for VdfValue {
    fn from(s: String) -> Self {
        VdfValue::String(s)
    }
}

impl From<&str> for VdfValue {
    fn from(s: &str) -> Self {
        VdfValue::String(s.to_string())
    }
}

impl From<i32> for VdfValue {
    fn from(n: i32) -> Self {
        VdfValue::Integer(n)
    }
}

impl From<bool> for VdfValue {
    fn from(b: bool) -> Self {
        VdfValue::Boolean(b)
    }
}

impl From<DateTime<Utc>> for VdfValue {
    fn from(ts: DateTime<Utc>) -> Self {
        VdfValue::Timestamp(ts)
    }
}

/// Key/value pairs in insertion order.
///
/// Inserting an existing key replaces its value but keeps the key at the
/// position of its first insertion. Equality compares entries in order, so
/// two objects with the same entries in a different order are not equal.
#[derive(Debug, Clone, Default)]
pub struct VdfObject {
    entries: IndexMap<String, VdfValue>,
}

impl VdfObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite in place. Returns the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<VdfValue>) -> Option<VdfValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&VdfValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, VdfValue> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, VdfValue> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, VdfValue> {
        self.entries.values()
    }

    pub fn into_values(self) -> indexmap::map::IntoValues<String, VdfValue> {
        self.entries.into_values()
    }
}

impl PartialEq for VdfObject {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<VdfValue>> FromIterator<(K, V)> for VdfObject {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut obj = VdfObject::new();
        for (key, value) in iter {
            obj.insert(key, value);
        }
        obj
    }
}

impl IntoIterator for VdfObject {
    type Item = (String, VdfValue);
    type IntoIter = indexmap::map::IntoIter<String, VdfValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a VdfObject {
    type Item = (&'a String, &'a VdfValue);
    type IntoIter = indexmap::map::Iter<'a, String, VdfValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_existing_key_keeps_first_position() {
        let mut obj = VdfObject::new();
        obj.insert("a", 1);
        obj.insert("b", 2);
        let previous = obj.insert("a", 3);

        assert_eq!(previous, Some(VdfValue::Integer(1)));
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(obj.get("a"), Some(&VdfValue::Integer(3)));
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab: VdfObject = [("a", 1), ("b", 2)].into_iter().collect();
        let ba: VdfObject = [("b", 2), ("a", 1)].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn wire_int_folds_coerced_scalars() {
        let ts = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(VdfValue::Boolean(true).as_wire_int(), Some(1));
        assert_eq!(VdfValue::Boolean(false).as_wire_int(), Some(0));
        assert_eq!(VdfValue::Timestamp(ts).as_wire_int(), Some(1_700_000_000));
        assert_eq!(VdfValue::from("x").as_wire_int(), None);
    }
}
