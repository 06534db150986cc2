//! The value model: a closed set of JSON-like shapes plus a date leaf.
//!
//! Objects map keys to `Option<Value>`. `None` is an *absent* property: it is
//! part of the key set handed to sorters and replacers, but it is never
//! rendered (not even as `null`).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::date::to_iso_string;

/// A canonicalizable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// All numbers are IEEE-754 doubles, as in JavaScript.
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
    /// Rendered as an ISO-8601 UTC string with millisecond precision.
    Date(DateTime<Utc>),
}

impl Value {
    /// Short name of the variant, used in log lines and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Date(_) => "date",
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert back to a `serde_json::Value`, the way `JSON.parse` would see
    /// the canonical text: dates become ISO strings and absent properties
    /// disappear. Returns `None` if a number anywhere is not finite.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        Some(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Number::from_f64(*n)?.into(),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Date(d) => serde_json::Value::String(to_iso_string(d)),
            Value::Array(arr) => serde_json::Value::Array(
                arr.iter().map(Value::to_json).collect::<Option<Vec<_>>>()?,
            ),
            Value::Object(obj) => {
                let mut map = serde_json::Map::new();
                for (key, value) in obj.present() {
                    map.insert(key.to_owned(), value.to_json()?);
                }
                serde_json::Value::Object(map)
            }
        })
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // Without `arbitrary_precision` every JSON number has an f64 view.
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        Value::from(value.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(arr: Vec<T>) -> Self {
        Value::Array(arr.into_iter().map(Into::into).collect())
    }
}

/// An object: unique string keys bound to a value or to *absent*.
///
/// Keys are held in byte-lexicographic order, so iteration never depends on
/// the order in which they were inserted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    entries: BTreeMap<String, Option<Value>>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Object::insert`].
    ///
    /// # Example
    ///
    /// ```
    /// use json_canon::{Object, Value};
    ///
    /// let obj = Object::new().with("b", 2).with("a", "x").with_absent("c");
    /// assert_eq!(obj.len(), 3);
    /// assert_eq!(obj.get("a"), Some(&Value::from("x")));
    /// assert_eq!(obj.get("c"), None);
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder form of [`Object::insert_absent`].
    pub fn with_absent(mut self, key: impl Into<String>) -> Self {
        self.insert_absent(key);
        self
    }

    /// Bind `key` to `value`, returning the previous binding if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Option<Value>> {
        self.entries.insert(key.into(), Some(value.into()))
    }

    /// Bind `key` to the absent marker.
    pub fn insert_absent(&mut self, key: impl Into<String>) -> Option<Option<Value>> {
        self.entries.insert(key.into(), None)
    }

    pub fn remove(&mut self, key: &str) -> Option<Option<Value>> {
        self.entries.remove(key)
    }

    /// The present value bound to `key`. Absent and missing keys both give `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    /// Whether `key` is in the key set, including absent-valued keys.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys, including absent-valued keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries, absent ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Only the entries that hold a value.
    pub fn present(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }

    /// Lookup that distinguishes a missing key (`None`) from an absent one
    /// (`Some(None)`).
    pub(crate) fn entry(&self, key: &str) -> Option<Option<&Value>> {
        self.entries.get(key).map(Option::as_ref)
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = Object::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn from_serde_json_is_total() {
        let value = Value::from(json!({
            "a": [1, 2.5, "x", null, true],
            "b": {"c": {}}
        }));
        let expected = Value::Object(
            Object::new()
                .with(
                    "a",
                    Value::Array(vec![
                        Value::Number(1.0),
                        Value::Number(2.5),
                        Value::from("x"),
                        Value::Null,
                        Value::Bool(true),
                    ]),
                )
                .with("b", Object::new().with("c", Object::new())),
        );
        assert_eq!(value, expected);
    }

    #[test]
    fn object_equality_ignores_insertion_order() {
        let a = Object::new().with("x", 1).with("y", 2);
        let b = Object::new().with("y", 2).with("x", 1);
        assert_eq!(a, b);
        assert_eq!(a.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn absent_keys_are_in_the_key_set_but_have_no_value() {
        let obj = Object::new().with("a", 1).with_absent("b");
        assert!(obj.contains_key("b"));
        assert_eq!(obj.get("b"), None);
        assert_eq!(obj.entry("b"), Some(None));
        assert_eq!(obj.entry("zz"), None);
        assert_eq!(obj.present().count(), 1);
        assert_eq!(obj.iter().count(), 2);
    }

    #[test]
    fn to_json_drops_absent_and_renders_dates() {
        let date = Utc.timestamp_millis_opt(1_610_215_894_309).unwrap();
        let value = Value::Object(
            Object::new()
                .with("d", date)
                .with("n", 1)
                .with_absent("gone"),
        );
        assert_eq!(
            value.to_json(),
            Some(json!({"d": "2021-01-09T18:11:34.309Z", "n": 1.0}))
        );
    }

    #[test]
    fn to_json_rejects_non_finite() {
        assert_eq!(Value::Number(f64::NAN).to_json(), None);
        assert_eq!(Value::from(vec![f64::INFINITY]).to_json(), None);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from(vec![1]).kind(), "array");
        assert_eq!(Value::from(Object::new()).kind(), "object");
    }
}
