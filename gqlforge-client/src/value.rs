//! GraphQL input values and argument maps
//!
//! [`InputValue`] is what arguments and input objects are made of. It renders
//! as a GraphQL literal (enums stay unquoted) and serializes to plain JSON.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// A GraphQL input literal
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    /// `null`
    Null,
    /// Integer literal
    Int(i64),
    /// Float literal
    Float(f64),
    /// Boolean literal
    Boolean(bool),
    /// Quoted string literal
    String(String),
    /// Unquoted enum value
    Enum(String),
    /// List literal
    List(Vec<InputValue>),
    /// Input object literal
    Object(Arguments),
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Null => f.write_str("null"),
            InputValue::Int(n) => write!(f, "{n}"),
            InputValue::Float(n) => write!(f, "{n}"),
            InputValue::Boolean(b) => write!(f, "{b}"),
            InputValue::String(s) => write_quoted(f, s),
            InputValue::Enum(e) => f.write_str(e),
            InputValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            InputValue::Object(fields) => {
                f.write_str("{")?;
                fields.write_pairs(f)?;
                f.write_str("}")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

impl Serialize for InputValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InputValue::Null => serializer.serialize_unit(),
            InputValue::Int(n) => serializer.serialize_i64(*n),
            InputValue::Float(n) => serializer.serialize_f64(*n),
            InputValue::Boolean(b) => serializer.serialize_bool(*b),
            InputValue::String(s) | InputValue::Enum(s) => serializer.serialize_str(s),
            InputValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            InputValue::Object(fields) => fields.serialize(serializer),
        }
    }
}

impl From<serde_json::Value> for InputValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => InputValue::Null,
            serde_json::Value::Bool(b) => InputValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => InputValue::Int(i),
                None => InputValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => InputValue::String(s),
            serde_json::Value::Array(items) => {
                InputValue::List(items.into_iter().map(InputValue::from).collect())
            }
            serde_json::Value::Object(map) => {
                InputValue::Object(map.into_iter().map(|(k, v)| (k, InputValue::from(v))).collect())
            }
        }
    }
}

/// Conversion into a GraphQL input literal
pub trait ToInputValue {
    /// Returns the wire representation of this value.
    fn to_input_value(&self) -> InputValue;
}

impl ToInputValue for InputValue {
    fn to_input_value(&self) -> InputValue {
        self.clone()
    }
}

impl ToInputValue for i32 {
    fn to_input_value(&self) -> InputValue {
        InputValue::Int(i64::from(*self))
    }
}

impl ToInputValue for i64 {
    fn to_input_value(&self) -> InputValue {
        InputValue::Int(*self)
    }
}

impl ToInputValue for f64 {
    fn to_input_value(&self) -> InputValue {
        InputValue::Float(*self)
    }
}

impl ToInputValue for bool {
    fn to_input_value(&self) -> InputValue {
        InputValue::Boolean(*self)
    }
}

impl ToInputValue for str {
    fn to_input_value(&self) -> InputValue {
        InputValue::String(self.to_string())
    }
}

impl ToInputValue for String {
    fn to_input_value(&self) -> InputValue {
        InputValue::String(self.clone())
    }
}

impl<T: ToInputValue> ToInputValue for Option<T> {
    fn to_input_value(&self) -> InputValue {
        match self {
            Some(value) => value.to_input_value(),
            None => InputValue::Null,
        }
    }
}

impl<T: ToInputValue> ToInputValue for Vec<T> {
    fn to_input_value(&self) -> InputValue {
        InputValue::List(self.iter().map(ToInputValue::to_input_value).collect())
    }
}

impl<T: ToInputValue + ?Sized> ToInputValue for &T {
    fn to_input_value(&self) -> InputValue {
        (**self).to_input_value()
    }
}

impl ToInputValue for Arguments {
    fn to_input_value(&self) -> InputValue {
        InputValue::Object(self.clone())
    }
}

/// Insertion-ordered map of argument (or input field) names to values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: Vec<(String, InputValue)>,
}

impl Arguments {
    /// Creates an empty argument map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous value under the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: InputValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    fn write_pairs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

/// Renders as a GraphQL argument list, e.g. `(id: "1", first: 10)`. Empty maps render as nothing.
impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        self.write_pairs(f)?;
        f.write_str(")")
    }
}

impl Serialize for Arguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, InputValue)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, InputValue)>>(iter: I) -> Self {
        let mut arguments = Arguments::new();
        for (key, value) in iter {
            arguments.insert(key, value);
        }
        arguments
    }
}

impl<K: Into<String>, const N: usize> From<[(K, InputValue); N]> for Arguments {
    fn from(entries: [(K, InputValue); N]) -> Self {
        entries.into_iter().collect()
    }
}
