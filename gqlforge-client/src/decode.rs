//! Response decoding helpers
//!
//! Generated factories compose these per field according to the field's type
//! category: `scalar`, `enumeration`, `object` and `custom_scalar` decode a
//! single value, `list` and `nullable` wrap another decoder.

use crate::{ClientError, CustomScalar, GraphQLEnum, Hydrated, OutputObject};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Decodes `key` from `fields`, leaving the slot unset when the key is absent.
pub fn field<T, D>(fields: &Map<String, Value>, key: &str, decode: D) -> Result<Hydrated<T>, ClientError>
where
    D: FnOnce(&Value) -> Result<T, ClientError>,
{
    match fields.get(key) {
        Some(value) => decode(value).map(Hydrated::Set),
        None => Ok(Hydrated::Unset),
    }
}

/// Decodes `key` from `fields`, failing when the key is absent.
pub fn required<T, D>(fields: &Map<String, Value>, key: &str, decode: D) -> Result<T, ClientError>
where
    D: FnOnce(&Value) -> Result<T, ClientError>,
{
    let value = fields.get(key).ok_or_else(|| ClientError::MissingField {
        field: key.to_string(),
    })?;
    decode(value)
}

/// Copies a built-in scalar value.
pub fn scalar<T: DeserializeOwned>(value: &Value) -> Result<T, ClientError> {
    T::deserialize(value).map_err(|_| ClientError::unexpected(std::any::type_name::<T>(), value))
}

/// Constructs an enum from its wire string.
pub fn enumeration<E: GraphQLEnum>(value: &Value) -> Result<E, ClientError> {
    let wire = value
        .as_str()
        .ok_or_else(|| ClientError::unexpected("an enum string", value))?;
    E::from_wire(wire).ok_or_else(|| ClientError::UnknownEnumValue {
        enum_name: E::TYPE_NAME,
        value: wire.to_string(),
    })
}

/// Recursively hydrates a nested output object.
pub fn object<O: OutputObject>(value: &Value) -> Result<O, ClientError> {
    let fields = value
        .as_object()
        .ok_or_else(|| ClientError::unexpected("an object", value))?;
    O::from_map(fields)
}

/// Parses a custom scalar through its own routine.
pub fn custom_scalar<S: CustomScalar>(value: &Value) -> Result<S, ClientError> {
    S::parse(value)
}

/// Decodes every element of a list, preserving order and count.
pub fn list<T, D>(value: &Value, decode: D) -> Result<Vec<T>, ClientError>
where
    D: Fn(&Value) -> Result<T, ClientError>,
{
    let items = value
        .as_array()
        .ok_or_else(|| ClientError::unexpected("a list", value))?;
    items.iter().map(decode).collect()
}

/// Maps `null` to `None`, otherwise decodes the value.
pub fn nullable<T, D>(value: &Value, decode: D) -> Result<Option<T>, ClientError>
where
    D: FnOnce(&Value) -> Result<T, ClientError>,
{
    if value.is_null() {
        Ok(None)
    } else {
        decode(value).map(Some)
    }
}
