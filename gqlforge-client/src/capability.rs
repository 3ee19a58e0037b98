//! Capabilities implemented by generated artifacts
//!
//! Each generated category conforms to one of these traits, which is what the
//! [`decode`](crate::decode) helpers dispatch on.

use crate::{ClientError, InputValue, ToInputValue};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// A generated GraphQL enum
pub trait GraphQLEnum: Sized + Copy + 'static {
    /// GraphQL type name
    const TYPE_NAME: &'static str;

    /// Verbatim wire string of this value.
    fn as_str(&self) -> &'static str;

    /// Looks up the value with the given wire string.
    fn from_wire(value: &str) -> Option<Self>;

    /// Every value in declaration order.
    fn options() -> &'static [Self];
}

/// A generated output object that can be hydrated from a decoded response map
pub trait OutputObject: Sized {
    /// GraphQL type name
    const TYPE_NAME: &'static str;

    /// Builds an instance from a response map. Keys absent from `fields` stay unhydrated.
    fn from_map(fields: &Map<String, Value>) -> Result<Self, ClientError>;
}

/// A schema-declared scalar with externally supplied parse/serialize logic
pub trait CustomScalar: Sized {
    /// Parses the raw response value.
    fn parse(value: &Value) -> Result<Self, ClientError>;

    /// Serializes back to the raw wire value.
    fn serialize(&self) -> Value;
}

/// Marker implemented by the tag types generated for custom scalars
pub trait ScalarTag {
    /// GraphQL scalar name
    const NAME: &'static str;
}

/// Default representation of a custom scalar: the raw wire value, tagged with its schema name
pub struct Scalar<T: ScalarTag> {
    raw: Value,
    tag: PhantomData<fn() -> T>,
}

impl<T: ScalarTag> Scalar<T> {
    /// Wraps a raw wire value.
    #[must_use]
    pub fn new(raw: Value) -> Self {
        Self {
            raw,
            tag: PhantomData,
        }
    }

    /// The raw wire value.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Consumes the scalar, returning the raw wire value.
    pub fn into_raw(self) -> Value {
        self.raw
    }
}

impl<T: ScalarTag> CustomScalar for Scalar<T> {
    fn parse(value: &Value) -> Result<Self, ClientError> {
        Ok(Self::new(value.clone()))
    }

    fn serialize(&self) -> Value {
        self.raw.clone()
    }
}

impl<T: ScalarTag> ToInputValue for Scalar<T> {
    fn to_input_value(&self) -> InputValue {
        InputValue::from(self.raw.clone())
    }
}

impl<T: ScalarTag> Clone for Scalar<T> {
    fn clone(&self) -> Self {
        Self::new(self.raw.clone())
    }
}

impl<T: ScalarTag> PartialEq for Scalar<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: ScalarTag> fmt::Debug for Scalar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(T::NAME).field(&self.raw).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum DateTimeTag {}

    impl ScalarTag for DateTimeTag {
        const NAME: &'static str = "DateTime";
    }

    type DateTime = Scalar<DateTimeTag>;

    #[test]
    fn test_scalar_keeps_raw_value() {
        let raw = Value::String("2024-01-01T00:00:00Z".to_string());
        let parsed = DateTime::parse(&raw).unwrap();

        assert_eq!(parsed.raw(), &raw);
        assert_eq!(parsed.serialize(), raw);
        assert_eq!(
            parsed.to_input_value(),
            InputValue::String("2024-01-01T00:00:00Z".to_string())
        );
        assert_eq!(format!("{parsed:?}"), "DateTime(String(\"2024-01-01T00:00:00Z\"))");
    }
}
