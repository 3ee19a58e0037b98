//! Error types for generated clients
//!
//! Every fallible operation on generated code reports a [`ClientError`].

/// Error type for generated client code
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// A getter was called on a field that was never hydrated
    #[error("field `{field}` was read before it was hydrated")]
    Unhydrated {
        /// Wire name of the field
        field: &'static str,
    },

    /// The response did not contain a required key
    #[error("response is missing field `{field}`")]
    MissingField {
        /// Wire name of the missing field
        field: String,
    },

    /// A response value did not have the expected shape
    #[error("expected {expected}, found {found}")]
    UnexpectedValue {
        /// What the decoder expected
        expected: &'static str,
        /// What the response contained
        found: String,
    },

    /// An enum value was not declared in the schema
    #[error("unknown value `{value}` for enum `{enum_name}`")]
    UnknownEnumValue {
        /// GraphQL enum name
        enum_name: &'static str,
        /// Value received on the wire
        value: String,
    },

    /// A custom scalar rejected its raw value
    #[error("invalid value for scalar `{scalar}`: {message}")]
    Scalar {
        /// GraphQL scalar name
        scalar: &'static str,
        /// Parser message
        message: String,
    },

    /// An object-returning field was requested without selecting any of its fields
    #[error("selection for `{action}` is empty; select at least one field")]
    EmptySelection {
        /// Root field being invoked
        action: String,
    },

    /// The transport failed to deliver the request
    #[error("transport error: {0}")]
    Transport(String),
}

impl ClientError {
    /// Creates a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub(crate) fn unexpected(expected: &'static str, found: &serde_json::Value) -> Self {
        let found = match found {
            serde_json::Value::Null => "null".to_string(),
            serde_json::Value::Bool(_) => "a boolean".to_string(),
            serde_json::Value::Number(n) => format!("number {n}"),
            serde_json::Value::String(s) => format!("string {s:?}"),
            serde_json::Value::Array(items) => format!("a list of {} items", items.len()),
            serde_json::Value::Object(_) => "an object".to_string(),
        };
        Self::UnexpectedValue { expected, found }
    }
}
