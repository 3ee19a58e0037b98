//! The "never hydrated" sentinel
//!
//! A nullable GraphQL field that legitimately returned `null` is
//! `Hydrated::Set(None)`; a field that was not part of the response is
//! `Hydrated::Unset`.

use crate::ClientError;

/// A field slot that may not have been populated from a response yet
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Hydrated<T> {
    /// The field was never populated
    #[default]
    Unset,
    /// The field was populated from a response
    Set(T),
}

impl<T> Hydrated<T> {
    /// Returns the hydrated value, or [`ClientError::Unhydrated`] naming `field`.
    pub fn get(&self, field: &'static str) -> Result<&T, ClientError> {
        match self {
            Hydrated::Set(value) => Ok(value),
            Hydrated::Unset => Err(ClientError::Unhydrated { field }),
        }
    }

    /// Whether the field was populated.
    #[must_use]
    pub fn is_set(&self) -> bool {
        matches!(self, Hydrated::Set(_))
    }

    /// Converts into an `Option`, dropping the distinction between unset and absent.
    pub fn into_option(self) -> Option<T> {
        match self {
            Hydrated::Set(value) => Some(value),
            Hydrated::Unset => None,
        }
    }
}

impl<T> From<T> for Hydrated<T> {
    fn from(value: T) -> Self {
        Hydrated::Set(value)
    }
}
