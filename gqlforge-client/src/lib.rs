//! # gqlforge-client
//!
//! Runtime support for GraphQL clients generated by `gqlforge-codegen`.
//!
//! Generated code builds on the pieces in this crate:
//! - [`Hydrated`] slots for output object fields
//! - [`decode`] helpers composed per field by generated factories
//! - [`Arguments`] and [`InputValue`] for arguments and input objects
//! - [`FieldSelection`] for selection builders
//! - [`Request`] and the [`Transport`] seam for generated services
//! - the [`GraphQLEnum`], [`OutputObject`], [`CustomScalar`] and [`ScalarTag`]
//!   capabilities

#![deny(missing_docs)]

mod capability;
pub mod decode;
mod error;
mod hydrated;
mod request;
mod selection;
mod transport;
mod value;

pub use capability::{CustomScalar, GraphQLEnum, OutputObject, Scalar, ScalarTag};
pub use error::ClientError;
pub use hydrated::Hydrated;
pub use request::{OperationKind, Request};
pub use selection::{FieldSelection, SelectedField};
pub use transport::Transport;
pub use value::{Arguments, InputValue, ToInputValue};

pub use serde_json;
pub use serde_json::{Map, Value};
