//! # gqlforge-codegen
//!
//! Compiles a GraphQL schema (SDL) into a statically-typed Rust client.
//!
//! For every schema type the generator emits one artifact under
//! `<namespace>::types`: enums, input objects, output objects with hydrated
//! fields, interface traits and custom scalar markers. Every output object
//! also gets a `<Type>FieldSelection` builder, and the root module gets one
//! `<Short>Service` with a method per query and mutation. Generated code
//! depends only on the `gqlforge-client` runtime.
//!
//! ```no_run
//! use gqlforge_codegen::{generate_from_file, GenerateOptions};
//! use std::path::Path;
//!
//! let written = generate_from_file(
//!     Path::new("schema.graphql"),
//!     Path::new("src/graphql"),
//!     &GenerateOptions::default(),
//! )?;
//! println!("wrote {} files", written.len());
//! # Ok::<(), gqlforge_codegen::GeneratorError>(())
//! ```

#![warn(missing_docs)]

pub mod backends;
pub mod config;
pub mod error;
pub mod generators;
pub mod ir;
pub mod pipeline;
pub mod registry;
pub mod schema;
pub mod writer;

pub use backends::{get_backend, Backend, BackendError, GeneratedFile, RustBackend};
pub use config::{Config, GenerateOptions};
pub use error::GeneratorError;
pub use pipeline::{generate_from_file, generate_from_sdl, generate_models};
pub use registry::{Namespace, SubstitutionTable, TypeRegistry};
pub use schema::parse_sdl;
pub use writer::CodeWriter;
