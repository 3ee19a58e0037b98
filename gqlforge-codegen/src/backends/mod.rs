//! Backend implementations for code generation
//!
//! Each backend turns target-neutral code models into source files for a
//! specific language.

mod rust;

use crate::ir::CodeModel;
use crate::registry::Namespace;
use std::path::PathBuf;

pub use rust::RustBackend;

/// A rendered source file, relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// What the file was rendered from, for diagnostics
    pub origin: String,
}

/// A code generation backend
pub trait Backend: Send + Sync {
    /// Backend name (e.g., "rust")
    fn name(&self) -> &str;

    /// File extension for generated files
    fn file_extension(&self) -> &str;

    /// Render one artifact
    fn render(&self, model: &CodeModel, namespace: &Namespace) -> Result<GeneratedFile, BackendError>;

    /// Generate module index files (mod.rs, etc.) (optional)
    fn render_modules(
        &self,
        _models: &[CodeModel],
        _namespace: &Namespace,
    ) -> Result<Vec<GeneratedFile>, BackendError> {
        Ok(Vec::new())
    }
}

/// Backend errors
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("unknown backend: {0}")]
    UnknownBackend(String),

    #[error("code generation error: {0}")]
    CodeGenError(String),

    #[error("type mapping error: {0}")]
    TypeMappingError(String),

    #[error(
        "`{name}` (generated for `{graphql_name}`) would shadow the Rust prelude item of the same name; substitute `{graphql_name}` with an existing type"
    )]
    NameCollision { name: String, graphql_name: String },
}

/// Get a backend by name
pub fn get_backend(name: &str) -> Result<Box<dyn Backend>, BackendError> {
    match name.to_lowercase().as_str() {
        "rust" | "rs" => Ok(Box::new(RustBackend)),
        other => Err(BackendError::UnknownBackend(other.to_string())),
    }
}
