//! Run configuration
//!
//! Settings come from an optional `gqlforge.toml` and from the command line;
//! command-line values win. A file looks like:
//!
//! ```toml
//! schema = "schema.graphql"
//! output = "src/graphql"
//! namespace = "crate::graphql"
//! backend = "rust"
//!
//! [substitutions]
//! DateTime = "crate::scalars::Timestamp"
//! ```
//!
//! A substituted scalar is decoded through `gqlforge_client::CustomScalar`,
//! which the consuming crate can only implement for its own types. Wrap
//! foreign types such as `chrono::DateTime<Utc>` in a local newtype.

use crate::backends::get_backend;
use crate::error::GeneratorError;
use crate::registry::{Namespace, SubstitutionTable};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILENAME: &str = "gqlforge.toml";

const DEFAULT_BACKEND: &str = "rust";

/// Configuration as read from a file or assembled from flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SDL file to compile
    pub schema: Option<PathBuf>,
    /// Directory the namespace root maps to
    pub output: Option<PathBuf>,
    /// Root module path of the generated code
    pub namespace: Option<String>,
    /// Backend name
    pub backend: Option<String>,
    /// GraphQL type name to existing Rust type path
    pub substitutions: SubstitutionTable,
}

impl Config {
    /// Loads a configuration file. Relative `schema` and `output` paths are
    /// resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)
            .map_err(|err| GeneratorError::Config(format!("{}: {err}", path.display())))?;

        if let Some(base) = path.parent() {
            config.schema = config.schema.map(|p| base.join(p));
            config.output = config.output.map(|p| base.join(p));
        }
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, GeneratorError> {
        toml::from_str(contents).map_err(|err| GeneratorError::Config(err.to_string()))
    }

    /// Applies `overrides` on top of `self`; set values in `overrides` win and
    /// substitution tables are merged entry by entry.
    pub fn merge(mut self, overrides: Config) -> Self {
        self.schema = overrides.schema.or(self.schema);
        self.output = overrides.output.or(self.output);
        self.namespace = overrides.namespace.or(self.namespace);
        self.backend = overrides.backend.or(self.backend);
        self.substitutions.extend(overrides.substitutions);
        self
    }

    /// Validated generation options.
    pub fn options(&self) -> Result<GenerateOptions, GeneratorError> {
        let namespace = match &self.namespace {
            Some(root) => Namespace::new(root.as_str())?,
            None => Namespace::default(),
        };
        let backend = self.backend.as_deref().unwrap_or(DEFAULT_BACKEND).to_string();
        get_backend(&backend)?;

        Ok(GenerateOptions {
            namespace,
            backend,
            substitutions: self.substitutions.clone(),
        })
    }
}

/// Parses a `NAME=PATH` substitution flag.
pub fn parse_substitution(flag: &str) -> Result<(String, String), GeneratorError> {
    let (name, path) = flag.split_once('=').ok_or_else(|| {
        GeneratorError::Config(format!("invalid substitution `{flag}`: expected NAME=PATH"))
    })?;
    let (name, path) = (name.trim(), path.trim());
    if name.is_empty() || path.is_empty() {
        return Err(GeneratorError::Config(format!(
            "invalid substitution `{flag}`: expected NAME=PATH"
        )));
    }
    Ok((name.to_string(), path.to_string()))
}

/// Everything a generation run needs besides the schema text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Root module path of the generated code
    pub namespace: Namespace,
    /// Backend name
    pub backend: String,
    /// GraphQL type name to existing Rust type path
    pub substitutions: SubstitutionTable,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            namespace: Namespace::default(),
            backend: DEFAULT_BACKEND.to_string(),
            substitutions: SubstitutionTable::new(),
        }
    }
}
