//! Error types for code generation
//!
//! Every failure in the parse → register → generate → write pipeline is a
//! [`GeneratorError`]. All of them are fatal: nothing is written once one is raised.

use crate::backends::BackendError;
use crate::registry::Category;

/// Error type for code generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Code generation failed
    #[error("code generation error: {0}")]
    CodeGenError(String),

    /// Failed to parse the SDL document
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading the schema or writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A type reference names nothing registered
    #[error("unknown type `{type_name}` referenced by {context}")]
    UnknownType {
        /// Referenced GraphQL name
        type_name: String,
        /// Where the reference appears
        context: String,
    },

    /// Two definitions share a name
    #[error("type `{name}` is defined more than once")]
    DuplicateDefinition {
        /// GraphQL name
        name: String,
    },

    /// Two root fields share a name
    #[error("{kind} `{name}` is defined more than once")]
    DuplicateOperation {
        /// `query` or `mutation`
        kind: &'static str,
        /// Root field name
        name: String,
    },

    /// A field, argument or operation uses a union or interface as its type
    #[error(
        "{context} has abstract type `{type_name}` ({category}), which cannot be decoded{}",
        substitution_hint(.category, .type_name)
    )]
    AbstractTypeReference {
        /// Referenced GraphQL name
        type_name: String,
        /// Category of the referenced type
        category: &'static str,
        /// Where the reference appears
        context: String,
    },

    /// An object implements an interface without declaring one of its fields
    #[error("type `{object}` implements `{interface}` but has no field `{field}`")]
    MissingInterfaceField {
        /// Implementing object
        object: String,
        /// Interface name
        interface: String,
        /// Missing field
        field: String,
    },

    /// Two generated items would share a name
    #[error("name collision on `{name}`: {first} and {second}")]
    NameCollision {
        /// The colliding name or path
        name: String,
        /// First claimant
        first: String,
        /// Second claimant
        second: String,
    },

    /// Rendering a code model failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

fn substitution_hint(category: &str, type_name: &str) -> String {
    if category == Category::Interface.label() {
        format!(
            "; substitute `{type_name}` with a hand-written type that implements `OutputObject` \
             (`--substitute {type_name}=PATH` or `[substitutions]` in gqlforge.toml)"
        )
    } else {
        String::new()
    }
}

impl GeneratorError {
    /// Creates an unknown-type error for a reference found in `context`.
    pub fn unknown_type(type_name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abstract_reference(category: Category) -> GeneratorError {
        GeneratorError::AbstractTypeReference {
            type_name: "Node".to_string(),
            category: category.label(),
            context: "query node".to_string(),
        }
    }

    #[test]
    fn test_interface_reference_suggests_substitution() {
        let message = abstract_reference(Category::Interface).to_string();
        assert!(message.starts_with("query node has abstract type `Node` (interface)"));
        assert!(message.contains("substitute `Node` with a hand-written type"));
        assert!(message.contains("--substitute Node=PATH"));
    }

    #[test]
    fn test_union_reference_has_no_hint() {
        assert_eq!(
            abstract_reference(Category::Union).to_string(),
            "query node has abstract type `Node` (union), which cannot be decoded"
        );
    }
}
