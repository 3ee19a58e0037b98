//! Schema definition model
//!
//! An owned, parser-independent view of an SDL document. [`parse_sdl`] is the
//! only place that touches `graphql-parser` types; everything downstream works
//! on [`Definition`] and [`TypeRef`].

use crate::error::GeneratorError;
use graphql_parser::schema as gql;
use std::fmt;

/// A type reference with its List/NonNull wrapper chain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A bare type name
    Named(String),
    /// `[T]`
    List(Box<TypeRef>),
    /// `T!`
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// `Name`
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// `[inner]`
    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// `inner!`
    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(inner))
    }

    /// The innermost type name, whatever wrappers surround it.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_name(),
        }
    }

    /// Whether the outermost layer is NonNull.
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// An argument or input object field
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDef {
    /// Wire name
    pub name: String,
    /// SDL description
    pub description: Option<String>,
    /// Declared type
    pub ty: TypeRef,
    /// Default value, rendered as a GraphQL literal
    pub default_value: Option<String>,
}

impl InputValueDef {
    /// Whether the value may be left out: nullable or defaulted.
    pub fn is_optional(&self) -> bool {
        !self.ty.is_non_null() || self.default_value.is_some()
    }
}

/// An output field with its arguments
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Wire name
    pub name: String,
    /// SDL description
    pub description: Option<String>,
    /// Declared arguments
    pub arguments: Vec<InputValueDef>,
    /// Declared type
    pub ty: TypeRef,
}

/// `scalar Name`
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarDef {
    /// Type name
    pub name: String,
    /// SDL description
    pub description: Option<String>,
}

/// One value of an enum
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDef {
    /// Wire name, case preserved
    pub name: String,
    /// SDL description
    pub description: Option<String>,
}

/// `enum Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    /// Type name
    pub name: String,
    /// SDL description
    pub description: Option<String>,
    /// Values in declaration order
    pub values: Vec<EnumValueDef>,
}

/// `union Name = A | B`
#[derive(Debug, Clone, PartialEq)]
pub struct UnionDef {
    /// Type name
    pub name: String,
    /// SDL description
    pub description: Option<String>,
    /// Member type names
    pub members: Vec<String>,
}

/// `input Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectDef {
    /// Type name
    pub name: String,
    /// SDL description
    pub description: Option<String>,
    /// Fields in declaration order
    pub fields: Vec<InputValueDef>,
}

/// `type Name implements I { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDef {
    /// Type name
    pub name: String,
    /// SDL description
    pub description: Option<String>,
    /// Implemented interfaces
    pub interfaces: Vec<String>,
    /// Fields in declaration order
    pub fields: Vec<FieldDef>,
}

/// `interface Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDef {
    /// Type name
    pub name: String,
    /// SDL description
    pub description: Option<String>,
    /// Fields in declaration order
    pub fields: Vec<FieldDef>,
}

/// A top-level type definition
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// Custom scalar
    Scalar(ScalarDef),
    /// Enum
    Enum(EnumDef),
    /// Union
    Union(UnionDef),
    /// Input object
    InputObject(InputObjectDef),
    /// Output object
    Object(ObjectDef),
    /// Interface
    Interface(InterfaceDef),
}

impl Definition {
    /// The defined type name.
    pub fn name(&self) -> &str {
        match self {
            Definition::Scalar(def) => &def.name,
            Definition::Enum(def) => &def.name,
            Definition::Union(def) => &def.name,
            Definition::InputObject(def) => &def.name,
            Definition::Object(def) => &def.name,
            Definition::Interface(def) => &def.name,
        }
    }

    /// The SDL description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Definition::Scalar(def) => def.description.as_deref(),
            Definition::Enum(def) => def.description.as_deref(),
            Definition::Union(def) => def.description.as_deref(),
            Definition::InputObject(def) => def.description.as_deref(),
            Definition::Object(def) => def.description.as_deref(),
            Definition::Interface(def) => def.description.as_deref(),
        }
    }
}

/// Names of the object types whose fields are root operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootOperations {
    /// Query root type name
    pub query: String,
    /// Mutation root type name
    pub mutation: String,
}

impl Default for RootOperations {
    fn default() -> Self {
        Self {
            query: "Query".to_string(),
            mutation: "Mutation".to_string(),
        }
    }
}

/// A parsed SDL document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDocument {
    /// Type definitions in declaration order
    pub definitions: Vec<Definition>,
    /// Root operation type names
    pub roots: RootOperations,
}

/// Parse an SDL document into the owned definition model
pub fn parse_sdl(sdl: &str) -> Result<SchemaDocument, GeneratorError> {
    let document =
        gql::parse_schema::<String>(sdl).map_err(|e| GeneratorError::Parse(e.to_string()))?;

    let mut schema = SchemaDocument::default();

    for definition in document.definitions {
        match definition {
            gql::Definition::SchemaDefinition(root) => {
                if let Some(query) = root.query {
                    schema.roots.query = query;
                }
                if let Some(mutation) = root.mutation {
                    schema.roots.mutation = mutation;
                }
            }
            gql::Definition::TypeDefinition(type_def) => {
                schema.definitions.push(convert_definition(type_def));
            }
            gql::Definition::TypeExtension(extension) => {
                tracing::warn!(
                    type_name = extension_name(&extension),
                    "type extensions are not applied; ignoring"
                );
            }
            gql::Definition::DirectiveDefinition(directive) => {
                tracing::warn!(directive = %directive.name, "directive definitions are not applied; ignoring");
            }
        }
    }

    tracing::info!(
        definitions = schema.definitions.len(),
        query_root = %schema.roots.query,
        mutation_root = %schema.roots.mutation,
        "parsed SDL document"
    );

    Ok(schema)
}

fn convert_definition(type_def: gql::TypeDefinition<'_, String>) -> Definition {
    match type_def {
        gql::TypeDefinition::Scalar(scalar) => Definition::Scalar(ScalarDef {
            name: scalar.name,
            description: scalar.description,
        }),
        gql::TypeDefinition::Enum(enum_type) => Definition::Enum(EnumDef {
            name: enum_type.name,
            description: enum_type.description,
            values: enum_type
                .values
                .into_iter()
                .map(|value| EnumValueDef {
                    name: value.name,
                    description: value.description,
                })
                .collect(),
        }),
        gql::TypeDefinition::Union(union) => Definition::Union(UnionDef {
            name: union.name,
            description: union.description,
            members: union.types,
        }),
        gql::TypeDefinition::InputObject(input) => Definition::InputObject(InputObjectDef {
            name: input.name,
            description: input.description,
            fields: input.fields.into_iter().map(convert_input_value).collect(),
        }),
        gql::TypeDefinition::Object(object) => Definition::Object(ObjectDef {
            name: object.name,
            description: object.description,
            interfaces: object.implements_interfaces,
            fields: object.fields.into_iter().map(convert_field).collect(),
        }),
        gql::TypeDefinition::Interface(interface) => Definition::Interface(InterfaceDef {
            name: interface.name,
            description: interface.description,
            fields: interface.fields.into_iter().map(convert_field).collect(),
        }),
    }
}

fn convert_field(field: gql::Field<'_, String>) -> FieldDef {
    FieldDef {
        name: field.name,
        description: field.description,
        arguments: field.arguments.into_iter().map(convert_input_value).collect(),
        ty: convert_type(field.field_type),
    }
}

fn convert_input_value(value: gql::InputValue<'_, String>) -> InputValueDef {
    InputValueDef {
        name: value.name,
        description: value.description,
        ty: convert_type(value.value_type),
        default_value: value.default_value.map(|v| v.to_string()),
    }
}

fn convert_type(ty: gql::Type<'_, String>) -> TypeRef {
    match ty {
        gql::Type::NamedType(name) => TypeRef::Named(name),
        gql::Type::ListType(inner) => TypeRef::list(convert_type(*inner)),
        gql::Type::NonNullType(inner) => TypeRef::non_null(convert_type(*inner)),
    }
}

fn extension_name<'e>(extension: &'e gql::TypeExtension<'_, String>) -> &'e str {
    match extension {
        gql::TypeExtension::Scalar(ext) => &ext.name,
        gql::TypeExtension::Object(ext) => &ext.name,
        gql::TypeExtension::Interface(ext) => &ext.name,
        gql::TypeExtension::Union(ext) => &ext.name,
        gql::TypeExtension::Enum(ext) => &ext.name,
        gql::TypeExtension::InputObject(ext) => &ext.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_categories() {
        let sdl = r#"
            scalar DateTime
            enum Color { RED green }
            union SearchResult = User | Post
            input NewUser { name: String! nickname: String age: Int = 0 }
            interface Node { id: ID! }
            "A registered user"
            type User implements Node { id: ID! friends(first: Int): [User!]! }
            type Post { title: String }
        "#;

        let schema = parse_sdl(sdl).unwrap();
        let names: Vec<_> = schema.definitions.iter().map(Definition::name).collect();
        assert_eq!(
            names,
            vec!["DateTime", "Color", "SearchResult", "NewUser", "Node", "User", "Post"]
        );

        let Definition::Enum(color) = &schema.definitions[1] else {
            panic!("expected enum");
        };
        assert_eq!(color.values[1].name, "green");

        let Definition::InputObject(input) = &schema.definitions[3] else {
            panic!("expected input object");
        };
        assert!(!input.fields[0].is_optional());
        assert!(input.fields[1].is_optional());
        assert_eq!(input.fields[2].default_value.as_deref(), Some("0"));
        assert!(input.fields[2].is_optional());

        let Definition::Object(user) = &schema.definitions[5] else {
            panic!("expected object");
        };
        assert_eq!(user.description.as_deref(), Some("A registered user"));
        assert_eq!(user.interfaces, vec!["Node".to_string()]);
        assert_eq!(user.fields[1].ty.to_string(), "[User!]!");
        assert_eq!(user.fields[1].arguments[0].name, "first");
    }

    #[test]
    fn test_wrapper_chain_is_preserved() {
        let schema = parse_sdl("type T { a: [[Int]!] }").unwrap();
        let Definition::Object(object) = &schema.definitions[0] else {
            panic!("expected object");
        };

        assert_eq!(
            object.fields[0].ty,
            TypeRef::list(TypeRef::non_null(TypeRef::list(TypeRef::named("Int"))))
        );
        assert_eq!(object.fields[0].ty.base_name(), "Int");
        assert!(!object.fields[0].ty.is_non_null());
    }

    #[test]
    fn test_schema_block_renames_roots() {
        let schema = parse_sdl(
            "schema { query: RootQuery mutation: RootMutation } type RootQuery { a: Int }",
        )
        .unwrap();

        assert_eq!(schema.roots.query, "RootQuery");
        assert_eq!(schema.roots.mutation, "RootMutation");
    }

    #[test]
    fn test_extensions_are_skipped() {
        let schema = parse_sdl("type A { x: Int } extend type A { y: Int }").unwrap();
        assert_eq!(schema.definitions.len(), 1);
    }

    #[test]
    fn test_malformed_sdl_is_a_parse_error() {
        let err = parse_sdl("type { broken").unwrap_err();
        assert!(matches!(err, GeneratorError::Parse(_)));
    }
}
