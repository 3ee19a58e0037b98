//! Type registry
//!
//! Every top-level definition is classified into exactly one [`Category`] and
//! indexed by its GraphQL name. Fields of the query and mutation root types
//! become [`OperationDefinition`]s instead of generated types. Type references
//! are resolved lazily, at generation time, so forward references are fine.

use crate::error::GeneratorError;
use crate::schema::{Definition, FieldDef, SchemaDocument, TypeRef};
use heck::ToUpperCamelCase;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// GraphQL type name → fully qualified Rust path replacing the generated artifact
pub type SubstitutionTable = BTreeMap<String, String>;

/// The category a registered type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    CustomScalar,
    Enum,
    Union,
    InputObject,
    OutputObject,
    Interface,
}

impl Category {
    fn of(definition: &Definition) -> Self {
        match definition {
            Definition::Scalar(_) => Category::CustomScalar,
            Definition::Enum(_) => Category::Enum,
            Definition::Union(_) => Category::Union,
            Definition::InputObject(_) => Category::InputObject,
            Definition::Object(_) => Category::OutputObject,
            Definition::Interface(_) => Category::Interface,
        }
    }

    /// Human-readable label used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Category::CustomScalar => "custom scalar",
            Category::Enum => "enum",
            Category::Union => "union",
            Category::InputObject => "input object",
            Category::OutputObject => "output object",
            Category::Interface => "interface",
        }
    }

    /// Unions and interfaces have no concrete decode path.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Category::Union | Category::Interface)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed built-in scalar mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    /// `Int`
    Integer,
    /// `Float`
    Float,
    /// `Boolean`
    Boolean,
    /// `String` and `ID`
    Text,
}

impl Primitive {
    /// Maps a built-in scalar name, or `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Int" => Some(Primitive::Integer),
            "Float" => Some(Primitive::Float),
            "Boolean" => Some(Primitive::Boolean),
            "String" | "ID" => Some(Primitive::Text),
            _ => None,
        }
    }
}

/// Root operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// `query` or `mutation`
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

/// The root module path generated artifacts live under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    root: String,
}

impl Namespace {
    /// Validates and wraps a `::`-separated module path such as `crate::graphql`.
    pub fn new(root: impl Into<String>) -> Result<Self, GeneratorError> {
        let root = root.into();
        let segments: Vec<&str> = root.split("::").collect();

        let valid = segments.iter().enumerate().all(|(i, segment)| {
            let is_path_keyword = matches!(*segment, "crate" | "self" | "super");
            is_identifier(segment) && (!is_path_keyword || i == 0 || *segment == "super")
        });

        if root.is_empty() || !valid {
            return Err(GeneratorError::Config(format!(
                "invalid namespace `{root}`: expected `::`-separated identifiers"
            )));
        }
        Ok(Self { root })
    }

    /// The full root path.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Module path segments below the crate root, e.g. `["graphql"]` for `crate::graphql`.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.root.split("::")
    }

    /// `<root>::types::<Capitalized>`
    pub fn generated_name(&self, graphql_name: &str) -> String {
        format!("{}::types::{}", self.root, capitalize(graphql_name))
    }

    /// `<root>::<Capitalized>FieldSelection`
    pub fn selection_name(&self, graphql_name: &str) -> String {
        format!("{}::{}FieldSelection", self.root, capitalize(graphql_name))
    }

    /// Upper-camel-cased last segment of the root, e.g. `Graphql` for `crate::graphql`.
    pub fn short_name(&self) -> String {
        self.root
            .rsplit("::")
            .next()
            .unwrap_or(&self.root)
            .to_upper_camel_case()
    }

    /// `<root>::<Short>Service`
    pub fn service_name(&self) -> String {
        format!("{}::{}Service", self.root, self.short_name())
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self {
            root: "crate::graphql".to_string(),
        }
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    segment != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Upper-cases the first character and leaves the rest alone.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A registered schema type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    /// GraphQL type name
    pub graphql_name: String,
    /// Owned copy of the definition
    pub definition: Definition,
    /// Category tag
    pub category: Category,
    /// Canonical generated artifact path
    pub generated_name: String,
    /// Externally supplied replacement path
    pub substitution: Option<String>,
}

impl TypeDefinition {
    /// The path references resolve to: the substitution if configured, else the generated name.
    pub fn artifact_name(&self) -> &str {
        self.substitution.as_deref().unwrap_or(&self.generated_name)
    }

    /// Whether this type is provided externally and gets no primary artifact.
    pub fn is_substituted(&self) -> bool {
        self.substitution.is_some()
    }
}

/// A root field of the query or mutation type
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDefinition {
    /// Query or mutation
    pub kind: OperationKind,
    /// Root field name
    pub name: String,
    /// The root field declaration
    pub field: FieldDef,
}

/// Target of a resolved base reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedTarget {
    /// One of the five built-in scalars
    Builtin(Primitive),
    /// A registered type
    Registered {
        /// GraphQL name
        graphql_name: String,
        /// Category of the type
        category: Category,
        /// Substitution or generated path
        artifact: String,
    },
}

/// Shape of a resolved reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A base type
    Named(NamedTarget),
    /// A list of the element type
    List(Box<ResolvedType>),
}

/// A fully resolved type reference; every layer carries its own nullability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Whether this layer may be null
    pub nullable: bool,
    /// What this layer holds
    pub shape: Shape,
}

impl ResolvedType {
    /// The innermost target.
    pub fn base(&self) -> &NamedTarget {
        match &self.shape {
            Shape::Named(target) => target,
            Shape::List(element) => element.base(),
        }
    }

    /// Whether the outermost layer is a list.
    pub fn is_list(&self) -> bool {
        matches!(self.shape, Shape::List(_))
    }

    /// Whether values of this type are held in a list container.
    pub fn needs_container(&self) -> bool {
        self.is_list()
    }

    /// Category of the base type, `None` for built-in scalars.
    pub fn base_category(&self) -> Option<Category> {
        match self.base() {
            NamedTarget::Builtin(_) => None,
            NamedTarget::Registered { category, .. } => Some(*category),
        }
    }
}

/// Registered types and operations for one schema
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    namespace: Namespace,
    types: Vec<TypeDefinition>,
    index: HashMap<String, usize>,
    queries: Vec<OperationDefinition>,
    mutations: Vec<OperationDefinition>,
}

impl TypeRegistry {
    /// Creates an empty registry under `namespace`.
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            types: Vec::new(),
            index: HashMap::new(),
            queries: Vec::new(),
            mutations: Vec::new(),
        }
    }

    /// Registers every definition of `document`, then applies `substitutions`.
    pub fn build(
        document: SchemaDocument,
        namespace: Namespace,
        substitutions: &SubstitutionTable,
    ) -> Result<Self, GeneratorError> {
        let mut registry = Self::new(namespace);
        let roots = document.roots;
        let mut seen_roots = HashSet::new();

        for definition in document.definitions {
            let name = definition.name().to_string();
            let root = match &definition {
                Definition::Object(object) if object.name == roots.query => Some(OperationKind::Query),
                Definition::Object(object) if object.name == roots.mutation => {
                    Some(OperationKind::Mutation)
                }
                _ => None,
            };
            if seen_roots.contains(&name) || (root.is_some() && registry.index.contains_key(&name)) {
                return Err(GeneratorError::DuplicateDefinition { name });
            }
            match root {
                Some(kind) => {
                    if let Definition::Object(object) = &definition {
                        registry.register_operations(kind, &object.fields)?;
                    }
                    seen_roots.insert(name);
                }
                None => registry.register(definition)?,
            }
        }

        for (graphql_name, path) in substitutions {
            registry.substitute(graphql_name, path)?;
        }

        tracing::info!(
            types = registry.types.len(),
            queries = registry.queries.len(),
            mutations = registry.mutations.len(),
            "registered schema"
        );

        Ok(registry)
    }

    /// Classifies and indexes one definition.
    pub fn register(&mut self, definition: Definition) -> Result<(), GeneratorError> {
        let name = definition.name().to_string();

        if Primitive::from_name(&name).is_some() {
            if matches!(definition, Definition::Scalar(_)) {
                tracing::warn!(scalar = %name, "ignoring redeclared built-in scalar");
                return Ok(());
            }
            return Err(GeneratorError::DuplicateDefinition { name });
        }
        if self.index.contains_key(&name) {
            return Err(GeneratorError::DuplicateDefinition { name });
        }

        let category = Category::of(&definition);
        tracing::debug!(type_name = %name, %category, "registering type");

        self.index.insert(name.clone(), self.types.len());
        self.types.push(TypeDefinition {
            generated_name: self.namespace.generated_name(&name),
            graphql_name: name,
            definition,
            category,
            substitution: None,
        });
        Ok(())
    }

    fn register_operations(
        &mut self,
        kind: OperationKind,
        fields: &[FieldDef],
    ) -> Result<(), GeneratorError> {
        let operations = match kind {
            OperationKind::Query => &mut self.queries,
            OperationKind::Mutation => &mut self.mutations,
        };

        for field in fields {
            if operations.iter().any(|op| op.name == field.name) {
                return Err(GeneratorError::DuplicateOperation {
                    kind: kind.as_str(),
                    name: field.name.clone(),
                });
            }
            operations.push(OperationDefinition {
                kind,
                name: field.name.clone(),
                field: field.clone(),
            });
        }
        Ok(())
    }

    fn substitute(&mut self, graphql_name: &str, path: &str) -> Result<(), GeneratorError> {
        if path.trim().is_empty() {
            return Err(GeneratorError::Config(format!(
                "substitution for `{graphql_name}` has an empty path"
            )));
        }
        match self.index.get(graphql_name) {
            Some(&position) => {
                tracing::debug!(type_name = %graphql_name, %path, "substituting type");
                self.types[position].substitution = Some(path.to_string());
            }
            None => {
                tracing::warn!(type_name = %graphql_name, "substitution names no registered type; ignoring");
            }
        }
        Ok(())
    }

    /// The root namespace.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Category of `name`, or `None` if it is not registered.
    pub fn type_of(&self, name: &str) -> Option<Category> {
        self.definition_for(name).map(|def| def.category)
    }

    /// The registered definition for `name`.
    pub fn definition_for(&self, name: &str) -> Option<&TypeDefinition> {
        self.index.get(name).map(|&position| &self.types[position])
    }

    /// Every registered definition of `category`, in declaration order.
    pub fn definitions(&self, category: Category) -> impl Iterator<Item = &TypeDefinition> {
        self.types.iter().filter(move |def| def.category == category)
    }

    /// Query root fields in declaration order.
    pub fn queries(&self) -> &[OperationDefinition] {
        &self.queries
    }

    /// Mutation root fields in declaration order.
    pub fn mutations(&self) -> &[OperationDefinition] {
        &self.mutations
    }

    /// Whether the reference is a list or names anything other than a built-in scalar.
    pub fn is_non_scalar(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::NonNull(inner) => self.is_non_scalar(inner),
            TypeRef::List(_) => true,
            TypeRef::Named(name) => Primitive::from_name(name).is_none(),
        }
    }

    /// True unless the outermost layer is NonNull.
    pub fn allows_null(&self, ty: &TypeRef) -> bool {
        !ty.is_non_null()
    }

    /// Resolves every wrapper layer of `ty`. `context` names the reference site for diagnostics.
    pub fn resolve(&self, ty: &TypeRef, context: &str) -> Result<ResolvedType, GeneratorError> {
        self.resolve_layer(ty, true, context)
    }

    fn resolve_layer(
        &self,
        ty: &TypeRef,
        nullable: bool,
        context: &str,
    ) -> Result<ResolvedType, GeneratorError> {
        match ty {
            TypeRef::NonNull(inner) => self.resolve_layer(inner, false, context),
            TypeRef::List(element) => Ok(ResolvedType {
                nullable,
                shape: Shape::List(Box::new(self.resolve_layer(element, true, context)?)),
            }),
            TypeRef::Named(name) => Ok(ResolvedType {
                nullable,
                shape: Shape::Named(self.resolve_name(name, context)?),
            }),
        }
    }

    fn resolve_name(&self, name: &str, context: &str) -> Result<NamedTarget, GeneratorError> {
        if let Some(primitive) = Primitive::from_name(name) {
            return Ok(NamedTarget::Builtin(primitive));
        }
        let def = self
            .definition_for(name)
            .ok_or_else(|| GeneratorError::unknown_type(name, context))?;
        Ok(NamedTarget::Registered {
            graphql_name: def.graphql_name.clone(),
            category: def.category,
            artifact: def.artifact_name().to_string(),
        })
    }
}
