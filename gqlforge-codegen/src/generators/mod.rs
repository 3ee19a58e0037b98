//! Per-category code model generators
//!
//! Each generator walks the registry for the definitions of its category and
//! emits one [`CodeModel`] per entity it owns. Generators never see each
//! other's output.

mod custom_scalar;
mod decode;
mod enum_type;
mod field_selection;
mod input_type;
mod interface;
mod output_type;
mod service;

pub use custom_scalar::CustomScalarGenerator;
pub use enum_type::EnumGenerator;
pub use field_selection::FieldSelectionGenerator;
pub use input_type::InputTypeGenerator;
pub use interface::InterfaceGenerator;
pub use output_type::OutputTypeGenerator;
pub use service::ServiceGenerator;

use crate::error::GeneratorError;
use crate::ir::{Artifact, CodeModel, Dependency, Expr, Param, RuntimeItem, Stmt, TypeExpr};
use crate::registry::{capitalize, Category, NamedTarget, ResolvedType, Shape, TypeDefinition, TypeRegistry};
use crate::schema::{InputValueDef, TypeRef};
use heck::ToSnakeCase;
use std::collections::HashMap;

/// Module holding primary artifacts, below the root namespace
pub const TYPES_MODULE: &str = "types";

/// A code model builder for one category
pub trait Generate {
    /// Generator name, for diagnostics
    fn name(&self) -> &'static str;

    /// Builds one code model per owned definition, in declaration order.
    fn build(&self, registry: &TypeRegistry) -> Result<Vec<CodeModel>, GeneratorError>;
}

/// Every generator, in emission order
pub fn all() -> Vec<Box<dyn Generate>> {
    vec![
        Box::new(CustomScalarGenerator),
        Box::new(EnumGenerator),
        Box::new(InputTypeGenerator),
        Box::new(InterfaceGenerator),
        Box::new(OutputTypeGenerator),
        Box::new(FieldSelectionGenerator),
        Box::new(ServiceGenerator),
    ]
}

/// Definitions of `category` that get a primary artifact
pub(crate) fn primary_definitions(
    registry: &TypeRegistry,
    category: Category,
) -> impl Iterator<Item = &TypeDefinition> {
    registry.definitions(category).filter(|def| {
        if let Some(path) = &def.substitution {
            tracing::debug!(type_name = %def.graphql_name, %path, "substituted; no artifact generated");
            return false;
        }
        true
    })
}

/// An empty primary model under `types`
pub(crate) fn primary_model(def: &TypeDefinition, artifact: Artifact) -> CodeModel {
    CodeModel::new(
        vec![TYPES_MODULE.to_string()],
        capitalize(&def.graphql_name),
        &def.graphql_name,
        artifact,
    )
    .with_docs(def.definition.description())
}

/// Rust member name for a GraphQL field or argument
pub(crate) fn member_name(graphql_name: &str) -> String {
    graphql_name.to_snake_case()
}

/// Resolves `ty`, rejecting unions and interfaces. A substituted interface
/// passes: its hand-written type decodes like an output object.
pub(crate) fn resolve_concrete(
    registry: &TypeRegistry,
    ty: &TypeRef,
    context: &str,
) -> Result<ResolvedType, GeneratorError> {
    let resolved = registry.resolve(ty, context)?;
    if let NamedTarget::Registered {
        graphql_name,
        category,
        ..
    } = resolved.base()
    {
        if category.is_abstract() && !is_substituted_interface(registry, graphql_name) {
            return Err(GeneratorError::AbstractTypeReference {
                type_name: graphql_name.clone(),
                category: category.label(),
                context: context.to_string(),
            });
        }
    }
    Ok(resolved)
}

/// Whether `graphql_name` is an interface replaced by a hand-written type
pub(crate) fn is_substituted_interface(registry: &TypeRegistry, graphql_name: &str) -> bool {
    registry
        .definition_for(graphql_name)
        .is_some_and(|def| def.category == Category::Interface && def.is_substituted())
}

/// Signature type of a resolved reference
pub(crate) fn type_expr(resolved: &ResolvedType) -> TypeExpr {
    let inner = match &resolved.shape {
        Shape::Named(NamedTarget::Builtin(primitive)) => TypeExpr::Builtin(*primitive),
        Shape::Named(NamedTarget::Registered { artifact, .. }) => TypeExpr::Named(artifact.clone()),
        Shape::List(element) => TypeExpr::list(type_expr(element)),
    };
    if resolved.nullable {
        TypeExpr::nullable(inner)
    } else {
        inner
    }
}

/// Records the base artifact of `resolved`, if any, as a dependency of `model`.
pub(crate) fn depend_on_type(model: &mut CodeModel, resolved: &ResolvedType) {
    if let NamedTarget::Registered { artifact, .. } = resolved.base() {
        model.depend(Dependency::Artifact(artifact.clone()));
    }
}

/// The type a field selects into, if its base type is an output object or
/// a substituted interface
pub(crate) fn selected_object(resolved: &ResolvedType) -> Option<&str> {
    match resolved.base() {
        NamedTarget::Registered {
            graphql_name,
            category: Category::OutputObject | Category::Interface,
            ..
        } => Some(graphql_name),
        _ => None,
    }
}

/// Tracks member names of one artifact and reports collisions
pub(crate) struct Members {
    owner: String,
    claimed: HashMap<String, String>,
}

impl Members {
    pub(crate) fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            claimed: HashMap::new(),
        }
    }

    /// Claims `name` for `claimant`.
    pub(crate) fn claim(
        &mut self,
        name: &str,
        claimant: impl Into<String>,
    ) -> Result<(), GeneratorError> {
        let claimant = claimant.into();
        if let Some(first) = self.claimed.get(name) {
            return Err(GeneratorError::NameCollision {
                name: format!("{}::{}", self.owner, name),
                first: first.clone(),
                second: claimant,
            });
        }
        self.claimed.insert(name.to_string(), claimant);
        Ok(())
    }
}

/// Parameters and statements that assemble a field's argument map
pub(crate) struct ArgumentPlan {
    /// One parameter per declared argument, in declaration order
    pub params: Vec<Param>,
    /// Statements run before the map is used
    pub setup: Vec<Stmt>,
    /// Expression evaluating to the finished map
    pub map: Expr,
}

/// Name of the local argument map when optional arguments need inserting
pub(crate) const ARGUMENTS_LOCAL: &str = "arguments";

/// Plans the argument map for `arguments`: required ones as a map literal,
/// optional ones inserted only when present.
///
/// Parameter names in `reserved` are suffixed with `_arg` so they never
/// shadow locals of the generated body.
pub(crate) fn plan_arguments(
    registry: &TypeRegistry,
    model: &mut CodeModel,
    owner: &str,
    arguments: &[InputValueDef],
    reserved: &[&str],
    params: &mut Members,
) -> Result<ArgumentPlan, GeneratorError> {
    let mut plan = ArgumentPlan {
        params: Vec::new(),
        setup: Vec::new(),
        map: Expr::Arguments(Vec::new()),
    };
    if arguments.is_empty() {
        return Ok(plan);
    }

    model.depend_on_runtime(&[RuntimeItem::Arguments, RuntimeItem::ToInputValue]);

    let mut required = Vec::new();
    let mut optional = Vec::new();

    for argument in arguments {
        let context = format!("argument {owner}({})", argument.name);
        let resolved = resolve_concrete(registry, &argument.ty, &context)?;
        depend_on_type(model, &resolved);

        let mut name = member_name(&argument.name);
        if reserved.contains(&name.as_str()) {
            name.push_str("_arg");
        }
        params.claim(&name, context)?;

        let value_ty = type_expr(&resolved).non_null().clone();
        if argument.is_optional() {
            plan.params.push(Param::new(&name, TypeExpr::nullable(value_ty)));
            optional.push((argument.name.clone(), name));
        } else {
            plan.params.push(Param::new(&name, value_ty));
            required.push((
                Expr::Str(argument.name.clone()),
                Expr::ToInput(Box::new(Expr::Local(name))),
            ));
        }
    }

    let literal = Expr::Arguments(required);
    if optional.is_empty() {
        plan.map = literal;
        return Ok(plan);
    }

    plan.setup.push(Stmt::Let {
        name: ARGUMENTS_LOCAL.to_string(),
        mutable: true,
        value: literal,
    });
    for (wire, param) in optional {
        plan.setup.push(Stmt::InsertIfPresent {
            map: Expr::Local(ARGUMENTS_LOCAL.to_string()),
            key: Expr::Str(wire),
            param,
        });
    }
    plan.map = Expr::Local(ARGUMENTS_LOCAL.to_string());
    Ok(plan)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::registry::{Namespace, SubstitutionTable};
    use crate::schema::parse_sdl;

    pub(crate) fn registry(sdl: &str) -> TypeRegistry {
        try_registry(sdl).unwrap()
    }

    pub(crate) fn try_registry(sdl: &str) -> Result<TypeRegistry, GeneratorError> {
        TypeRegistry::build(parse_sdl(sdl)?, Namespace::default(), &SubstitutionTable::new())
    }

    #[test]
    fn test_members_report_collisions() {
        let mut members = Members::new("User");
        members.claim("user_id", "field userId").unwrap();

        let err = members.claim("user_id", "field user_id").unwrap_err();
        match err {
            GeneratorError::NameCollision {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "User::user_id");
                assert_eq!(first, "field userId");
                assert_eq!(second, "field user_id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_abstract_types_are_rejected() {
        let registry = registry("union Pet = Cat type Cat { name: String } interface Node { id: ID }");

        for name in ["Pet", "Node"] {
            let ty = TypeRef::list(TypeRef::named(name));
            let err = resolve_concrete(&registry, &ty, "field Owner.pets").unwrap_err();
            assert!(matches!(
                err,
                GeneratorError::AbstractTypeReference { ref type_name, .. } if type_name == name
            ));
        }
    }

    #[test]
    fn test_substituted_interface_resolves() {
        let mut substitutions = SubstitutionTable::new();
        substitutions.insert("Node".to_string(), "crate::nodes::AnyNode".to_string());
        substitutions.insert("Pet".to_string(), "crate::pets::AnyPet".to_string());
        let registry = TypeRegistry::build(
            parse_sdl("union Pet = Cat type Cat { name: String } interface Node { id: ID }").unwrap(),
            Namespace::default(),
            &substitutions,
        )
        .unwrap();

        let node = resolve_concrete(&registry, &TypeRef::named("Node"), "query node").unwrap();
        assert_eq!(selected_object(&node), Some("Node"));
        assert_eq!(
            type_expr(&node),
            TypeExpr::nullable(TypeExpr::Named("crate::nodes::AnyNode".to_string()))
        );

        assert!(matches!(
            resolve_concrete(&registry, &TypeRef::named("Pet"), "query pet"),
            Err(GeneratorError::AbstractTypeReference { category: "union", .. })
        ));
    }

    #[test]
    fn test_type_expr_keeps_every_layer() {
        let registry = registry("enum Color { RED }");
        let ty = TypeRef::non_null(TypeRef::list(TypeRef::named("Color")));
        let resolved = registry.resolve(&ty, "test").unwrap();

        assert_eq!(
            type_expr(&resolved),
            TypeExpr::list(TypeExpr::nullable(TypeExpr::Named(
                "crate::graphql::types::Color".to_string()
            )))
        );
    }

    #[test]
    fn test_plan_arguments_splits_required_and_optional() {
        let registry = registry("type T { a: Int }");
        let schema = parse_sdl("type X { f(id: ID!, first: Int, after: String = \"\"): Int }").unwrap();
        let crate::schema::Definition::Object(object) = &schema.definitions[0] else {
            panic!("expected object");
        };

        let mut model = CodeModel::new(Vec::new(), "X", "X", Artifact::CustomScalar);
        let mut params = Members::new("X");
        let plan = plan_arguments(
            &registry,
            &mut model,
            "X.f",
            &object.fields[0].arguments,
            &["arguments"],
            &mut params,
        )
        .unwrap();

        let names: Vec<_> = plan.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "first", "after"]);
        assert!(matches!(plan.params[1].ty, TypeExpr::Nullable(_)));
        assert!(matches!(plan.params[2].ty, TypeExpr::Nullable(_)));
        assert_eq!(plan.setup.len(), 3);
        assert_eq!(plan.map, Expr::Local("arguments".to_string()));
        assert!(model
            .dependencies
            .contains(&Dependency::Runtime(RuntimeItem::ToInputValue)));
    }

    #[test]
    fn test_reserved_parameter_names_are_suffixed() {
        let registry = registry("type T { a: Int }");
        let schema = parse_sdl("type X { f(arguments: Int!): Int }").unwrap();
        let crate::schema::Definition::Object(object) = &schema.definitions[0] else {
            panic!("expected object");
        };

        let mut model = CodeModel::new(Vec::new(), "X", "X", Artifact::CustomScalar);
        let plan = plan_arguments(
            &registry,
            &mut model,
            "X.f",
            &object.fields[0].arguments,
            &["arguments"],
            &mut Members::new("X"),
        )
        .unwrap();

        assert_eq!(plan.params[0].name, "arguments_arg");
        assert!(plan.setup.is_empty());
        assert!(matches!(plan.map, Expr::Arguments(ref entries) if entries.len() == 1));
    }
}
