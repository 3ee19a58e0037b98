//! Selection builders
//!
//! Every output object gets a `<Type>FieldSelection` with one fluent
//! `with_<field>` per field, substituted or not. So does every substituted
//! interface, over the interface's own fields. Object-typed fields take the
//! nested builder of their element type; declared arguments follow it.

use super::{member_name, plan_arguments, resolve_concrete, selected_object, Generate, Members};
use crate::error::GeneratorError;
use crate::ir::{
    Artifact, ClassModel, CodeModel, Constant, Dependency, Expr, Method, Param, Receiver, Returns,
    RuntimeItem, Stmt, TypeExpr, Visibility, SELECTION_STORE,
};
use crate::registry::{capitalize, Category, TypeRegistry};
use crate::schema::Definition;
use heck::ToShoutySnakeCase;

const NESTED_PARAM: &str = "selection";
const RESERVED_PARAMS: &[&str] = &[NESTED_PARAM, super::ARGUMENTS_LOCAL];

/// Emits one selection builder per output object and substituted interface
pub struct FieldSelectionGenerator;

impl Generate for FieldSelectionGenerator {
    fn name(&self) -> &'static str {
        "field selection"
    }

    fn build(&self, registry: &TypeRegistry) -> Result<Vec<CodeModel>, GeneratorError> {
        let mut models = Vec::new();

        let selectable = registry.definitions(Category::OutputObject).chain(
            registry
                .definitions(Category::Interface)
                .filter(|def| def.is_substituted()),
        );
        for def in selectable {
            let fields = match &def.definition {
                Definition::Object(object) => &object.fields,
                Definition::Interface(interface) => &interface.fields,
                _ => continue,
            };

            let name = format!("{}FieldSelection", capitalize(&def.graphql_name));
            let mut model = CodeModel::new(
                Vec::new(),
                &name,
                &def.graphql_name,
                Artifact::FieldSelection(ClassModel::default()),
            )
            .with_docs(Some(
                format!("Selects fields of `{}` for a request.", def.graphql_name).as_str(),
            ));
            model.depend_on_runtime(&[RuntimeItem::Arguments, RuntimeItem::FieldSelection]);

            let mut constant_names = Members::new(&name);
            let mut members = Members::new(&name);
            members.claim("new", "constructor")?;
            members.claim("into_selection", "selection accessor")?;

            let mut class = ClassModel::default();
            for field in fields {
                let context = format!("field {}.{}", def.graphql_name, field.name);
                let resolved = resolve_concrete(registry, &field.ty, &context)?;

                let constant = field.name.to_shouty_snake_case();
                constant_names.claim(&constant, context.as_str())?;
                class.constants.push(Constant {
                    name: constant.clone(),
                    value: field.name.clone(),
                });

                let method = format!("with_{}", member_name(&field.name));
                members.claim(&method, context.as_str())?;

                let mut params = Vec::new();
                let mut param_names = Members::new(format!("{name}::{method}"));

                let nested = match selected_object(&resolved) {
                    Some(target) => {
                        let builder = registry.namespace().selection_name(target);
                        if builder != registry.namespace().selection_name(&def.graphql_name) {
                            model.depend(Dependency::Artifact(builder.clone()));
                        }
                        param_names.claim(NESTED_PARAM, "nested selection")?;
                        params.push(Param::new(NESTED_PARAM, TypeExpr::Named(builder)));
                        Some(NESTED_PARAM.to_string())
                    }
                    None => None,
                };

                let plan = plan_arguments(
                    registry,
                    &mut model,
                    &format!("{}.{}", def.graphql_name, field.name),
                    &field.arguments,
                    RESERVED_PARAMS,
                    &mut param_names,
                )?;
                params.extend(plan.params);

                let mut body = plan.setup;
                body.push(Stmt::Select {
                    selection: Expr::Field {
                        base: Box::new(Expr::SelfValue),
                        name: SELECTION_STORE.to_string(),
                    },
                    field: Expr::Constant(constant),
                    arguments: plan.map,
                    nested,
                });
                body.push(Stmt::Return(Expr::SelfValue));

                class.methods.push(Method {
                    name: method,
                    docs: field.description.clone(),
                    visibility: Visibility::Public,
                    receiver: Receiver::Owned,
                    params,
                    returns: Returns::Value(TypeExpr::SelfType),
                    body,
                });
            }

            model.artifact = Artifact::FieldSelection(class);
            models.push(model);
        }

        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::tests::{registry, try_registry};
    use crate::registry::Primitive;

    fn class(model: &CodeModel) -> &ClassModel {
        match &model.artifact {
            Artifact::FieldSelection(class) => class,
            other => panic!("expected field selection, got {other:?}"),
        }
    }

    #[test]
    fn test_one_method_per_field() {
        let registry = registry(
            "type User { id: ID! name: String friends(first: Int): [User!]! avatar(size: Int!): String }",
        );
        let models = FieldSelectionGenerator.build(&registry).unwrap();
        assert_eq!(models[0].name, "UserFieldSelection");
        assert!(models[0].module.is_empty());

        let class = class(&models[0]);
        let names: Vec<_> = class.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["with_id", "with_name", "with_friends", "with_avatar"]);

        let friends = &class.methods[2];
        let params: Vec<_> = friends.params.iter().map(|p| (p.name.as_str(), &p.ty)).collect();
        assert_eq!(
            params,
            vec![
                (
                    "selection",
                    &TypeExpr::Named("crate::graphql::UserFieldSelection".to_string())
                ),
                (
                    "first",
                    &TypeExpr::nullable(TypeExpr::Builtin(Primitive::Integer))
                ),
            ]
        );

        let avatar = &class.methods[3];
        assert!(matches!(
            &avatar.body[0],
            Stmt::Select { arguments: Expr::Arguments(entries), nested: None, .. } if entries.len() == 1
        ));
    }

    #[test]
    fn test_null_optional_arguments_are_omitted() {
        let registry = registry("type Query2 { a: Int } type User { friends(first: Int): [User] }");
        let models = FieldSelectionGenerator.build(&registry).unwrap();
        let user = models.iter().find(|m| m.name == "UserFieldSelection").unwrap();
        let friends = &class(user).methods[0];

        assert_eq!(
            friends.body[1],
            Stmt::InsertIfPresent {
                map: Expr::Local("arguments".to_string()),
                key: Expr::Str("first".to_string()),
                param: "first".to_string(),
            }
        );
    }

    #[test]
    fn test_substituted_objects_still_get_builders() {
        use crate::registry::{Namespace, SubstitutionTable};
        use crate::schema::parse_sdl;

        let mut substitutions = SubstitutionTable::new();
        substitutions.insert("Money".to_string(), "crate::money::Money".to_string());
        let registry = TypeRegistry::build(
            parse_sdl("type Money { cents: Int! }").unwrap(),
            Namespace::default(),
            &substitutions,
        )
        .unwrap();

        let models = FieldSelectionGenerator.build(&registry).unwrap();
        assert_eq!(models[0].name, "MoneyFieldSelection");
    }

    #[test]
    fn test_nested_builder_dependency() {
        let registry = registry("type Post { author: User } type User { id: ID! }");
        let models = FieldSelectionGenerator.build(&registry).unwrap();
        assert!(models[0].dependencies.contains(&Dependency::Artifact(
            "crate::graphql::UserFieldSelection".to_string()
        )));
    }

    #[test]
    fn test_abstract_fields_are_fatal() {
        let registry = try_registry("interface Node { id: ID } type Edge { node: Node }").unwrap();
        assert!(matches!(
            FieldSelectionGenerator.build(&registry),
            Err(GeneratorError::AbstractTypeReference { .. })
        ));
    }

    #[test]
    fn test_substituted_interfaces_get_builders() {
        use crate::registry::{Namespace, SubstitutionTable};
        use crate::schema::parse_sdl;

        let mut substitutions = SubstitutionTable::new();
        substitutions.insert("Node".to_string(), "crate::nodes::AnyNode".to_string());
        let registry = TypeRegistry::build(
            parse_sdl("interface Node { id: ID! } interface Named { name: String } type Edge { node: Node }")
                .unwrap(),
            Namespace::default(),
            &substitutions,
        )
        .unwrap();

        let models = FieldSelectionGenerator.build(&registry).unwrap();
        let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["EdgeFieldSelection", "NodeFieldSelection"]);

        let node = &class(&models[0]).methods[0];
        assert_eq!(
            node.params[0].ty,
            TypeExpr::Named("crate::graphql::NodeFieldSelection".to_string())
        );
        let id = &class(&models[1]).methods[0];
        assert_eq!(id.name, "with_id");
    }
}
