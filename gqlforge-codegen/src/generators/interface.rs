//! Interface artifacts: one read-only accessor per field, no setters

use super::{
    depend_on_type, member_name, primary_definitions, primary_model, resolve_concrete, type_expr,
    Generate, Members,
};
use crate::error::GeneratorError;
use crate::ir::{
    Artifact, CodeModel, InterfaceModel, Method, Receiver, Returns, RuntimeItem, Visibility,
};
use crate::registry::{Category, TypeRegistry};
use crate::schema::Definition;

/// Emits one accessor contract per interface
pub struct InterfaceGenerator;

impl Generate for InterfaceGenerator {
    fn name(&self) -> &'static str {
        "interface"
    }

    fn build(&self, registry: &TypeRegistry) -> Result<Vec<CodeModel>, GeneratorError> {
        let mut models = Vec::new();

        for def in primary_definitions(registry, Category::Interface) {
            let Definition::Interface(interface) = &def.definition else {
                continue;
            };

            let mut model = primary_model(def, Artifact::Interface(InterfaceModel { accessors: Vec::new() }));
            model.depend_on_runtime(&[RuntimeItem::ClientError]);

            let mut members = Members::new(&def.graphql_name);
            let mut accessors = Vec::with_capacity(interface.fields.len());

            for field in &interface.fields {
                let context = format!("field {}.{}", def.graphql_name, field.name);
                let resolved = resolve_concrete(registry, &field.ty, &context)?;
                depend_on_type(&mut model, &resolved);

                let name = member_name(&field.name);
                members.claim(&name, context)?;
                accessors.push(Method {
                    name,
                    docs: field.description.clone(),
                    visibility: Visibility::Public,
                    receiver: Receiver::Borrowed,
                    params: Vec::new(),
                    returns: Returns::Borrowed(type_expr(&resolved)),
                    body: Vec::new(),
                });
            }

            model.artifact = Artifact::Interface(InterfaceModel { accessors });
            models.push(model);
        }

        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::tests::{registry, try_registry};
    use crate::ir::TypeExpr;

    #[test]
    fn test_accessor_per_field() {
        let registry = registry("interface Node { id: ID! createdBy: User } type User { id: ID! }");
        let models = InterfaceGenerator.build(&registry).unwrap();

        let Artifact::Interface(interface) = &models[0].artifact else {
            panic!("expected interface");
        };
        let names: Vec<_> = interface.accessors.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["id", "created_by"]);
        assert!(interface.accessors.iter().all(|m| m.body.is_empty()));
        assert_eq!(
            interface.accessors[1].returns,
            Returns::Borrowed(TypeExpr::nullable(TypeExpr::Named(
                "crate::graphql::types::User".to_string()
            )))
        );
    }

    #[test]
    fn test_interface_fields_of_abstract_type_are_fatal() {
        let registry = try_registry("interface Node { parent: Node }").unwrap();
        assert!(matches!(
            InterfaceGenerator.build(&registry),
            Err(GeneratorError::AbstractTypeReference { category: "interface", .. })
        ));
    }
}
