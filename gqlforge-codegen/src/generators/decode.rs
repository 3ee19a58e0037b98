//! Decode dispatch shared by output factories and service methods

use crate::error::GeneratorError;
use crate::ir::Decoder;
use crate::registry::{Category, NamedTarget, ResolvedType, Shape};

/// Picks the decoder for each layer of `resolved`.
///
/// Nullable layers map null to null, lists decode element-wise, and the base
/// is dispatched on its category. Interfaces reaching this point passed
/// [`resolve_concrete`](super::resolve_concrete) as substitutions, so their
/// hand-written type decodes like an object.
pub(crate) fn decoder(resolved: &ResolvedType, context: &str) -> Result<Decoder, GeneratorError> {
    let decoder = match &resolved.shape {
        Shape::List(element) => Decoder::List(Box::new(decoder(element, context)?)),
        Shape::Named(NamedTarget::Builtin(primitive)) => Decoder::Scalar(*primitive),
        Shape::Named(NamedTarget::Registered {
            graphql_name,
            category,
            artifact,
        }) => match category {
            Category::Enum => Decoder::Enum(artifact.clone()),
            Category::OutputObject | Category::Interface => Decoder::Object(artifact.clone()),
            Category::CustomScalar => Decoder::CustomScalar(artifact.clone()),
            Category::InputObject => {
                return Err(GeneratorError::CodeGenError(format!(
                    "{context} has input object type `{graphql_name}`, which cannot appear in a response"
                )));
            }
            Category::Union => {
                return Err(GeneratorError::AbstractTypeReference {
                    type_name: graphql_name.clone(),
                    category: category.label(),
                    context: context.to_string(),
                });
            }
        },
    };

    Ok(if resolved.nullable {
        Decoder::Nullable(Box::new(decoder))
    } else {
        decoder
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::tests::registry;
    use crate::registry::Primitive;
    use crate::schema::TypeRef;

    #[test]
    fn test_dispatch_by_category() {
        let registry = registry(
            "scalar DateTime enum Color { RED } type User { id: ID! } input NewUser { name: String }",
        );
        let decode = |ty: TypeRef| decoder(&registry.resolve(&ty, "test").unwrap(), "test");

        assert_eq!(
            decode(TypeRef::non_null(TypeRef::named("Int"))).unwrap(),
            Decoder::Scalar(Primitive::Integer)
        );
        assert_eq!(
            decode(TypeRef::non_null(TypeRef::named("Color"))).unwrap(),
            Decoder::Enum("crate::graphql::types::Color".to_string())
        );
        assert_eq!(
            decode(TypeRef::named("DateTime")).unwrap(),
            Decoder::Nullable(Box::new(Decoder::CustomScalar(
                "crate::graphql::types::DateTime".to_string()
            )))
        );
        assert_eq!(
            decode(TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("User")))))
                .unwrap(),
            Decoder::List(Box::new(Decoder::Object("crate::graphql::types::User".to_string())))
        );
        assert!(matches!(
            decode(TypeRef::named("NewUser")),
            Err(GeneratorError::CodeGenError(_))
        ));
    }

    #[test]
    fn test_substituted_interface_decodes_as_object() {
        use crate::registry::{Namespace, SubstitutionTable, TypeRegistry};
        use crate::schema::parse_sdl;

        let mut substitutions = SubstitutionTable::new();
        substitutions.insert("Node".to_string(), "crate::nodes::AnyNode".to_string());
        let registry = TypeRegistry::build(
            parse_sdl("interface Node { id: ID! } union Pet = Cat type Cat { name: String }").unwrap(),
            Namespace::default(),
            &substitutions,
        )
        .unwrap();

        let node = registry.resolve(&TypeRef::non_null(TypeRef::named("Node")), "test").unwrap();
        assert_eq!(
            decoder(&node, "test").unwrap(),
            Decoder::Object("crate::nodes::AnyNode".to_string())
        );
        let pet = registry.resolve(&TypeRef::named("Pet"), "test").unwrap();
        assert!(matches!(
            decoder(&pet, "test"),
            Err(GeneratorError::AbstractTypeReference { category: "union", .. })
        ));
    }

    #[test]
    fn test_nested_nullable_layers() {
        let registry = registry("type T { a: Int }");
        let ty = TypeRef::list(TypeRef::list(TypeRef::named("String")));
        let resolved = registry.resolve(&ty, "test").unwrap();

        let nullable = |inner: Decoder| Decoder::Nullable(Box::new(inner));
        let list = |inner: Decoder| Decoder::List(Box::new(inner));
        assert_eq!(
            decoder(&resolved, "test").unwrap(),
            nullable(list(nullable(list(nullable(Decoder::Scalar(Primitive::Text))))))
        );
    }
}
