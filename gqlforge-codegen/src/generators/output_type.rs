//! Output object artifacts
//!
//! Every field is stored in a `Hydrated` slot
//! seeded unset by a private initializer. The `from_map` factory decodes each
//! key present in the response map; absent keys stay unset, so reading them
//! through a getter fails instead of returning a fabricated null.

use super::decode::decoder;
use super::{
    depend_on_type, is_substituted_interface, member_name, primary_definitions, primary_model,
    resolve_concrete, type_expr, Generate, Members,
};
use crate::error::GeneratorError;
use crate::ir::{
    Artifact, CodeModel, Conformance, Dependency, Expr, Method, OutputModel, Param, Presence,
    Property, Receiver, Returns, RuntimeItem, Stmt, TypeExpr, Visibility,
};
use crate::registry::{Category, NamedTarget, ResolvedType, TypeDefinition, TypeRegistry};
use crate::schema::{Definition, ObjectDef};
use std::collections::HashSet;

const INITIALIZER: &str = "unhydrated";
const FACTORY: &str = "from_map";
const OBJECT_LOCAL: &str = "object";
const FIELDS_PARAM: &str = "fields";

/// Emits one output artifact per object type
pub struct OutputTypeGenerator;

impl Generate for OutputTypeGenerator {
    fn name(&self) -> &'static str {
        "output type"
    }

    fn build(&self, registry: &TypeRegistry) -> Result<Vec<CodeModel>, GeneratorError> {
        let mut models = Vec::new();

        for def in primary_definitions(registry, Category::OutputObject) {
            let Definition::Object(object) = &def.definition else {
                continue;
            };
            models.push(build_object(registry, def, object)?);
        }

        Ok(models)
    }
}

fn build_object(
    registry: &TypeRegistry,
    def: &TypeDefinition,
    object: &ObjectDef,
) -> Result<CodeModel, GeneratorError> {
    let mut model = primary_model(
        def,
        Artifact::OutputObject(OutputModel {
            properties: Vec::new(),
            methods: Vec::new(),
            implements: Vec::new(),
        }),
    );
    model.depend_on_runtime(&[
        RuntimeItem::ClientError,
        RuntimeItem::Decode,
        RuntimeItem::Hydrated,
        RuntimeItem::Map,
        RuntimeItem::OutputObject,
        RuntimeItem::Value,
    ]);

    let mut members = Members::new(&def.graphql_name);
    members.claim(INITIALIZER, "initializer")?;
    members.claim(FACTORY, "factory")?;

    let mut properties = Vec::with_capacity(object.fields.len());
    let mut getters = Vec::with_capacity(object.fields.len());
    let mut hydrate = Vec::with_capacity(object.fields.len());

    for field in &object.fields {
        let context = format!("field {}.{}", def.graphql_name, field.name);
        let resolved = resolve_concrete(registry, &field.ty, &context)?;
        depend_on_type(&mut model, &resolved);

        let name = member_name(&field.name);
        members.claim(&name, context.as_str())?;
        let boxed = inline_object(registry, &resolved)
            .is_some_and(|target| reaches(registry, target, &def.graphql_name));
        let mut ty = type_expr(&resolved);
        let mut value_decoder = decoder(&resolved, &context)?;
        if boxed {
            tracing::debug!(%context, "boxing recursive field");
            ty = ty.boxed();
            value_decoder = value_decoder.boxed();
        }

        getters.push(Method {
            name: name.clone(),
            docs: field.description.clone(),
            visibility: Visibility::Public,
            receiver: Receiver::Borrowed,
            params: Vec::new(),
            returns: Returns::Borrowed(ty.clone()),
            body: vec![Stmt::Return(Expr::ReadHydrated {
                property: name.clone(),
                wire_name: field.name.clone(),
                ty: ty.clone(),
            })],
        });

        hydrate.push(Stmt::Assign {
            target: Expr::Field {
                base: Box::new(Expr::Local(OBJECT_LOCAL.to_string())),
                name: name.clone(),
            },
            value: Expr::Try(Box::new(Expr::Decode {
                source: Box::new(Expr::Local(FIELDS_PARAM.to_string())),
                key: field.name.clone(),
                decoder: value_decoder,
                presence: Presence::Optional,
            })),
        });

        properties.push(Property {
            name,
            wire_name: field.name.clone(),
            ty: TypeExpr::Hydrated(Box::new(ty)),
            docs: field.description.clone(),
        });
    }

    let initializer = Method {
        name: INITIALIZER.to_string(),
        docs: None,
        visibility: Visibility::Private,
        receiver: Receiver::Static,
        params: Vec::new(),
        returns: Returns::Value(TypeExpr::SelfType),
        body: vec![Stmt::Return(Expr::Construct(
            properties
                .iter()
                .map(|p| (p.name.clone(), Expr::Unset))
                .collect(),
        ))],
    };

    let mut factory_body = vec![Stmt::Let {
        name: OBJECT_LOCAL.to_string(),
        mutable: !hydrate.is_empty(),
        value: Expr::AssociatedCall {
            function: INITIALIZER.to_string(),
            args: Vec::new(),
        },
    }];
    factory_body.extend(hydrate);
    factory_body.push(Stmt::Return(Expr::Ok(Box::new(Expr::Local(
        OBJECT_LOCAL.to_string(),
    )))));

    let factory = Method {
        name: FACTORY.to_string(),
        docs: Some(format!(
            "Hydrates a `{}` from a response map. Keys absent from `fields` stay unhydrated.",
            def.graphql_name
        )),
        visibility: Visibility::Public,
        receiver: Receiver::Static,
        params: vec![Param::new(FIELDS_PARAM, TypeExpr::ResponseMap)],
        returns: Returns::Fallible(TypeExpr::SelfType),
        body: factory_body,
    };

    let implements = object
        .interfaces
        .iter()
        .filter(|interface| {
            let substituted = is_substituted_interface(registry, interface);
            if substituted {
                tracing::debug!(
                    object = %def.graphql_name,
                    %interface,
                    "interface substituted; no conformance"
                );
            }
            !substituted
        })
        .map(|interface| conformance(registry, &mut model, def, object, interface))
        .collect::<Result<Vec<_>, _>>()?;

    let mut methods = vec![initializer];
    methods.extend(getters);
    methods.push(factory);

    tracing::debug!(
        object = %def.graphql_name,
        fields = properties.len(),
        interfaces = implements.len(),
        "built output type"
    );

    model.artifact = Artifact::OutputObject(OutputModel {
        properties,
        methods,
        implements,
    });
    Ok(model)
}

/// The generated output object a reference stores inline: a non-list
/// reference to an object that is not substituted.
fn inline_object<'a>(registry: &TypeRegistry, resolved: &'a ResolvedType) -> Option<&'a str> {
    if resolved.is_list() {
        return None;
    }
    match resolved.base() {
        NamedTarget::Registered {
            graphql_name,
            category: Category::OutputObject,
            ..
        } if registry
            .definition_for(graphql_name)
            .is_some_and(|def| !def.is_substituted()) =>
        {
            Some(graphql_name)
        }
        _ => None,
    }
}

/// Whether `owner` is reachable from `start` through inline object fields.
/// Fields on such a cycle have to be boxed, or the struct would contain itself.
fn reaches(registry: &TypeRegistry, start: &str, owner: &str) -> bool {
    let mut pending = vec![start.to_string()];
    let mut visited = HashSet::new();

    while let Some(name) = pending.pop() {
        if name == owner {
            return true;
        }
        if !visited.insert(name.clone()) {
            continue;
        }
        let Some(Definition::Object(object)) = registry.definition_for(&name).map(|def| &def.definition)
        else {
            continue;
        };
        for field in &object.fields {
            // Unresolvable references are reported when their own object is built.
            let Ok(resolved) = registry.resolve(&field.ty, &name) else {
                continue;
            };
            if let Some(target) = inline_object(registry, &resolved) {
                pending.push(target.to_string());
            }
        }
    }
    false
}

/// Builds the accessor implementations `object` needs to conform to `interface`.
fn conformance(
    registry: &TypeRegistry,
    model: &mut CodeModel,
    def: &TypeDefinition,
    object: &ObjectDef,
    interface: &str,
) -> Result<Conformance, GeneratorError> {
    let context = format!("type {} implements {interface}", def.graphql_name);
    let interface_def = registry
        .definition_for(interface)
        .ok_or_else(|| GeneratorError::unknown_type(interface, context.as_str()))?;
    let Definition::Interface(interface_type) = &interface_def.definition else {
        return Err(GeneratorError::CodeGenError(format!(
            "{context}: `{interface}` is a {}, not an interface",
            interface_def.category
        )));
    };
    model.depend(Dependency::Artifact(interface_def.artifact_name().to_string()));

    let mut methods = Vec::with_capacity(interface_type.fields.len());
    for required in &interface_type.fields {
        let own = object
            .fields
            .iter()
            .find(|field| field.name == required.name)
            .ok_or_else(|| GeneratorError::MissingInterfaceField {
                object: def.graphql_name.clone(),
                interface: interface.to_string(),
                field: required.name.clone(),
            })?;

        let required_ty = resolve_concrete(
            registry,
            &required.ty,
            &format!("field {interface}.{}", required.name),
        )?;
        let own_ty = resolve_concrete(
            registry,
            &own.ty,
            &format!("field {}.{}", def.graphql_name, own.name),
        )?;
        let widen = widening(&own_ty, &required_ty).ok_or_else(|| {
            GeneratorError::CodeGenError(format!(
                "field `{}.{}: {}` does not satisfy `{interface}.{}: {}`",
                def.graphql_name, own.name, own.ty, required.name, required.ty
            ))
        })?;

        let name = member_name(&required.name);
        methods.push(Method {
            name: name.clone(),
            docs: None,
            visibility: Visibility::Public,
            receiver: Receiver::Borrowed,
            params: Vec::new(),
            returns: Returns::Borrowed(type_expr(&required_ty)),
            body: vec![Stmt::Return(Expr::Delegate {
                getter: name,
                widen,
            })],
        });
    }

    Ok(Conformance {
        interface: interface_def.artifact_name().to_string(),
        methods,
    })
}

/// `Some(false)` for identical types, `Some(true)` when a non-null field
/// satisfies a nullable accessor of otherwise identical type, `None` otherwise.
fn widening(own: &ResolvedType, required: &ResolvedType) -> Option<bool> {
    if own == required {
        return Some(false);
    }
    let widened = ResolvedType {
        nullable: true,
        shape: own.shape.clone(),
    };
    (!own.nullable && required.nullable && widened == *required).then_some(true)
}
