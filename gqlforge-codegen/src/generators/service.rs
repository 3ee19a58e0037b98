//! The aggregate service
//!
//! One method per root field: `query_<op>` for queries, `mutation_<op>` for
//! mutations. Parameters are the selection builder (object-returning fields
//! only) followed by the declared arguments. The body builds the argument
//! map, sends the request through the transport and decodes the response
//! entry named after the operation.

use super::decode::decoder;
use super::{
    depend_on_type, member_name, plan_arguments, resolve_concrete, selected_object, type_expr,
    Generate, Members,
};
use crate::error::GeneratorError;
use crate::ir::{
    Artifact, ClassModel, CodeModel, Dependency, Expr, Method, Param, Presence, Receiver, Returns,
    RuntimeItem, Stmt, TypeExpr, Visibility,
};
use crate::registry::{OperationDefinition, TypeRegistry};

const SELECTION_PARAM: &str = "selection";
const REQUEST_LOCAL: &str = "request";
const RESPONSE_LOCAL: &str = "response";
const RESERVED_PARAMS: &[&str] = &[
    SELECTION_PARAM,
    super::ARGUMENTS_LOCAL,
    REQUEST_LOCAL,
    RESPONSE_LOCAL,
];

/// Emits the single service artifact
pub struct ServiceGenerator;

impl Generate for ServiceGenerator {
    fn name(&self) -> &'static str {
        "service"
    }

    fn build(&self, registry: &TypeRegistry) -> Result<Vec<CodeModel>, GeneratorError> {
        let namespace = registry.namespace();
        let name = format!("{}Service", namespace.short_name());

        let mut model = CodeModel::new(
            Vec::new(),
            &name,
            namespace.root(),
            Artifact::Service(ClassModel::default()),
        )
        .with_docs(Some("Typed entry points for every query and mutation of the schema."));
        model.depend_on_runtime(&[
            RuntimeItem::Arguments,
            RuntimeItem::ClientError,
            RuntimeItem::Decode,
            RuntimeItem::Request,
            RuntimeItem::Transport,
            RuntimeItem::Value,
        ]);

        let mut members = Members::new(&name);
        members.claim("new", "constructor")?;

        let mut class = ClassModel::default();
        for operation in registry.queries().iter().chain(registry.mutations()) {
            let method = operation_method(registry, &mut model, operation)?;
            members.claim(
                &method.name,
                format!("{} {}", operation.kind.as_str(), operation.name),
            )?;
            class.methods.push(method);
        }

        tracing::debug!(service = %name, operations = class.methods.len(), "built service");
        model.artifact = Artifact::Service(class);
        Ok(vec![model])
    }
}

fn operation_method(
    registry: &TypeRegistry,
    model: &mut CodeModel,
    operation: &OperationDefinition,
) -> Result<Method, GeneratorError> {
    let kind = operation.kind.as_str();
    let context = format!("{kind} {}", operation.name);
    let method_name = format!("{kind}_{}", member_name(&operation.name));

    let resolved = resolve_concrete(registry, &operation.field.ty, &context)?;
    depend_on_type(model, &resolved);

    let mut param_names = Members::new(format!("{}::{method_name}", model.name));
    let mut params = Vec::new();

    let selection = match selected_object(&resolved) {
        Some(target) => {
            let builder = registry.namespace().selection_name(target);
            model.depend(Dependency::Artifact(builder.clone()));
            param_names.claim(SELECTION_PARAM, "selection")?;
            params.push(Param::new(SELECTION_PARAM, TypeExpr::Named(builder)));
            Some(SELECTION_PARAM.to_string())
        }
        None => None,
    };

    let plan = plan_arguments(
        registry,
        model,
        &format!("{kind} {}", operation.name),
        &operation.field.arguments,
        RESERVED_PARAMS,
        &mut param_names,
    )?;
    params.extend(plan.params);

    let mut body = plan.setup;
    body.push(Stmt::Let {
        name: REQUEST_LOCAL.to_string(),
        mutable: false,
        value: Expr::Try(Box::new(Expr::Request {
            kind: operation.kind,
            action: operation.name.clone(),
            arguments: Box::new(plan.map),
            selection,
        })),
    });
    body.push(Stmt::Let {
        name: RESPONSE_LOCAL.to_string(),
        mutable: false,
        value: Expr::Try(Box::new(Expr::Send(Box::new(Expr::Local(
            REQUEST_LOCAL.to_string(),
        ))))),
    });
    body.push(Stmt::Return(Expr::Decode {
        source: Box::new(Expr::Borrow(Box::new(Expr::Local(
            RESPONSE_LOCAL.to_string(),
        )))),
        key: operation.name.clone(),
        decoder: decoder(&resolved, &context)?,
        presence: Presence::Required,
    }));

    Ok(Method {
        name: method_name,
        docs: operation.field.description.clone(),
        visibility: Visibility::Public,
        receiver: Receiver::Borrowed,
        params,
        returns: Returns::Fallible(type_expr(&resolved)),
        body,
    })
}
