//! Input object artifacts
//!
//! The constructor takes required fields first, then nullable or defaulted
//! fields as optional parameters (a stable sort, so declaration order holds
//! within each group). Optional values are only written to the payload when
//! present, and each optional field gets a fluent `with_<field>` setter that
//! ignores `None`.

use super::{
    depend_on_type, member_name, primary_definitions, primary_model, resolve_concrete, type_expr,
    Generate, Members,
};
use crate::error::GeneratorError;
use crate::ir::{
    Artifact, ClassModel, CodeModel, Constant, Expr, Method, Param, Receiver, Returns,
    RuntimeItem, Stmt, TypeExpr, Visibility, INPUT_STORE,
};
use crate::registry::{Category, TypeRegistry};
use crate::schema::{Definition, InputValueDef};
use heck::ToShoutySnakeCase;

/// Emits one input artifact per input object definition
pub struct InputTypeGenerator;

impl Generate for InputTypeGenerator {
    fn name(&self) -> &'static str {
        "input type"
    }

    fn build(&self, registry: &TypeRegistry) -> Result<Vec<CodeModel>, GeneratorError> {
        let mut models = Vec::new();

        for def in primary_definitions(registry, Category::InputObject) {
            let Definition::InputObject(input) = &def.definition else {
                continue;
            };

            let mut model = primary_model(def, Artifact::InputObject(ClassModel::default()));
            model.depend_on_runtime(&[
                RuntimeItem::Arguments,
                RuntimeItem::InputValue,
                RuntimeItem::ToInputValue,
            ]);

            let mut constant_names = Members::new(&def.graphql_name);
            let mut members = Members::new(&def.graphql_name);
            let mut param_names = Members::new(format!("{}::new", def.graphql_name));
            members.claim("new", "constructor")?;

            let mut class = ClassModel::default();
            for field in &input.fields {
                let name = field.name.to_shouty_snake_case();
                constant_names.claim(&name, format!("field {}", field.name))?;
                class.constants.push(Constant {
                    name,
                    value: field.name.clone(),
                });
            }

            let mut ordered: Vec<&InputValueDef> = input.fields.iter().collect();
            ordered.sort_by_key(|field| field.is_optional());

            let mut params = Vec::with_capacity(ordered.len());
            let mut required = Vec::new();
            let mut chain = Vec::new();
            let mut setters = Vec::new();

            for field in ordered {
                let context = format!("input field {}.{}", def.graphql_name, field.name);
                let resolved = resolve_concrete(registry, &field.ty, &context)?;
                depend_on_type(&mut model, &resolved);

                let param = member_name(&field.name);
                param_names.claim(&param, context.as_str())?;
                let constant = field.name.to_shouty_snake_case();
                let value_ty = type_expr(&resolved).non_null().clone();

                if !field.is_optional() {
                    params.push(Param::new(&param, value_ty));
                    required.push((
                        Expr::Constant(constant),
                        Expr::ToInput(Box::new(Expr::Local(param))),
                    ));
                    continue;
                }

                let setter = format!("with_{param}");
                members.claim(&setter, context)?;
                params.push(Param::new(&param, TypeExpr::nullable(value_ty.clone())));
                chain.push((setter.clone(), param.clone()));
                setters.push(Method {
                    name: setter,
                    docs: field.description.clone(),
                    visibility: Visibility::Public,
                    receiver: Receiver::Owned,
                    params: vec![Param::new(&param, TypeExpr::nullable(value_ty))],
                    returns: Returns::Value(TypeExpr::SelfType),
                    body: vec![
                        Stmt::ReturnSelfIfAbsent {
                            param: param.clone(),
                        },
                        Stmt::Insert {
                            map: Expr::Field {
                                base: Box::new(Expr::SelfValue),
                                name: INPUT_STORE.to_string(),
                            },
                            key: Expr::Constant(constant),
                            value: Expr::ToInput(Box::new(Expr::Local(param))),
                        },
                        Stmt::Return(Expr::SelfValue),
                    ],
                });
            }

            let mut construct = Expr::Construct(vec![(
                INPUT_STORE.to_string(),
                Expr::Arguments(required),
            )]);
            for (setter, param) in chain {
                construct = Expr::MethodCall {
                    receiver: Box::new(construct),
                    method: setter,
                    args: vec![Expr::Local(param)],
                };
            }

            class.methods.push(Method {
                name: "new".to_string(),
                docs: None,
                visibility: Visibility::Public,
                receiver: Receiver::Static,
                params,
                returns: Returns::Value(TypeExpr::SelfType),
                body: vec![Stmt::Return(construct)],
            });
            class.methods.extend(setters);

            model.artifact = Artifact::InputObject(class);
            tracing::debug!(input = %def.graphql_name, fields = input.fields.len(), "built input type");
            models.push(model);
        }

        Ok(models)
    }
}
