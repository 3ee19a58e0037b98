//! Enum artifacts
//!
//! One constant, one variant and one static accessor per declared value. The
//! constant holds the verbatim wire string, case preserved.

use super::{primary_definitions, primary_model, Generate, Members};
use crate::error::GeneratorError;
use crate::ir::{Artifact, CodeModel, EnumModel, EnumValueModel, RuntimeItem};
use crate::registry::{Category, TypeRegistry};
use crate::schema::Definition;
use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// Emits one enum artifact per enum definition
pub struct EnumGenerator;

impl Generate for EnumGenerator {
    fn name(&self) -> &'static str {
        "enum"
    }

    fn build(&self, registry: &TypeRegistry) -> Result<Vec<CodeModel>, GeneratorError> {
        let mut models = Vec::new();

        for def in primary_definitions(registry, Category::Enum) {
            let Definition::Enum(enum_def) = &def.definition else {
                continue;
            };

            let mut constants = Members::new(&def.graphql_name);
            let mut variants = Members::new(&def.graphql_name);
            let mut accessors = Members::new(&def.graphql_name);
            accessors.claim("options", "options accessor")?;

            let mut values = Vec::with_capacity(enum_def.values.len());
            for value in &enum_def.values {
                let claimant = format!("value {}", value.name);
                let constant = value.name.to_shouty_snake_case();
                let mut variant = value.name.to_upper_camel_case();
                // `Self::A` must not name both a variant and a constant.
                if variant == constant {
                    variant.push_str("Value");
                }
                let model = EnumValueModel {
                    constant,
                    wire: value.name.clone(),
                    variant,
                    accessor: value.name.to_snake_case(),
                    docs: value.description.clone(),
                };
                constants.claim(&model.constant, claimant.as_str())?;
                variants.claim(&model.variant, claimant.as_str())?;
                accessors.claim(&model.accessor, claimant)?;
                values.push(model);
            }

            let mut model = primary_model(def, Artifact::Enum(EnumModel { values }));
            model.depend_on_runtime(&[
                RuntimeItem::GraphQLEnum,
                RuntimeItem::InputValue,
                RuntimeItem::ToInputValue,
            ]);
            tracing::debug!(enum_name = %def.graphql_name, values = enum_def.values.len(), "built enum");
            models.push(model);
        }

        Ok(models)
    }
}
