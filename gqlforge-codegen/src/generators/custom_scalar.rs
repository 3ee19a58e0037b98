//! Custom scalar markers

use super::{primary_definitions, primary_model, Generate};
use crate::error::GeneratorError;
use crate::ir::{Artifact, CodeModel, RuntimeItem};
use crate::registry::{Category, TypeRegistry};

/// Emits a member-less marker per custom scalar
pub struct CustomScalarGenerator;

impl Generate for CustomScalarGenerator {
    fn name(&self) -> &'static str {
        "custom scalar"
    }

    fn build(&self, registry: &TypeRegistry) -> Result<Vec<CodeModel>, GeneratorError> {
        let mut models = Vec::new();

        for def in primary_definitions(registry, Category::CustomScalar) {
            let mut model = primary_model(def, Artifact::CustomScalar);
            model.depend_on_runtime(&[RuntimeItem::Scalar, RuntimeItem::ScalarTag]);
            models.push(model);
        }

        Ok(models)
    }
}
