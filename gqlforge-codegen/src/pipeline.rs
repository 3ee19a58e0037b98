//! The generation pipeline
//!
//! parse → register → generate → render → write. Everything up to the write
//! happens in memory, so a failure at any stage leaves the output untouched.

use crate::backends::{get_backend, Backend, GeneratedFile};
use crate::config::GenerateOptions;
use crate::error::GeneratorError;
use crate::generators;
use crate::ir::CodeModel;
use crate::registry::{Namespace, TypeRegistry};
use crate::schema::parse_sdl;
use crate::writer::{check_collisions, CodeWriter};
use std::path::{Path, PathBuf};

/// Runs every generator over `registry`, in a fixed order.
pub fn generate_models(registry: &TypeRegistry) -> Result<Vec<CodeModel>, GeneratorError> {
    let mut models = Vec::new();
    for generator in generators::all() {
        let built = generator.build(registry)?;
        tracing::debug!(generator = generator.name(), artifacts = built.len(), "ran generator");
        models.extend(built);
    }
    Ok(models)
}

/// Renders every model plus the module indexes.
pub fn render(
    models: &[CodeModel],
    backend: &dyn Backend,
    namespace: &Namespace,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let mut files = models
        .iter()
        .map(|model| backend.render(model, namespace))
        .collect::<Result<Vec<_>, _>>()?;
    files.extend(backend.render_modules(models, namespace)?);
    Ok(files)
}

/// Compiles SDL text into rendered files, without touching the disk.
pub fn generate_from_sdl(
    sdl: &str,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let backend = get_backend(&options.backend)?;
    let document = parse_sdl(sdl)?;
    let registry = TypeRegistry::build(document, options.namespace.clone(), &options.substitutions)?;
    let models = generate_models(&registry)?;
    let files = render(&models, backend.as_ref(), registry.namespace())?;
    check_collisions(&files)?;

    tracing::info!(
        backend = backend.name(),
        artifacts = models.len(),
        files = files.len(),
        "generated client"
    );
    Ok(files)
}

/// Compiles the schema at `schema` and writes the result below `output`.
/// Returns the paths written.
pub fn generate_from_file(
    schema: &Path,
    output: &Path,
    options: &GenerateOptions,
) -> Result<Vec<PathBuf>, GeneratorError> {
    let sdl = std::fs::read_to_string(schema)?;
    let files = generate_from_sdl(&sdl, options)?;
    let written = CodeWriter::new(output).write_all(&files)?;

    tracing::info!(
        schema = %schema.display(),
        output = %output.display(),
        files = written.len(),
        "wrote client"
    );
    Ok(written)
}
