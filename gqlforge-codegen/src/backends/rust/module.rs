//! Module index files
//!
//! Every directory of generated artifacts gets a `mod.rs` that declares one
//! private module per artifact and re-exports the artifact by name. Parent
//! directories declare their child directories as public modules.

use super::names::{escape_rust_keyword, module_name};
use super::{file_header, format_code};
use crate::backends::{BackendError, GeneratedFile};
use crate::ir::CodeModel;
use crate::registry::Namespace;
use quote::quote;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Default)]
struct Directory<'a> {
    children: BTreeSet<&'a str>,
    artifacts: BTreeMap<String, &'a str>,
}

pub(super) fn render_modules(
    models: &[CodeModel],
    namespace: &Namespace,
) -> Result<Vec<GeneratedFile>, BackendError> {
    let mut directories: BTreeMap<&[String], Directory<'_>> = BTreeMap::new();
    directories.entry(&[]).or_default();

    for model in models {
        let module = model.module.as_slice();
        directories
            .entry(module)
            .or_default()
            .artifacts
            .insert(module_name(&model.name), model.name.as_str());
        for depth in 0..module.len() {
            directories
                .entry(&module[..depth])
                .or_default()
                .children
                .insert(module[depth].as_str());
        }
    }

    directories
        .into_iter()
        .map(|(module, directory)| {
            let children = directory.children.iter().map(|child| escape_rust_keyword(child));
            let artifacts = directory.artifacts.iter().map(|(file, name)| {
                let file = escape_rust_keyword(file);
                let name = escape_rust_keyword(name);
                quote! {
                    mod #file;
                    pub use #file::#name;
                }
            });

            let title = if module.is_empty() {
                format!("GraphQL client for `{}`", namespace.root())
            } else {
                format!("`{}::{}`", namespace.root(), module.join("::"))
            };
            let header = file_header(&title);
            let code = quote! {
                #header
                #(pub mod #children;)*
                #(#artifacts)*
            };

            let mut path: PathBuf = module.iter().collect();
            path.push("mod.rs");
            Ok(GeneratedFile {
                path,
                content: format_code(code)?,
                origin: "module index".to_string(),
            })
        })
        .collect()
}
