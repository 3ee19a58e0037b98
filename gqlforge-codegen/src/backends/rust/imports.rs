//! `use` items for one generated file
//!
//! Runtime items are imported from the client crate in one `use`. Artifact
//! paths are imported by their last segment when that name is free; paths
//! that are generic, single-segment or would shadow another name are spelled
//! out in full wherever they appear.

use super::names::escape_rust_keyword;
use crate::backends::BackendError;
use crate::ir::{CodeModel, Dependency, RuntimeItem};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, ToTokens};
use std::collections::{HashMap, HashSet};

/// Crate generated code depends on
pub(super) const RUNTIME_CRATE: &str = "gqlforge_client";

/// Names generated code relies on from the prelude
const RESERVED: &[&str] = &[
    "Box", "Clone", "Copy", "Debug", "Default", "Eq", "Err", "Hash", "None", "Ok", "Option",
    "PartialEq", "Result", "Self", "Some", "String", "ToString", "Vec",
];

/// Whether an item named `name` would hide a prelude name generated code uses.
pub(super) fn shadows_prelude(name: &str) -> bool {
    RESERVED.contains(&name)
}

pub(super) struct Imports {
    runtime: Vec<Ident>,
    uses: Vec<syn::Path>,
    runtime_paths: HashMap<RuntimeItem, TokenStream>,
    paths: HashMap<String, TokenStream>,
}

impl Imports {
    /// Builds the import table for `model`, which itself lives at `own_path`
    /// and defines the items named in `local`.
    pub(super) fn new(
        model: &CodeModel,
        own_path: &str,
        local: &[String],
    ) -> Result<Self, BackendError> {
        let mut taken: HashSet<String> = RESERVED.iter().map(|name| name.to_string()).collect();
        taken.extend(local.iter().cloned());

        let mut imports = Self {
            runtime: Vec::new(),
            uses: Vec::new(),
            runtime_paths: HashMap::new(),
            paths: HashMap::new(),
        };
        imports.paths.insert(
            own_path.to_string(),
            escape_rust_keyword(&model.name).to_token_stream(),
        );

        // Runtime items sort first, so they claim their names before artifacts do.
        for dependency in &model.dependencies {
            match dependency {
                Dependency::Runtime(item) => {
                    let ident = format_ident!("{}", item.name());
                    if taken.insert(item.name().to_string()) {
                        imports.runtime.push(ident.clone());
                        imports.runtime_paths.insert(*item, ident.to_token_stream());
                    }
                }
                Dependency::Artifact(path) => {
                    if imports.paths.contains_key(path) {
                        continue;
                    }
                    let tokens = match importable_tail(path) {
                        Some(tail) if taken.insert(tail.to_string()) => {
                            imports.uses.push(parse_path(path)?);
                            format_ident!("{}", tail).to_token_stream()
                        }
                        _ => parse_type(path)?,
                    };
                    imports.paths.insert(path.clone(), tokens);
                }
            }
        }

        Ok(imports)
    }

    /// How a runtime item is spelled in this file.
    pub(super) fn runtime(&self, item: RuntimeItem) -> TokenStream {
        match self.runtime_paths.get(&item) {
            Some(tokens) => tokens.clone(),
            None => {
                let runtime_crate = format_ident!("{}", RUNTIME_CRATE);
                let ident = format_ident!("{}", item.name());
                quote! { #runtime_crate::#ident }
            }
        }
    }

    /// How `path` is spelled in this file.
    pub(super) fn path(&self, path: &str) -> Result<TokenStream, BackendError> {
        match self.paths.get(path) {
            Some(tokens) => Ok(tokens.clone()),
            None => parse_type(path),
        }
    }
}

impl ToTokens for Imports {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        if !self.runtime.is_empty() {
            let runtime_crate = format_ident!("{}", RUNTIME_CRATE);
            let items = &self.runtime;
            tokens.extend(quote! { use #runtime_crate::{#(#items),*}; });
        }
        for path in &self.uses {
            tokens.extend(quote! { use #path; });
        }
    }
}

/// The last segment of a plain multi-segment path, e.g. `User` for `crate::graphql::types::User`.
fn importable_tail(path: &str) -> Option<&str> {
    let segments: Vec<&str> = path.split("::").collect();
    let plain = segments.len() > 1
        && segments
            .iter()
            .all(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if plain {
        segments.last().copied()
    } else {
        None
    }
}

fn parse_path(path: &str) -> Result<syn::Path, BackendError> {
    syn::parse_str(path)
        .map_err(|e| BackendError::TypeMappingError(format!("invalid path `{path}`: {e}")))
}

fn parse_type(path: &str) -> Result<TokenStream, BackendError> {
    syn::parse_str::<syn::Type>(path)
        .map(|ty| ty.to_token_stream())
        .map_err(|e| BackendError::TypeMappingError(format!("invalid type `{path}`: {e}")))
}
