//! Rust backend
//!
//! Each artifact becomes one file, laid out below the output root the way the
//! namespace lays out modules: `types/<name>.rs` for schema types and
//! `<name>.rs` for selection builders and the service. Index files are
//! rendered by [`Backend::render_modules`].

mod artifacts;
mod body;
mod imports;
mod module;
mod names;
mod types;

use super::{Backend, BackendError, GeneratedFile};
use crate::ir::{Artifact, CodeModel};
use crate::registry::Namespace;
use imports::Imports;
use proc_macro2::TokenStream;
use quote::quote;
use std::path::PathBuf;

/// Renders client code for the `gqlforge-client` runtime
pub struct RustBackend;

impl Backend for RustBackend {
    fn name(&self) -> &str {
        "rust"
    }

    fn file_extension(&self) -> &str {
        "rs"
    }

    fn render(&self, model: &CodeModel, namespace: &Namespace) -> Result<GeneratedFile, BackendError> {
        if imports::shadows_prelude(&model.name) {
            return Err(BackendError::NameCollision {
                name: model.name.clone(),
                graphql_name: model.graphql_name.clone(),
            });
        }
        let own_path = artifact_path(model, namespace);
        let mut local = vec![model.name.clone()];
        if matches!(model.artifact, Artifact::CustomScalar) {
            local.push(artifacts::scalar_tag(model));
        }
        let imports = Imports::new(model, &own_path, &local)?;

        let (kind, items) = match &model.artifact {
            Artifact::CustomScalar => ("Custom scalar", artifacts::custom_scalar(model, &imports)),
            Artifact::Enum(enum_model) => (
                "GraphQL enum",
                artifacts::enumeration(model, enum_model, &imports),
            ),
            Artifact::InputObject(class) => (
                "GraphQL input object",
                artifacts::input_object(model, class, &imports)?,
            ),
            Artifact::OutputObject(output) => (
                "GraphQL object",
                artifacts::output_object(model, output, &imports)?,
            ),
            Artifact::Interface(interface) => (
                "GraphQL interface",
                artifacts::interface(model, interface, &imports)?,
            ),
            Artifact::FieldSelection(class) => (
                "Field selection",
                artifacts::field_selection(model, class, &imports)?,
            ),
            Artifact::Service(class) => ("Service", artifacts::service(model, class, &imports)?),
        };

        let header = file_header(&format!("{kind} for `{}`", model.graphql_name));
        let code = quote! {
            #header
            #imports
            #items
        };

        let mut path: PathBuf = model.module.iter().collect();
        path.push(format!("{}.{}", names::module_name(&model.name), self.file_extension()));

        tracing::trace!(artifact = %own_path, path = %path.display(), "rendered artifact");
        Ok(GeneratedFile {
            path,
            content: format_code(code)?,
            origin: format!("{} `{}`", kind.to_lowercase(), model.graphql_name),
        })
    }

    fn render_modules(
        &self,
        models: &[CodeModel],
        namespace: &Namespace,
    ) -> Result<Vec<GeneratedFile>, BackendError> {
        module::render_modules(models, namespace)
    }
}

/// Full path of the artifact, e.g. `crate::graphql::types::User`.
fn artifact_path(model: &CodeModel, namespace: &Namespace) -> String {
    let mut segments = vec![namespace.root().to_string()];
    segments.extend(model.module.iter().cloned());
    segments.push(model.name.clone());
    segments.join("::")
}

fn file_header(title: &str) -> TokenStream {
    let title = format!(" {title}");
    quote! {
        #![doc = #title]
        #![doc = " @generated"]

        #![allow(missing_docs)]
        #![allow(unused_imports)]
    }
}

/// Pretty-prints generated tokens as a source file.
fn format_code(code: TokenStream) -> Result<String, BackendError> {
    let parsed = syn::parse_file(&code.to_string())
        .map_err(|e| BackendError::CodeGenError(format!("generated code does not parse: {e}")))?;
    Ok(prettyplease::unparse(&parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{self, tests::registry, Generate};

    const SDL: &str = r#"
        "An instant in time"
        scalar DateTime

        enum Role { ADMIN member }

        interface Node { id: ID! label: String }

        input NewUser { name: String! role: Role nickname: String }

        "A registered user"
        type User implements Node {
          id: ID!
          label: String!
          type: String
          role: Role
          joined: DateTime
          friends(first: Int): [User!]!
        }

        type Query { user(id: ID!): User viewer: User! }
        type Mutation { createUser(input: NewUser!): User! ping: Boolean }
    "#;

    fn render_all() -> Vec<GeneratedFile> {
        let registry = registry(SDL);
        let mut files = Vec::new();
        for generator in generators::all() {
            for model in generator.build(&registry).unwrap() {
                files.push(RustBackend.render(&model, registry.namespace()).unwrap());
            }
        }
        files
    }

    fn file<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
        files
            .iter()
            .find(|f| f.path == PathBuf::from(path))
            .map(|f| f.content.as_str())
            .unwrap_or_else(|| panic!("no file {path}"))
    }

    #[test]
    fn test_every_file_has_generated_header() {
        for file in render_all() {
            assert!(
                file.content.starts_with("//! "),
                "{} lacks a header",
                file.path.display()
            );
            assert!(file.content.contains("//! @generated"));
            assert!(file.content.contains("#![allow(unused_imports)]"));
        }
    }

    #[test]
    fn test_file_layout() {
        let files = render_all();
        let mut paths: Vec<_> = files.iter().map(|f| f.path.display().to_string()).collect();
        paths.sort();
        assert_eq!(
            paths,
            vec![
                "graphql_service.rs",
                "types/date_time.rs",
                "types/new_user.rs",
                "types/node.rs",
                "types/role.rs",
                "types/user.rs",
                "user_field_selection.rs",
            ]
        );
    }

    #[test]
    fn test_custom_scalar_file() {
        let files = render_all();
        let content = file(&files, "types/date_time.rs");
        assert!(content.contains("pub enum DateTimeTag {}"));
        assert!(content.contains("const NAME: &'static str = \"DateTime\";"));
        assert!(content.contains("/// An instant in time\npub type DateTime = Scalar<DateTimeTag>;"));
    }

    #[test]
    fn test_enum_file() {
        let files = render_all();
        let content = file(&files, "types/role.rs");
        assert!(content.contains("pub enum Role {"));
        assert!(content.contains("pub const MEMBER: &'static str = \"member\";"));
        assert!(content.contains("pub fn member() -> Self {"));
        assert!(content.contains("Self::MEMBER => Some(Self::Member),"));
        assert!(content.contains("impl GraphQLEnum for Role {"));
        assert!(content.contains("InputValue::Enum(GraphQLEnum::as_str(self).to_string())"));
    }

    #[test]
    fn test_input_object_file() {
        let files = render_all();
        let content = file(&files, "types/new_user.rs");
        assert!(content.contains("use crate::graphql::types::Role;"));
        assert!(content.contains("pub fn new("));
        assert!(content.contains("name: String, role: Option<Role>, nickname: Option<String>"));
        assert!(content.contains("Arguments::from([(Self::NAME, name.to_input_value())])"));
        assert!(content.contains(".with_role(role)"));
        assert!(content.contains("pub fn with_nickname(mut self, nickname: Option<String>) -> Self"));
        assert!(content.contains("InputValue::Object(self.data.clone())"));
    }

    #[test]
    fn test_output_object_file() {
        let files = render_all();
        let content = file(&files, "types/user.rs");
        assert!(content.contains("/// A registered user\n"));
        assert!(content.contains("r#type: Hydrated<Option<String>>,"));
        assert!(content.contains("friends: Hydrated<Vec<User>>,"));
        assert!(content.contains("fn unhydrated() -> Self {"));
        assert!(content.contains(
            "pub fn r#type(&self) -> Result<Option<&str>, ClientError> {"
        ));
        assert!(content.contains("pub fn friends(&self) -> Result<&[User], ClientError> {"));
        assert!(content.contains(
            "pub fn from_map(fields: &Map<String, Value>) -> Result<Self, ClientError> {"
        ));
        assert!(content.contains("decode::field("));
        assert!(content.contains("|value: &Value| decode::nullable(value, decode::scalar::<String>)"));
        assert!(content.contains("impl OutputObject for User {"));
        assert!(content.contains("impl Node for User {"));
        assert!(content.contains("Self::label(self).map(Some)"));
    }

    #[test]
    fn test_interface_file() {
        let files = render_all();
        let content = file(&files, "types/node.rs");
        assert!(content.contains("pub trait Node {"));
        assert!(content.contains("fn id(&self) -> Result<&str, ClientError>;"));
        assert!(content.contains("fn label(&self) -> Result<Option<&str>, ClientError>;"));
    }

    #[test]
    fn test_field_selection_file() {
        let files = render_all();
        let content = file(&files, "user_field_selection.rs");
        assert!(content.contains("pub struct UserFieldSelection {"));
        assert!(content.contains("selection: FieldSelection,"));
        assert!(content.contains("pub const FRIENDS: &'static str = \"friends\";"));
        assert!(content.contains("pub fn with_friends("));
        assert!(content.contains("selection: UserFieldSelection,"));
        assert!(content.contains("Some(selection.into_selection())"));
        assert!(content.contains("pub fn into_selection(self) -> FieldSelection {"));
    }

    #[test]
    fn test_service_file() {
        let files = render_all();
        let content = file(&files, "graphql_service.rs");
        assert!(content.contains("pub struct GraphqlService<T> {"));
        assert!(content.contains("impl<T: Transport> GraphqlService<T> {"));
        assert!(content.contains("use crate::graphql::UserFieldSelection;"));
        assert!(content.contains("pub fn query_user("));
        assert!(content.contains("Request::query("));
        assert!(content.contains("Arguments::from([(\"id\", id.to_input_value())])"));
        assert!(content.contains("Some(selection.into_selection())"));
        assert!(content.contains("let response = self.transport.send(&request)?;"));
        assert!(content.contains("pub fn mutation_ping(&self) -> Result<Option<bool>, ClientError> {"));
        assert!(content.contains("let request = Request::mutation(\"ping\", Arguments::new(), None)?;"));
    }

    fn render_sdl(sdl: &str) -> Result<Vec<GeneratedFile>, BackendError> {
        let registry = registry(sdl);
        let mut files = Vec::new();
        for generator in generators::all() {
            for model in generator.build(&registry).unwrap() {
                files.push(RustBackend.render(&model, registry.namespace())?);
            }
        }
        Ok(files)
    }

    #[test]
    fn test_recursive_field_is_boxed() {
        let files = render_sdl(
            "type Comment { id: ID! parent: Comment } type Query { comment(id: ID!): Comment }",
        )
        .unwrap();
        let content = file(&files, "types/comment.rs");
        assert!(content.contains("parent: Hydrated<Option<Box<Comment>>>,"));
        assert!(content.contains(
            "pub fn parent(&self) -> Result<Option<&Comment>, ClientError> {"
        ));
        assert!(content.contains("self.parent.get(\"parent\").map(Option::as_deref)"));
        assert!(content.contains("decode::object::<Comment>(value).map(Box::new)"));
    }

    #[test]
    fn test_prelude_names_are_rejected() {
        for name in ["Result", "Option", "Vec", "Box"] {
            let sdl = format!("type {name} {{ ok: Boolean! }} type Query {{ run: {name}! }}");
            match render_sdl(&sdl) {
                Err(BackendError::NameCollision { name: rejected, graphql_name }) => {
                    assert_eq!(rejected, name);
                    assert_eq!(graphql_name, name);
                }
                other => panic!("{name}: expected a name collision, got {other:?}"),
            }
        }
    }
}
