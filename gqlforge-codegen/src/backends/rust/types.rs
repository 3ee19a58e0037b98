//! Type mapping from IR type expressions to Rust types

use super::imports::Imports;
use crate::backends::BackendError;
use crate::ir::{Returns, RuntimeItem, TypeExpr};
use crate::registry::Primitive;
use proc_macro2::TokenStream;
use quote::quote;

/// Rust type for a built-in GraphQL scalar
pub(super) fn primitive(primitive: Primitive) -> TokenStream {
    match primitive {
        Primitive::Integer => quote! { i32 },
        Primitive::Float => quote! { f64 },
        Primitive::Boolean => quote! { bool },
        Primitive::Text => quote! { String },
    }
}

/// Owned Rust type for `ty`
pub(super) fn owned(ty: &TypeExpr, imports: &Imports) -> Result<TokenStream, BackendError> {
    Ok(match ty {
        TypeExpr::Builtin(p) => primitive(*p),
        TypeExpr::Named(path) => imports.path(path)?,
        TypeExpr::List(inner) => {
            let inner = owned(inner, imports)?;
            quote! { Vec<#inner> }
        }
        TypeExpr::Nullable(inner) => {
            let inner = owned(inner, imports)?;
            quote! { Option<#inner> }
        }
        TypeExpr::Hydrated(inner) => {
            let inner = owned(inner, imports)?;
            let hydrated = imports.runtime(RuntimeItem::Hydrated);
            quote! { #hydrated<#inner> }
        }
        TypeExpr::Boxed(inner) => {
            let inner = owned(inner, imports)?;
            quote! { Box<#inner> }
        }
        TypeExpr::SelfType => quote! { Self },
        TypeExpr::ResponseMap => {
            let map = imports.runtime(RuntimeItem::Map);
            let value = imports.runtime(RuntimeItem::Value);
            quote! { &#map<String, #value> }
        }
    })
}

/// Borrowed view of a stored value, with the adapter that turns
/// `Result<&Stored, _>` into `Result<View, _>`.
pub(super) fn borrowed(
    ty: &TypeExpr,
    imports: &Imports,
) -> Result<(TokenStream, TokenStream), BackendError> {
    Ok(match ty {
        TypeExpr::Builtin(Primitive::Text) => (quote! { &str }, quote! { .map(String::as_str) }),
        TypeExpr::List(inner) => {
            let inner = owned(inner, imports)?;
            (quote! { &[#inner] }, quote! { .map(Vec::as_slice) })
        }
        TypeExpr::Nullable(inner) => match inner.as_ref() {
            TypeExpr::Builtin(Primitive::Text) => {
                (quote! { Option<&str> }, quote! { .map(Option::as_deref) })
            }
            TypeExpr::List(element) => {
                let element = owned(element, imports)?;
                (quote! { Option<&[#element]> }, quote! { .map(Option::as_deref) })
            }
            TypeExpr::Boxed(value) => {
                let value = owned(value, imports)?;
                (quote! { Option<&#value> }, quote! { .map(Option::as_deref) })
            }
            other => {
                let other = owned(other, imports)?;
                (quote! { Option<&#other> }, quote! { .map(Option::as_ref) })
            }
        },
        TypeExpr::Boxed(value) => {
            let value = owned(value, imports)?;
            (quote! { &#value }, quote! { .map(|boxed| &**boxed) })
        }
        other => {
            let other = owned(other, imports)?;
            (quote! { &#other }, quote! {})
        }
    })
}

/// Return type of a method
pub(super) fn returns(returns: &Returns, imports: &Imports) -> Result<TokenStream, BackendError> {
    Ok(match returns {
        Returns::Value(ty) => owned(ty, imports)?,
        Returns::Fallible(ty) => {
            let ty = owned(ty, imports)?;
            let error = imports.runtime(RuntimeItem::ClientError);
            quote! { Result<#ty, #error> }
        }
        Returns::Borrowed(ty) => {
            let (view, _) = borrowed(ty, imports)?;
            let error = imports.runtime(RuntimeItem::ClientError);
            quote! { Result<#view, #error> }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Artifact, CodeModel};

    fn imports() -> Imports {
        let mut model = CodeModel::new(vec!["types".to_string()], "User", "User", Artifact::CustomScalar);
        model.depend_on_runtime(&[RuntimeItem::ClientError, RuntimeItem::Hydrated]);
        Imports::new(&model, "crate::graphql::types::User", &["User".to_string()]).unwrap()
    }

    fn user() -> TypeExpr {
        TypeExpr::Named("crate::graphql::types::User".to_string())
    }

    fn text() -> TypeExpr {
        TypeExpr::Builtin(Primitive::Text)
    }

    #[test]
    fn test_owned_types() {
        let imports = imports();
        let ty = TypeExpr::nullable(TypeExpr::list(TypeExpr::Builtin(Primitive::Integer)));
        assert_eq!(owned(&ty, &imports).unwrap().to_string(), "Option < Vec < i32 > >");
        assert_eq!(
            owned(&TypeExpr::Hydrated(Box::new(text())), &imports).unwrap().to_string(),
            "Hydrated < String >"
        );
        assert_eq!(
            owned(&TypeExpr::Hydrated(Box::new(TypeExpr::nullable(user()).boxed())), &imports)
                .unwrap()
                .to_string(),
            "Hydrated < Option < Box < User > > >"
        );
    }

    #[test]
    fn test_borrowed_views() {
        let imports = imports();
        let cases = [
            (text(), "& str", ". map (String :: as_str)"),
            (TypeExpr::nullable(text()), "Option < & str >", ". map (Option :: as_deref)"),
            (
                TypeExpr::list(TypeExpr::Builtin(Primitive::Float)),
                "& [f64]",
                ". map (Vec :: as_slice)",
            ),
            (
                TypeExpr::nullable(TypeExpr::Builtin(Primitive::Boolean)),
                "Option < & bool >",
                ". map (Option :: as_ref)",
            ),
            (TypeExpr::Builtin(Primitive::Integer), "& i32", ""),
            (
                TypeExpr::nullable(user()).boxed(),
                "Option < & User >",
                ". map (Option :: as_deref)",
            ),
            (user().boxed(), "& User", ". map (| boxed | & * * boxed)"),
        ];
        for (ty, view, adapter) in cases {
            let (v, a) = borrowed(&ty, &imports).unwrap();
            assert_eq!(v.to_string(), view);
            assert_eq!(a.to_string(), adapter);
        }
    }

    #[test]
    fn test_fallible_returns() {
        let imports = imports();
        let returns = Returns::Fallible(TypeExpr::nullable(TypeExpr::Named(
            "crate::graphql::types::User".to_string(),
        )));
        assert_eq!(
            super::returns(&returns, &imports).unwrap().to_string(),
            "Result < Option < User > , ClientError >"
        );
    }
}
