//! Method signatures and bodies

use super::imports::Imports;
use super::names::escape_rust_keyword;
use super::types::{borrowed, owned, primitive, returns};
use crate::backends::BackendError;
use crate::ir::{
    Decoder, Expr, Method, Presence, Receiver, RuntimeItem, Stmt, Visibility, TRANSPORT,
};
use crate::registry::OperationKind;
use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};

/// Where a method is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Placement {
    /// `impl Type { .. }`
    Inherent,
    /// `trait Name { .. }`, declaration only
    Declaration,
    /// `impl Trait for Type { .. }`
    TraitImpl,
}

/// `#[doc = ".."]` attributes, one per line of `docs`.
pub(super) fn doc_attrs(docs: Option<&str>) -> TokenStream {
    let Some(docs) = docs else {
        return TokenStream::new();
    };
    let lines = docs.lines().map(|line| {
        let line = format!(" {}", line.trim_end());
        quote! { #[doc = #line] }
    });
    quote! { #(#lines)* }
}

pub(super) fn method(
    method: &Method,
    imports: &Imports,
    placement: Placement,
) -> Result<TokenStream, BackendError> {
    let docs = doc_attrs(method.docs.as_deref());
    let name = escape_rust_keyword(&method.name);
    let vis = match (placement, method.visibility) {
        (Placement::Inherent, Visibility::Public) => quote! { pub },
        _ => quote! {},
    };
    let receiver = match method.receiver {
        Receiver::Static => None,
        Receiver::Borrowed => Some(quote! { &self }),
        Receiver::Owned => Some(quote! { mut self }),
    };
    let params = method
        .params
        .iter()
        .map(|param| {
            let name = escape_rust_keyword(&param.name);
            let ty = owned(&param.ty, imports)?;
            Ok(quote! { #name: #ty })
        })
        .collect::<Result<Vec<_>, BackendError>>()?;
    let inputs = receiver.into_iter().chain(params);
    let output = returns(&method.returns, imports)?;

    if placement == Placement::Declaration {
        return Ok(quote! {
            #docs
            fn #name(#(#inputs),*) -> #output;
        });
    }

    let body = statements(&method.body, imports)?;
    Ok(quote! {
        #docs
        #vis fn #name(#(#inputs),*) -> #output {
            #body
        }
    })
}

fn statements(body: &[Stmt], imports: &Imports) -> Result<TokenStream, BackendError> {
    let mut tokens = TokenStream::new();
    for (index, stmt) in body.iter().enumerate() {
        let tail = index + 1 == body.len();
        tokens.extend(statement(stmt, tail, imports)?);
    }
    Ok(tokens)
}

fn statement(stmt: &Stmt, tail: bool, imports: &Imports) -> Result<TokenStream, BackendError> {
    Ok(match stmt {
        Stmt::Let {
            name,
            mutable,
            value,
        } => {
            let name = escape_rust_keyword(name);
            let value = expr(value, imports)?;
            if *mutable {
                quote! { let mut #name = #value; }
            } else {
                quote! { let #name = #value; }
            }
        }
        Stmt::Assign { target, value } => {
            let target = expr(target, imports)?;
            let value = expr(value, imports)?;
            quote! { #target = #value; }
        }
        Stmt::Insert { map, key, value } => {
            let map = expr(map, imports)?;
            let key = expr(key, imports)?;
            let value = expr(value, imports)?;
            quote! { #map.insert(#key, #value); }
        }
        Stmt::InsertIfPresent { map, key, param } => {
            let map = expr(map, imports)?;
            let key = expr(key, imports)?;
            let param = escape_rust_keyword(param);
            quote! {
                if let Some(#param) = #param {
                    #map.insert(#key, #param.to_input_value());
                }
            }
        }
        Stmt::ReturnSelfIfAbsent { param } => {
            let param = escape_rust_keyword(param);
            quote! {
                let Some(#param) = #param else {
                    return self;
                };
            }
        }
        Stmt::Select {
            selection,
            field,
            arguments,
            nested,
        } => {
            let selection = expr(selection, imports)?;
            let field = expr(field, imports)?;
            let arguments = expr(arguments, imports)?;
            let nested = nested_selection(nested.as_deref());
            quote! { #selection.select(#field, #arguments, #nested); }
        }
        Stmt::Return(value) => {
            let value = expr(value, imports)?;
            if tail {
                quote! { #value }
            } else {
                quote! { return #value; }
            }
        }
    })
}

fn nested_selection(param: Option<&str>) -> TokenStream {
    match param {
        Some(param) => {
            let param = escape_rust_keyword(param);
            quote! { Some(#param.into_selection()) }
        }
        None => quote! { None },
    }
}

fn exprs(values: &[Expr], imports: &Imports) -> Result<Vec<TokenStream>, BackendError> {
    values.iter().map(|value| expr(value, imports)).collect()
}

fn expr(value: &Expr, imports: &Imports) -> Result<TokenStream, BackendError> {
    Ok(match value {
        Expr::Local(name) => escape_rust_keyword(name).into_token_stream(),
        Expr::SelfValue => quote! { self },
        Expr::Field { base, name } => {
            let base = expr(base, imports)?;
            let name = escape_rust_keyword(name);
            quote! { #base.#name }
        }
        Expr::Constant(name) => {
            let name = format_ident!("{}", name);
            quote! { Self::#name }
        }
        Expr::Str(text) => quote! { #text },
        Expr::Arguments(entries) if entries.is_empty() => {
            let arguments = imports.runtime(RuntimeItem::Arguments);
            quote! { #arguments::new() }
        }
        Expr::Arguments(entries) => {
            let arguments = imports.runtime(RuntimeItem::Arguments);
            let entries = entries
                .iter()
                .map(|(key, value)| {
                    let key = expr(key, imports)?;
                    let value = expr(value, imports)?;
                    Ok(quote! { (#key, #value) })
                })
                .collect::<Result<Vec<_>, BackendError>>()?;
            quote! { #arguments::from([#(#entries),*]) }
        }
        Expr::ToInput(inner) => {
            let inner = expr(inner, imports)?;
            quote! { #inner.to_input_value() }
        }
        Expr::MethodCall {
            receiver,
            method,
            args,
        } => {
            let receiver = expr(receiver, imports)?;
            let method = escape_rust_keyword(method);
            let args = exprs(args, imports)?;
            quote! { #receiver.#method(#(#args),*) }
        }
        Expr::AssociatedCall { function, args } => {
            let function = escape_rust_keyword(function);
            let args = exprs(args, imports)?;
            quote! { Self::#function(#(#args),*) }
        }
        Expr::Construct(fields) => {
            let fields = fields
                .iter()
                .map(|(name, value)| {
                    let name = escape_rust_keyword(name);
                    let value = expr(value, imports)?;
                    Ok(quote! { #name: #value })
                })
                .collect::<Result<Vec<_>, BackendError>>()?;
            quote! { Self { #(#fields),* } }
        }
        Expr::Unset => {
            let hydrated = imports.runtime(RuntimeItem::Hydrated);
            quote! { #hydrated::Unset }
        }
        Expr::Request {
            kind,
            action,
            arguments,
            selection,
        } => {
            let constructor = match kind {
                OperationKind::Query => format_ident!("query"),
                OperationKind::Mutation => format_ident!("mutation"),
            };
            let arguments = expr(arguments, imports)?;
            let selection = nested_selection(selection.as_deref());
            let request = imports.runtime(RuntimeItem::Request);
            quote! { #request::#constructor(#action, #arguments, #selection) }
        }
        Expr::Send(request) => {
            let request = expr(request, imports)?;
            let transport = format_ident!("{}", TRANSPORT);
            quote! { self.#transport.send(&#request) }
        }
        Expr::Try(inner) => {
            let inner = expr(inner, imports)?;
            quote! { #inner? }
        }
        Expr::Borrow(inner) => {
            let inner = expr(inner, imports)?;
            quote! { &#inner }
        }
        Expr::Decode {
            source,
            key,
            decoder: value_decoder,
            presence,
        } => {
            let source = expr(source, imports)?;
            let value_decoder = decoder(value_decoder, imports)?;
            let decode = imports.runtime(RuntimeItem::Decode);
            match presence {
                Presence::Optional => quote! { #decode::field(#source, #key, #value_decoder) },
                Presence::Required => quote! { #decode::required(#source, #key, #value_decoder) },
            }
        }
        Expr::ReadHydrated {
            property,
            wire_name,
            ty,
        } => {
            let property = escape_rust_keyword(property);
            let (_, adapter) = borrowed(ty, imports)?;
            quote! { self.#property.get(#wire_name) #adapter }
        }
        Expr::Delegate { getter, widen } => {
            let getter = escape_rust_keyword(getter);
            if *widen {
                quote! { Self::#getter(self).map(Some) }
            } else {
                quote! { Self::#getter(self) }
            }
        }
        Expr::Ok(inner) => {
            let inner = expr(inner, imports)?;
            quote! { Ok(#inner) }
        }
    })
}

/// A value usable as `impl Fn(&Value) -> Result<T, ClientError>`
fn decoder(value_decoder: &Decoder, imports: &Imports) -> Result<TokenStream, BackendError> {
    let decode = imports.runtime(RuntimeItem::Decode);
    let value = imports.runtime(RuntimeItem::Value);
    Ok(match value_decoder {
        Decoder::Scalar(p) => {
            let ty = primitive(*p);
            quote! { #decode::scalar::<#ty> }
        }
        Decoder::Enum(path) => {
            let ty = imports.path(path)?;
            quote! { #decode::enumeration::<#ty> }
        }
        Decoder::Object(path) => {
            let ty = imports.path(path)?;
            quote! { #decode::object::<#ty> }
        }
        Decoder::CustomScalar(path) => {
            let ty = imports.path(path)?;
            quote! { #decode::custom_scalar::<#ty> }
        }
        Decoder::List(element) => {
            let element = decoder(element, imports)?;
            quote! { |value: &#value| #decode::list(value, #element) }
        }
        Decoder::Nullable(inner) => {
            let inner = decoder(inner, imports)?;
            quote! { |value: &#value| #decode::nullable(value, #inner) }
        }
        Decoder::Boxed(inner) => {
            let call = match inner.as_ref() {
                Decoder::List(_) | Decoder::Nullable(_) | Decoder::Boxed(_) => {
                    let inner = decoder(inner, imports)?;
                    quote! { (#inner)(value) }
                }
                _ => {
                    let inner = decoder(inner, imports)?;
                    quote! { #inner(value) }
                }
            };
            quote! { |value: &#value| #call.map(Box::new) }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Artifact, CodeModel, Param, Returns, TypeExpr};
    use crate::registry::Primitive;

    fn imports() -> Imports {
        let mut model = CodeModel::new(vec!["types".to_string()], "User", "User", Artifact::CustomScalar);
        model.depend_on_runtime(&[
            RuntimeItem::Arguments,
            RuntimeItem::ClientError,
            RuntimeItem::Decode,
            RuntimeItem::Request,
            RuntimeItem::Value,
        ]);
        Imports::new(&model, "crate::graphql::types::User", &["User".to_string()]).unwrap()
    }

    fn render(method_ir: &Method, placement: Placement) -> String {
        let tokens = method(method_ir, &imports(), placement).unwrap();
        let item: syn::ImplItemFn = syn::parse2(tokens.clone())
            .unwrap_or_else(|e| panic!("invalid method `{tokens}`: {e}"));
        item.into_token_stream().to_string()
    }

    fn getter() -> Method {
        Method {
            name: "type".to_string(),
            docs: Some("Kind of user.\nNever empty.".to_string()),
            visibility: Visibility::Public,
            receiver: Receiver::Borrowed,
            params: Vec::new(),
            returns: Returns::Borrowed(TypeExpr::nullable(TypeExpr::Builtin(Primitive::Text))),
            body: vec![Stmt::Return(Expr::ReadHydrated {
                property: "type".to_string(),
                wire_name: "type".to_string(),
                ty: TypeExpr::nullable(TypeExpr::Builtin(Primitive::Text)),
            })],
        }
    }

    #[test]
    fn test_getter_reads_hydrated_slot() {
        let rendered = render(&getter(), Placement::Inherent);
        assert!(rendered.contains("pub fn r#type (& self) -> Result < Option < & str > , ClientError >"));
        assert!(rendered.contains("self . r#type . get (\"type\") . map (Option :: as_deref)"));
        assert!(rendered.contains("# [doc = \" Kind of user.\"]"));
        assert!(rendered.contains("# [doc = \" Never empty.\"]"));
    }

    #[test]
    fn test_declaration_has_no_body() {
        let tokens = method(&getter(), &imports(), Placement::Declaration).unwrap();
        let item: syn::TraitItemFn = syn::parse2(tokens).unwrap();
        assert!(item.default.is_none());
    }

    #[test]
    fn test_owned_setter_returns_early_when_absent() {
        let setter = Method {
            name: "with_age".to_string(),
            docs: None,
            visibility: Visibility::Public,
            receiver: Receiver::Owned,
            params: vec![Param::new(
                "age",
                TypeExpr::nullable(TypeExpr::Builtin(Primitive::Integer)),
            )],
            returns: Returns::Value(TypeExpr::SelfType),
            body: vec![
                Stmt::ReturnSelfIfAbsent {
                    param: "age".to_string(),
                },
                Stmt::Insert {
                    map: Expr::Field {
                        base: Box::new(Expr::SelfValue),
                        name: "data".to_string(),
                    },
                    key: Expr::Constant("AGE".to_string()),
                    value: Expr::ToInput(Box::new(Expr::Local("age".to_string()))),
                },
                Stmt::Return(Expr::SelfValue),
            ],
        };
        let rendered = render(&setter, Placement::Inherent);
        assert!(rendered.contains("pub fn with_age (mut self , age : Option < i32 >) -> Self"));
        assert!(rendered.contains("let Some (age) = age else { return self ; } ;"));
        assert!(rendered.contains("self . data . insert (Self :: AGE , age . to_input_value ()) ;"));
    }

    #[test]
    fn test_nested_decoders_compose() {
        let value_decoder = Decoder::Nullable(Box::new(Decoder::List(Box::new(Decoder::Object(
            "crate::graphql::types::Post".to_string(),
        )))));
        let rendered = decoder(&value_decoder, &imports()).unwrap().to_string();
        assert_eq!(
            rendered,
            "| value : & Value | decode :: nullable (value , | value : & Value | decode :: list (value , decode :: object :: < crate :: graphql :: types :: Post >))"
        );
    }

    #[test]
    fn test_boxed_decoder_moves_object_to_heap() {
        let value_decoder = Decoder::Nullable(Box::new(Decoder::Object(
            "crate::graphql::types::User".to_string(),
        )))
        .boxed();
        let rendered = decoder(&value_decoder, &imports()).unwrap().to_string();
        assert_eq!(
            rendered,
            "| value : & Value | decode :: nullable (value , | value : & Value | decode :: object :: < User > (value) . map (Box :: new))"
        );
    }

    #[test]
    fn test_request_and_send() {
        let request = Expr::Request {
            kind: OperationKind::Mutation,
            action: "createUser".to_string(),
            arguments: Box::new(Expr::Arguments(Vec::new())),
            selection: Some("selection".to_string()),
        };
        assert_eq!(
            expr(&request, &imports()).unwrap().to_string(),
            "Request :: mutation (\"createUser\" , Arguments :: new () , Some (selection . into_selection ()))"
        );

        let send = Expr::Try(Box::new(Expr::Send(Box::new(Expr::Local(
            "request".to_string(),
        )))));
        assert_eq!(
            expr(&send, &imports()).unwrap().to_string(),
            "self . transport . send (& request) ?"
        );
    }
}
