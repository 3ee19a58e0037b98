//! Item rendering per artifact kind

use super::body::{doc_attrs, method, Placement};
use super::imports::Imports;
use super::names::escape_rust_keyword;
use super::types::owned;
use crate::backends::BackendError;
use crate::ir::{
    ClassModel, CodeModel, Constant, EnumModel, InterfaceModel, Method, OutputModel, RuntimeItem,
    INPUT_STORE, SELECTION_STORE, TRANSPORT,
};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

fn constants(constants: &[Constant]) -> TokenStream {
    let items = constants.iter().map(|constant| {
        let name = format_ident!("{}", constant.name);
        let value = &constant.value;
        quote! { pub const #name: &'static str = #value; }
    });
    quote! { #(#items)* }
}

fn methods(
    methods: &[Method],
    imports: &Imports,
    placement: Placement,
) -> Result<Vec<TokenStream>, BackendError> {
    methods
        .iter()
        .map(|m| method(m, imports, placement))
        .collect()
}

fn type_ident(model: &CodeModel) -> Ident {
    escape_rust_keyword(&model.name)
}

/// Name of the marker type behind a custom scalar alias
pub(super) fn scalar_tag(model: &CodeModel) -> String {
    format!("{}Tag", model.name)
}

pub(super) fn custom_scalar(model: &CodeModel, imports: &Imports) -> TokenStream {
    let docs = doc_attrs(model.docs.as_deref());
    let name = type_ident(model);
    let tag = format_ident!("{}", scalar_tag(model));
    let graphql_name = &model.graphql_name;
    let tag_doc = format!(" Tag for the `{graphql_name}` scalar");
    let scalar = imports.runtime(RuntimeItem::Scalar);
    let scalar_tag = imports.runtime(RuntimeItem::ScalarTag);

    quote! {
        #[doc = #tag_doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum #tag {}

        impl #scalar_tag for #tag {
            const NAME: &'static str = #graphql_name;
        }

        #docs
        pub type #name = #scalar<#tag>;
    }
}

pub(super) fn enumeration(model: &CodeModel, enum_model: &EnumModel, imports: &Imports) -> TokenStream {
    let docs = doc_attrs(model.docs.as_deref());
    let name = type_ident(model);
    let graphql_name = &model.graphql_name;
    let graphql_enum = imports.runtime(RuntimeItem::GraphQLEnum);
    let input_value = imports.runtime(RuntimeItem::InputValue);
    let to_input_value = imports.runtime(RuntimeItem::ToInputValue);

    let variants = enum_model.values.iter().map(|value| {
        let docs = doc_attrs(value.docs.as_deref());
        let variant = format_ident!("{}", value.variant);
        quote! { #docs #variant }
    });
    let constants = constants(
        &enum_model
            .values
            .iter()
            .map(|value| Constant {
                name: value.constant.clone(),
                value: value.wire.clone(),
            })
            .collect::<Vec<_>>(),
    );
    let accessors = enum_model.values.iter().map(|value| {
        let accessor = escape_rust_keyword(&value.accessor);
        let variant = format_ident!("{}", value.variant);
        quote! {
            pub fn #accessor() -> Self {
                Self::#variant
            }
        }
    });
    let all = enum_model.values.iter().map(|value| {
        let variant = format_ident!("{}", value.variant);
        quote! { Self::#variant }
    });
    let to_wire = enum_model.values.iter().map(|value| {
        let variant = format_ident!("{}", value.variant);
        let constant = format_ident!("{}", value.constant);
        quote! { Self::#variant => Self::#constant }
    });
    let from_wire = enum_model.values.iter().map(|value| {
        let variant = format_ident!("{}", value.variant);
        let constant = format_ident!("{}", value.constant);
        quote! { Self::#constant => Some(Self::#variant) }
    });

    let as_str = if enum_model.values.is_empty() {
        quote! { match *self {} }
    } else {
        quote! { match *self { #(#to_wire),* } }
    };

    quote! {
        #docs
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum #name {
            #(#variants),*
        }

        impl #name {
            #constants

            #(#accessors)*

            /// Every value, in declaration order.
            pub fn options() -> &'static [Self] {
                &[#(#all),*]
            }
        }

        impl #graphql_enum for #name {
            const TYPE_NAME: &'static str = #graphql_name;

            fn as_str(&self) -> &'static str {
                #as_str
            }

            fn from_wire(value: &str) -> Option<Self> {
                match value {
                    #(#from_wire,)*
                    _ => None,
                }
            }

            fn options() -> &'static [Self] {
                Self::options()
            }
        }

        impl #to_input_value for #name {
            fn to_input_value(&self) -> #input_value {
                #input_value::Enum(#graphql_enum::as_str(self).to_string())
            }
        }
    }
}

pub(super) fn input_object(
    model: &CodeModel,
    class: &ClassModel,
    imports: &Imports,
) -> Result<TokenStream, BackendError> {
    let docs = doc_attrs(model.docs.as_deref());
    let name = type_ident(model);
    let store = format_ident!("{}", INPUT_STORE);
    let constants = constants(&class.constants);
    let methods = methods(&class.methods, imports, Placement::Inherent)?;
    let arguments = imports.runtime(RuntimeItem::Arguments);
    let input_value = imports.runtime(RuntimeItem::InputValue);
    let to_input_value = imports.runtime(RuntimeItem::ToInputValue);

    Ok(quote! {
        #docs
        #[derive(Debug, Clone, PartialEq)]
        pub struct #name {
            #store: #arguments,
        }

        impl #name {
            #constants

            #(#methods)*
        }

        impl #to_input_value for #name {
            fn to_input_value(&self) -> #input_value {
                #input_value::Object(self.#store.clone())
            }
        }
    })
}

pub(super) fn output_object(
    model: &CodeModel,
    output: &OutputModel,
    imports: &Imports,
) -> Result<TokenStream, BackendError> {
    let docs = doc_attrs(model.docs.as_deref());
    let name = type_ident(model);
    let graphql_name = &model.graphql_name;

    let fields = output
        .properties
        .iter()
        .map(|property| {
            let docs = doc_attrs(property.docs.as_deref());
            let field = escape_rust_keyword(&property.name);
            let ty = owned(&property.ty, imports)?;
            Ok(quote! { #docs #field: #ty })
        })
        .collect::<Result<Vec<_>, BackendError>>()?;
    let inherent = methods(&output.methods, imports, Placement::Inherent)?;
    let output_object = imports.runtime(RuntimeItem::OutputObject);
    let map = imports.runtime(RuntimeItem::Map);
    let value = imports.runtime(RuntimeItem::Value);
    let error = imports.runtime(RuntimeItem::ClientError);

    let conformances = output
        .implements
        .iter()
        .map(|conformance| {
            let interface = imports.path(&conformance.interface)?;
            let accessors = methods(&conformance.methods, imports, Placement::TraitImpl)?;
            Ok(quote! {
                impl #interface for #name {
                    #(#accessors)*
                }
            })
        })
        .collect::<Result<Vec<_>, BackendError>>()?;

    Ok(quote! {
        #docs
        #[derive(Debug, Clone, PartialEq)]
        pub struct #name {
            #(#fields),*
        }

        impl #name {
            #(#inherent)*
        }

        impl #output_object for #name {
            const TYPE_NAME: &'static str = #graphql_name;

            fn from_map(fields: &#map<String, #value>) -> Result<Self, #error> {
                Self::from_map(fields)
            }
        }

        #(#conformances)*
    })
}

pub(super) fn interface(
    model: &CodeModel,
    interface: &InterfaceModel,
    imports: &Imports,
) -> Result<TokenStream, BackendError> {
    let docs = doc_attrs(model.docs.as_deref());
    let name = type_ident(model);
    let accessors = methods(&interface.accessors, imports, Placement::Declaration)?;

    Ok(quote! {
        #docs
        pub trait #name {
            #(#accessors)*
        }
    })
}

pub(super) fn field_selection(
    model: &CodeModel,
    class: &ClassModel,
    imports: &Imports,
) -> Result<TokenStream, BackendError> {
    let docs = doc_attrs(model.docs.as_deref());
    let name = type_ident(model);
    let store = format_ident!("{}", SELECTION_STORE);
    let constants = constants(&class.constants);
    let methods = methods(&class.methods, imports, Placement::Inherent)?;
    let field_selection = imports.runtime(RuntimeItem::FieldSelection);

    Ok(quote! {
        #docs
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct #name {
            #store: #field_selection,
        }

        impl #name {
            #constants

            /// Creates a builder with nothing selected.
            pub fn new() -> Self {
                Self::default()
            }

            #(#methods)*

            /// The recorded selection set.
            pub fn into_selection(self) -> #field_selection {
                self.#store
            }
        }
    })
}

pub(super) fn service(
    model: &CodeModel,
    class: &ClassModel,
    imports: &Imports,
) -> Result<TokenStream, BackendError> {
    let docs = doc_attrs(model.docs.as_deref());
    let name = type_ident(model);
    let transport = format_ident!("{}", TRANSPORT);
    let methods = methods(&class.methods, imports, Placement::Inherent)?;
    let transport_trait = imports.runtime(RuntimeItem::Transport);

    Ok(quote! {
        #docs
        #[derive(Debug, Clone)]
        pub struct #name<T> {
            #transport: T,
        }

        impl<T: #transport_trait> #name<T> {
            /// Creates a service sending every request through `transport`.
            pub fn new(#transport: T) -> Self {
                Self { #transport }
            }

            #(#methods)*
        }
    })
}
