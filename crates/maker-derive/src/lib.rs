//! Derive macro for record-maker records
//!
//! This crate provides `#[derive(Record)]`, which implements
//! `maker_core::Record` and `maker_core::Field` for structs with named fields.
//!
//! # Example
//!
//! ```rust,ignore
//! use maker_derive::Record;
//!
//! #[derive(Record, Default)]
//! struct Order {
//!     #[maker("rand[1;1000;1]")]
//!     id: u64,
//!
//!     #[maker("regex[[A-Z]{2}-[0-9]{6}]")]
//!     reference: String,
//!
//!     // Nested records and sequences of records need no attribute
//!     customer: Customer,
//!
//!     #[maker(skip)]
//!     cache: Vec<u8>,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields, Ident, LitStr};

/// Derive `maker_core::Record` and `maker_core::Field` for a struct
///
/// Each field can carry one `#[maker(...)]` attribute:
///
/// - `#[maker("rand[min;max;step]")]`, `#[maker("regex[...]")]` or
///   `#[maker("func[name]")]` attaches a directive
/// - `#[maker(skip)]` hides the field from the record
///
/// Every other field is listed without a directive. Its type must implement
/// `maker_core::Field`.
///
/// # Generated Code
///
/// The macro generates:
/// - `impl maker_core::Record` listing the fields in declaration order
/// - `impl maker_core::Field` so the struct can be nested in other records
#[proc_macro_derive(Record, attributes(maker))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_record_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

enum FieldAttr {
    Directive(LitStr),
    Skip,
}

fn derive_record_impl(input: DeriveInput) -> Result<proc_macro2::TokenStream, Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut descriptors = Vec::new();
    let mut slot_arms = Vec::new();
    let mut bounds = Vec::new();

    for field in fields {
        let attr = get_field_attr(&field.attrs)?;
        if matches!(attr, Some(FieldAttr::Skip)) {
            continue;
        }

        // Named fields always have an identifier
        let Some(ident) = &field.ident else {
            continue;
        };
        let ty = &field.ty;
        let field_name = ident.unraw().to_string();

        let directive = match attr {
            Some(FieldAttr::Directive(lit)) => quote! { ::core::option::Option::Some(#lit) },
            _ => quote! { ::core::option::Option::None },
        };

        descriptors.push(quote! {
            ::maker_core::FieldDescriptor::new(
                #field_name,
                <#ty as ::maker_core::Field>::kind(),
                #directive,
            )
        });
        slot_arms.push(quote! {
            #field_name => ::core::option::Option::Some(::maker_core::Field::slot(&mut self.#ident))
        });
        bounds.push(quote! { #ty: ::maker_core::Field });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let mut predicates = where_clause
        .map(|w| w.predicates.iter().map(|p| quote! { #p }).collect::<Vec<_>>())
        .unwrap_or_default();
    if !input.generics.params.is_empty() {
        predicates.extend(bounds);
    }

    let expanded = quote! {
        impl #impl_generics ::maker_core::Record for #name #ty_generics
        where
            #(#predicates,)*
        {
            fn fields(&self) -> ::std::vec::Vec<::maker_core::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<::maker_core::Slot<'_>> {
                match name {
                    #(#slot_arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics ::maker_core::Field for #name #ty_generics
        where
            #(#predicates,)*
        {
            fn kind() -> ::maker_core::FieldKind {
                ::maker_core::FieldKind::Record
            }

            fn slot(&mut self) -> ::maker_core::Slot<'_> {
                ::maker_core::Slot::Record(self)
            }
        }
    };

    Ok(expanded)
}

/// Extract `#[maker("...")]` or `#[maker(skip)]` from field attributes
fn get_field_attr(attrs: &[syn::Attribute]) -> Result<Option<FieldAttr>, Error> {
    let mut found = None;

    for attr in attrs {
        if !attr.path().is_ident("maker") {
            continue;
        }
        if found.is_some() {
            return Err(Error::new_spanned(
                attr,
                "Duplicate #[maker(...)] attribute - each field takes at most one",
            ));
        }

        let parsed = if let Ok(lit) = attr.parse_args::<LitStr>() {
            FieldAttr::Directive(lit)
        } else {
            match attr.parse_args::<Ident>() {
                Ok(ident) if ident == "skip" => FieldAttr::Skip,
                _ => {
                    return Err(Error::new_spanned(
                        attr,
                        "Expected #[maker(\"directive\")] or #[maker(skip)]",
                    ));
                }
            }
        };
        found = Some(parsed);
    }

    Ok(found)
}

