//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates an implementation of the `bibseek::Record` trait and
//! field name constants for type-safe query building.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_record_attrs;

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut value_exprs: Vec<TokenStream> = Vec::new();
    let mut citation_key: Option<TokenStream> = None;
    let mut seen_names: HashSet<String> = HashSet::new();

    for field in fields.iter() {
        let member = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let record_attrs = parse_record_attrs(&field.attrs)?;

        if record_attrs.skip {
            continue;
        }

        if record_attrs.citation_key {
            if citation_key.is_some() {
                return Err(Error::new(
                    field.span(),
                    "only one field can be marked #[record(citation_key)]",
                ));
            }
            citation_key = Some(quote! { ::bibseek::FieldText::field_text(&self.#member) });
            continue;
        }

        // Query names are matched against lowercased input
        let query_name = record_attrs
            .rename
            .unwrap_or_else(|| member.unraw().to_string())
            .to_lowercase();

        if !seen_names.insert(query_name.clone()) {
            return Err(Error::new(
                field.span(),
                format!("duplicate record field name '{}'", query_name),
            ));
        }

        let mut const_str = to_screaming_snake_case(&query_name);
        if const_str.starts_with(|c: char| c.is_ascii_digit()) {
            const_str.insert_str(0, "FIELD_");
        }
        let const_name = format_ident!("{}", const_str);
        field_constants.push(quote! {
            /// Field name constant for type-safe queries.
            pub const #const_name: &'static str = #query_name;
        });

        let value_expr = quote! { ::bibseek::FieldText::field_text(&self.#member) };
        field_matches.push(quote! {
            #query_name => #value_expr,
        });
        value_exprs.push(value_expr);
    }

    let value_count = value_exprs.len();
    let citation_key_fn = citation_key.map(|expr| {
        quote! {
            fn citation_key(&self) -> ::core::option::Option<&str> {
                #expr
            }
        }
    });

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::bibseek::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, name: &str) -> ::core::option::Option<&str> {
                match name.to_lowercase().as_str() {
                    #(#field_matches)*
                    _ => ::core::option::Option::None,
                }
            }

            fn all_values(
                &self,
            ) -> ::std::boxed::Box<dyn ::core::iter::Iterator<Item = &str> + '_> {
                let values: [::core::option::Option<&str>; #value_count] = [#(#value_exprs),*];
                ::std::boxed::Box::new(::core::iter::IntoIterator::into_iter(values).flatten())
            }

            #citation_key_fn
        }
    };

    Ok(expanded)
}

/// Convert a field name to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '-' || c == ' ' || c == '_' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.extend(c.to_uppercase());
            prev_was_lower = c.is_lowercase();
        }
    }

    result
}
