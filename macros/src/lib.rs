//! Derive macros for slicestore
//!
//! This crate provides procedural macros that remove the boilerplate around
//! action enums.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `slicestore_core::action::Action` and
//!   generates `is_mutation()`
//!
//! # Example
//!
//! ```ignore
//! use slicestore_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[mutation]
//!     CreateTodo { desc: String },
//!
//!     SelectTodo { id: String },
//! }
//!
//! // Generated:
//! assert_eq!(TodoAction::CreateTodo { desc: "x".into() }.action_type(), "CREATE_TODO");
//! assert!(TodoAction::CreateTodo { desc: "x".into() }.is_mutation());
//! assert!(!TodoAction::SelectTodo { id: "1".into() }.is_mutation());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Variant};

/// Derive macro for Action enums
///
/// Generates:
/// - `impl slicestore_core::action::Action` whose `action_type()` returns the
///   variant name in `SCREAMING_SNAKE_CASE` (`CreateTodo` → `"CREATE_TODO"`)
/// - `is_mutation()` - Returns true if the variant is marked `#[mutation]`
///
/// Both generated matches list every variant, so adding a variant without
/// deciding whether it mutates is still caught by the compiler here and in
/// hand-written matches.
///
/// # Attributes
///
/// - `#[mutation]` - Mark a variant as changing stored data
///
/// # Panics
///
/// This macro produces a compile error (not a runtime panic) if applied to a
/// non-enum type.
#[proc_macro_derive(Action, attributes(mutation))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let variants: Vec<&Variant> = data_enum.variants.iter().collect();

    let (action_type_body, is_mutation_body) = if variants.is_empty() {
        (quote! { match *self {} }, quote! { match *self {} })
    } else {
        let type_arms = variants.iter().map(|variant| {
            let pattern = variant_pattern(variant);
            let type_name = screaming_snake_case(&variant.ident.to_string());
            quote! { #pattern => #type_name, }
        });

        let mutation_arms = variants.iter().map(|variant| {
            let pattern = variant_pattern(variant);
            let is_mutation = has_attribute(&variant.attrs, "mutation");
            quote! { #pattern => #is_mutation, }
        });

        (
            quote! { match self { #(#type_arms)* } },
            quote! { match self { #(#mutation_arms)* } },
        )
    };

    let expanded = quote! {
        impl #impl_generics ::slicestore_core::action::Action for #name #ty_generics #where_clause {
            fn action_type(&self) -> &'static str {
                #action_type_body
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action changes stored data
            #[must_use]
            pub const fn is_mutation(&self) -> bool {
                #is_mutation_body
            }
        }
    };

    TokenStream::from(expanded)
}

/// Match pattern covering a variant regardless of its payload
fn variant_pattern(variant: &Variant) -> TokenStream2 {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// `CreateTodo` → `CREATE_TODO`, `HTTPRequest` → `HTTP_REQUEST`
fn screaming_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }

    out
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
