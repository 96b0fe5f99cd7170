//!
//! Macros for the main crate.
//!

mod spanned;
mod type_traversal;
mod utils;

use proc_macro::TokenStream as Tokens;
use quote::ToTokens;
use syn::parse_macro_input;
use utils::{get_item_attrs, ECMARef, ToRustdoc};

///
/// ## ECMARef
///
/// Allows easy reference of the **ECMAScript** specification.
///
/// This macro will add an additional section at the top of the Rustdoc
/// for the item attached, linking to the relevant section in the specification.
///
/// ### Example
///
/// ```ignore
/// use crate::ECMARef;
///
/// // You must always include an acompanying URL.
/// #[ECMARef("NumericLiteral", "https://tc39.es/ecma262/#sec-literals-numeric-literals")]
/// struct Number;
/// ```
///
#[allow(non_snake_case)]
#[proc_macro_attribute]
pub fn ECMARef(params: Tokens, target: Tokens) -> Tokens {
    let mut target: syn::Item = parse_macro_input!(target);
    let params: ECMARef = parse_macro_input!(params);
    let attrs = params.to_rustdoc();

    let Some(original_attrs) = get_item_attrs(&mut target) else {
        return syn::Error::new_spanned(target, "Cannot add spec ref to this item.")
            .into_compile_error()
            .into();
    };

    // Prepend our new documentation to the start of
    // the attribute macros.
    *original_attrs = attrs
        .into_iter()
        .chain(original_attrs.iter().cloned())
        .collect();

    target.into_token_stream().into()
}

///
/// ## Spanned
///
/// Derives `crate::common::Spanned` for:
/// * structs with a field called `span` (or a field of type `Span`),
/// * enums where every variant wraps exactly one [Spanned] value.
///
/// ### Example
///
/// ```ignore
/// #[derive(Spanned)]
/// pub struct Comment {
///     kind: CommentKind,
///     span: Span,
/// }
/// ```
///
#[proc_macro_derive(Spanned)]
pub fn derive_spanned(target: Tokens) -> Tokens {
    let target: syn::DeriveInput = parse_macro_input!(target);

    match spanned::expand(target) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
