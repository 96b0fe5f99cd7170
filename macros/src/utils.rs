//!
//! Utilities for the utility macros.
//!

use std::ops::Deref;

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    Token,
};

///
/// A lit str, but an error is raised
/// if it is empty.
///
pub struct NonEmptyStr(syn::LitStr);

impl Parse for NonEmptyStr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lit: syn::LitStr = input.parse()?;

        if lit.value().is_empty() {
            return Err(syn::Error::new(lit.span(), "This should not be empty."));
        }

        Ok(Self(lit))
    }
}

impl Deref for NonEmptyStr {
    type Target = syn::LitStr;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

///
/// Parameters to the `#[ECMARef(...)]` macro:
/// the production's name, then a link into the specification.
///
pub struct ECMARef {
    name: NonEmptyStr,
    url: NonEmptyStr,
}

impl Parse for ECMARef {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = input.parse()?;
        let _: Token![,] = input.parse()?;
        let url = input.parse()?;

        Ok(Self { name, url })
    }
}

///
/// Things that can become documentation attributes.
///
pub trait ToRustdoc {
    fn to_rustdoc(&self) -> Vec<syn::Attribute>;
}

fn doc_attr(line: &str) -> syn::Attribute {
    let line = syn::LitStr::new(line, Span::call_site());
    syn::parse_quote! { #[doc = #line] }
}

impl ToRustdoc for ECMARef {
    fn to_rustdoc(&self) -> Vec<syn::Attribute> {
        let name = self.name.value();
        let url = self.url.value();

        [
            format!(" ## {name}"),
            format!(" See the [ECMAScript specification]({url})."),
            " ***".to_string(),
        ]
        .iter()
        .map(|line| doc_attr(line))
        .collect()
    }
}

///
/// Get the attributes of an item, if that item can have any.
///
pub fn get_item_attrs(item: &mut syn::Item) -> Option<&mut Vec<syn::Attribute>> {
    Some(match item {
        syn::Item::Const(syn::ItemConst { attrs, .. }) => attrs,
        syn::Item::Enum(syn::ItemEnum { attrs, .. }) => attrs,
        syn::Item::Fn(syn::ItemFn { attrs, .. }) => attrs,
        syn::Item::Impl(syn::ItemImpl { attrs, .. }) => attrs,
        syn::Item::Mod(syn::ItemMod { attrs, .. }) => attrs,
        syn::Item::Static(syn::ItemStatic { attrs, .. }) => attrs,
        syn::Item::Struct(syn::ItemStruct { attrs, .. }) => attrs,
        syn::Item::Trait(syn::ItemTrait { attrs, .. }) => attrs,
        syn::Item::Type(syn::ItemType { attrs, .. }) => attrs,
        _ => return None,
    })
}
