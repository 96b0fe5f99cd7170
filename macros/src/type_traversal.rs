//!
//! Utilities that allow use to traverse `struct`s and `enum`s.
//!

use proc_macro2::Span;

///
/// Checks to see if an identifier is in a path.
///
pub fn in_path<'a>(path: &'a syn::Path, ident: &str) -> Option<&'a syn::PathSegment> {
    path.segments
        .iter()
        .find(|syn::PathSegment { ident: id, .. }| id == ident)
}

///
/// Checks if a type has the ident inside its name.
///
pub fn is_named_type<'a>(ty: &'a syn::Type, ident: &str) -> Option<&'a syn::PathSegment> {
    match ty {
        syn::Type::Path(syn::TypePath { path, .. }) => in_path(path, ident),
        _ => None,
    }
}

pub trait ToMember {
    fn to_member(self) -> syn::Member;
}

impl ToMember for syn::Index {
    fn to_member(self) -> syn::Member {
        syn::Member::Unnamed(self)
    }
}

impl ToMember for syn::Ident {
    fn to_member(self) -> syn::Member {
        syn::Member::Named(self)
    }
}

pub fn index(index: u32) -> syn::Index {
    syn::Index {
        index,
        span: Span::call_site(),
    }
}

///
/// Finds the member of a struct that holds its span:
/// either a field named `span`, or the first field of type `Span`.
///
pub fn span_member(fields: &syn::Fields) -> Option<syn::Member> {
    match fields {
        syn::Fields::Named(syn::FieldsNamed { named, .. }) => named
            .iter()
            .find(|f| f.ident.as_ref().map(|i| i == "span").unwrap_or(false))
            .or_else(|| named.iter().find(|f| is_named_type(&f.ty, "Span").is_some()))
            .and_then(|f| f.ident.clone())
            .map(ToMember::to_member),
        syn::Fields::Unnamed(syn::FieldsUnnamed { unnamed, .. }) => unnamed
            .iter()
            .enumerate()
            .find(|(_, f)| is_named_type(&f.ty, "Span").is_some())
            .map(|(i, _)| index(i as u32).to_member()),
        syn::Fields::Unit => None,
    }
}
