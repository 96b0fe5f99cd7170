//!
//! `#[derive(Spanned)]`.
//!

use proc_macro2::TokenStream;
use quote::quote;

use crate::type_traversal::span_member;

pub fn expand(input: syn::DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        syn::Data::Struct(st) => {
            let Some(member) = span_member(&st.fields) else {
                return Err(syn::Error::new_spanned(
                    ident,
                    "Expected a `span` field, or a field of type `Span`.",
                ));
            };

            quote! { self.#member }
        }
        syn::Data::Enum(en) => {
            let arms = en
                .variants
                .iter()
                .map(|variant| {
                    let var = &variant.ident;
                    match &variant.fields {
                        syn::Fields::Unnamed(syn::FieldsUnnamed { unnamed, .. })
                            if unnamed.len() == 1 =>
                        {
                            Ok(quote! {
                                Self::#var(inner) => crate::common::Spanned::span(inner),
                            })
                        }
                        _ => Err(syn::Error::new_spanned(
                            variant,
                            "Each variant must wrap exactly one spanned value.",
                        )),
                    }
                })
                .collect::<syn::Result<Vec<_>>>()?;

            quote! {
                match self {
                    #(#arms)*
                }
            }
        }
        syn::Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                ident,
                "Unions cannot be Spanned.",
            ))
        }
    };

    Ok(quote! {
        impl #impl_generics crate::common::Spanned for #ident #ty_generics #where_clause {
            fn span(&self) -> crate::common::Span {
                #body
            }
        }
    })
}
