use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Derives `from_bytes` and `from_slice` constructors that decode a JSON
/// response body into the annotated type.
///
/// The generated code refers to `crate::Result` and `crate::Error::JsonParse`,
/// so the derive is only meant to be used inside `ollama-chat`.
#[proc_macro_derive(FromBytes)]
pub fn derive_from_bytes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Decodes a JSON response body.
            pub fn from_bytes(bytes: ::bytes::Bytes) -> crate::Result<Self> {
                Self::from_slice(&bytes)
            }

            /// Decodes a JSON response body held in a byte slice.
            pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
                ::serde_json::from_slice(bytes).map_err(crate::Error::JsonParse)
            }
        }
    };
    TokenStream::from(expanded)
}
