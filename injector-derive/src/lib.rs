use crate::injectable::expand_injectable;
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput, Error};

mod attributes;
mod injectable;

/// Derives `Injectable`. Additional interfaces, which the type can be resolved as, can be listed
/// with `#[injectable(interfaces(Trait, path::to::OtherTrait))]`.
#[proc_macro_derive(Injectable, attributes(injectable))]
pub fn generate_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_injectable(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}
