use crate::attributes::InjectableAttributes;
use itertools::Itertools;
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::{Attribute, DeriveInput, Error, Path, Result};

const INJECTABLE: &str = "injectable";

fn extract_interfaces(attributes: &[Attribute]) -> Result<Vec<Path>> {
    let attributes: Vec<InjectableAttributes> = attributes
        .iter()
        .filter(|attribute| attribute.path().is_ident(INJECTABLE))
        .map(InjectableAttributes::try_from)
        .try_collect()?;

    Ok(attributes
        .into_iter()
        .flat_map(|attributes| attributes.interfaces)
        .collect())
}

fn generate_self_cast(ident: &Ident) -> TokenStream {
    quote! {
        if interface == ::std::any::TypeId::of::<#ident>() {
            fn view(source: &dyn ::std::any::Any) -> ::std::option::Option<&#ident> {
                source.downcast_ref::<#ident>()
            }

            fn take(
                source: ::std::boxed::Box<dyn ::std::any::Any>,
            ) -> ::std::option::Option<::std::boxed::Box<#ident>> {
                source.downcast::<#ident>().ok()
            }

            static CAST: ::injector::component::InterfaceCast<#ident> =
                ::injector::component::InterfaceCast::new(view, take);
            return ::std::option::Option::Some(&CAST);
        }
    }
}

fn generate_interface_cast(ident: &Ident, interface: &Path) -> TokenStream {
    quote! {
        if interface == ::std::any::TypeId::of::<dyn #interface>() {
            fn view(
                source: &dyn ::std::any::Any,
            ) -> ::std::option::Option<&(dyn #interface + 'static)> {
                source
                    .downcast_ref::<#ident>()
                    .map(|instance| instance as &(dyn #interface + 'static))
            }

            fn take(
                source: ::std::boxed::Box<dyn ::std::any::Any>,
            ) -> ::std::option::Option<::std::boxed::Box<dyn #interface>> {
                source
                    .downcast::<#ident>()
                    .ok()
                    .map(|instance| instance as ::std::boxed::Box<dyn #interface>)
            }

            static CAST: ::injector::component::InterfaceCast<dyn #interface> =
                ::injector::component::InterfaceCast::new(view, take);
            return ::std::option::Option::Some(&CAST);
        }
    }
}

pub fn expand_injectable(input: &DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Can only derive Injectable on non-generic types!",
        ));
    }

    let ident = &input.ident;
    let self_cast = generate_self_cast(ident);
    let interface_casts = extract_interfaces(&input.attrs)?
        .iter()
        .map(|interface| generate_interface_cast(ident, interface))
        .collect_vec();

    Ok(quote! {
        #[automatically_derived]
        impl ::injector::component::Injectable for #ident {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }

            fn interface_cast(
                &self,
                interface: ::std::any::TypeId,
            ) -> ::std::option::Option<&'static dyn ::std::any::Any> {
                #self_cast
                #(#interface_casts)*
                ::std::option::Option::None
            }
        }
    })
}
