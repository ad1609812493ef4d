//! Derive macro implementation for tagconf

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields};

mod attrs;

use attrs::FieldAttrs;

/// `Config` derive macro
///
/// Implements `tagconf::Config` (walk the fields) and `tagconf::Field` (be
/// used as a nested group inside another config) for a struct with named
/// fields.
///
/// # Field attributes
///
/// `#[conf(name = "value", ...)]` attaches annotations to a field. Any name is
/// accepted; the loader decides which ones it reads. With the default tag
/// configuration:
///
/// - `env = "KEY"` or `env = "KEY,omitempty"`: lookup key and allow-empty flag
/// - `default = "value"`: raw default, coerced like a sourced value
/// - `description = "..."`, `example = "..."`: documentation only
/// - `title = "..."`: group title for a nested config field
///
/// Fields whose type is itself a `#[derive(Config)]` struct are walked
/// recursively; every other field type must implement `tagconf::Leaf`. On a
/// generic struct each field type gets a `tagconf::Field` bound.
///
/// # Example
///
/// See the `tagconf` crate documentation for usage examples.
#[proc_macro_derive(Config, attributes(conf))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "Config only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Config only supports structs")
                .to_compile_error()
                .into();
        }
    };

    // Generic structs bound every field type by `Field` on the impls.
    let mut generics = input.generics.clone();
    if generics.type_params().next().is_some() {
        let where_clause = generics.make_where_clause();
        for field in fields {
            let ty = &field.ty;
            where_clause
                .predicates
                .push(parse_quote! { #ty: ::tagconf::Field });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut resolvers = Vec::with_capacity(fields.len());
    let mut describers = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;

        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(err) => return err.to_compile_error().into(),
        };

        let field_name = ident.unraw().to_string();
        let tags = attrs.tags.iter().map(|(name, value)| quote! { (#name, #value) });
        let info = quote! {
            ::tagconf::FieldInfo {
                name: #field_name,
                tags: &[#(#tags),*],
            }
        };

        resolvers.push(quote! {
            ::tagconf::Field::resolve(&mut self.#ident, &#info, loader)?;
        });
        describers.push(quote! {
            <#field_type as ::tagconf::Field>::describe(&#info, builder);
        });
    }

    let expanded = quote! {
        impl #impl_generics ::tagconf::Config for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn resolve_fields(
                &mut self,
                loader: &::tagconf::Loader,
            ) -> ::core::result::Result<(), ::tagconf::ResolveError> {
                #(#resolvers)*
                Ok(())
            }

            #[allow(unused_variables)]
            fn describe_fields(builder: &mut ::tagconf::DocBuilder<'_>) {
                #(#describers)*
            }
        }

        impl #impl_generics ::tagconf::Field for #struct_name #ty_generics #where_clause {
            fn resolve(
                &mut self,
                info: &::tagconf::FieldInfo,
                loader: &::tagconf::Loader,
            ) -> ::core::result::Result<(), ::tagconf::ResolveError> {
                ::tagconf::Config::resolve_fields(self, loader)
                    .map_err(|err| ::tagconf::ResolveError::nested(info.name, err))
            }

            fn describe(info: &::tagconf::FieldInfo, builder: &mut ::tagconf::DocBuilder<'_>) {
                builder.group::<Self>(info);
            }
        }
    };

    TokenStream::from(expanded)
}
