use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::BTreeSet;
use syn::{Attribute, Data, DeriveInput, Field, Fields, Ident, Type, Variant};

/// What the expansion needs to know about a single error variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfgs: Vec<&'a Attribute>,
}

pub fn expand(input: DeriveInput) -> TokenStream {
    try_expand(&input).unwrap_or_else(|err| err.to_compile_error())
}

fn try_expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "evhub_error can only be applied to enums",
        ));
    };

    let variants = data.variants.iter().map(classify).collect::<syn::Result<Vec<_>>>()?;

    let name = &input.ident;
    let ext = format_ident!("{name}Ext");
    let derives = missing_derives(&input.attrs);
    let context_trait = context_trait(name, &ext, &variants);
    let source_impls = variants.iter().filter_map(|v| source_impls(name, &ext, v));
    let internal_impls = internal_impls(name, &variants);

    Ok(quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #context_trait
        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(
            context: &Option<std::borrow::Cow<'static, str>>,
        ) -> std::borrow::Cow<'static, str> {
            match context {
                Some(c) => std::borrow::Cow::Owned(format!(" ({c})")),
                None => std::borrow::Cow::Borrowed(""),
            }
        }
    })
}

fn classify(variant: &Variant) -> syn::Result<ErrorVariant<'_>> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "evhub_error variants need named fields (`source`, `message`, `context`, ...)",
        ));
    };

    let mut source = None;
    let mut has_context = false;

    for field in &fields.named {
        let Some(ident) = field.ident.as_ref() else { continue };
        if ident == "context" {
            if !is_context_type(&field.ty) {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "`context` must be typed `Option<Cow<'static, str>>`",
                ));
            }
            has_context = true;
        } else if ident == "source" || has_attr(field, "source") || has_attr(field, "from") {
            source.get_or_insert((ident, &field.ty));
        }
    }

    if source.is_some() && !has_context {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "variants wrapping a source error also need `context: Option<Cow<'static, str>>`",
        ));
    }

    Ok(ErrorVariant {
        ident: &variant.ident,
        source,
        has_context,
        cfgs: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
    })
}

fn missing_derives(attrs: &[Attribute]) -> TokenStream {
    let present = derived_names(attrs);

    let mut wanted = Vec::new();
    if !present.contains("Debug") {
        wanted.push(quote!(Debug));
    }
    if !present.contains("Error") {
        wanted.push(quote!(::thiserror::Error));
    }

    if wanted.is_empty() { TokenStream::new() } else { quote!(#[derive(#(#wanted),*)]) }
}

fn derived_names(attrs: &[Attribute]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                names.insert(last.ident.to_string());
            }
            Ok(())
        });
    }
    names
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = v.ident;
        let cfgs = &v.cfgs;
        quote! { #(#cfgs)* #name::#ident { context: slot, .. } => *slot = Some(attached), }
    });

    quote! {
        pub trait #ext<T> {
            /// Attaches a human readable context to the error.
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for std::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut error| {
                    let attached: std::borrow::Cow<'static, str> = context.into();
                    match &mut error {
                        #(#arms)*
                        #[allow(unreachable_patterns)]
                        _ => {}
                    }
                    error
                })
            }
        }
    }
}

fn source_impls(name: &Ident, ext: &Ident, variant: &ErrorVariant<'_>) -> Option<TokenStream> {
    if variant.ident == "Internal" {
        return None;
    }
    let (field, ty) = variant.source?;
    let ident = variant.ident;
    let cfgs = &variant.cfgs;

    Some(quote! {
        #(#cfgs)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self {
                Self::#ident { #field, context: None }
            }
        }

        #(#cfgs)*
        #[automatically_derived]
        impl<T> #ext<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> std::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn internal_impls(name: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == "Internal") else {
        return TokenStream::new();
    };
    let cfgs = &internal.cfgs;

    quote! {
        #(#cfgs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #(#cfgs)*
        impl From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn is_context_type(ty: &Type) -> bool {
    let rendered: String =
        quote!(#ty).to_string().chars().filter(|c| !c.is_whitespace()).collect();
    let Some(inner) = rendered
        .strip_prefix("Option<")
        .or_else(|| rendered.strip_prefix("std::option::Option<"))
        .or_else(|| rendered.strip_prefix("::std::option::Option<"))
    else {
        return false;
    };
    matches!(
        inner,
        "Cow<'static,str>>"
            | "std::borrow::Cow<'static,str>>"
            | "::std::borrow::Cow<'static,str>>"
            | "alloc::borrow::Cow<'static,str>>"
    )
}
