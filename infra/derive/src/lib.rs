#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared across the workspace.
//!
//! Only one macro lives here today: [`macro@evhub_error`], the attribute every crate uses
//! to declare its error enum.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns a plain enum into a crate error type.
///
/// # What gets generated
///
/// * `#[derive(Debug, thiserror::Error)]`, unless the enum already derives them.
/// * An `<Name>Ext` trait with `.context(..)` for `Result<T, Name>`, and for
///   `Result<T, Source>` on every variant that wraps a `source` error.
/// * `From<Source>` for every variant with a `source` field.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }`
///   variant exists.
/// * A module-private `format_context` helper to render the optional context in
///   `#[error(..)]` strings.
///
/// # Rules
///
/// 1. Applies to enums only, with named-field variants.
/// 2. A `context` field must be typed `Option<Cow<'static, str>>`.
/// 3. A variant carrying a `source` (by name, `#[source]` or `#[from]`) must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[evhub_derive::evhub_error]
/// pub enum BackendError {
///     #[error("Decode error{}: {source}", format_context(.context))]
///     Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal backend error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<serde_json::Value, BackendError> {
///     serde_json::from_str(raw).context("Parsing entity payload")
/// }
/// ```
#[proc_macro_attribute]
pub fn evhub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
