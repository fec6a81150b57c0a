//! Procedural macros for clawrest request classification.
//!
//! This crate provides the `Annotated` derive, re-exported by `clawrest-core`.
//! Use it through `clawrest_core::Annotated`, the generated code refers to
//! `::clawrest_core` paths.

mod annotated;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `clawrest_core::Annotated` for a struct with named fields.
///
/// Each field takes at most one `#[param(...)]` attribute:
///
/// - `#[param(path = "name")]` - `{name}` variable of the path template
/// - `#[param(query = "name")]` - query string parameter
/// - `#[param(header = "name")]` - HTTP header
/// - `#[param(body)]` or `#[param(body = "property")]` - JSON body property
///
/// Fields without attribute are kept untagged, building a request from such an
/// object fails at runtime with `RequestError::UnrecognizedField`.
///
/// # Example
///
/// ```ignore
/// use clawrest_core::Annotated;
/// use serde::Serialize;
///
/// #[derive(Serialize, Annotated)]
/// struct ListPulls {
///     #[serde(skip)]
///     #[param(path = "owner")]
///     owner: String,
///     #[serde(skip)]
///     #[param(query = "state")]
///     state: Option<String>,
///     #[param(body)]
///     draft: Option<bool>,
/// }
/// ```
#[proc_macro_derive(Annotated, attributes(param))]
pub fn derive_annotated(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    annotated::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
