//! Proc macros for Bibseek.
//!
//! # Available Macros
//!
//! - [`Record`] - Implement `bibseek::Record` for a plain struct

mod attrs;
mod derive;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for a struct of text fields.
///
/// Every named field becomes a searchable record field unless it is
/// skipped or marked as the citation key. Field types must implement
/// `bibseek::FieldText` (`String`, `&str`, `Option<String>`, ...).
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Exclude this field from the record |
/// | `citation_key` | Use this field as the citation key; it is not searchable |
/// | `rename = "..."` | Use a custom name for queries |
///
/// Query field names are case-insensitive. Qualified query terms only
/// accept names made of letters and digits, so members such as
/// `first_page` need a `rename` to be reachable as `firstpage=...`.
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Paper::TITLE`)
/// 2. Implementation of `Record::field_value()`, `Record::all_values()`,
///    and `Record::citation_key()` when a key field is marked
///
/// # Example
///
/// ```ignore
/// use bibseek::{search, Record, SearchFlags};
///
/// #[derive(Record)]
/// struct Paper {
///     #[record(citation_key)]
///     key: String,
///     author: String,
///     title: String,
///     #[record(rename = "journaltitle")]
///     journal: Option<String>,
///     #[record(skip)]
///     internal_id: u64,
/// }
///
/// let papers = vec![Paper {
///     key: "Knuth1984".into(),
///     author: "Donald Knuth".into(),
///     title: "Literate Programming".into(),
///     journal: Some("The Computer Journal".into()),
///     internal_id: 1,
/// }];
///
/// let hits = search("journaltitle=computer", SearchFlags::empty(), &papers);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(Paper::JOURNALTITLE, "journaltitle");
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
