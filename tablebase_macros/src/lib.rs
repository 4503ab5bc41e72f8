use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use crate::visitors::record_visitor::RecordVisitor;

mod errors;
mod generators;
mod visitors;

/// Derives `TableRecord` for a struct so it can live in a `RecordStore`.
///
/// This macro generates:
/// - `{Name}Patch`: one `Option` per non-key field, used by `update`
/// - the `TableRecord` implementation (`key`, `field`, `apply_patch`)
/// - `{Name}::columns()`: a column list for renderers and forms
///
/// # Attributes
///
/// - `#[key]` - **Required**. Marks exactly one field as the record key. The
///   key is the field's `to_string()`, so its type must implement `Display`
/// - `#[column(label = "...", required)]` - **Optional**. Overrides the
///   title-cased column label and marks the column as required
///
/// Every field type must convert into `FieldValue` (strings and the
/// primitive number types do).
///
/// # Example
///
/// ```rust,ignore
/// #[derive(TableRecord, Clone, Debug)]
/// pub struct Product {
///     #[key]
///     pub id: String,
///     #[column(required)]
///     pub name: String,
///     pub category: String,
///     #[column(label = "Unit Price", required)]
///     pub price: f64,
///     pub stock: u32,
/// }
/// // Generates: ProductPatch { name: Option<String>, category: Option<String>, ... }
/// ```
#[proc_macro_derive(TableRecord, attributes(key, column))]
pub fn table_record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match RecordVisitor::visit(&input) {
        Ok(visitor) => generators::record::generate(&visitor).into(),
        Err(e) => e.into_compile_error().into(),
    }
}
