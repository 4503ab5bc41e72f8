use proc_macro2::Span;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableRecordDeriveError {
    #[error("TableRecord can only be derived for structs")]
    NotAStruct,
    #[error("TableRecord requires named fields")]
    TupleStruct,
    #[error("TableRecord does not support generic structs")]
    GenericsUnsupported,
    #[error("Could not find a #[key] field")]
    KeyNotFound,
    #[error("Only one field may be marked #[key]")]
    MultipleKeys,
}

impl TableRecordDeriveError {
    pub fn at(self, span: Span) -> syn::Error {
        syn::Error::new(span, self.to_string())
    }
}
