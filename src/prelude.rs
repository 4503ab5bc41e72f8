//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits,
//! allowing users to get started with a single import.
//!
//! # Usage
//!
//! ```rust
//! use tablebase_store::prelude::*;
//!
//! let mut store: RecordStore = RecordStore::new();
//! store.add(Record::new("id").with("id", "E1").with("name", "Ada")).unwrap();
//! assert_eq!(store.len(), 1);
//! ```
//!
//! # What's Included
//!
//! ## Records
//!
//! - [`Record`], [`RecordPatch`], [`RecordKey`], [`FieldValue`], [`FieldKind`]
//! - [`TableRecord`]: trait implemented by dynamic and derived records
//!
//! ## Store
//!
//! - [`RecordStore`], [`StoreEvent`], [`LoadTicket`]
//! - [`QueryConfig`], [`FieldFilter`], [`QueryResult`]
//!
//! ## Sources and Views
//!
//! - [`SourceLoader`], [`SourceOrigin`], [`JsonSource`], [`TypedJsonSource`], [`XmlSource`]
//! - [`Renderer`], [`TextTableRenderer`]
//! - [`Schema`], [`Column`], [`FormState`], [`TableSession`], [`Status`]
//!
//! ## Error Handling
//!
//! - [`TablebaseError`], [`TablebaseResult`], [`LoadError`], [`ValidationError`]

pub use crate::config::{PatchPolicy, SessionConfig, StoreConfig};
pub use crate::error::{LoadError, TablebaseError, TablebaseResult, ValidationError};
pub use crate::form::FormState;
pub use crate::query::{FieldFilter, QueryConfig, QueryMode, QueryResult};
pub use crate::record::{FieldKind, FieldValue, Record, RecordKey, RecordPatch};
pub use crate::render::{Renderer, TextTableRenderer};
pub use crate::schema::{Column, Schema};
pub use crate::session::{Status, StatusLevel, TableSession};
pub use crate::source::{JsonSource, SourceLoader, SourceOrigin, TypedJsonSource, XmlSource};
pub use crate::store::{LoadTicket, RecordStore, StoreEvent, SubscriptionId};
pub use crate::traits::record::TableRecord;

#[cfg(feature = "derive")]
pub use tablebase_macros::TableRecord;
