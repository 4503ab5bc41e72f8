//! # Tablebase Store
//!
//! An in-memory tabular record store: load an ordered set of uniquely keyed
//! records from an XML or JSON fixture, add, update and delete them in place,
//! and redraw a table after every change.
//!
//! ## Features
//!
//! - **Ordered**: records keep source order; new records go to the end
//! - **Keyed**: duplicate keys are rejected on insert
//! - **Partial updates**: patches overwrite only the fields they carry
//! - **Async loading**: JSON and XML sources with last-load-wins tickets
//! - **Typed or dynamic**: field-map [`Record`]s or `#[derive(TableRecord)]` structs
//!
//! ## Quick Start
//!
//! ```rust
//! use tablebase_store::prelude::*;
//!
//! let schema = Schema::new("Employee", "id")
//!     .column(Column::text("name").required())
//!     .column(Column::number("salary"));
//!
//! let source = XmlSource::new(SourceOrigin::inline(""), schema.clone());
//! let records = source
//!     .parse("<employees><employee><id>1</id><name>Ada</name><salary>100</salary></employee></employees>")
//!     .unwrap();
//!
//! let mut store = RecordStore::new();
//! store.load(records);
//!
//! store.update("1", RecordPatch::new().with("salary", 120_i64)).unwrap();
//! assert_eq!(store.find("1").unwrap().get("salary"), Some(&FieldValue::from(120_i64)));
//!
//! let mut view = TextTableRenderer::new(schema.columns.clone());
//! view.render(store.all());
//! assert!(view.output().contains("Ada"));
//! ```

// Lets derive output name `::tablebase_store` from inside this crate's own tests.
extern crate self as tablebase_store;

pub mod config;
pub mod error;
pub mod form;
pub mod prelude;
pub mod query;
pub mod record;
pub mod render;
pub mod schema;
pub mod session;
pub mod source;
pub mod store;
pub mod traits;

pub use error::{LoadError, TablebaseError, TablebaseResult, ValidationError};
pub use record::{FieldKind, FieldValue, Record, RecordKey, RecordPatch};
pub use store::RecordStore;
pub use traits::record::TableRecord;

#[cfg(feature = "derive")]
pub use tablebase_macros::TableRecord;
