use std::{borrow::Cow, fmt::Debug};

use crate::record::{FieldValue, Record, RecordKey, RecordPatch};

/// A row that can live in a [`RecordStore`](crate::store::RecordStore).
///
/// Implemented by the dynamic [`Record`] and, through
/// `#[derive(TableRecord)]`, by user structs with one `#[key]` field.
///
/// # Examples
///
/// ```
/// use tablebase_store::TableRecord;
///
/// #[derive(TableRecord, Clone, Debug, PartialEq)]
/// pub struct Student {
///     #[key]
///     pub id: String,
///     pub name: String,
///     pub marks: u32,
/// }
///
/// let mut s = Student { id: "S1".into(), name: "Ada".into(), marks: 70 };
/// s.apply_patch(StudentPatch { marks: Some(88), ..Default::default() });
/// assert_eq!(s.marks, 88);
/// assert_eq!(s.key(), "S1");
/// ```
pub trait TableRecord: Clone + Debug {
    /// Partial update carrying only the fields to overwrite.
    type Patch: Debug + Default;

    fn key(&self) -> RecordKey;

    /// The key's text, borrowed when the record already holds it as text.
    ///
    /// Store lookups compare against this, so overriding it avoids one
    /// allocation per scanned record.
    fn key_str(&self) -> Cow<'_, str> {
        Cow::Owned(self.key().into_inner())
    }

    /// Read a field by name, used for filtering and rendering.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Overwrite the fields present in `patch`. Must never change the key.
    fn apply_patch(&mut self, patch: Self::Patch);
}

impl TableRecord for Record {
    type Patch = RecordPatch;

    fn key(&self) -> RecordKey {
        Record::key(self)
    }

    fn key_str(&self) -> Cow<'_, str> {
        Record::key_str(self)
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        self.apply(patch)
    }
}
