//! Dynamic records: an ordered field map with one designated key field.
//!
//! Records built from a [`Schema`](crate::schema::Schema) keep the field order
//! of the source document, which is also the order they serialize back out in.

use std::{borrow::Cow, sync::Arc};

use indexmap::IndexMap;
use serde::Serialize;

mod key;
mod value;

pub use key::RecordKey;
pub use value::{FieldKind, FieldValue};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(skip)]
    key_field: Arc<str>,
    #[serde(flatten)]
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record keyed by `key_field`.
    pub fn new(key_field: impl Into<Arc<str>>) -> Self {
        Self {
            key_field: key_field.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn from_fields<I, K, V>(key_field: impl Into<Arc<str>>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            key_field: key_field.into(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or overwrite a field. New fields are appended after existing ones.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// The key value, or an empty key when the key field is absent.
    pub fn key(&self) -> RecordKey {
        self.fields
            .get(self.key_field.as_ref())
            .map(|v| RecordKey::new(v.to_string()))
            .unwrap_or_default()
    }

    /// The key's text without copying it; only numeric keys are rendered.
    pub fn key_str(&self) -> Cow<'_, str> {
        match self.fields.get(self.key_field.as_ref()) {
            Some(FieldValue::Text(text)) => Cow::Borrowed(text),
            Some(value @ FieldValue::Number(_)) => Cow::Owned(value.to_string()),
            None => Cow::Borrowed(""),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Overwrite the fields named in `patch`; the key field is never touched.
    pub fn apply(&mut self, patch: RecordPatch) {
        for (name, value) in patch.fields {
            if name == self.key_field.as_ref() {
                log::debug!("ignoring patch of key field `{name}`");
                continue;
            }
            self.fields.insert(name, value);
        }
    }
}

/// A partial record: only the fields present are written by an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordPatch {
    fields: IndexMap<String, FieldValue>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for RecordPatch {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
