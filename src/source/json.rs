use std::marker::PhantomData;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use super::{SourceLoader, SourceOrigin, malformed};
use crate::{
    error::LoadError,
    record::{FieldValue, Record},
    schema::Schema,
    traits::record::TableRecord,
};

/// A JSON array of flat objects, read into dynamic [`Record`]s.
///
/// Strings and numbers become field values and are coerced by the schema.
/// Any other JSON type fails the whole load.
#[derive(Debug, Clone)]
pub struct JsonSource {
    origin: SourceOrigin,
    schema: Schema,
}

impl JsonSource {
    pub fn new(origin: SourceOrigin, schema: Schema) -> Self {
        Self { origin, schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn parse(&self, text: &str) -> Result<Vec<Record>, LoadError> {
        let rows: Vec<Map<String, Value>> = serde_json::from_str(text)?;
        rows.into_iter()
            .enumerate()
            .map(|(index, row)| {
                let fields = row
                    .into_iter()
                    .map(|(name, value)| scalar(index, name, value))
                    .collect::<Result<Vec<_>, _>>()?;
                self.schema
                    .record_from_fields(fields)
                    .map_err(|e| malformed(index, e))
            })
            .collect()
    }

    /// Write the whole sequence back out as a pretty-printed JSON array.
    pub fn serialize(records: &[Record]) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(records)?)
    }
}

#[async_trait]
impl SourceLoader for JsonSource {
    type Record = Record;

    async fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        let text = self.origin.read().await?;
        self.parse(&text)
    }
}

fn scalar(index: usize, name: String, value: Value) -> Result<(String, FieldValue), LoadError> {
    let value = match value {
        Value::String(text) => FieldValue::Text(text),
        Value::Number(n) => match n.as_f64() {
            Some(n) => FieldValue::Number(n),
            None => return Err(malformed(index, format!("field `{name}` is out of range"))),
        },
        other => {
            return Err(malformed(
                index,
                format!("field `{name}` holds {other}, expected a string or number"),
            ));
        }
    };
    Ok((name, value))
}

/// A JSON array deserialized straight into typed records.
pub struct TypedJsonSource<R> {
    origin: SourceOrigin,
    _record: PhantomData<fn() -> R>,
}

impl<R> TypedJsonSource<R>
where
    R: TableRecord + DeserializeOwned,
{
    pub fn new(origin: SourceOrigin) -> Self {
        Self {
            origin,
            _record: PhantomData,
        }
    }

    pub fn parse(text: &str) -> Result<Vec<R>, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn serialize(records: &[R]) -> Result<String, LoadError>
    where
        R: Serialize,
    {
        Ok(serde_json::to_string_pretty(records)?)
    }
}

#[async_trait]
impl<R> SourceLoader for TypedJsonSource<R>
where
    R: TableRecord + DeserializeOwned + Send,
{
    type Record = R;

    async fn fetch(&self) -> Result<Vec<R>, LoadError> {
        let text = self.origin.read().await?;
        Self::parse(&text)
    }
}
