//! Column layout and value rules for one kind of record.
//!
//! A [`Schema`] names the key field, the XML tags a record lives under and
//! the ordered columns shown in a table. Loaders use it to coerce raw source
//! values, and sessions use it to validate form input before anything reaches
//! the store.

use serde::{Deserialize, Serialize};

use crate::{
    config::PatchPolicy,
    error::ValidationError,
    form::FormState,
    record::{FieldKind, FieldValue, Record, RecordKey, RecordPatch},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            label: title_case(&name),
            name,
            kind,
            required: false,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Human name of one record, used in status messages
    pub entity: String,
    pub root_tag: String,
    pub record_tag: String,
    pub key_field: String,
    pub columns: Vec<Column>,
}

impl Schema {
    /// Create a schema whose first column is the (required, text) key.
    ///
    /// XML tags default to the lowercased entity name and its plural. A text
    /// key stores numeric source ids as text, so `"id": 1` is written back as
    /// `"id": "1"`. Replace the key column with [`Column::number`] to keep
    /// them numeric; lookups still go through the key's text form.
    ///
    /// ```
    /// use tablebase_store::schema::{Column, Schema};
    ///
    /// let schema = Schema::new("Book", "id")
    ///     .column(Column::text("title").required())
    ///     .column(Column::text("status"));
    /// assert_eq!(schema.record_tag, "book");
    /// assert_eq!(schema.root_tag, "books");
    /// assert_eq!(schema.column_names().collect::<Vec<_>>(), ["id", "title", "status"]);
    /// ```
    pub fn new(entity: impl Into<String>, key_field: impl Into<String>) -> Self {
        let entity = entity.into();
        let key_field = key_field.into();
        let record_tag = entity.to_lowercase();
        Self {
            root_tag: format!("{record_tag}s"),
            record_tag,
            entity,
            columns: vec![Column::text(key_field.clone()).required()],
            key_field,
        }
    }

    pub fn tags(mut self, root_tag: impl Into<String>, record_tag: impl Into<String>) -> Self {
        self.root_tag = root_tag.into();
        self.record_tag = record_tag.into();
        self
    }

    /// Append a column, or replace the column of the same name.
    pub fn column(mut self, mut column: Column) -> Self {
        if column.name == self.key_field {
            column.required = true;
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        self
    }

    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn new_record(&self) -> Record {
        Record::new(self.key_field.as_str())
    }

    /// Bring a raw value in line with its column kind.
    ///
    /// Number columns parse text; text columns render numbers. Fields the
    /// schema does not know pass through untouched.
    pub fn coerce(&self, field: &str, value: FieldValue) -> Result<FieldValue, ValidationError> {
        let Some(column) = self.get_column(field) else {
            return Ok(value);
        };
        match (column.kind, value) {
            (FieldKind::Number, FieldValue::Text(text)) => FieldValue::parse_number(&text)
                .map(FieldValue::Number)
                .ok_or(ValidationError::InvalidNumber {
                    field: field.to_string(),
                    value: text,
                }),
            (FieldKind::Text, FieldValue::Number(n)) => Ok(FieldValue::Text(n.to_string())),
            (_, value) => Ok(value),
        }
    }

    /// Build a record from source fields, coercing each one.
    pub fn record_from_fields<I>(&self, fields: I) -> Result<Record, ValidationError>
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        let mut record = self.new_record();
        for (name, value) in fields {
            // An empty element in a number column stays empty text rather than failing the load.
            let value = if value.is_empty() {
                value
            } else {
                self.coerce(&name, value)?
            };
            record.set(name, value);
        }
        Ok(record)
    }

    /// Validate a filled-in form as a brand new record.
    pub fn record_from_form(&self, form: &FormState) -> Result<Record, ValidationError> {
        if form.get(&self.key_field).trim().is_empty() {
            return Err(ValidationError::MissingKey);
        }

        let missing: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.required && form.get(&c.name).trim().is_empty())
            .map(|c| c.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let mut record = self.new_record();
        for column in &self.columns {
            let raw = form.get(&column.name);
            match column.kind {
                FieldKind::Number if raw.trim().is_empty() => {}
                _ => record.set(column.name.clone(), self.coerce(&column.name, raw.into())?),
            }
        }
        for (name, raw) in form.values() {
            if self.get_column(name).is_none() && !raw.is_empty() {
                record.set(name, raw);
            }
        }
        Ok(record)
    }

    /// Validate a form as an update of the record named by its key field.
    pub fn patch_from_form(
        &self,
        form: &FormState,
        policy: PatchPolicy,
    ) -> Result<(RecordKey, RecordPatch), ValidationError> {
        let key = RecordKey::new(form.get(&self.key_field));
        if key.is_empty() {
            return Err(ValidationError::MissingKey);
        }

        let mut patch = RecordPatch::new();
        for (name, raw) in form.values() {
            if name == self.key_field {
                continue;
            }
            if raw.trim().is_empty() {
                if policy.skip_empty_values {
                    continue;
                }
                // A blank number cannot be written; leave the field as it is.
                if self.get_column(name).is_some_and(|c| c.kind == FieldKind::Number) {
                    continue;
                }
            }
            patch.set(name, self.coerce(name, raw.into())?);
        }
        Ok((key, patch))
    }
}

fn title_case(name: &str) -> String {
    name.split(['_', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> Schema {
        Schema::new("Product", "id")
            .column(Column::text("name").required())
            .column(Column::text("category"))
            .column(Column::number("price").required())
            .column(Column::number("stock"))
    }

    fn form(pairs: &[(&str, &str)]) -> FormState {
        pairs.iter().copied().collect()
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(Column::text("unit_price").label, "Unit Price");
        assert_eq!(Column::text("name").label, "Name");
    }

    #[test]
    fn coerce_parses_number_columns() {
        let schema = inventory();
        assert_eq!(
            schema.coerce("price", "19.5".into()).unwrap(),
            FieldValue::Number(19.5)
        );
        assert_eq!(
            schema.coerce("name", FieldValue::Number(3.0)).unwrap(),
            FieldValue::from("3")
        );
        assert_eq!(
            schema.coerce("unknown", "x".into()).unwrap(),
            FieldValue::from("x")
        );
    }

    #[test]
    fn key_column_kind_can_be_replaced() {
        let schema = Schema::new("Ticket", "id").column(Column::number("id"));
        let key = schema.get_column("id").unwrap();
        assert_eq!(key.kind, FieldKind::Number);
        assert!(key.required);
        assert_eq!(schema.columns.len(), 1);

        let record = schema.record_from_form(&form(&[("id", "7")])).unwrap();
        assert_eq!(record.get("id"), Some(&FieldValue::Number(7.0)));
        assert_eq!(record.key(), "7");
    }

    #[test]
    fn coerce_rejects_bad_numbers() {
        let err = inventory().coerce("price", "cheap".into()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidNumber {
                field: "price".into(),
                value: "cheap".into()
            }
        );
    }

    #[test]
    fn record_from_form_requires_key_first() {
        let err = inventory()
            .record_from_form(&form(&[("id", ""), ("name", "")]))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingKey);
    }

    #[test]
    fn record_from_form_lists_missing_required_fields() {
        let err = inventory()
            .record_from_form(&form(&[("id", "P1"), ("name", " ")]))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["name".into(), "price".into()])
        );
    }

    #[test]
    fn record_from_form_skips_blank_optional_numbers() {
        let record = inventory()
            .record_from_form(&form(&[
                ("id", "P1"),
                ("name", "Lamp"),
                ("category", "Home"),
                ("price", "12.50"),
                ("stock", ""),
            ]))
            .unwrap();
        assert_eq!(record.key(), "P1");
        assert_eq!(record.get("price"), Some(&FieldValue::Number(12.5)));
        assert_eq!(record.get("stock"), None);
    }

    #[test]
    fn patch_from_form_skips_blanks_by_default() {
        let (key, patch) = inventory()
            .patch_from_form(
                &form(&[("id", "P1"), ("name", ""), ("stock", "3")]),
                PatchPolicy::default(),
            )
            .unwrap();
        assert_eq!(key, "P1");
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get("stock"), Some(&FieldValue::Number(3.0)));
    }

    #[test]
    fn patch_from_form_can_write_blank_text() {
        let policy = PatchPolicy::builder().skip_empty_values(false).build();
        let (_, patch) = inventory()
            .patch_from_form(&form(&[("id", "P1"), ("category", ""), ("stock", "")]), policy)
            .unwrap();
        assert_eq!(patch.get("category"), Some(&FieldValue::from("")));
        assert_eq!(patch.get("stock"), None);
    }
}
