//! The edit form bound to a table.
//!
//! Holds raw user input as strings. Selecting a row copies the record into
//! the form; validation into records and patches lives on
//! [`Schema`](crate::schema::Schema).

use indexmap::IndexMap;

use crate::{schema::Column, traits::record::TableRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: IndexMap<String, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// One empty input per column.
    pub fn for_columns(columns: &[Column]) -> Self {
        Self {
            values: columns
                .iter()
                .map(|c| (c.name.clone(), String::new()))
                .collect(),
        }
    }

    /// Populate inputs from a selected row.
    pub fn from_record<R: TableRecord>(record: &R, columns: &[Column]) -> Self {
        Self {
            values: columns
                .iter()
                .map(|c| {
                    let value = record
                        .field(&c.name)
                        .map(|v| v.to_string())
                        .unwrap_or_default();
                    (c.name.clone(), value)
                })
                .collect(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// The raw input, or `""` for an unknown input.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Blank every input, keeping the inputs themselves.
    pub fn clear(&mut self) {
        self.values.values_mut().for_each(String::clear);
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormState {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn from_record_fills_every_column() {
        let columns = vec![Column::text("id"), Column::text("name"), Column::number("marks")];
        let record = Record::new("id").with("id", "S1").with("marks", 91_i64);

        let form = FormState::from_record(&record, &columns);
        assert_eq!(form.get("id"), "S1");
        assert_eq!(form.get("name"), "");
        assert_eq!(form.get("marks"), "91");
    }

    #[test]
    fn clear_keeps_inputs() {
        let mut form: FormState = [("id", "1"), ("name", "A")].into_iter().collect();
        form.clear();
        assert!(form.is_blank());
        assert_eq!(form.values().count(), 2);
    }
}
