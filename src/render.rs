//! Views over a record sequence.
//!
//! The store knows nothing about presentation; a [`Renderer`] is handed the
//! current records after every change and redraws from scratch.

use comfy_table::{Table, presets::ASCII_FULL};

use crate::{schema::Column, traits::record::TableRecord};

pub trait Renderer<R: TableRecord> {
    fn render(&mut self, records: &[R]);
}

impl<R: TableRecord, F: FnMut(&[R])> Renderer<R> for F {
    fn render(&mut self, records: &[R]) {
        self(records)
    }
}

/// Draws records as a plain-text table, one row per record.
#[derive(Debug, Clone)]
pub struct TextTableRenderer {
    columns: Vec<Column>,
    empty_message: String,
    output: String,
    rows: usize,
}

impl TextTableRenderer {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            empty_message: "No records found".to_string(),
            output: String::new(),
            rows: 0,
        }
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The most recently rendered table.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Record rows in the last render; the placeholder row is not counted.
    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl<R: TableRecord> Renderer<R> for TextTableRenderer {
    fn render(&mut self, records: &[R]) {
        let mut table = Table::new();
        table
            .load_preset(ASCII_FULL)
            .set_header(self.columns.iter().map(|c| c.label.as_str()));

        if records.is_empty() {
            table.add_row(vec![self.empty_message.as_str()]);
        }
        for record in records {
            table.add_row(self.columns.iter().map(|c| {
                record
                    .field(&c.name)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            }));
        }

        self.rows = records.len();
        self.output = table.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn columns() -> Vec<Column> {
        vec![Column::text("id"), Column::text("title"), Column::number("price")]
    }

    #[test]
    fn renders_headers_and_rows() {
        let mut view = TextTableRenderer::new(columns());
        let records = vec![
            Record::new("id").with("id", "B1").with("title", "Dune").with("price", 9.5_f64),
        ];
        view.render(records.as_slice());

        assert_eq!(view.rows(), 1);
        assert!(view.output().contains("Title"));
        assert!(view.output().contains("Dune"));
        assert!(view.output().contains("9.5"));
    }

    #[test]
    fn renders_placeholder_when_empty() {
        let mut view = TextTableRenderer::new(columns()).with_empty_message("No products found");
        Renderer::<Record>::render(&mut view, &[]);
        assert_eq!(view.rows(), 0);
        assert!(view.output().contains("No products found"));
    }

    #[test]
    fn closures_are_renderers() {
        let mut seen = 0;
        let mut view = |records: &[Record]| seen = records.len();
        let records = vec![Record::new("id").with("id", "1")];
        view.render(records.as_slice());
        assert_eq!(seen, 1);
    }
}
