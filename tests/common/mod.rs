// Common test utilities and helpers
#![allow(dead_code)]

use std::path::PathBuf;

use tablebase_store::prelude::*;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn employee_schema() -> Schema {
    Schema::new("Employee", "id")
        .column(Column::text("name").required())
        .column(Column::text("department").required())
        .column(Column::number("salary").required())
}

pub fn book_schema() -> Schema {
    Schema::new("Book", "id")
        .tags("library", "book")
        .column(Column::text("title").required())
        .column(Column::text("author").required())
        .column(Column::text("status"))
}

pub fn student_schema() -> Schema {
    Schema::new("Student", "id")
        .column(Column::text("name").required())
        .column(Column::text("course"))
        .column(Column::number("marks").required())
}

pub fn product_schema() -> Schema {
    Schema::new("Product", "id")
        .column(Column::text("name").required())
        .column(Column::text("category"))
        .column(Column::number("price").required())
        .column(Column::number("stock"))
}

pub fn rec(id: &str, name: &str) -> Record {
    Record::new("id").with("id", id).with("name", name)
}
