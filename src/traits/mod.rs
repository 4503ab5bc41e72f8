pub mod record;

pub use record::TableRecord;
