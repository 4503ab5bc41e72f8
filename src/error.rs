use thiserror::Error;

use crate::record::RecordKey;

pub type TablebaseResult<T> = Result<T, TablebaseError>;

#[derive(Error, Debug)]
pub enum TablebaseError {
    #[error("Duplicate Key: a record with key `{0}` already exists")]
    DuplicateKey(RecordKey),

    #[error("Not Found: no record with key `{0}`")]
    NotFound(RecordKey),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Failure to fetch or parse a record source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML Error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Load superseded by a newer load")]
    Superseded,
}

/// Caller-supplied input that never reaches the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("A key value is required")]
    MissingKey,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Field `{field}` expects a number, got `{value}`")]
    InvalidNumber { field: String, value: String },
}

impl TablebaseError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, TablebaseError::DuplicateKey(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TablebaseError::NotFound(_))
    }
}
