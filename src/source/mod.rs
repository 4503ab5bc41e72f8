//! Record sources: fetch a fixture and turn it into records.
//!
//! Loading is a pure mapping step. A document is read once, parsed into
//! records and dropped; writing back means serializing the whole current
//! sequence with the matching `serialize` function.

use std::{borrow::Cow, path::PathBuf};

use async_trait::async_trait;

use crate::{error::LoadError, traits::record::TableRecord};

pub mod json;
pub mod xml;

pub use json::{JsonSource, TypedJsonSource};
pub use xml::XmlSource;

/// One-shot asynchronous producer of records.
#[async_trait]
pub trait SourceLoader: Send + Sync {
    type Record: TableRecord + Send;

    async fn fetch(&self) -> Result<Vec<Self::Record>, LoadError>;
}

/// Where the raw document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    File(PathBuf),
    Inline(String),
}

impl SourceOrigin {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SourceOrigin::File(path.into())
    }

    pub fn inline(text: impl Into<String>) -> Self {
        SourceOrigin::Inline(text.into())
    }

    pub async fn read(&self) -> Result<Cow<'_, str>, LoadError> {
        match self {
            SourceOrigin::File(path) => {
                log::debug!("reading {}", path.display());
                Ok(Cow::Owned(tokio::fs::read_to_string(path).await?))
            }
            SourceOrigin::Inline(text) => Ok(Cow::Borrowed(text)),
        }
    }
}

pub(crate) fn malformed(index: usize, reason: impl ToString) -> LoadError {
    LoadError::MalformedRecord {
        index,
        reason: reason.to_string(),
    }
}
