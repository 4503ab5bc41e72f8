//! A table bound to an edit form.
//!
//! [`TableSession`] is the host controller around a [`RecordStore`]: it
//! loads a source, turns form input into validated records or patches, calls
//! the store, redraws the view after every success and reports each outcome
//! as a [`Status`].

use log::{info, warn};
use strum::{AsRefStr, Display};

use crate::{
    config::SessionConfig,
    error::TablebaseError,
    form::FormState,
    query::{FieldFilter, QueryConfig},
    record::{Record, RecordKey},
    render::Renderer,
    schema::Schema,
    source::SourceLoader,
    store::RecordStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StatusLevel {
    Success,
    Error,
}

/// User-facing outcome of one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub message: String,
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == StatusLevel::Success
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

pub struct TableSession<V: Renderer<Record>> {
    schema: Schema,
    store: RecordStore<Record>,
    view: V,
    form: FormState,
    config: SessionConfig,
    loaded: bool,
    status: Option<Status>,
    /// Keys of the rows currently on screen, in display order
    shown: Vec<RecordKey>,
}

impl<V: Renderer<Record>> TableSession<V> {
    pub fn new(schema: Schema, view: V) -> Self {
        Self::with_config(schema, view, SessionConfig::default())
    }

    pub fn with_config(schema: Schema, view: V, config: SessionConfig) -> Self {
        Self {
            form: FormState::for_columns(&schema.columns),
            store: RecordStore::with_config(config.store.clone()),
            schema,
            view,
            config,
            loaded: false,
            status: None,
            shown: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn store(&self) -> &RecordStore<Record> {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// The outcome of the last action.
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch from `loader` and replace the store contents on success.
    pub async fn load<L>(&mut self, loader: &L) -> Status
    where
        L: SourceLoader<Record = Record>,
    {
        let ticket = self.store.begin_load();
        let result = loader.fetch().await;
        let status = match self.store.complete_load(ticket, result) {
            Ok(count) => {
                self.loaded = true;
                self.redraw();
                Status::success(format!("Loaded {count} {} records", self.schema.entity))
            }
            Err(e) => Status::error(format!("Error loading {} records: {e}", self.schema.entity)),
        };
        self.finish(status)
    }

    /// Add the record described by the form.
    pub fn create(&mut self) -> Status {
        let status = match self.try_create() {
            Ok(key) => {
                self.after_mutation();
                Status::success(format!("{} {key} added", self.schema.entity))
            }
            Err(e) => self.error_status(e),
        };
        self.finish(status)
    }

    /// Patch the record named by the form's key field.
    pub fn update(&mut self) -> Status {
        let status = match self.try_update() {
            Ok(key) => {
                self.after_mutation();
                Status::success(format!("{} {key} updated", self.schema.entity))
            }
            Err(e) => self.error_status(e),
        };
        self.finish(status)
    }

    /// Remove the record named by the form's key field.
    pub fn delete(&mut self) -> Status {
        let status = match self.try_delete() {
            Ok(key) => {
                self.after_mutation();
                Status::success(format!("{} {key} deleted", self.schema.entity))
            }
            Err(e) => self.error_status(e),
        };
        self.finish(status)
    }

    /// Copy the record shown at `row` of the last render into the form.
    ///
    /// After a [`search`](Self::search), rows count within the filtered view.
    pub fn select(&mut self, row: usize) -> Option<&FormState> {
        let key = self.shown.get(row)?;
        let record = self.store.find(key)?;
        self.form = FormState::from_record(record, &self.schema.columns);
        Some(&self.form)
    }

    /// Render only the records whose `field` contains `needle`.
    ///
    /// Returns the number of matching records. The store itself is untouched.
    pub fn search(&mut self, field: &str, needle: &str) -> usize {
        let config = QueryConfig::all().with_filter(FieldFilter::contains(field, needle));
        let matches: Vec<Record> = self
            .store
            .query(&config)
            .into_vec()
            .into_iter()
            .cloned()
            .collect();
        self.view.render(&matches);
        self.shown = matches.iter().map(Record::key).collect();
        self.shown.len()
    }

    /// Render the full store again after a search.
    pub fn reset_search(&mut self) {
        self.redraw();
    }

    fn try_create(&mut self) -> Result<String, SessionError> {
        self.ensure_loaded()?;
        let record = self.schema.record_from_form(&self.form)?;
        let key = record.key();
        self.store.add(record)?;
        Ok(key.into_inner())
    }

    fn try_update(&mut self) -> Result<String, SessionError> {
        self.ensure_loaded()?;
        let (key, patch) = self
            .schema
            .patch_from_form(&self.form, self.config.patch_policy)?;
        self.store.update(&key, patch)?;
        Ok(key.into_inner())
    }

    fn try_delete(&mut self) -> Result<String, SessionError> {
        self.ensure_loaded()?;
        let key = self.form.get(&self.schema.key_field).to_string();
        if key.trim().is_empty() {
            return Err(crate::error::ValidationError::MissingKey.into());
        }
        self.store.remove(&key)?;
        Ok(key)
    }

    fn ensure_loaded(&self) -> Result<(), SessionError> {
        if self.loaded {
            Ok(())
        } else {
            Err(SessionError::NotLoaded)
        }
    }

    fn error_status(&self, error: SessionError) -> Status {
        let entity = &self.schema.entity;
        let message = match error {
            SessionError::NotLoaded => format!("{entity} records have not been loaded yet"),
            SessionError::Store(TablebaseError::DuplicateKey(key)) => {
                format!("{entity} ID {key} already exists")
            }
            SessionError::Store(TablebaseError::NotFound(key)) => {
                format!("{entity} ID {key} not found")
            }
            SessionError::Store(other) => other.to_string(),
        };
        Status::error(message)
    }

    fn finish(&mut self, status: Status) -> Status {
        if status.is_success() {
            info!("{status}");
        } else {
            warn!("{status}");
        }
        self.status = Some(status.clone());
        status
    }

    fn after_mutation(&mut self) {
        self.redraw();
        if self.config.clear_form_on_success {
            self.form.clear();
        }
    }

    fn redraw(&mut self) {
        self.view.render(self.store.all());
        self.shown = self.store.iter().map(Record::key).collect();
    }
}

/// Why a form action did not reach, or was rejected by, the store.
#[derive(Debug, thiserror::Error)]
enum SessionError {
    #[error("records have not been loaded")]
    NotLoaded,
    #[error(transparent)]
    Store(#[from] TablebaseError),
}

impl From<crate::error::ValidationError> for SessionError {
    fn from(value: crate::error::ValidationError) -> Self {
        SessionError::Store(value.into())
    }
}
