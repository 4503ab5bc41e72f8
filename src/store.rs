//! The in-memory record controller.
//!
//! A [`RecordStore`] owns an ordered `Vec` of records. Display order is
//! insertion order: loaded records keep their source order and added records
//! go to the end. Keys are unique for everything inserted through
//! [`RecordStore::add`]; [`RecordStore::load`] takes its input as-is.
//!
//! Every rejected operation leaves the sequence untouched and notifies no
//! subscriber.
//!
//! # Examples
//!
//! ```
//! use tablebase_store::prelude::*;
//!
//! let mut store = RecordStore::new();
//! store.load(vec![Record::new("id").with("id", "1").with("name", "A")]);
//!
//! let err = store
//!     .add(Record::new("id").with("id", "1").with("name", "B"))
//!     .unwrap_err();
//! assert!(err.is_duplicate_key());
//!
//! store.update("1", RecordPatch::new().with("name", "Z")).unwrap();
//! assert_eq!(store.find("1").unwrap().get("name"), Some(&FieldValue::from("Z")));
//! ```

use std::collections::HashSet;

use log::{debug, info, warn};
use strum::AsRefStr;

use crate::{
    config::StoreConfig,
    error::{LoadError, TablebaseError, TablebaseResult, ValidationError},
    query::{QueryConfig, QueryResult},
    record::{Record, RecordKey},
    traits::record::TableRecord,
};

/// What changed in a store, delivered to subscribers after the change.
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr)]
pub enum StoreEvent {
    Loaded { count: usize },
    Added(RecordKey),
    Updated(RecordKey),
    Removed(RecordKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Identifies one in-flight load. Only the newest ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

type Subscriber<R> = Box<dyn FnMut(&StoreEvent, &[R])>;

pub struct RecordStore<R: TableRecord = Record> {
    records: Vec<R>,
    config: StoreConfig,
    subscribers: Vec<(SubscriptionId, Subscriber<R>)>,
    next_subscription: u64,
    load_generation: u64,
}

impl<R: TableRecord> Default for RecordStore<R> {
    fn default() -> Self {
        Self::with_config(StoreConfig::default())
    }
}

impl<R: TableRecord> std::fmt::Debug for RecordStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.records)
            .field("subscribers", &self.subscribers.len())
            .field("load_generation", &self.load_generation)
            .finish()
    }
}

impl<R: TableRecord> RecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            records: Vec::with_capacity(config.initial_capacity),
            config,
            subscribers: Vec::new(),
            next_subscription: 0,
            load_generation: 0,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Replace the whole contents in one step.
    ///
    /// Key uniqueness is not checked here; anomalies are logged when
    /// [`StoreConfig::warn_on_load_anomalies`] is set. Any load still in
    /// flight is superseded.
    pub fn load(&mut self, records: Vec<R>) {
        self.load_generation += 1;
        if self.config.warn_on_load_anomalies {
            report_anomalies(&records);
        }
        let count = records.len();
        self.records = records;
        info!("loaded {count} records");
        self.notify(StoreEvent::Loaded { count });
    }

    /// Start a load. Completing an older ticket after a newer one was issued
    /// (or after a direct [`load`](Self::load)) is discarded.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket(self.load_generation)
    }

    /// Finish the load identified by `ticket`.
    ///
    /// Returns the number of loaded records. On a failed or stale load the
    /// store keeps its current contents.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<R>, LoadError>,
    ) -> TablebaseResult<usize> {
        if ticket.0 != self.load_generation {
            warn!(
                "discarding stale load {} (latest is {})",
                ticket.0, self.load_generation
            );
            return Err(LoadError::Superseded.into());
        }
        match result {
            Ok(records) => {
                let count = records.len();
                self.load(records);
                Ok(count)
            }
            Err(e) => {
                warn!("load failed, keeping {} records: {e}", self.records.len());
                Err(e.into())
            }
        }
    }

    /// Append a record with a new, non-empty key.
    pub fn add(&mut self, record: R) -> TablebaseResult<()> {
        let key = record.key();
        if key.is_empty() {
            warn!("rejected add without a key");
            return Err(ValidationError::MissingKey.into());
        }
        if self.contains_key(&key) {
            warn!("rejected add of duplicate key `{key}`");
            return Err(TablebaseError::DuplicateKey(key));
        }
        self.records.push(record);
        debug!("added `{key}`");
        self.notify(StoreEvent::Added(key));
        Ok(())
    }

    /// Overwrite the fields present in `patch` on the record with `key`.
    pub fn update(&mut self, key: impl AsRef<str>, patch: R::Patch) -> TablebaseResult<()> {
        let key = key.as_ref();
        let Some(index) = self.position(key) else {
            warn!("rejected update of unknown key `{key}`");
            return Err(TablebaseError::NotFound(key.into()));
        };
        self.records[index].apply_patch(patch);
        debug!("updated `{key}`");
        self.notify(StoreEvent::Updated(key.into()));
        Ok(())
    }

    /// Remove and return the first record with `key`.
    pub fn remove(&mut self, key: impl AsRef<str>) -> TablebaseResult<R> {
        let key = key.as_ref();
        let Some(index) = self.position(key) else {
            warn!("rejected remove of unknown key `{key}`");
            return Err(TablebaseError::NotFound(key.into()));
        };
        let removed = self.records.remove(index);
        debug!("removed `{key}`");
        self.notify(StoreEvent::Removed(key.into()));
        Ok(removed)
    }

    pub fn find(&self, key: impl AsRef<str>) -> Option<&R> {
        self.position(key).map(|i| &self.records[i])
    }

    pub fn position(&self, key: impl AsRef<str>) -> Option<usize> {
        let key = key.as_ref();
        self.records.iter().position(|r| r.key_str() == key)
    }

    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.position(key).is_some()
    }

    /// Read-only view in display order.
    pub fn all(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn query(&self, config: &QueryConfig) -> QueryResult<&R> {
        config.run(&self.records)
    }

    /// Sum a per-record figure, e.g. `price * stock` for an inventory value.
    pub fn sum_by<F: Fn(&R) -> f64>(&self, f: F) -> f64 {
        self.records.iter().map(f).sum()
    }

    /// Register a callback run after every successful load or mutation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent, &[R]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&event, &self.records);
        }
    }
}

impl<'a, R: TableRecord> IntoIterator for &'a RecordStore<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn report_anomalies<R: TableRecord>(records: &[R]) {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let key = record.key();
        if key.is_empty() {
            warn!("loaded record {index} has an empty key");
        } else if !seen.insert(key.clone()) {
            warn!("loaded record {index} repeats key `{key}`");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::record::{FieldValue, RecordPatch};

    fn rec(id: &str, name: &str) -> Record {
        Record::new("id").with("id", id).with("name", name)
    }

    fn loaded() -> RecordStore {
        let mut store = RecordStore::new();
        store.load(vec![rec("1", "A"), rec("2", "B")]);
        store
    }

    #[test]
    fn load_preserves_order() {
        let mut store = RecordStore::new();
        store.load(vec![rec("3", "C"), rec("1", "A"), rec("2", "B")]);
        let keys: Vec<_> = store.iter().map(|r| r.key()).collect();
        assert_eq!(keys, vec!["3", "1", "2"]);
    }

    #[test]
    fn load_passes_duplicates_through() {
        let mut store = RecordStore::new();
        store.load(vec![rec("1", "A"), rec("1", "B")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.find("1").unwrap().get("name"), Some(&FieldValue::from("A")));
    }

    #[test]
    fn add_appends_at_end() {
        let mut store = loaded();
        store.add(rec("0", "Z")).unwrap();
        assert_eq!(store.all().last().unwrap().key(), "0");
    }

    #[test]
    fn add_rejects_duplicate_without_mutation() {
        let mut store = RecordStore::new();
        store.load(vec![rec("1", "A")]);
        let err = store.add(rec("1", "B")).unwrap_err();
        assert!(matches!(err, TablebaseError::DuplicateKey(ref k) if k == "1"));
        assert_eq!(store.all(), &[rec("1", "A")]);
    }

    #[test]
    fn add_rejects_empty_key() {
        let mut store = loaded();
        let err = store.add(rec(" ", "blank")).unwrap_err();
        assert!(matches!(err, TablebaseError::Validation(ValidationError::MissingKey)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_on_empty_store_is_not_found() {
        let mut store: RecordStore = RecordStore::new();
        store.load(vec![]);
        let err = store
            .update("1", RecordPatch::new().with("name", "X"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn update_overwrites_only_patched_fields() {
        let mut store = RecordStore::new();
        store.load(vec![rec("1", "A").with("dept", "Ops")]);
        store.update("1", RecordPatch::new().with("name", "Z")).unwrap();
        assert_eq!(store.find("1"), Some(&rec("1", "Z").with("dept", "Ops")));
    }

    #[test]
    fn remove_then_find_is_none() {
        let mut store = loaded();
        let removed = store.remove("1").unwrap();
        assert_eq!(removed, rec("1", "A"));
        assert!(store.find("1").is_none());
        assert_eq!(store.len(), 1);
        assert!(store.remove("1").unwrap_err().is_not_found());
    }

    #[test]
    fn subscribers_see_successful_changes_only() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut store = loaded();
        let sink = Rc::clone(&events);
        let id = store.subscribe(move |event, records| {
            sink.borrow_mut().push((event.clone(), records.len()));
        });

        store.add(rec("3", "C")).unwrap();
        let _ = store.add(rec("3", "again"));
        let _ = store.remove("missing");
        store.remove("1").unwrap();
        assert!(store.unsubscribe(id));
        store.add(rec("4", "D")).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                (StoreEvent::Added("3".into()), 3),
                (StoreEvent::Removed("1".into()), 2),
            ]
        );
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut store = loaded();
        let first = store.begin_load();
        let second = store.begin_load();

        store.complete_load(second, Ok(vec![rec("9", "new")])).unwrap();
        let err = store
            .complete_load(first, Ok(vec![rec("8", "old")]))
            .unwrap_err();

        assert!(matches!(err, TablebaseError::Load(LoadError::Superseded)));
        assert_eq!(store.all(), &[rec("9", "new")]);
    }

    #[test]
    fn failed_load_keeps_contents() {
        let mut store = loaded();
        let ticket = store.begin_load();
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing fixture");
        assert!(store.complete_load(ticket, Err(io.into())).is_err());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn sum_by_aggregates() {
        let mut store = RecordStore::new();
        store.load(vec![
            Record::new("id").with("id", "P1").with("price", 2.5_f64).with("stock", 4_i64),
            Record::new("id").with("id", "P2").with("price", 10_i64).with("stock", 1_i64),
        ]);
        let total = store.sum_by(|r| {
            let price = r.get("price").and_then(FieldValue::as_number).unwrap_or(0.0);
            let stock = r.get("stock").and_then(FieldValue::as_number).unwrap_or(0.0);
            price * stock
        });
        assert_eq!(total, 20.0);
    }
}
