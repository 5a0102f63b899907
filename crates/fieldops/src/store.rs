//! Access to the backing store.
//!
//! The dashboard reads and writes collections of JSON records. Which service
//! actually holds them is not this crate's concern: [`RecordStore`] is the
//! seam, and [`JsonFileStore`] implements it over a single snapshot file of
//! the form
//!
//! ```json
//! { "clients": [ { "id": 1, "name": "Acme Plumbing", ... } ], "quotes": [ ... ] }
//! ```
//!
//! Records are identified by an integer `id` field. There are no
//! transactions and no retries; every mutation rewrites the snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde_json::Value;

use crate::entities::{Entity, EntityKind};
use crate::error::{Error, Result};

/// Collections keyed by their store name.
pub type Snapshot = BTreeMap<String, Vec<Value>>;

/// Storage backend for dashboard records.
///
/// Sync-only. Create and update take JSON so callers can pass through
/// whatever the edit form produced.
pub trait RecordStore: Send + Sync {
    /// All records of a collection, in stored order. A missing collection
    /// is empty.
    fn list(&self, kind: EntityKind) -> Result<Vec<Value>>;

    /// The record with `id`, or `None`.
    fn get(&self, kind: EntityKind, id: i64) -> Result<Option<Value>>;

    /// The record with `id`, or [`Error::NotFound`].
    fn resolve(&self, kind: EntityKind, id: i64) -> Result<Value> {
        self.get(kind, id)?.ok_or(Error::NotFound { kind, id })
    }

    /// Inserts a record. A record without an `id` gets the next free one.
    fn create(&self, kind: EntityKind, data: Value) -> Result<Value>;

    /// Merges the top-level fields of `patch` into the record. The `id`
    /// cannot be changed.
    fn update(&self, kind: EntityKind, id: i64, patch: Value) -> Result<Value>;

    /// Removes the record with `id`.
    fn delete(&self, kind: EntityKind, id: i64) -> Result<()>;

    /// Loads a collection as typed entities.
    fn load<T: Entity>(&self) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        self.list(T::KIND)?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(Error::from))
            .collect()
    }

    /// Loads one typed entity.
    fn find<T: Entity>(&self, id: i64) -> Result<T>
    where
        Self: Sized,
    {
        Ok(serde_json::from_value(self.resolve(T::KIND, id)?)?)
    }
}

fn record_id(value: &Value) -> Option<i64> {
    value.get("id").and_then(Value::as_i64)
}

/// A [`RecordStore`] over one JSON snapshot file.
///
/// The snapshot is read once on open and kept in memory; each mutation
/// writes the whole file back.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    snapshot: RwLock<Snapshot>,
}

impl JsonFileStore {
    /// Opens the snapshot at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = if path.exists() {
            let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            let snapshot: Snapshot = serde_json::from_str(&text)?;
            tracing::debug!(
                path = %path.display(),
                collections = snapshot.len(),
                "loaded store snapshot"
            );
            snapshot
        } else {
            tracing::info!(path = %path.display(), "store file not found, starting empty");
            Snapshot::new()
        };
        Ok(JsonFileStore {
            path,
            snapshot: RwLock::new(snapshot),
        })
    }

    /// A store seeded with `snapshot` that writes to `path`.
    pub fn with_snapshot(path: impl Into<PathBuf>, snapshot: Snapshot) -> Self {
        JsonFileStore {
            path: path.into(),
            snapshot: RwLock::new(snapshot),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, snapshot: &Snapshot) -> Result<()> {
        let text = serde_json::to_string_pretty(snapshot)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&self.path, text).map_err(|e| Error::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "wrote store snapshot");
        Ok(())
    }

    /// Runs `f` on a copy of one collection under the write lock.
    ///
    /// The copy replaces the stored collection only once the snapshot has
    /// been written; if `f` or the write fails, memory is left unchanged.
    fn mutate<R>(
        &self,
        kind: EntityKind,
        f: impl FnOnce(&mut Vec<Value>) -> Result<R>,
    ) -> Result<R> {
        let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        let key = kind.collection();
        let mut records = snapshot.get(key).cloned().unwrap_or_default();
        let result = f(&mut records)?;

        let previous = snapshot.insert(key.to_string(), records);
        if let Err(err) = self.persist(&snapshot) {
            match previous {
                Some(records) => snapshot.insert(key.to_string(), records),
                None => snapshot.remove(key),
            };
            tracing::warn!(%kind, error = %err, "store write failed, change discarded");
            return Err(err);
        }
        Ok(result)
    }
}

impl RecordStore for JsonFileStore {
    fn list(&self, kind: EntityKind) -> Result<Vec<Value>> {
        let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Ok(snapshot.get(kind.collection()).cloned().unwrap_or_default())
    }

    fn get(&self, kind: EntityKind, id: i64) -> Result<Option<Value>> {
        let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Ok(snapshot
            .get(kind.collection())
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)))
            .cloned())
    }

    fn create(&self, kind: EntityKind, mut data: Value) -> Result<Value> {
        self.mutate(kind, |records| {
            let Some(fields) = data.as_object_mut() else {
                return Err(Error::InvalidRecord {
                    kind,
                    reason: "expected a JSON object".to_string(),
                });
            };
            let id = match fields.get("id") {
                None | Some(Value::Null) => {
                    let next = records.iter().filter_map(record_id).max().unwrap_or(0) + 1;
                    fields.insert("id".to_string(), Value::from(next));
                    next
                }
                Some(id) => id.as_i64().ok_or_else(|| Error::InvalidRecord {
                    kind,
                    reason: format!("id must be an integer, got {id}"),
                })?,
            };
            if records.iter().any(|r| record_id(r) == Some(id)) {
                return Err(Error::DuplicateId { kind, id });
            }
            records.push(data.clone());
            tracing::info!(%kind, id, "created record");
            Ok(data)
        })
    }

    fn update(&self, kind: EntityKind, id: i64, patch: Value) -> Result<Value> {
        self.mutate(kind, |records| {
            let Value::Object(patch) = patch else {
                return Err(Error::InvalidRecord {
                    kind,
                    reason: "patch must be a JSON object".to_string(),
                });
            };
            let record = records
                .iter_mut()
                .find(|r| record_id(r) == Some(id))
                .ok_or(Error::NotFound { kind, id })?;
            if let Some(fields) = record.as_object_mut() {
                for (key, value) in patch {
                    if key != "id" {
                        fields.insert(key, value);
                    }
                }
            }
            tracing::info!(%kind, id, "updated record");
            Ok(record.clone())
        })
    }

    fn delete(&self, kind: EntityKind, id: i64) -> Result<()> {
        self.mutate(kind, |records| {
            let index = records
                .iter()
                .position(|r| record_id(r) == Some(id))
                .ok_or(Error::NotFound { kind, id })?;
            records.remove(index);
            tracing::info!(%kind, id, "deleted record");
            Ok(())
        })
    }
}
