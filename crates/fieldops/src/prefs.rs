//! User preferences.
//!
//! A small key-value store for state that should survive between sessions:
//! `sidebar.collapsed`, a list's chosen page size, and so on. Values are
//! JSON so any serde type can be kept. Nothing is written until
//! [`Preferences::save`] is called.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::entities::EntityKind;
use crate::error::{Error, Result};

/// Preferences loaded from a JSON file.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl Preferences {
    /// Loads preferences from `path`. A missing file is an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::io(&path, e)),
        };
        Ok(Preferences { path, values })
    }

    /// Writes the preferences back to their file, creating its directory
    /// if needed.
    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.values)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&self.path, text).map_err(|e| Error::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), keys = self.values.len(), "saved preferences");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored value of `key`, decoded as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.values
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(Error::from)
    }

    /// The raw JSON value of `key`.
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> Result<()> {
        self.values.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The page size last chosen for a list.
    ///
    /// A stored value that is not a positive integer is ignored.
    pub fn page_size(&self, kind: EntityKind) -> Option<usize> {
        match self.get::<usize>(&page_size_key(kind)) {
            Ok(Some(size)) if size > 0 => Some(size),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(list = kind.name(), error = %e, "ignoring stored page size");
                None
            }
        }
    }

    pub fn set_page_size(&mut self, kind: EntityKind, page_size: usize) -> Result<()> {
        self.set(page_size_key(kind), page_size)
    }
}

fn page_size_key(kind: EntityKind) -> String {
    format!("lists.{}.page_size", kind.name())
}

/// Parses a command-line preference value: JSON when it parses as JSON,
/// otherwise a plain string.
pub fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
