//! Error types for the dashboard crate.

use std::io;
use std::path::PathBuf;

use fieldops_seeker::SeekerError;
use thiserror::Error;

use crate::entities::EntityKind;

/// Errors raised by stores, configuration and output.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("text output is not a structured format")]
    NotStructured,

    /// The entity name matched no list page.
    #[error("unknown entity '{0}' (available: {available})", available = EntityKind::names())]
    UnknownEntity(String),

    /// No record with this id exists in the collection.
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    /// A created record reused an existing id.
    #[error("{kind} {id} already exists")]
    DuplicateId { kind: EntityKind, id: i64 },

    /// A record or patch was not a JSON object, or its id was not an integer.
    #[error("invalid {kind} record: {reason}")]
    InvalidRecord { kind: EntityKind, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Seeker(#[from] SeekerError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, Error>;
