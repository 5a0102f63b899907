//! Error types for the seeker crate.
//!
//! Running a pipeline never fails. Errors only come from turning user input
//! (sort strings, facet arguments, list configuration) into pipeline inputs.

use thiserror::Error;

/// Errors that can occur when parsing or validating pipeline inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeekerError {
    /// Sort direction was neither `asc` nor `desc`.
    #[error("invalid sort direction '{0}': expected 'asc' or 'desc'")]
    InvalidDirection(String),

    /// Facet argument was not of the form `key=value[,value...]`.
    #[error("invalid facet filter '{0}': expected key=value[,value...]")]
    InvalidFacet(String),

    /// Facet key is not configured for the list.
    #[error("unknown facet '{key}' (available: {available})")]
    UnknownFacet { key: String, available: String },

    /// Sort field is not one of the list's sort options.
    #[error("unknown sort field '{field}' (available: {available})")]
    UnknownSortField { field: String, available: String },

    /// Page size must be at least one.
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
