//! Error types.
//!
//! Catalog and config problems surface at load time and reject the whole file.
//! Request-time problems are limited to [`RecommendError`], which callers turn
//! into a structured failure instead of propagating.

use std::path::PathBuf;
use thiserror::Error;

/// Catalog could not be loaded. The whole catalog is rejected.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON, missing fields or an unknown tier.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported catalog version {0} (expected 1)")]
    UnsupportedVersion(u32),

    #[error("entry {index} has an empty id")]
    EmptyId { index: usize },

    #[error("duplicate id '{id}' at entries {first} and {second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },

    #[error("entry '{id}' has rating {rating}, expected a finite value in 0.0..=5.0")]
    RatingOutOfRange { id: String, rating: f64 },
}

/// Engine configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weight '{name}' is {value}; non-zero weights must be finite and exceed the rating tie-break ({max_tiebreak})")]
    InvalidWeight {
        name: &'static str,
        value: f64,
        max_tiebreak: f64,
    },
}

/// Per-request failure returned instead of a selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// Query was empty after trimming and the policy requires one.
    #[error("missing query")]
    MissingQuery,
}
