// src/error.rs

//! Error types for the porter library
//!
//! Library code returns `Error` through the crate-local `Result` alias.
//! Command handlers convert to `anyhow::Error` at the CLI boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source file decoded as JSON but is not an array of objects.
    #[error("bad source data: {0}")]
    SourceData(String),

    #[error("missing field '{0}' in source record")]
    MissingField(String),

    #[error("field '{field}' has unexpected shape: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    /// The parent page exists but has the wrong content type for the importer.
    #[error("parent page {id} has content type '{found}', expected '{expected}'")]
    ParentType {
        id: i64,
        expected: String,
        found: String,
    },

    #[error("page {0} not found")]
    PageNotFound(i64),

    #[error("invalid image from {url}: {reason}")]
    Image { url: String, reason: String },

    /// A per-record failure the import driver reports and skips.
    #[error("validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
