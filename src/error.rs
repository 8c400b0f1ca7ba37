//! Crate-wide error type.
//!
//! Hand-written, matching the teacher's own convention: nothing in this
//! crate reaches for `thiserror` or `anyhow`, so `SearchError` gets a manual
//! `Display` and `std::error::Error` impl rather than a derive.

use std::fmt;

#[derive(Debug)]
pub enum SearchError {
    /// Malformed JSON or a required field missing entirely (not merely
    /// null — nulls are tolerated and replaced by a placeholder, see
    /// `dataset::parser`).
    InvalidJson(String),
    /// A required field was absent from a document record.
    MissingField(String),
    /// Boolean query syntax error, naming the unexpected token.
    BooleanSyntax(String),
    /// Unrecognised `--engine` value.
    UnknownEngine(String),
    /// Unrecognised `--method` value.
    UnknownMethod(String),
    /// Unrecognised `--dataset` value.
    UnknownDataset(String),
    /// Cache I/O failure.
    Io(std::io::Error),
    /// Cache file failed header/footer validation (bad magic, bad CRC,
    /// truncated section).
    CorruptCache(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidJson(msg) => write!(f, "invalid JSON: {msg}"),
            SearchError::MissingField(field) => write!(f, "missing required field: {field}"),
            SearchError::BooleanSyntax(msg) => write!(f, "boolean query syntax error: {msg}"),
            SearchError::UnknownEngine(name) => write!(f, "unknown engine: {name}"),
            SearchError::UnknownMethod(name) => write!(f, "unknown method: {name}"),
            SearchError::UnknownDataset(name) => write!(f, "unknown dataset: {name}"),
            SearchError::Io(err) => write!(f, "I/O error: {err}"),
            SearchError::CorruptCache(msg) => write!(f, "corrupt cache: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        SearchError::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
