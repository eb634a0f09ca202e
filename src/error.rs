//! Error types for table extraction.

use thiserror::Error;

/// Errors raised while locating, inferring or iterating a table.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no tables found")]
    NoTableFound,

    #[error("{count} HTML element(s) selected by ({selector}), expected exactly one")]
    AmbiguousSelection { selector: String, count: usize },

    #[error("index {index} out of range for ({selector}): {count} element(s) selected")]
    IndexOutOfRange {
        selector: String,
        index: usize,
        count: usize,
    },

    #[error("selected ({selector}) element is a {tag}, not a table")]
    NotATable { selector: String, tag: String },

    #[error("invalid selector ({selector}): {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("no more rows")]
    EndOfSequence,

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
