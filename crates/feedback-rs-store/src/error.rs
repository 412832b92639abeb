//! Error types for store operations and backing file parsing.

use feedback_rs_classifier::ClassifierError;
use std::path::PathBuf;

/// Errors returned by record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// User input was rejected.
    #[error("{0}")]
    Validation(String),
    /// No record has the requested id.
    #[error("no feedback entry with id {0}")]
    NotFound(u32),
    /// No record belongs to the requested student.
    #[error("no feedback entries for student {0:?}")]
    NoStudent(String),
    /// The backing file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    StorageRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The backing file could not be rewritten.
    #[error("failed to write {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Every id up to `u32::MAX` has been used.
    #[error("no feedback ids left to assign")]
    IdsExhausted,
    /// The classifier refused the comment.
    #[error("classification failed: {0}")]
    Classification(#[from] ClassifierError),
}

/// Reasons a backing file line could not become a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line does not split into the expected number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    /// A field failed its type conversion or range check.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidEncoding,
    /// The id was already used by an earlier line.
    #[error("duplicate id {0}")]
    DuplicateId(u32),
}

/// A skipped line from the last load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadIssue {
    /// 1-based line number in the backing file.
    pub line: usize,
    /// Why the line was skipped.
    pub error: ParseError,
    /// Line content without its terminator, written back unchanged on every
    /// rewrite so a skipped line is never lost.
    pub raw: Vec<u8>,
}
