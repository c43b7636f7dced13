//! Error types for discovery, resolution and submission.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error produced by a [`QueueService`](crate::QueueService) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{} does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("{} is a directory, expected a file", .0.display())]
    NotAFile(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid search pattern for {}", .path.display())]
    Pattern {
        path: PathBuf,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("failed to encode message body")]
    Encode(#[source] serde_json::Error),

    #[error("invalid batch entry id: {0}")]
    InvalidEntryId(String),

    #[error("batch size must be between 1 and {max}, got {size}")]
    InvalidBatchSize { size: usize, max: usize },

    #[error("queue name or URL must not be empty")]
    EmptyQueueIdentifier,

    #[error("queue '{0}' does not exist")]
    QueueNotFound(String),

    #[error("failed to resolve the URL of queue '{name}'")]
    Resolution {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error(
        "batch {batch} of {batches} failed; {sent} of {total} messages were sent before the failure"
    )]
    Submission {
        batch: usize,
        batches: usize,
        sent: usize,
        total: usize,
        #[source]
        source: SendFailure,
    },

    #[error("failed to list queues")]
    List(#[source] BoxError),

    #[error("failed to describe queue {url}")]
    Describe {
        url: String,
        #[source]
        source: BoxError,
    },
}

/// Why a single JSON document could not be turned into a payload.
///
/// Line numbers are 1-based and relative to the start of the file.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("line {line}: invalid JSON")]
    Syntax {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: expected a JSON object, found {found}")]
    NotAnObject { line: usize, found: &'static str },
}

impl DocumentError {
    pub fn line(&self) -> usize {
        match self {
            DocumentError::Syntax { line, .. } | DocumentError::NotAnObject { line, .. } => *line,
        }
    }
}

/// The reason a batch was not accepted by the queue service.
#[derive(Debug, Error)]
pub enum SendFailure {
    #[error("the queue service rejected the request")]
    Service(#[source] BoxError),

    #[error("{} entries were rejected: {}", .0.len(), FailedEntry::summarize(.0))]
    Entries(Vec<FailedEntry>),
}

/// A batch entry the queue service reported as failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedEntry {
    pub id: String,
    pub code: String,
    pub message: Option<String>,
    pub sender_fault: bool,
}

impl FailedEntry {
    fn summarize(entries: &[FailedEntry]) -> String {
        entries
            .iter()
            .map(|e| match &e.message {
                Some(message) => format!("{} ({}: {})", e.id, e.code, message),
                None => format!("{} ({})", e.id, e.code),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
