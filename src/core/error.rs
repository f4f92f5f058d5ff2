//! core/error.rs
//! Error types for the per-file operations. All of these are recovered
//! locally by the pipelines (count + log + next file), except `PromptError`,
//! which means the user closed the terminal input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("could not read MP3 file: {0}")]
    Read(String),

    #[error("write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid input '{0}'. Use format: '1,3,5' or '1-10' or 'all'")]
    Malformed(String),

    #[error("invalid file numbers. Must be between 1 and {count}")]
    OutOfRange { count: usize },

    #[error("nothing selected")]
    Empty,
}

/// Lookup failures never reach the user as errors; the lookup layer logs
/// them and returns zero results.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("backend not configured")]
    NotConfigured,
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("could not start encoder: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("{stderr}")]
    Failed { stderr: String },

    #[error("Failed to move file: {0}")]
    Move(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed")]
    Closed,

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
