//! Output sink traits and types
//!
//! This module defines the trait interface for record sinks and the
//! records they accept.

use crate::extract::EnrichedRecord;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Marker for a URL that produced no page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    /// The URL as it appeared in the input
    pub website: String,

    /// Always `"failed"`
    pub status: &'static str,

    /// Description of the last error
    pub error: String,
}

impl FailureRecord {
    /// Creates a failure record for a website
    pub fn new(website: &str, error: impl ToString) -> Self {
        Self {
            website: website.to_string(),
            status: "failed",
            error: error.to_string(),
        }
    }
}

/// Trait for record sinks
///
/// Sinks receive records from many workers at once. Implementations must be
/// thread-safe and must write each record atomically, so that concurrent
/// writers never interleave partial records.
pub trait RecordSink: Send + Sync {
    /// Writes the record of a successfully processed website
    fn emit(&self, record: &EnrichedRecord) -> OutputResult<()>;

    /// Writes the marker of a website that could not be fetched
    fn emit_failure(&self, failure: &FailureRecord) -> OutputResult<()>;

    /// Flushes any buffered output
    fn finalize(&self) -> OutputResult<()> {
        Ok(())
    }
}
