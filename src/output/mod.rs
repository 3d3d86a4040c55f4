//! Output module for emitting enrichment records
//!
//! This module handles:
//! - The record sink interface shared by all workers
//! - Line-delimited JSON output
//! - Batch statistics

mod jsonl;
pub mod stats;
mod traits;

pub use jsonl::JsonLinesSink;
pub use stats::BatchSummary;
pub use traits::{FailureRecord, OutputError, OutputResult, RecordSink};
