//! Batch processing
//!
//! This module contains the orchestration logic:
//! - Reading the URL list
//! - Running one unit of work per URL on a bounded worker pool

mod coordinator;
mod input;

pub use coordinator::{process_url, Coordinator};
pub use input::{load_urls, read_urls};

use crate::config::Config;
use crate::output::{BatchSummary, RecordSink};
use crate::GleanError;
use std::sync::Arc;

/// Runs a complete batch
///
/// Builds a coordinator from the configuration and processes every URL,
/// writing records to `sink` as units complete.
///
/// # Returns
///
/// * `Ok(BatchSummary)` - Every unit finished (individual URLs may have failed)
/// * `Err(GleanError)` - The coordinator could not be constructed
pub async fn enrich(
    config: &Config,
    urls: Vec<String>,
    sink: Arc<dyn RecordSink>,
) -> Result<BatchSummary, GleanError> {
    let coordinator = Coordinator::new(config, sink)?;
    Ok(coordinator.run(urls).await)
}
