//! Batch coordinator - worker pool orchestration
//!
//! This module runs one unit of work per input URL:
//! - Fetching the page (with retries)
//! - Extracting phone numbers and the logo
//! - Emitting the record as soon as the unit completes
//!
//! Units are independent. A unit that fails is logged and, when failure
//! reporting is enabled, leaves a failure marker in the output; it never
//! stops the rest of the batch.

use crate::config::Config;
use crate::extract::{enrich_page, EnrichedRecord};
use crate::fetch::{Fetcher, RandomHeaders};
use crate::output::{BatchSummary, FailureRecord, RecordSink};
use crate::GleanError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;

/// Outcome of a single unit of work
#[derive(Debug)]
enum UnitOutcome {
    Enriched(EnrichedRecord),
    Failed,
}

/// Main batch coordinator structure
pub struct Coordinator {
    fetcher: Arc<Fetcher>,
    sink: Arc<dyn RecordSink>,
    workers: usize,
    report_failures: bool,
}

impl Coordinator {
    /// Creates a coordinator from configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `sink` - Where records are written
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run a batch
    /// * `Err(GleanError)` - The header rotator or HTTP client could not be built
    pub fn new(config: &Config, sink: Arc<dyn RecordSink>) -> Result<Self, GleanError> {
        let headers = Arc::new(RandomHeaders::from_config(&config.headers)?);
        let fetcher = Fetcher::from_config(&config.fetcher, headers)?;

        Ok(Self::with_fetcher(
            fetcher,
            sink,
            config.pool.workers as usize,
            config.output.report_failures,
        ))
    }

    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(
        fetcher: Fetcher,
        sink: Arc<dyn RecordSink>,
        workers: usize,
        report_failures: bool,
    ) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            sink,
            workers: workers.max(1),
            report_failures,
        }
    }

    /// Processes every URL and waits for all units to finish
    ///
    /// All units are spawned up front; a semaphore keeps at most `workers`
    /// of them running. Records are written in completion order, not input
    /// order.
    pub async fn run(&self, urls: Vec<String>) -> BatchSummary {
        let start_time = Instant::now();
        let mut summary = BatchSummary::new();
        summary.submitted = urls.len() as u64;

        tracing::info!(
            "Dispatching {} URLs to {} workers",
            urls.len(),
            self.workers
        );

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut units = JoinSet::new();

        for (unit_id, url) in urls.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let sink = Arc::clone(&self.sink);
            let report_failures = self.report_failures;
            let span = tracing::info_span!("unit", id = unit_id, url = %url);

            units.spawn(
                async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            tracing::error!("Worker pool closed: {}", e);
                            return UnitOutcome::Failed;
                        }
                    };
                    run_unit(&fetcher, sink.as_ref(), &url, report_failures).await
                }
                .instrument(span),
            );
        }

        while let Some(joined) = units.join_next().await {
            match joined {
                Ok(UnitOutcome::Enriched(record)) => summary.record_success(&record),
                Ok(UnitOutcome::Failed) => summary.record_failure(),
                Err(e) => {
                    tracing::error!("Worker task panicked: {}", e);
                    summary.record_failure();
                }
            }
        }

        if let Err(e) = self.sink.finalize() {
            tracing::error!("Failed to flush output: {}", e);
        }

        summary.elapsed = start_time.elapsed();
        summary
    }
}

/// Runs one unit: fetch, extract, emit
async fn run_unit(
    fetcher: &Fetcher,
    sink: &dyn RecordSink,
    url: &str,
    report_failures: bool,
) -> UnitOutcome {
    match process_url(fetcher, url).await {
        Ok(record) => {
            tracing::info!(
                "Extracted {} phone numbers, logo: {}",
                record.phones.len(),
                if record.logo.is_empty() { "none" } else { record.logo.as_str() }
            );
            if let Err(e) = sink.emit(&record) {
                tracing::error!("Failed to write record for {}: {}", url, e);
                return UnitOutcome::Failed;
            }
            UnitOutcome::Enriched(record)
        }
        Err(e) => {
            tracing::error!("Giving up on {}: {}", url, e);
            if report_failures {
                if let Err(write_err) = sink.emit_failure(&FailureRecord::new(url, &e)) {
                    tracing::error!("Failed to write failure record for {}: {}", url, write_err);
                }
            }
            UnitOutcome::Failed
        }
    }
}

/// Fetches a page and extracts its record
pub async fn process_url(fetcher: &Fetcher, url: &str) -> Result<EnrichedRecord, GleanError> {
    let page = fetcher.fetch(url).await?;

    tracing::debug!("Extracting signals from {} bytes", page.body.len());
    Ok(enrich_page(url, &page.final_url, &page.body))
}
