//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building the HTTP client from configuration
//! - Rotating request headers on every attempt
//! - Retrying transport failures with a fixed delay
//!
//! HTTP status codes are not inspected. An error page is still a page and its
//! body is handed downstream like any other.

use crate::config::FetcherConfig;
use crate::fetch::headers::HeaderSource;
use crate::GleanError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// A successfully downloaded page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code (not necessarily 2xx)
    pub status_code: u16,

    /// Decoded page body
    pub body: String,
}

/// Bounded retry schedule for transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made after the first one fails
    pub max_retries: u32,

    /// Fixed pause between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Total number of attempts this policy allows
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl From<&FetcherConfig> for RetryPolicy {
    fn from(config: &FetcherConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

/// Builds an HTTP client with the configured timeouts
///
/// Redirects are followed with reqwest's default policy (up to 10 hops) so
/// that the final URL can serve as the base for relative links.
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Downloads pages, retrying transport failures
pub struct Fetcher {
    client: Client,
    headers: Arc<dyn HeaderSource>,
    retry: RetryPolicy,
}

impl Fetcher {
    /// Creates a fetcher from its parts
    pub fn new(client: Client, headers: Arc<dyn HeaderSource>, retry: RetryPolicy) -> Self {
        Self {
            client,
            headers,
            retry,
        }
    }

    /// Creates a fetcher from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Fetcher)` - Client built successfully
    /// * `Err(GleanError)` - The HTTP client could not be constructed
    pub fn from_config(
        config: &FetcherConfig,
        headers: Arc<dyn HeaderSource>,
    ) -> Result<Self, GleanError> {
        let client = build_http_client(config)?;
        Ok(Self::new(client, headers, RetryPolicy::from(config)))
    }

    /// The retry schedule in use
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetches a URL, retrying transport failures
    ///
    /// # Retry Logic
    ///
    /// | Condition                          | Action                          |
    /// |------------------------------------|---------------------------------|
    /// | Any HTTP status (including 4xx/5xx)| Success, body passed downstream |
    /// | Connection error / timeout / DNS   | Retry after fixed delay         |
    /// | Body could not be decoded          | Retry after fixed delay         |
    /// | Malformed URL                      | Retry after fixed delay         |
    ///
    /// Each attempt uses a fresh header set from the header source.
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedPage)` - The page body and final URL
    /// * `Err(GleanError::FetchExhausted)` - Every attempt failed
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, GleanError> {
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 1;

        loop {
            tracing::info!("Downloading {} (attempt {}/{})", url, attempt, max_attempts);

            match self.attempt(url).await {
                Ok(page) => {
                    tracing::info!(
                        "Downloaded {} (status {}, final url {})",
                        url,
                        page.status_code,
                        page.final_url
                    );
                    return Ok(page);
                }
                Err(e) => {
                    tracing::warn!(
                        "Download error for {} on attempt {}/{}: {}",
                        url,
                        attempt,
                        max_attempts,
                        e
                    );

                    if attempt >= max_attempts {
                        return Err(GleanError::FetchExhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            source: e,
                        });
                    }
                }
            }

            attempt += 1;
            tokio::time::sleep(self.retry.delay).await;
        }
    }

    /// Performs a single GET and reads the whole body
    async fn attempt(&self, url: &str) -> Result<FetchedPage, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .headers(self.headers.next_header_set())
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        Ok(FetchedPage {
            final_url,
            status_code,
            body,
        })
    }
}
