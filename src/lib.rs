//! Sumi-Glean: a batch contact enricher
//!
//! This crate fetches a list of web pages concurrently and extracts, for each
//! page, the telephone numbers it advertises and the most likely site logo.
//! Every page yields one JSON record on the output stream.

pub mod batch;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Glean operations
#[derive(Debug, Error)]
pub enum GleanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetching {url} failed after {attempts} attempts: {source}")]
    FetchExhausted {
        url: String,
        attempts: u32,
        source: reqwest::Error,
    },

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Sumi-Glean operations
pub type Result<T> = std::result::Result<T, GleanError>;

// Re-export commonly used types
pub use batch::Coordinator;
pub use config::Config;
pub use extract::{extract_phone_numbers, extract_visible_text, select_logo, EnrichedRecord};
pub use fetch::{Fetcher, FetchedPage};
