//! Page fetching
//!
//! This module contains:
//! - HTTP fetching with bounded retry
//! - Per-attempt request header rotation

mod fetcher;
mod headers;

pub use fetcher::{build_http_client, FetchedPage, Fetcher, RetryPolicy};
pub use headers::{HeaderSource, RandomHeaders};
