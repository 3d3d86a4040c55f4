//! URL list input
//!
//! The batch is read completely before any work is dispatched.

use crate::url::input_url;
use crate::GleanError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Reads one URL per line, skipping blank lines
pub fn read_urls<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut urls = Vec::new();

    for line in reader.lines() {
        let line = line?;
        match input_url(&line) {
            Some(url) => urls.push(url.to_string()),
            None => tracing::debug!("Skipping blank input line"),
        }
    }

    Ok(urls)
}

/// Loads the URL list from a file, or from standard input when no path is given
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The URLs in input order
/// * `Err(GleanError::Io)` - The file could not be opened or read
pub fn load_urls(path: Option<&Path>) -> Result<Vec<String>, GleanError> {
    let urls = match path {
        Some(path) => {
            tracing::info!("Reading URLs from {}", path.display());
            read_urls(BufReader::new(File::open(path)?))?
        }
        None => {
            tracing::info!("Reading URLs from standard input");
            read_urls(io::stdin().lock())?
        }
    };

    tracing::info!("Loaded {} URLs", urls.len());
    Ok(urls)
}
