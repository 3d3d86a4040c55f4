//! URL handling module for Sumi-Glean
//!
//! This module provides relative URL resolution for extracted links and the
//! cleanup applied to raw input lines.

use url::Url;

/// Resolves a possibly relative reference against a page URL
///
/// Resolution follows the WHATWG URL standard via [`Url::join`]; absolute
/// references come back unchanged. When the base cannot be parsed, or the
/// reference cannot be joined onto it, the reference is returned as written.
///
/// # Examples
///
/// ```
/// use sumi_glean::url::resolve_url;
///
/// assert_eq!(
///     resolve_url("https://example.com/page", "/assets/logo.png"),
///     "https://example.com/assets/logo.png"
/// );
/// assert_eq!(
///     resolve_url("https://example.com/page", "https://cdn.example.com/logo.png"),
///     "https://cdn.example.com/logo.png"
/// );
/// ```
pub fn resolve_url(base: &str, reference: &str) -> String {
    if is_absolute(reference) {
        return reference.to_string();
    }

    match Url::parse(base).and_then(|base_url| base_url.join(reference)) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            tracing::debug!("Could not resolve {} against {}: {}", reference, base, e);
            reference.to_string()
        }
    }
}

/// Returns true when the reference carries its own scheme
fn is_absolute(reference: &str) -> bool {
    Url::parse(reference).is_ok()
}

/// Turns one line of input into a work item URL
///
/// Surrounding whitespace is removed; blank lines yield `None`.
pub fn input_url(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
