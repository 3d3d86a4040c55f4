//! Page signal extraction
//!
//! This module turns a downloaded page into an output record:
//! - Visible text extraction from the parsed document
//! - Phone number detection over the text and `tel:` links
//! - Logo selection from image class names and sources

mod logo;
mod phone;
mod text;

pub use logo::{logo_candidates, pick_candidate, priority, select_logo};
pub use phone::{
    clean_phone_number, digit_fingerprint, extract_phone_numbers, merge_candidates,
    tel_href_values,
};
pub use text::{extract_visible_text, visible_text};

use scraper::Html;
use serde::{Deserialize, Serialize};

/// The enrichment result for one website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// The URL as it appeared in the input
    pub website: String,

    /// Cleaned phone numbers in first-seen order
    pub phones: Vec<String>,

    /// Absolute logo URL, empty when none was found
    pub logo: String,
}

/// Extracts phones and logo from a page body
///
/// The document is parsed once and shared by both extractors. Relative logo
/// sources are resolved against `final_url`, the address the page was
/// actually served from.
///
/// # Example
///
/// ```
/// use sumi_glean::extract::enrich_page;
///
/// let html = r#"<p>reach us at 202.555.0199 today</p><a href="tel:+1-202-555-0170">Call us</a>"#;
/// let record = enrich_page("http://site.test/", "http://site.test/", html);
/// assert_eq!(record.phones, vec!["202 555 0199", "+1 202 555 0170"]);
/// assert_eq!(record.logo, "");
/// ```
pub fn enrich_page(website: &str, final_url: &str, html: &str) -> EnrichedRecord {
    let document = Html::parse_document(html);

    EnrichedRecord {
        website: website.to_string(),
        phones: phone::phone_numbers(html, &document),
        logo: logo::logo(&document, final_url),
    }
}
