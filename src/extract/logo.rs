//! Logo selection
//!
//! Picks the image most likely to be the site logo using nothing but the
//! strings in the markup: class names, source paths and a fixed keyword table.

use crate::url::resolve_url;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

static LOGO_CLASS_IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"img[class*="logo"][src]"#).expect("valid selector"));
static ANY_IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("valid selector"));

/// Keyword scores, checked in order; the first keyword found decides
const KEYWORD_PRIORITY: &[(&str, u8)] = &[
    ("small", 10),
    ("footer", 9),
    ("header", 8),
    ("white", 7),
    ("black", 6),
    ("rgb", 5),
    ("color", 4),
];

/// Score for a candidate that matches no keyword
const BASE_PRIORITY: u8 = 3;

/// Selects the best logo URL on a page, resolved against `base_url`
///
/// Returns an empty string when the page has no logo-like images.
///
/// # Example
///
/// ```
/// use sumi_glean::select_logo;
///
/// let html = r#"<img class="site-logo" src="/assets/logo.png">"#;
/// assert_eq!(
///     select_logo(html, "https://example.com/page"),
///     "https://example.com/assets/logo.png"
/// );
/// ```
pub fn select_logo(html: &str, base_url: &str) -> String {
    logo(&Html::parse_document(html), base_url)
}

/// Selects the best logo URL from an already parsed document
pub(crate) fn logo(document: &Html, base_url: &str) -> String {
    match pick_candidate(&logo_candidates(document)) {
        Some(candidate) => resolve_url(base_url, candidate),
        None => String::new(),
    }
}

/// Collects distinct logo candidates in document order
///
/// Images whose class mentions `logo` win outright; only when there are none
/// are image sources containing `logo` (any case) considered.
pub fn logo_candidates(document: &Html) -> Vec<String> {
    let by_class: Vec<&str> = document
        .select(&LOGO_CLASS_IMG)
        .filter_map(|img| img.value().attr("src"))
        .collect();

    let sources = if by_class.is_empty() {
        document
            .select(&ANY_IMG)
            .filter_map(|img| img.value().attr("src"))
            .filter(|src| src.to_lowercase().contains("logo"))
            .collect()
    } else {
        by_class
    };

    let mut seen = HashSet::new();
    sources
        .into_iter()
        .filter(|src| seen.insert(*src))
        .map(str::to_string)
        .collect()
}

/// Picks the highest-priority candidate; the earliest one wins a tie
pub fn pick_candidate(candidates: &[String]) -> Option<&str> {
    let mut best: Option<(&str, u8)> = None;

    for candidate in candidates {
        let score = priority(candidate);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate.as_str(), score));
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Keyword priority of a single candidate
pub fn priority(candidate: &str) -> u8 {
    let lowered = candidate.to_lowercase();
    KEYWORD_PRIORITY
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map_or(BASE_PRIORITY, |(_, score)| *score)
}
