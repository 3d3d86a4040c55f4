//! Telephone number extraction
//!
//! Numbers come from two places: a permissive pattern run over the page's
//! visible text, and the values of `tel:` links in the raw markup. Both lists
//! are merged and deduplicated by their digit fingerprint.

use crate::extract::text::visible_text;
use regex::Regex;
use scraper::Html;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Digit groups separated by optional parentheses, `-`/`.` and short runs of
/// whitespace, with an optional leading `+`
static TEXT_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\+?\s{0,5}\(?\s{0,5}[0-9]{1,5}\s{0,5}\(?\)?[-.]?\s{0,5}[0-9]{1,4}\s{0,5}",
        r"\)?[-.]?\s{0,5}[0-9]{1,4}\s{0,5}[-.]?\s{0,5}[0-9]{1,4}\s{0,5}[-.]?\s{0,5}[0-9]{1,4}\)?",
    ))
    .expect("valid phone regex")
});

/// The value of a double-quoted `tel:` attribute
static TEL_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"="tel:([^"\n]*)""#).expect("valid tel regex"));

/// Text matches need more than this many digits
const MIN_TEXT_DIGITS: usize = 8;

/// `tel:` values need more than this many digits
const MIN_HREF_DIGITS: usize = 5;

/// Extracts cleaned, deduplicated phone numbers from an HTML page
///
/// Text-derived numbers come first in scan order, followed by numbers found
/// only in `tel:` links.
///
/// # Example
///
/// ```
/// use sumi_glean::extract_phone_numbers;
///
/// let html = r#"<p>reach us at 202.555.0199 today</p><a href="tel:+1-202-555-0170">Call us</a>"#;
/// assert_eq!(
///     extract_phone_numbers(html),
///     vec!["202 555 0199".to_string(), "+1 202 555 0170".to_string()]
/// );
/// ```
pub fn extract_phone_numbers(html: &str) -> Vec<String> {
    phone_numbers(html, &Html::parse_document(html))
}

/// Extracts phone numbers given the raw markup and its parsed document
pub(crate) fn phone_numbers(html: &str, document: &Html) -> Vec<String> {
    let text = visible_text(document);
    let from_text: Vec<&str> = TEXT_PHONE_RE.find_iter(&text).map(|m| m.as_str()).collect();
    let from_href = tel_href_values(html);

    merge_candidates(&from_text, &from_href)
}

/// Returns the raw value of every `tel:` attribute, in markup order
pub fn tel_href_values(html: &str) -> Vec<&str> {
    TEL_HREF_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Merges both candidate lists with their respective digit thresholds
///
/// The fingerprint set is shared, so a number seen in the text suppresses the
/// same number in a `tel:` link.
pub fn merge_candidates(from_text: &[&str], from_href: &[&str]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();

    let passes = [(from_text, MIN_TEXT_DIGITS), (from_href, MIN_HREF_DIGITS)];
    for (candidates, min_digits) in passes {
        for candidate in candidates {
            let digits = digit_fingerprint(candidate);
            if digits.len() > min_digits && seen.insert(digits) {
                cleaned.push(clean_phone_number(candidate));
            }
        }
    }

    cleaned
}

/// Strips every character that is not an ASCII digit
pub fn digit_fingerprint(candidate: &str) -> String {
    candidate.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Replaces everything except digits, `+`, `(` and `)` with a space and trims
pub fn clean_phone_number(candidate: &str) -> String {
    candidate
        .chars()
        .map(|c| {
            if c.is_ascii_digit() || matches!(c, '+' | '(' | ')') {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    #[test]
    fn test_text_and_href_precedence() {
        let html = page(
            r#"<p>reach us at 202.555.0199 today</p><a href="tel:+1-202-555-0170">Call us</a>"#,
        );
        assert_eq!(
            extract_phone_numbers(&html),
            vec!["202 555 0199".to_string(), "+1 202 555 0170".to_string()]
        );
    }

    #[test]
    fn test_text_duplicate_of_href_keeps_text_form() {
        let html = page(r#"<p>Phone: (202) 555-0199</p><a href="tel:2025550199">Call</a>"#);
        assert_eq!(extract_phone_numbers(&html), vec!["(202) 555 0199".to_string()]);
    }

    #[test]
    fn test_duplicate_text_matches_collapse() {
        let html = page("<p>Call 202-555-0199 or</p><p>dial 202 555 0199 today</p>");
        assert_eq!(extract_phone_numbers(&html), vec!["202 555 0199".to_string()]);
    }

    #[test]
    fn test_text_threshold_boundary() {
        assert!(extract_phone_numbers(&page("<p>call 1234 5678 now</p>")).is_empty());
        assert_eq!(
            extract_phone_numbers(&page("<p>call 123 456 789 now</p>")),
            vec!["123 456 789".to_string()]
        );
    }

    #[test]
    fn test_href_threshold_boundary() {
        assert!(extract_phone_numbers(&page(r#"<a href="tel:12345">Call</a>"#)).is_empty());
        assert_eq!(
            extract_phone_numbers(&page(r#"<a href="tel:123456">Call</a>"#)),
            vec!["123456".to_string()]
        );
    }

    #[test]
    fn test_merge_thresholds_applied_per_source() {
        // Seven digits pass as an href but not as text
        let merged = merge_candidates(&["555 0199"], &["555-0199"]);
        assert_eq!(merged, vec!["555 0199".to_string()]);
        assert_eq!(merge_candidates(&["555-0199"], &[]), Vec::<String>::new());
    }

    #[test]
    fn test_merge_first_seen_wins_within_source() {
        let merged = merge_candidates(&[], &["+1 (202) 555-0170", "12025550170", "202-555-0171"]);
        assert_eq!(
            merged,
            vec!["+1 (202) 555 0170".to_string(), "202 555 0171".to_string()]
        );
    }

    #[test]
    fn test_tel_href_values() {
        let html = r#"<a href="tel:+44 20 7946 0958">A</a><a href='tel:999'>B</a><a href="tel:">C</a>"#;
        assert_eq!(tel_href_values(html), vec!["+44 20 7946 0958", ""]);
    }

    #[test]
    fn test_digit_fingerprint() {
        assert_eq!(digit_fingerprint("+1 (202) 555-0170"), "12025550170");
        assert_eq!(digit_fingerprint("no digits"), "");
    }

    #[test]
    fn test_clean_phone_number() {
        assert_eq!(clean_phone_number(" +1-202.555/0170 "), "+1 202 555 0170");
        assert_eq!(clean_phone_number("(0)20-7946"), "(0)20 7946");
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        for raw in ["+1-202-555-0170", " (202) 555.0199", "202\u{a0}555\u{a0}0199"] {
            let once = clean_phone_number(raw);
            assert_eq!(clean_phone_number(&once), once);
        }
    }

    #[test]
    fn test_script_numbers_ignored() {
        let html = page("<script>var id = 123456789012;</script><p>No phone here</p>");
        assert!(extract_phone_numbers(&html).is_empty());
    }
}
