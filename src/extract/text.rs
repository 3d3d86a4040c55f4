//! Visible text extraction
//!
//! Flattens a document into the text a visitor would read, skipping text that
//! lives in boilerplate or non-rendered elements.

use scraper::{Html, Node};

/// Elements whose direct text children never count as visible text
const BLACKLISTED_TAGS: &[&str] = &[
    "noscript", "header", "html", "style", "script", "meta", "head", "input", "title",
];

/// Extracts the visible text of an HTML document
///
/// Text nodes are visited in document order. A node is dropped when its
/// parent is the document root or a blacklisted element, or when the text
/// itself contains a closing tag of a blacklisted element (markup that leaked
/// into a text node). Every surviving fragment is followed by one space.
///
/// # Example
///
/// ```
/// use sumi_glean::extract_visible_text;
///
/// let html = "<html><head><title>Home</title></head><body><p>Call us</p></body></html>";
/// assert_eq!(extract_visible_text(html), "Call us ");
/// ```
pub fn extract_visible_text(html: &str) -> String {
    visible_text(&Html::parse_document(html))
}

/// Extracts the visible text of an already parsed document
pub fn visible_text(document: &Html) -> String {
    let mut output = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let parent_blacklisted = match node.parent().map(|parent| parent.value()) {
            Some(Node::Element(element)) => BLACKLISTED_TAGS.contains(&element.name()),
            Some(Node::Document) | Some(Node::Fragment) | None => true,
            Some(_) => false,
        };
        if parent_blacklisted || contains_blacklisted_close_tag(text) {
            continue;
        }

        output.push_str(text);
        output.push(' ');
    }

    output
}

fn contains_blacklisted_close_tag(text: &str) -> bool {
    BLACKLISTED_TAGS
        .iter()
        .any(|tag| text.contains(&format!("</{}>", tag)))
}
