use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeSet;

use crate::core::constants::extraction;

pub trait ExtractEmails {
    /// Unique addresses found in an HTML document. Never fails.
    fn extract_emails(&self, html: &str) -> BTreeSet<String>;
}

/// Collects addresses from `mailto:` anchors, optionally also from page text.
#[derive(Debug, Clone)]
pub struct Extractor {
    anchors: Selector,
    text_pattern: Option<Regex>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Extractor {
    /// Create an extractor. With `scan_text` the visible text of the page is
    /// also searched with a plain email pattern.
    pub fn new(scan_text: bool) -> Self {
        Self {
            anchors: anchor_selector(),
            text_pattern: scan_text.then(email_pattern),
        }
    }

    fn mailto_addresses(&self, document: &Html, emails: &mut BTreeSet<String>) {
        for element in document.select(&self.anchors) {
            if let Some(address) = element.value().attr("href").and_then(strip_mailto) {
                emails.insert(address.to_string());
            }
        }
    }

    fn text_addresses(&self, pattern: &Regex, document: &Html, emails: &mut BTreeSet<String>) {
        let text = document.root_element().text().collect::<Vec<_>>().join(" ");
        emails.extend(pattern.find_iter(&text).map(|m| m.as_str().to_string()));
    }
}

impl ExtractEmails for Extractor {
    fn extract_emails(&self, html: &str) -> BTreeSet<String> {
        let document = Html::parse_document(html);
        let mut emails = BTreeSet::new();

        self.mailto_addresses(&document, &mut emails);
        if let Some(ref pattern) = self.text_pattern {
            self.text_addresses(pattern, &document, &mut emails);
        }

        emails
    }
}

/// Address part of a `mailto:` href, `None` for other links or an empty target.
///
/// The scheme is matched case-insensitively; anything after the prefix is kept
/// as written, query included.
pub fn strip_mailto(href: &str) -> Option<&str> {
    let href = href.trim();
    let prefix_len = extraction::MAILTO_PREFIX.len();
    let prefix = href.get(..prefix_len)?;
    if !prefix.eq_ignore_ascii_case(extraction::MAILTO_PREFIX) {
        return None;
    }

    let address = href[prefix_len..].trim();
    (!address.is_empty()).then_some(address)
}

// Both patterns are compile-time constants known to be valid
fn anchor_selector() -> Selector {
    Selector::parse(extraction::ANCHOR_SELECTOR).expect("anchor selector is valid")
}

fn email_pattern() -> Regex {
    Regex::new(extraction::EMAIL_PATTERN).expect("email pattern is valid")
}
