//! Page scanning for the harvester
//!
//! This module extracts the raw material the pipelines classify:
//! - Anchor `href` values from a contact page, in document order
//! - Product handles referenced by a listing page, in discovery order

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

/// `products/<handle>"` as it appears in listing page markup
static PRODUCT_HANDLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"products/([A-Za-z0-9-]+)""#).expect("valid regex"));

/// Returns the `href` of every anchor that has one, in document order
///
/// The parsed document is dropped before returning so callers can hold the
/// result across `.await` points.
///
/// # Example
///
/// ```
/// use shop_harvest::crawler::extract_hrefs;
///
/// let html = r#"<a href="mailto:a@b.c">Mail</a><a>No link</a><a href="/x">X</a>"#;
/// assert_eq!(extract_hrefs(html), vec!["mailto:a@b.c", "/x"]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut hrefs = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href.to_string());
            }
        }
    }

    hrefs
}

/// Scans a listing page for product handles
///
/// Matches are consumed in the order they occur in the body. Each distinct
/// handle is kept once; scanning stops as soon as `cap` handles are collected
/// or the body runs out of matches.
///
/// # Example
///
/// ```
/// use shop_harvest::crawler::scan_product_handles;
///
/// let body = r#"<a href="/products/mug"><a href="/products/mug"><a href="/products/cap-2">"#;
/// assert_eq!(scan_product_handles(body, 5), vec!["mug", "cap-2"]);
/// ```
pub fn scan_product_handles(body: &str, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut handles = Vec::new();

    for captures in PRODUCT_HANDLE_PATTERN.captures_iter(body) {
        if handles.len() >= cap {
            break;
        }
        let Some(handle) = captures.get(1) else {
            continue;
        };
        if seen.insert(handle.as_str()) {
            handles.push(handle.as_str().to_string());
        }
    }

    handles
}
