//! Contact pipeline
//!
//! Probes the candidate pages of a storefront for the first one that exists,
//! then classifies its anchors into email, Facebook, and Twitter contacts.

use crate::crawler::fetcher::{fetch_page, FetchResult};
use crate::crawler::parser::extract_hrefs;
use crate::record::ContactRecord;
use crate::HarvestError;
use reqwest::Client;

const MAILTO_PREFIX: &str = "mailto:";

/// A contact channel recognized in a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactLink {
    Email(String),
    Facebook(String),
    Twitter(String),
}

/// Classifies one `href`
///
/// Rules are checked in order and the first hit wins:
/// 1. contains "facebook" (any case) → lowercased href
/// 2. contains "twitter" (any case) → lowercased href
/// 3. starts with `mailto:` → href without the prefix
///
/// # Example
///
/// ```
/// use shop_harvest::crawler::{classify_link, ContactLink};
///
/// assert_eq!(
///     classify_link("https://Facebook.com/Shop"),
///     Some(ContactLink::Facebook("https://facebook.com/shop".to_string()))
/// );
/// assert_eq!(classify_link("/pages/about"), None);
/// ```
pub fn classify_link(href: &str) -> Option<ContactLink> {
    let lower = href.to_lowercase();
    if lower.contains("facebook") {
        Some(ContactLink::Facebook(lower))
    } else if lower.contains("twitter") {
        Some(ContactLink::Twitter(lower))
    } else {
        href.strip_prefix(MAILTO_PREFIX)
            .map(|address| ContactLink::Email(address.to_string()))
    }
}

/// Returns the body of the first candidate page that exists
///
/// Candidates answering with a status >= 400 are skipped. Any other failure
/// aborts the search and is returned to the caller.
///
/// # Returns
///
/// * `Ok(Some(body))` - First page that responded without an error status
/// * `Ok(None)` - Every candidate was absent
/// * `Err(HarvestError)` - A transport failure on one of the candidates
pub async fn search_contact_page(
    client: &Client,
    candidates: &[String],
) -> Result<Option<String>, HarvestError> {
    for candidate in candidates {
        match fetch_page(client, candidate).await? {
            FetchResult::Success { body, .. } => {
                tracing::debug!("Contact page found at {}", candidate);
                return Ok(Some(body));
            }
            FetchResult::PageAbsent { status_code } => {
                tracing::trace!("No contact page at {} ({})", candidate, status_code);
            }
        }
    }

    Ok(None)
}

/// Extracts contact channels from a page body
///
/// Anchors are classified in document order and a later match overwrites an
/// earlier one for the same field. The task yields to the scheduler after
/// every anchor; the anchor list is fully parsed beforehand, so yielding
/// cannot reorder classification.
pub async fn extract_contacts(body: Option<&str>) -> ContactRecord {
    let mut contacts = ContactRecord::default();

    let Some(body) = body else {
        return contacts;
    };

    for href in extract_hrefs(body) {
        match classify_link(&href) {
            Some(ContactLink::Facebook(link)) => contacts.facebook = Some(link),
            Some(ContactLink::Twitter(link)) => contacts.twitter = Some(link),
            Some(ContactLink::Email(address)) => contacts.email = Some(address),
            None => {}
        }
        tokio::task::yield_now().await;
    }

    contacts
}

/// Runs the whole contact pipeline over a list of candidate pages
pub async fn get_contacts(
    client: &Client,
    candidates: &[String],
) -> Result<ContactRecord, HarvestError> {
    let page = search_contact_page(client, candidates).await?;
    Ok(extract_contacts(page.as_deref()).await)
}
