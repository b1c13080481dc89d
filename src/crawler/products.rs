//! Product pipeline
//!
//! The listing page of a storefront yields a capped, deduplicated list of
//! product handles; each handle's JSON detail is then fetched in its own task.
//! A failed detail fetch only empties its own slot.

use crate::crawler::fetcher::{fetch_json, fetch_page, FetchResult};
use crate::crawler::parser::scan_product_handles;
use crate::record::{ProductSlot, ProductSummary};
use crate::HarvestError;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

/// Body of a product detail endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ProductEnvelope {
    pub product: ProductDetail,
}

/// The parts of a product detail the report uses
///
/// A null or missing `title` reads as blank; `images` must be present.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDetail {
    #[serde(default)]
    pub title: Option<String>,
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub src: Option<String>,
}

impl From<ProductDetail> for ProductSummary {
    fn from(detail: ProductDetail) -> Self {
        let image = detail.images.into_iter().next().and_then(|image| image.src);
        ProductSummary {
            title: detail.title.unwrap_or_default(),
            image,
        }
    }
}

/// Fetches the listing page and collects at most `cap` product handles
///
/// # Returns
///
/// * `Ok(handles)` - Handles in discovery order; empty when the listing
///   page answers with a status >= 400
/// * `Err(HarvestError)` - A transport failure on the listing page
pub async fn get_product_handles(
    client: &Client,
    listing_url: &str,
    cap: usize,
) -> Result<Vec<String>, HarvestError> {
    match fetch_page(client, listing_url).await? {
        FetchResult::Success { body, .. } => {
            let handles = scan_product_handles(&body, cap);
            tracing::debug!("{} product handles on {}", handles.len(), listing_url);
            Ok(handles)
        }
        FetchResult::PageAbsent { status_code } => {
            tracing::debug!(
                "Listing page {} unavailable ({}), no products",
                listing_url,
                status_code
            );
            Ok(Vec::new())
        }
    }
}

/// Fetches one product detail
pub async fn fetch_product(client: &Client, detail_url: &str) -> Result<ProductSummary, HarvestError> {
    let envelope: ProductEnvelope = fetch_json(client, detail_url).await?;
    Ok(envelope.product.into())
}

/// Fetches every product detail concurrently
///
/// Every URL gets its own task; `limit` caps how many are in flight at once
/// (`None` = all of them). The returned slots line up with `detail_urls`
/// regardless of completion order. A slot is `None` when its fetch failed,
/// its body did not decode, or its task panicked.
pub async fn get_products(
    client: &Client,
    detail_urls: Vec<String>,
    limit: Option<usize>,
) -> Vec<ProductSlot> {
    let semaphore = limit.map(|permits| Arc::new(Semaphore::new(permits)));

    let tasks: Vec<_> = detail_urls
        .into_iter()
        .map(|url| {
            let client = client.clone();
            let semaphore = semaphore.clone();
            let handle = tokio::spawn({
                let url = url.clone();
                async move {
                    let _permit = match semaphore {
                        Some(semaphore) => Some(semaphore.acquire_owned().await),
                        None => None,
                    };
                    fetch_product(&client, &url).await
                }
            });
            (url, handle)
        })
        .collect();

    let mut slots = Vec::with_capacity(tasks.len());
    for (url, handle) in tasks {
        slots.push(product_slot(&url, handle.await));
    }

    slots
}

/// Turns a finished detail task into its slot
fn product_slot(
    url: &str,
    joined: Result<Result<ProductSummary, HarvestError>, JoinError>,
) -> ProductSlot {
    match joined {
        Ok(Ok(summary)) => Some(summary),
        Ok(Err(e)) => {
            tracing::warn!("Skipping product {}: {}", url, e);
            None
        }
        Err(e) => {
            tracing::warn!("Product task for {} failed: {}", url, e);
            None
        }
    }
}
