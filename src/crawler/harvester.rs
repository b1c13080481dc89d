//! Storefront harvester
//!
//! Runs both pipelines for one storefront and merges their outputs.
//!
//! Failure handling is deliberately two-tiered:
//! - A transport failure on the listing page or on a contact page candidate
//!   aborts the storefront; no partial record is produced.
//! - A failed product detail only empties its own product slot.

use crate::config::{Config, HarvesterConfig};
use crate::crawler::build_http_client;
use crate::crawler::contacts::get_contacts;
use crate::crawler::products::{get_product_handles, get_products};
use crate::record::{StorefrontResult, StorefrontResultBuilder};
use crate::url::{contact_candidates, listing_url, product_detail_url, storefront_base};
use crate::HarvestError;
use reqwest::Client;
use std::sync::Arc;

/// Harvests one storefront at a time; cheap to clone into tasks
#[derive(Debug, Clone)]
pub struct Harvester {
    client: Client,
    settings: Arc<HarvesterConfig>,
}

impl Harvester {
    /// Creates a harvester with its own HTTP client
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent, &config.harvester)?;
        Ok(Self::with_client(client, config.harvester.clone()))
    }

    /// Creates a harvester around an existing client
    pub fn with_client(client: Client, settings: HarvesterConfig) -> Self {
        Self {
            client,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &HarvesterConfig {
        &self.settings
    }

    /// Harvests a single storefront
    ///
    /// # Flow
    ///
    /// 1. Resolve the storefront base URL (`https://` added when missing)
    /// 2. Scan the listing page for product handles
    /// 3. Concurrently: probe contact pages, and fetch every product detail
    /// 4. Merge contacts, product slots, and the original address
    ///
    /// # Returns
    ///
    /// * `Ok(StorefrontResult)` - Merged record
    /// * `Err(HarvestError)` - The storefront could not be harvested
    pub async fn harvest(&self, storefront: &str) -> Result<StorefrontResult, HarvestError> {
        let base = storefront_base(storefront)?;
        let settings = &self.settings;

        let handles = get_product_handles(
            &self.client,
            &listing_url(&base, &settings.listing_path),
            settings.max_products,
        )
        .await?;

        let detail_urls = handles
            .iter()
            .map(|handle| product_detail_url(&settings.product_url_template, &base, handle))
            .collect();
        let candidates = contact_candidates(&base, &settings.contact_paths);

        let (contacts, products) = tokio::join!(
            get_contacts(&self.client, &candidates),
            get_products(&self.client, detail_urls, settings.max_concurrent_products),
        );
        let contacts = contacts?;

        tracing::debug!(
            "Harvested {}: {} of {} products, contacts found: {}",
            storefront,
            products.iter().filter(|slot| slot.is_some()).count(),
            handles.len(),
            !contacts.is_empty()
        );

        Ok(StorefrontResultBuilder::new(storefront)
            .contacts(contacts)
            .product_slots(products)
            .build())
    }
}
