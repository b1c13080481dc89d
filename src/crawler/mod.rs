//! Crawler module for storefront harvesting
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with status-based "page absent" handling
//! - HTML anchor extraction and product handle scanning
//! - The contact and product pipelines
//! - Per-storefront harvesting and batch coordination

mod contacts;
mod coordinator;
mod fetcher;
mod harvester;
mod parser;
mod products;

pub use contacts::{
    classify_link, extract_contacts, get_contacts, search_contact_page, ContactLink,
};
pub use coordinator::{run_batch, BatchRunner};
pub use fetcher::{build_http_client, fetch_json, fetch_page, FetchResult};
pub use harvester::Harvester;
pub use parser::{extract_hrefs, scan_product_handles};
pub use products::{
    fetch_product, get_product_handles, get_products, ProductDetail, ProductEnvelope,
    ProductImage,
};
