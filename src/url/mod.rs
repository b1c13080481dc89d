//! URL handling module for Shop-Harvest
//!
//! This module turns a storefront address from the input table into the
//! concrete URLs the harvester fetches: the contact page candidates, the
//! listing page, and the per-product detail endpoints.

mod candidates;
mod normalize;

// Re-export main functions
pub use candidates::{contact_candidates, join_path, listing_url, product_detail_url};
pub use normalize::{ensure_scheme, storefront_base, DEFAULT_SCHEME_PREFIX};
