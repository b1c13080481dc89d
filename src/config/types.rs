use serde::Deserialize;

/// Default contact page paths, probed in this order after the storefront root
pub const DEFAULT_CONTACT_PATHS: &[&str] = &[
    "/",
    "pages/about",
    "pages/about-us",
    "pages/contact",
    "pages/contact-us",
];

/// Main configuration structure for Shop-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub harvester: HarvesterConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub io: IoConfig,
}

/// Harvesting behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HarvesterConfig {
    /// Relative paths probed (after the root) when looking for a contact page
    #[serde(rename = "contact-paths", default = "default_contact_paths")]
    pub contact_paths: Vec<String>,

    /// Relative path of the listing page scanned for product handles
    #[serde(rename = "listing-path", default = "default_listing_path")]
    pub listing_path: String,

    /// Product detail endpoint, with `{shop}` and `{handle}` placeholders
    #[serde(
        rename = "product-url-template",
        default = "default_product_url_template"
    )]
    pub product_url_template: String,

    /// Maximum number of product handles harvested per storefront
    #[serde(rename = "max-products", default = "default_max_products")]
    pub max_products: usize,

    /// Maximum number of storefronts harvested at once (unset = unbounded)
    #[serde(rename = "max-concurrent-storefronts", default)]
    pub max_concurrent_storefronts: Option<usize>,

    /// Maximum number of product detail fetches in flight per storefront (unset = unbounded)
    #[serde(rename = "max-concurrent-products", default)]
    pub max_concurrent_products: Option<usize>,

    /// Whole-request timeout in seconds (unset = transport default)
    #[serde(rename = "request-timeout-secs", default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            contact_paths: default_contact_paths(),
            listing_path: default_listing_path(),
            product_url_template: default_product_url_template(),
            max_products: default_max_products(),
            max_concurrent_storefronts: None,
            max_concurrent_products: None,
            request_timeout_secs: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the harvester
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the harvester
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

/// Input/output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct IoConfig {
    /// Path to the CSV file listing storefronts (needs a `url` column)
    #[serde(rename = "input-path", default = "default_input_path")]
    pub input_path: String,

    /// Path to the CSV report written at the end of the batch
    #[serde(rename = "output-path", default = "default_output_path")]
    pub output_path: String,

    /// How the report header is chosen
    #[serde(rename = "column-policy", default)]
    pub column_policy: ColumnPolicy,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            column_policy: ColumnPolicy::default(),
        }
    }
}

/// Report header selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPolicy {
    /// Columns of the successful result carrying the most fields
    #[default]
    Widest,
    /// Every field key seen on any successful result
    Union,
}

fn default_contact_paths() -> Vec<String> {
    DEFAULT_CONTACT_PATHS.iter().map(|p| p.to_string()).collect()
}

fn default_listing_path() -> String {
    "collections/all".to_string()
}

fn default_product_url_template() -> String {
    "{shop}/products/{handle}.json".to_string()
}

fn default_max_products() -> usize {
    5
}

fn default_crawler_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_input_path() -> String {
    "stores.csv".to_string()
}

fn default_output_path() -> String {
    "parsed_stores_data.csv".to_string()
}
