//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building the shared HTTP client with a proper user agent string
//! - GET requests for HTML pages, where an error status means "page absent"
//! - GET requests for JSON documents, where an error status is a failure
//!
//! There is exactly one attempt per request.

use crate::config::{HarvesterConfig, UserAgentConfig};
use crate::HarvestError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Result of a page fetch
#[derive(Debug)]
pub enum FetchResult {
    /// The page responded with a status below 400
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The page responded with a client or server error status
    PageAbsent {
        /// The HTTP status code
        status_code: u16,
    },
}

impl FetchResult {
    /// Returns the body of a successful fetch
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            Self::PageAbsent { .. } => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client is cloned into every harvest task; clones share one
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use shop_harvest::config::{HarvesterConfig, UserAgentConfig};
/// use shop_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HarvesterConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    harvester: &HarvesterConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version
    let user_agent = format!("{}/{}", user_agent.crawler_name, user_agent.crawler_version);

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true);

    if let Some(secs) = harvester.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches an HTML page
///
/// | Condition | Result |
/// |-----------|--------|
/// | Status < 400 | `Ok(Success)` |
/// | Status >= 400 | `Ok(PageAbsent)` |
/// | Connection refused, timeout, TLS error | `Err(Http)` |
/// | Body cannot be read or decoded | `Err(Decode)` |
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchResult, HarvestError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status.as_u16() >= 400 {
        tracing::debug!("{} responded with {}", url, status);
        return Ok(FetchResult::PageAbsent {
            status_code: status.as_u16(),
        });
    }

    let final_url = response.url().to_string();
    let body = response
        .text()
        .await
        .map_err(|source| HarvestError::Decode {
            url: url.to_string(),
            source,
        })?;

    Ok(FetchResult::Success {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}

/// Fetches and decodes a JSON document
///
/// Unlike [`fetch_page`], an error status is a failure here.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, HarvestError> {
    tracing::debug!("GET {} (json)", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if status.as_u16() >= 400 {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|source| HarvestError::Decode {
            url: url.to_string(),
            source,
        })
}
