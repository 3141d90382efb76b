//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests to fetch page content
//! - Error classification
//!
//! One request per invocation, no retries.

use crate::config::HttpConfig;
use crate::ScraperError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// Page body content
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use article_scraper::config::HttpConfig;
/// use article_scraper::fetch::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body
///
/// # Error Mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | Connection refused, DNS, TLS, timeout | `FetchFailed` |
/// | Too many redirects | `FetchFailed` |
/// | Non-2xx response | `HttpStatus` |
/// | Body not readable as text | `FetchFailed` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, ScraperError> {
    tracing::debug!("Fetching {}", url);

    let response = client.get(url.clone()).send().await.map_err(|e| {
        if e.is_timeout() {
            tracing::warn!("Request to {} timed out", url);
        } else if e.is_connect() {
            tracing::warn!("Could not connect to {}", url);
        }
        ScraperError::FetchFailed {
            url: url.to_string(),
            source: e,
        }
    })?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return Err(ScraperError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ScraperError::FetchFailed {
            url: url.to_string(),
            source: e,
        })?;

    tracing::debug!("Fetched {} bytes from {}", body.len(), final_url);

    Ok(FetchedPage {
        final_url,
        body,
    })
}
