//! Fetching and parsing of source pages
//!
//! This module contains everything that talks to the outside world:
//! - HTTP client construction and single-shot page fetching
//! - Title scraping from the fetched HTML
//! - Article extraction (title, lead, image, authors, body elements)

mod fetcher;
mod parser;

pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use parser::{extract_title, parse_article};

use crate::article::Article;
use crate::ScraperError;
use reqwest::Client;
use serde::Serialize;
use url::Url;

/// Result of a title-only scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeResult {
    /// Contents of the `<title>` tag, if the page has one
    pub title: Option<String>,

    /// The URL that was requested
    pub url: String,
}

/// Parses and checks a user-supplied URL
///
/// Only absolute `http` and `https` URLs are accepted.
pub fn validate_url(raw: &str) -> Result<Url, ScraperError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ScraperError::InvalidUrl(format!("'{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ScraperError::InvalidUrl(format!(
            "'{}': unsupported scheme '{}'",
            raw, scheme
        ))),
    }
}

/// Fetches `url` and extracts its page title
///
/// # Returns
///
/// * `Ok(ScrapeResult)` - The page was fetched; the title may still be absent
/// * `Err(ScraperError)` - The URL was invalid or the fetch failed
pub async fn scrape(client: &Client, url: &str) -> Result<ScrapeResult, ScraperError> {
    let parsed = validate_url(url)?;
    let page = fetch_page(client, &parsed).await?;

    let title = extract_title(&page.body);
    tracing::info!("Scraped {} (title: {:?})", url, title);

    Ok(ScrapeResult {
        title,
        url: url.to_string(),
    })
}

/// Fetches `url` and extracts the article it contains
///
/// # Returns
///
/// * `Ok(Article)` - An article with at least one body element
/// * `Err(ScraperError::NoArticleFound)` - The page holds no extractable article
/// * `Err(ScraperError)` - The URL was invalid or the fetch failed
pub async fn fetch_article(client: &Client, url: &str) -> Result<Article, ScraperError> {
    let parsed = validate_url(url)?;
    let page = fetch_page(client, &parsed).await?;

    let article =
        parse_article(&page.body, &page.final_url).ok_or_else(|| ScraperError::NoArticleFound {
            url: url.to_string(),
        })?;

    tracing::info!(
        "Extracted article '{}' with {} elements from {}",
        article.title,
        article.content.len(),
        url
    );

    Ok(article)
}
