//! Article Scraper: turns web articles into CMS pages
//!
//! This crate fetches a web page, extracts its title or its full article
//! structure, and writes the article into a small content-management schema
//! made of pages, ordered content elements and authors.

pub mod article;
pub mod config;
pub mod convert;
pub mod fetch;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for Article Scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch {url}: {source}")]
    FetchFailed { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("No article found at {url}")]
    NoArticleFound { url: String },

    #[error("Persistence error: {0}")]
    PersistenceFailed(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScraperError {
    /// Maps the error onto the status code reported to callers
    ///
    /// A missing article is the caller's problem (400), a malformed URL is a
    /// validation failure (422), everything else is a server-side failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidUrl(_) => 422,
            Self::NoArticleFound { .. } => 400,
            _ => 500,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Article Scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use article::{Article, ArticleImage, ContentElement};
pub use config::Config;
pub use convert::{ArticlePageAssembler, BlockKind, MapOutcome, NormalizedBlock};
pub use storage::{PageAggregate, PageStore, SqliteStorage};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(ScraperError::InvalidUrl("nope".to_string()).status_code(), 422);
        assert_eq!(
            ScraperError::NoArticleFound {
                url: "https://example.com/".to_string()
            }
            .status_code(),
            400
        );
        assert_eq!(
            ScraperError::HttpStatus {
                url: "https://example.com/".to_string(),
                status: 404
            }
            .status_code(),
            500
        );
        assert_eq!(
            ScraperError::PersistenceFailed(storage::StorageError::PageNotFound(7)).status_code(),
            500
        );
    }
}
