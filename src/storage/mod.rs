//! Storage module for persisting converted articles
//!
//! This module handles all database operations of the conversion pipeline:
//! - SQLite database initialization and schema management
//! - Page and content-container creation
//! - Author get-or-create and page/author association
//! - Ordered content element persistence
//! - Loading a finished page together with its blocks and authors

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{PageStore, StorageError, StorageResult};

use crate::ScraperError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Layout tag stored on every page created from an article
pub const ARTICLE_LAYOUT: &str = "article";

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(ScraperError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, ScraperError> {
    SqliteStorage::new(path)
}

/// Column values for a page that has not been written yet
#[derive(Debug, Clone)]
pub struct NewPage {
    pub title: String,
    pub slug: String,
    pub lead: String,
    pub main_image_url: Option<String>,
    pub content_id: i64,
    pub language_id: i64,
    pub is_published: bool,
    pub layout: String,
}

/// Represents a page in the database
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub lead: String,
    pub main_image_url: Option<String>,
    pub content_id: i64,
    pub language_id: i64,
    pub is_published: bool,
    pub layout: String,
    pub created_at: String,
}

/// Represents an author in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    pub id: i64,
    pub name: String,
    pub profile_url: Option<String>,
}

/// Represents a persisted content element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentElementRecord {
    pub id: i64,
    pub content_id: i64,
    /// Name of the content-element type (`text`, `heading`, ...)
    #[serde(rename = "type")]
    pub element_type: String,
    pub settings: Map<String, Value>,
    pub order: u32,
    pub visible: bool,
}

/// A page together with its ordered content elements and authors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageAggregate {
    #[serde(flatten)]
    pub page: PageRecord,
    pub content_elements: Vec<ContentElementRecord>,
    pub authors: Vec<AuthorRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_serializes_flat() {
        let aggregate = PageAggregate {
            page: PageRecord {
                id: 1,
                title: "Title".to_string(),
                slug: "title".to_string(),
                lead: String::new(),
                main_image_url: None,
                content_id: 1,
                language_id: 1,
                is_published: false,
                layout: ARTICLE_LAYOUT.to_string(),
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
            },
            content_elements: vec![],
            authors: vec![],
        };

        let value = serde_json::to_value(&aggregate).unwrap();
        assert_eq!(value["slug"], "title");
        assert_eq!(value["layout"], "article");
        assert!(value["content_elements"].as_array().unwrap().is_empty());
        assert!(value.get("page").is_none());
    }
}
