//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::convert::NormalizedBlock;
use crate::storage::{AuthorRecord, NewPage, PageAggregate};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Page not found: {0}")]
    PageNotFound(i64),

    #[error("Unknown content element type: {0}")]
    MissingElementType(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// This trait defines every database operation the conversion pipeline
/// needs. One conversion uses one store; implementations are not expected
/// to be shared between concurrent conversions.
pub trait PageStore {
    // ===== Transactions =====

    /// Runs `f` inside a write transaction
    ///
    /// Commits when `f` returns `Ok`, rolls back and returns the error
    /// otherwise. Nothing written inside `f` is visible to other
    /// connections before the commit.
    fn with_transaction<T, F>(&mut self, f: F) -> StorageResult<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> StorageResult<T>;

    // ===== Lookups =====

    /// Finds a language id by its code (e.g. `hu`)
    fn find_language_by_code(&self, code: &str) -> StorageResult<Option<i64>>;

    /// Finds a content-element type id by its name (e.g. `text`)
    fn find_element_type(&self, name: &str) -> StorageResult<Option<i64>>;

    /// Checks whether any page already uses `slug`
    fn slug_exists(&self, slug: &str) -> StorageResult<bool>;

    // ===== Page Management =====

    /// Creates an empty content container and returns its id
    fn create_content(&mut self) -> StorageResult<i64>;

    /// Inserts a page and returns its id
    ///
    /// A slug that is already taken surfaces as
    /// [`StorageError::ConstraintViolation`].
    fn create_page(&mut self, page: &NewPage) -> StorageResult<i64>;

    /// Loads a page with its content elements (by order) and authors
    fn load_page(&self, page_id: i64) -> StorageResult<PageAggregate>;

    /// Gets total page count
    fn count_pages(&self) -> StorageResult<u64>;

    // ===== Authors =====

    /// Returns the id of the author called `name`, creating it if needed
    ///
    /// The first write wins: an existing author is returned untouched.
    fn get_or_create_author(&mut self, name: &str) -> StorageResult<i64>;

    /// Replaces the full author set of a page with `author_ids`
    ///
    /// This is a replace, not a merge: authors attached earlier and missing
    /// from `author_ids` are detached.
    fn replace_page_authors(&mut self, page_id: i64, author_ids: &[i64]) -> StorageResult<()>;

    /// Gets an author by name
    fn get_author_by_name(&self, name: &str) -> StorageResult<Option<AuthorRecord>>;

    /// Gets total author count
    fn count_authors(&self) -> StorageResult<u64>;

    // ===== Content Elements =====

    /// Persists one normalized block inside a content container
    fn insert_content_element(
        &mut self,
        content_id: i64,
        element_type_id: i64,
        block: &NormalizedBlock,
    ) -> StorageResult<i64>;
}
