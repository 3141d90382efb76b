//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the PageStore trait.

use crate::convert::NormalizedBlock;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{PageStore, StorageError, StorageResult};
use crate::storage::{AuthorRecord, ContentElementRecord, NewPage, PageAggregate, PageRecord};
use crate::ScraperError;
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use serde_json::{Map, Value};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(ScraperError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, ScraperError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 5000;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, ScraperError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

/// Separates constraint violations (duplicate slug, dangling foreign key)
/// from other SQLite failures
fn classify(err: rusqlite::Error) -> StorageError {
    match &err {
        rusqlite::Error::SqliteFailure(e, message) if e.code == ErrorCode::ConstraintViolation => {
            StorageError::ConstraintViolation(message.clone().unwrap_or_else(|| e.to_string()))
        }
        _ => StorageError::Sqlite(err),
    }
}

impl PageStore for SqliteStorage {
    // ===== Transactions =====

    fn with_transaction<T, F>(&mut self, f: F) -> StorageResult<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> StorageResult<T>,
    {
        // IMMEDIATE takes the write lock up front, so a slug checked inside
        // the transaction cannot be claimed by another connection before
        // the insert.
        self.conn.execute_batch("BEGIN IMMEDIATE")?;

        let result = f(self).and_then(|value| {
            self.conn.execute_batch("COMMIT")?;
            Ok(value)
        });

        // A failed COMMIT (deferred constraint, busy) can leave the
        // transaction open.
        if let Err(e) = &result {
            if !self.conn.is_autocommit() {
                if let Err(rollback_err) = self.conn.execute_batch("ROLLBACK") {
                    tracing::warn!("Rollback failed after {}: {}", e, rollback_err);
                }
            }
        }

        result
    }

    // ===== Lookups =====

    fn find_language_by_code(&self, code: &str) -> StorageResult<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM languages WHERE code = ?1",
                params![code],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn find_element_type(&self, name: &str) -> StorageResult<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM content_element_types WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn slug_exists(&self, slug: &str) -> StorageResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM pages WHERE slug = ?1)",
            params![slug],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    // ===== Page Management =====

    fn create_content(&mut self) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO contents (created_at) VALUES (?1)",
            params![now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_page(&mut self, page: &NewPage) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO pages (title, slug, lead, main_image_url, content_id, language_id,
                 is_published, layout, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    page.title,
                    page.slug,
                    page.lead,
                    page.main_image_url,
                    page.content_id,
                    page.language_id,
                    page.is_published,
                    page.layout,
                    now
                ],
            )
            .map_err(classify)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn load_page(&self, page_id: i64) -> StorageResult<PageAggregate> {
        let page = self
            .conn
            .query_row(
                "SELECT id, title, slug, lead, main_image_url, content_id, language_id,
                 is_published, layout, created_at
                 FROM pages WHERE id = ?1",
                params![page_id],
                |row| {
                    Ok(PageRecord {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        slug: row.get(2)?,
                        lead: row.get(3)?,
                        main_image_url: row.get(4)?,
                        content_id: row.get(5)?,
                        language_id: row.get(6)?,
                        is_published: row.get(7)?,
                        layout: row.get(8)?,
                        created_at: row.get(9)?,
                    })
                },
            )
            .optional()?
            .ok_or(StorageError::PageNotFound(page_id))?;

        let mut stmt = self.conn.prepare(
            "SELECT ce.id, ce.content_id, t.name, ce.settings, ce.sort_order, ce.is_visible
             FROM content_elements ce
             JOIN content_element_types t ON t.id = ce.content_element_type_id
             WHERE ce.content_id = ?1
             ORDER BY ce.sort_order ASC",
        )?;

        let rows = stmt
            .query_map(params![page.content_id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, u32>(4)?,
                    row.get::<_, bool>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut content_elements = Vec::with_capacity(rows.len());
        for (id, content_id, element_type, settings_json, order, visible) in rows {
            let settings: Map<String, Value> = serde_json::from_str(&settings_json)
                .map_err(|e| StorageError::Serialization(format!("element {}: {}", id, e)))?;
            content_elements.push(ContentElementRecord {
                id,
                content_id,
                element_type,
                settings,
                order,
                visible,
            });
        }

        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.name, a.profile_url
             FROM page_authors pa
             JOIN authors a ON a.id = pa.author_id
             WHERE pa.page_id = ?1
             ORDER BY pa.id ASC",
        )?;

        let authors = stmt
            .query_map(params![page_id], |row| {
                Ok(AuthorRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    profile_url: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageAggregate {
            page,
            content_elements,
            authors,
        })
    }

    fn count_pages(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    // ===== Authors =====

    fn get_or_create_author(&mut self, name: &str) -> StorageResult<i64> {
        // First write wins: an existing row is reused untouched
        if let Some(author) = self.get_author_by_name(name)? {
            return Ok(author.id);
        }

        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO authors (name, profile_url, created_at) VALUES (?1, NULL, ?2)",
                params![name, now],
            )
            .map_err(classify)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn replace_page_authors(&mut self, page_id: i64, author_ids: &[i64]) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM page_authors WHERE page_id = ?1", params![page_id])?;

        for author_id in author_ids {
            self.conn
                .execute(
                    "INSERT OR IGNORE INTO page_authors (page_id, author_id) VALUES (?1, ?2)",
                    params![page_id, author_id],
                )
                .map_err(classify)?;
        }

        Ok(())
    }

    fn get_author_by_name(&self, name: &str) -> StorageResult<Option<AuthorRecord>> {
        let author = self
            .conn
            .query_row(
                "SELECT id, name, profile_url FROM authors WHERE name = ?1",
                params![name],
                |row| {
                    Ok(AuthorRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        profile_url: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(author)
    }

    fn count_authors(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM authors", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    // ===== Content Elements =====

    fn insert_content_element(
        &mut self,
        content_id: i64,
        element_type_id: i64,
        block: &NormalizedBlock,
    ) -> StorageResult<i64> {
        let settings = serde_json::to_string(&block.settings)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO content_elements
                 (content_id, content_element_type_id, settings, sort_order, is_visible)
                 VALUES (?1, ?2, ?3, ?4, 1)",
                params![content_id, element_type_id, settings, block.order],
            )
            .map_err(classify)?;
        Ok(self.conn.last_insert_rowid())
    }
}
