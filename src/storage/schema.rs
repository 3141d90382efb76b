//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Article Scraper database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Languages pages can be written in
CREATE TABLE IF NOT EXISTS languages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
);

INSERT OR IGNORE INTO languages (id, code, name) VALUES (1, 'hu', 'Magyar');
INSERT OR IGNORE INTO languages (id, code, name) VALUES (2, 'en', 'English');

-- Taxonomy of content element types
CREATE TABLE IF NOT EXISTS content_element_types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

INSERT OR IGNORE INTO content_element_types (name) VALUES
    ('text'), ('heading'), ('image'), ('quote'), ('list'), ('video'), ('code');

-- Containers grouping the content elements of one page
CREATE TABLE IF NOT EXISTS contents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    lead TEXT NOT NULL,
    main_image_url TEXT,
    content_id INTEGER NOT NULL REFERENCES contents(id),
    language_id INTEGER NOT NULL REFERENCES languages(id),
    is_published INTEGER NOT NULL DEFAULT 0,
    layout TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_pages_slug ON pages(slug);

CREATE TABLE IF NOT EXISTS content_elements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content_id INTEGER NOT NULL REFERENCES contents(id),
    content_element_type_id INTEGER NOT NULL REFERENCES content_element_types(id),
    settings TEXT NOT NULL,
    sort_order INTEGER NOT NULL,
    is_visible INTEGER NOT NULL DEFAULT 1,
    UNIQUE(content_id, sort_order)
);

CREATE INDEX IF NOT EXISTS idx_content_elements_content ON content_elements(content_id);

CREATE TABLE IF NOT EXISTS authors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    profile_url TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS page_authors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_id INTEGER NOT NULL REFERENCES pages(id),
    author_id INTEGER NOT NULL REFERENCES authors(id),
    UNIQUE(page_id, author_id)
);

CREATE INDEX IF NOT EXISTS idx_page_authors_page ON page_authors(page_id);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
