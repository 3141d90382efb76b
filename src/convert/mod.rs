//! Article-to-page conversion
//!
//! This module turns a parsed [`Article`](crate::Article) into a persisted
//! page aggregate:
//! - `mapper` classifies each body element into a typed content block
//! - `slug` derives a unique URL slug from the page title
//! - `fields` enforces the column limits on title, lead and image URL
//! - `assembler` orchestrates the above against a [`PageStore`](crate::PageStore)

mod assembler;
mod fields;
mod mapper;
mod slug;

pub use assembler::{ArticlePageAssembler, ConversionOptions};
pub use fields::{clear_oversized_url, truncate_field, ELLIPSIS, MAX_FIELD_CHARS};
pub use mapper::{map_element, BlockKind, MapOutcome, NormalizedBlock};
pub use slug::{generate_unique_slug, slugify};
