//! Article page assembly
//!
//! Orchestrates one conversion: resolves the language, enforces the field
//! limits, then writes the page, its authors and its content elements in a
//! single transaction and returns the reloaded aggregate.

use crate::article::Article;
use crate::config::DefaultsConfig;
use crate::convert::fields::{clear_oversized_url, truncate_field};
use crate::convert::mapper::{map_element, BlockKind, MapOutcome};
use crate::convert::slug::generate_unique_slug;
use crate::storage::{
    NewPage, PageAggregate, PageStore, StorageError, StorageResult, ARTICLE_LAYOUT,
};
use std::collections::HashMap;

/// Settings that do not change between conversions
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Language code looked up when no language id is given
    pub language_code: String,

    /// Language id used when `language_code` is not in the database
    pub fallback_language_id: i64,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self::from(&DefaultsConfig::default())
    }
}

impl From<&DefaultsConfig> for ConversionOptions {
    fn from(defaults: &DefaultsConfig) -> Self {
        Self {
            language_code: defaults.language_code.clone(),
            fallback_language_id: defaults.fallback_language_id,
        }
    }
}

/// Converts articles into pages stored in a [`PageStore`]
///
/// Holds a content-element type cache (block kind to type id) that lives as
/// long as the assembler. One assembler serves one caller; it is not meant
/// to be shared between concurrent conversions.
pub struct ArticlePageAssembler<'a, S: PageStore> {
    store: &'a mut S,
    options: ConversionOptions,
    element_types: HashMap<BlockKind, i64>,
}

impl<'a, S: PageStore> ArticlePageAssembler<'a, S> {
    /// Creates an assembler writing into `store`
    pub fn new(store: &'a mut S, options: ConversionOptions) -> Self {
        Self {
            store,
            options,
            element_types: HashMap::new(),
        }
    }

    /// Converts `article` into a page and returns it with blocks and authors
    ///
    /// # Steps
    ///
    /// 1. Resolve the language (explicit id, default code, fallback id)
    /// 2. Truncate title and lead, drop an oversized main image URL
    /// 3. In one transaction: pick a free slug, create the page, attach the
    ///    authors, persist the mapped blocks in document order
    /// 4. Reload the page aggregate
    ///
    /// Any storage failure rolls the whole conversion back.
    pub fn assemble(
        &mut self,
        article: &Article,
        language_id: Option<i64>,
        publish: bool,
    ) -> StorageResult<PageAggregate> {
        let language_id = self.resolve_language(language_id)?;

        let title = truncate_field(&article.title);
        let lead = truncate_field(&article.lead);
        let main_image_url = clear_oversized_url(article.main_image_url());
        if main_image_url.is_none() && article.main_image_url().is_some() {
            tracing::warn!("Dropping main image URL longer than the column limit");
        }

        let element_types = &mut self.element_types;

        let page_id = self.store.with_transaction(|store| {
            let slug = generate_unique_slug(&title, |candidate| store.slug_exists(candidate))?;
            let content_id = store.create_content()?;

            let page_id = store.create_page(&NewPage {
                title: title.clone(),
                slug: slug.clone(),
                lead: lead.clone(),
                main_image_url: main_image_url.clone(),
                content_id,
                language_id,
                is_published: publish,
                layout: ARTICLE_LAYOUT.to_string(),
            })?;
            tracing::info!("Created page {} with slug '{}'", page_id, slug);

            attach_authors(store, page_id, &article.authors)?;

            let stored = store_blocks(store, element_types, content_id, article)?;
            tracing::info!(
                "Stored {} of {} content elements for page {}",
                stored,
                article.content.len(),
                page_id
            );

            Ok(page_id)
        })?;

        self.store.load_page(page_id)
    }

    fn resolve_language(&self, language_id: Option<i64>) -> StorageResult<i64> {
        if let Some(id) = language_id {
            return Ok(id);
        }

        match self.store.find_language_by_code(&self.options.language_code)? {
            Some(id) => Ok(id),
            None => {
                tracing::debug!(
                    "Language '{}' not found, using fallback id {}",
                    self.options.language_code,
                    self.options.fallback_language_id
                );
                Ok(self.options.fallback_language_id)
            }
        }
    }
}

/// Resolves every author by name, then replaces the page's author set
///
/// Empty names are skipped and repeated names attach once. The second phase
/// is a full replace of the page's authors.
fn attach_authors<S: PageStore>(
    store: &mut S,
    page_id: i64,
    names: &[String],
) -> StorageResult<()> {
    let mut author_ids: Vec<i64> = Vec::with_capacity(names.len());

    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let id = store.get_or_create_author(name)?;
        if !author_ids.contains(&id) {
            author_ids.push(id);
        }
    }

    store.replace_page_authors(page_id, &author_ids)
}

/// Maps and persists the article body, returning the number of stored blocks
fn store_blocks<S: PageStore>(
    store: &mut S,
    element_types: &mut HashMap<BlockKind, i64>,
    content_id: i64,
    article: &Article,
) -> StorageResult<u32> {
    let mut order: u32 = 0;

    for element in &article.content {
        let outcome = map_element(element);
        if let MapOutcome::Unsupported { element_type } = &outcome {
            tracing::debug!("Skipping unsupported element type '{}'", element_type);
            continue;
        }
        let Some(block) = outcome.into_block(order) else {
            continue;
        };

        let type_id = element_type_id(store, element_types, block.kind)?;
        store.insert_content_element(content_id, type_id, &block)?;
        order += 1;
    }

    Ok(order)
}

fn element_type_id<S: PageStore>(
    store: &S,
    cache: &mut HashMap<BlockKind, i64>,
    kind: BlockKind,
) -> StorageResult<i64> {
    if let Some(id) = cache.get(&kind) {
        return Ok(*id);
    }

    tracing::debug!("Looking up content element type '{}'", kind);
    let id = store
        .find_element_type(kind.as_str())?
        .ok_or_else(|| StorageError::MissingElementType(kind.as_str().to_string()))?;
    cache.insert(kind, id);
    Ok(id)
}
