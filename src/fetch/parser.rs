//! HTML parser for extracting page titles and articles
//!
//! This module handles parsing HTML content to extract:
//! - The page title (from the `<title>` tag)
//! - Article metadata (headline, lead, main image, authors)
//! - Article body elements in document order

use crate::article::{Article, ArticleImage, ContentElement};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use url::Url;

/// Body tags turned into content elements
const BODY_SELECTOR: &str = "p, h2, h3, h4, h5, h6, img, blockquote, ul, ol, video, iframe";

/// Elements whose descendants are already captured by the element itself
const CAPTURING_TAGS: &[&str] = &["blockquote", "ul", "ol"];

/// Page furniture that never belongs to the article body
const NOISE_TAGS: &[&str] = &["nav", "aside", "header", "footer", "form", "noscript"];

/// Extracts the page title from raw HTML
///
/// Entities are decoded and surrounding whitespace trimmed. Returns `None`
/// when there is no `<title>` or it is empty.
///
/// # Example
///
/// ```
/// use article_scraper::fetch::extract_title;
///
/// let html = "<html><head><title> Tom &amp; Jerry </title></head></html>";
/// assert_eq!(extract_title(html), Some("Tom & Jerry".to_string()));
/// ```
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document_title(&document)
}

fn document_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parses HTML content into an article
///
/// # Extraction Rules
///
/// - **Title:** `og:title`, else the first `<h1>`, else `<title>`
/// - **Lead:** `og:description`, else `meta[name=description]`
/// - **Main image:** `og:image`, resolved against `base_url`
/// - **Authors:** `meta[name=author]` (comma separated) and `a[rel=author]`
/// - **Body:** the first `<article>`, else `<main>`, else `<body>`; every
///   paragraph, sub-heading, image, quote, list, video and iframe in
///   document order. Content nested in a quote or list belongs to that
///   element and is not emitted again.
///
/// # Returns
///
/// * `Some(Article)` - At least one body element was found
/// * `None` - The page holds no extractable article
pub fn parse_article(html: &str, base_url: &Url) -> Option<Article> {
    let document = Html::parse_document(html);

    let root = find_root(&document)?;
    let content = extract_elements(root, base_url);
    if content.is_empty() {
        return None;
    }

    let title = meta_content(&document, "meta[property='og:title']")
        .or_else(|| first_text(&document, "h1"))
        .or_else(|| document_title(&document))
        .unwrap_or_default();

    let lead = meta_content(&document, "meta[property='og:description']")
        .or_else(|| meta_content(&document, "meta[name='description']"))
        .unwrap_or_default();

    let main_image = meta_content(&document, "meta[property='og:image']")
        .and_then(|src| resolve(&src, base_url))
        .map(|src| ArticleImage { src, alt: None });

    Some(Article {
        title,
        lead,
        main_image,
        content,
        authors: extract_authors(&document),
    })
}

/// Picks the element holding the article body
fn find_root(document: &Html) -> Option<ElementRef<'_>> {
    ["article", "main", "body"].iter().find_map(|tag| {
        let selector = Selector::parse(tag).ok()?;
        document.select(&selector).next()
    })
}

fn extract_elements(root: ElementRef<'_>, base_url: &Url) -> Vec<ContentElement> {
    let Ok(selector) = Selector::parse(BODY_SELECTOR) else {
        return Vec::new();
    };

    root.select(&selector)
        .filter(|element| !inside_any(*element, root, CAPTURING_TAGS))
        .filter(|element| !inside_any(*element, root, NOISE_TAGS))
        .filter_map(|element| to_content_element(element, base_url))
        .collect()
}

fn to_content_element(element: ElementRef<'_>, base_url: &Url) -> Option<ContentElement> {
    match element.value().name() {
        "p" => non_empty(collapsed_text(element)).map(|text| ContentElement::Paragraph {
            content: Some(text.into()),
        }),
        "h2" | "h3" | "h4" | "h5" | "h6" => {
            non_empty(collapsed_text(element)).map(|text| ContentElement::Heading {
                content: Some(text.into()),
            })
        }
        "img" => {
            let src = element
                .value()
                .attr("src")
                .or_else(|| element.value().attr("data-src"))
                .and_then(|src| resolve(src, base_url))?;
            Some(ContentElement::Image {
                src: Some(src.into()),
                alt: element.value().attr("alt").map(Value::from),
            })
        }
        "blockquote" => {
            let text = non_empty(quote_text(element))?;
            Some(ContentElement::Quote {
                content: Some(text.into()),
                author: quote_author(element).map(Value::from),
            })
        }
        "ul" | "ol" => {
            let items: Vec<String> = element
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name() == "li")
                .filter_map(|li| non_empty(collapsed_text(li)))
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(ContentElement::List {
                    items: Some(items.into()),
                })
            }
        }
        "video" => {
            let src = element.value().attr("src").map(str::to_string).or_else(|| {
                let source = Selector::parse("source[src]").ok()?;
                element
                    .select(&source)
                    .next()
                    .and_then(|s| s.value().attr("src"))
                    .map(str::to_string)
            })?;
            Some(ContentElement::Video {
                src: Some(resolve(&src, base_url)?.into()),
            })
        }
        "iframe" => {
            let src = element
                .value()
                .attr("src")
                .and_then(|src| resolve(src, base_url))?;
            Some(ContentElement::Iframe {
                src: Some(src.into()),
            })
        }
        _ => None,
    }
}

/// True if `element` has an ancestor (below `root`) with one of `tags`
fn inside_any(element: ElementRef<'_>, root: ElementRef<'_>, tags: &[&str]) -> bool {
    element
        .ancestors()
        .take_while(|node| node.id() != root.id())
        .filter_map(ElementRef::wrap)
        .any(|ancestor| tags.contains(&ancestor.value().name()))
}

/// Element text with whitespace runs collapsed
///
/// Text nodes are joined before collapsing so inline markup such as
/// `e<em>mail</em>` stays one word.
fn collapsed_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Quote text without its attribution
fn quote_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let attributed = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != element.id())
            .filter_map(ElementRef::wrap)
            .any(|ancestor| matches!(ancestor.value().name(), "cite" | "footer"));
        if !attributed {
            raw.push_str(text);
        }
    }
    collapse_whitespace(&raw)
}

fn quote_author(element: ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse("cite, footer").ok()?;
    let raw = collapsed_text(element.select(&selector).next()?);
    non_empty(
        raw.trim_start_matches(|c: char| c == '—' || c == '–' || c == '-' || c.is_whitespace())
            .to_string(),
    )
}

fn extract_authors(document: &Html) -> Vec<String> {
    let mut authors: Vec<String> = Vec::new();

    if let Some(names) = meta_content(document, "meta[name='author']") {
        authors.extend(names.split(',').filter_map(|n| non_empty(n.trim().to_string())));
    }

    if let Ok(selector) = Selector::parse("a[rel='author']") {
        authors.extend(
            document
                .select(&selector)
                .filter_map(|link| non_empty(collapsed_text(link))),
        );
    }

    let mut unique = Vec::with_capacity(authors.len());
    for author in authors {
        if !unique.contains(&author) {
            unique.push(author);
        }
    }
    unique
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .map(collapsed_text)
        .find(|text| !text.is_empty())
}

/// Resolves a possibly relative reference to an absolute http(s) URL
fn resolve(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with("data:") || href.starts_with("javascript:") {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
