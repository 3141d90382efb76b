//! Parsed article model
//!
//! An [`Article`] is what the article parser hands to the conversion
//! pipeline: a title, a lead, an optional main image, the body as an ordered
//! list of [`ContentElement`]s, and the author names. It is immutable once
//! parsed and consumed exactly once.

mod element;

pub use element::ContentElement;

use serde::{Deserialize, Serialize};

/// Structured editorial content of a fetched web page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,

    #[serde(default)]
    pub lead: String,

    #[serde(default)]
    pub main_image: Option<ArticleImage>,

    /// Body elements in document order
    #[serde(default)]
    pub content: Vec<ContentElement>,

    #[serde(default)]
    pub authors: Vec<String>,
}

/// An image reference inside an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleImage {
    pub src: String,

    #[serde(default)]
    pub alt: Option<String>,
}

impl Article {
    /// Creates an article with only a title; everything else empty
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lead: String::new(),
            main_image: None,
            content: Vec::new(),
            authors: Vec::new(),
        }
    }

    /// The main image URL, if any
    pub fn main_image_url(&self) -> Option<&str> {
        self.main_image.as_ref().map(|image| image.src.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_article() {
        let json = r#"{
            "title": "Breaking News",
            "lead": "Something happened",
            "main_image": {"src": "https://example.com/lead.jpg"},
            "content": [
                {"type": "heading", "content": "Context"},
                {"type": "paragraph", "content": "First paragraph"},
                {"type": "widget", "payload": 42}
            ],
            "authors": ["Jane Doe", "John Roe"]
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Breaking News");
        assert_eq!(article.main_image_url(), Some("https://example.com/lead.jpg"));
        assert_eq!(article.content.len(), 3);
        assert_eq!(
            article.content[2],
            ContentElement::Unsupported {
                element_type: "widget".to_string()
            }
        );
        assert_eq!(article.authors, vec!["Jane Doe", "John Roe"]);
    }

    #[test]
    fn test_deserialize_minimal_article() {
        let article: Article = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(article, Article::new("Only a title"));
        assert_eq!(article.main_image_url(), None);
    }
}
