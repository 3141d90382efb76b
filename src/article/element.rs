//! Raw article body elements
//!
//! Elements arrive as loosely typed key/value bags with a `type` key. They are
//! lifted into a sum type here so that the mapper can match exhaustively; any
//! type name the pipeline does not understand becomes
//! [`ContentElement::Unsupported`] instead of disappearing silently.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One atomic unit of article body content, as produced by the parser
///
/// Field values are kept exactly as they arrived (a number stays a number,
/// `items` need not be an array); `null` counts as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub enum ContentElement {
    Paragraph {
        content: Option<Value>,
    },
    Heading {
        content: Option<Value>,
    },
    Image {
        src: Option<Value>,
        alt: Option<Value>,
    },
    Quote {
        content: Option<Value>,
        author: Option<Value>,
    },
    List {
        items: Option<Value>,
    },
    Video {
        src: Option<Value>,
    },
    Iframe {
        src: Option<Value>,
    },
    /// Any element whose type the pipeline does not handle
    Unsupported {
        element_type: String,
    },
}

impl ContentElement {
    /// Builds an element from its type name and the remaining fields
    pub fn from_fields(element_type: &str, fields: &Map<String, Value>) -> Self {
        match element_type {
            "paragraph" => Self::Paragraph {
                content: field(fields, "content"),
            },
            "heading" => Self::Heading {
                content: field(fields, "content"),
            },
            "image" => Self::Image {
                src: field(fields, "src"),
                alt: field(fields, "alt"),
            },
            "quote" => Self::Quote {
                content: field(fields, "content"),
                author: field(fields, "author"),
            },
            "list" => Self::List {
                items: field(fields, "items"),
            },
            "video" => Self::Video {
                src: field(fields, "src"),
            },
            "iframe" => Self::Iframe {
                src: field(fields, "src"),
            },
            other => Self::Unsupported {
                element_type: other.to_string(),
            },
        }
    }

    /// The parser-side type name of this element
    pub fn type_name(&self) -> &str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::Image { .. } => "image",
            Self::Quote { .. } => "quote",
            Self::List { .. } => "list",
            Self::Video { .. } => "video",
            Self::Iframe { .. } => "iframe",
            Self::Unsupported { element_type } => element_type,
        }
    }
}

fn field(fields: &Map<String, Value>, key: &str) -> Option<Value> {
    fields.get(key).filter(|value| !value.is_null()).cloned()
}

fn put(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}

impl From<Map<String, Value>> for ContentElement {
    fn from(fields: Map<String, Value>) -> Self {
        let element_type = fields.get("type").and_then(Value::as_str).unwrap_or("");
        Self::from_fields(element_type, &fields)
    }
}

impl From<ContentElement> for Map<String, Value> {
    fn from(element: ContentElement) -> Self {
        let mut map = Map::new();
        map.insert(
            "type".to_string(),
            Value::String(element.type_name().to_string()),
        );

        match element {
            ContentElement::Paragraph { content } | ContentElement::Heading { content } => {
                put(&mut map, "content", content)
            }
            ContentElement::Image { src, alt } => {
                put(&mut map, "src", src);
                put(&mut map, "alt", alt);
            }
            ContentElement::Quote { content, author } => {
                put(&mut map, "content", content);
                put(&mut map, "author", author);
            }
            ContentElement::Video { src } | ContentElement::Iframe { src } => put(&mut map, "src", src),
            ContentElement::List { items } => put(&mut map, "items", items),
            ContentElement::Unsupported { .. } => {}
        }

        map
    }
}
