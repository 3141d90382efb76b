//! Content block mapping
//!
//! The only place that knows how parser element types translate into CMS
//! block kinds and their settings payloads.
//!
//! | element   | block kind | settings                                      |
//! |-----------|------------|-----------------------------------------------|
//! | paragraph | text       | `text`, `align: "left"`                       |
//! | heading   | heading    | `text`, `level: 2`                            |
//! | image     | image      | `src`, `alt`, `width: null`, `height: null`   |
//! | quote     | quote      | `text`, `author` (or null)                    |
//! | list      | list       | `items`, `ordered: false`                     |
//! | video     | video      | `src`, `provider: "custom"`                   |
//! | iframe    | code       | `code` (an `<iframe>` snippet), `language`    |

use crate::article::ContentElement;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Kind of a normalized content block, one per content-element type row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Heading,
    Image,
    Quote,
    List,
    Video,
    Code,
}

impl BlockKind {
    /// Every block kind, in the order the schema seeds them
    pub const ALL: [BlockKind; 7] = [
        Self::Text,
        Self::Heading,
        Self::Image,
        Self::Quote,
        Self::List,
        Self::Video,
        Self::Code,
    ];

    /// The content-element type name stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Image => "image",
            Self::Quote => "quote",
            Self::List => "list",
            Self::Video => "video",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mapped block with its position among the successfully mapped blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedBlock {
    pub kind: BlockKind,
    pub settings: Map<String, Value>,
    /// Zero-based, contiguous: skipped elements do not consume a slot
    pub order: u32,
}

/// Result of mapping one article element
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutcome {
    Mapped {
        kind: BlockKind,
        settings: Map<String, Value>,
    },
    /// The element type has no block counterpart and is skipped
    Unsupported { element_type: String },
}

impl MapOutcome {
    /// Attaches an order slot to a mapped outcome
    pub fn into_block(self, order: u32) -> Option<NormalizedBlock> {
        match self {
            Self::Mapped { kind, settings } => Some(NormalizedBlock {
                kind,
                settings,
                order,
            }),
            Self::Unsupported { .. } => None,
        }
    }
}

/// Maps a parsed article element onto a block kind and its settings
///
/// Pure and total: every element yields either a block or an explicit
/// `Unsupported`.
pub fn map_element(element: &ContentElement) -> MapOutcome {
    let (kind, settings) = match element {
        ContentElement::Paragraph { content } => (
            BlockKind::Text,
            json!({
                "text": or_default(content.as_ref(), ""),
                "align": "left",
            }),
        ),
        ContentElement::Heading { content } => (
            BlockKind::Heading,
            json!({
                "text": or_default(content.as_ref(), ""),
                "level": 2,
            }),
        ),
        ContentElement::Image { src, alt } => (
            BlockKind::Image,
            json!({
                "src": or_default(src.as_ref(), ""),
                "alt": or_default(alt.as_ref(), ""),
                "width": null,
                "height": null,
            }),
        ),
        ContentElement::Quote { content, author } => (
            BlockKind::Quote,
            json!({
                "text": or_default(content.as_ref(), ""),
                "author": author,
            }),
        ),
        ContentElement::List { items } => (
            BlockKind::List,
            json!({
                "items": or_default(items.as_ref(), json!([])),
                "ordered": false,
            }),
        ),
        ContentElement::Video { src } => (
            BlockKind::Video,
            json!({
                "src": or_default(src.as_ref(), ""),
                "provider": "custom",
            }),
        ),
        ContentElement::Iframe { src } => (
            BlockKind::Code,
            json!({
                "code": iframe_snippet(src.as_ref()),
                "language": "html",
            }),
        ),
        ContentElement::Unsupported { element_type } => {
            return MapOutcome::Unsupported {
                element_type: element_type.clone(),
            }
        }
    };

    MapOutcome::Mapped {
        kind,
        settings: into_map(settings),
    }
}

/// The element's value as given, or `default` when it is absent
fn or_default(value: Option<&Value>, default: impl Into<Value>) -> Value {
    value.cloned().unwrap_or_else(|| default.into())
}

fn iframe_snippet(src: Option<&Value>) -> String {
    let src = match src {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    format!(
        "<iframe src=\"{}\" width=\"100%\" height=\"400\" style=\"border:0;\" allowfullscreen></iframe>",
        src
    )
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(element: ContentElement) -> (BlockKind, Value) {
        match map_element(&element) {
            MapOutcome::Mapped { kind, settings } => (kind, Value::Object(settings)),
            MapOutcome::Unsupported { element_type } => {
                panic!("unexpected unsupported element: {}", element_type)
            }
        }
    }

    #[test]
    fn test_heading() {
        let (kind, settings) = mapped(ContentElement::Heading {
            content: Some(json!("Breaking News")),
        });
        assert_eq!(kind, BlockKind::Heading);
        assert_eq!(settings, json!({"text": "Breaking News", "level": 2}));
    }

    #[test]
    fn test_paragraph_defaults_to_empty_text() {
        let (kind, settings) = mapped(ContentElement::Paragraph { content: None });
        assert_eq!(kind, BlockKind::Text);
        assert_eq!(settings, json!({"text": "", "align": "left"}));
    }

    #[test]
    fn test_image() {
        let (kind, settings) = mapped(ContentElement::Image {
            src: Some(json!("https://example.com/a.jpg")),
            alt: None,
        });
        assert_eq!(kind, BlockKind::Image);
        assert_eq!(
            settings,
            json!({"src": "https://example.com/a.jpg", "alt": "", "width": null, "height": null})
        );
    }

    #[test]
    fn test_quote_author_or_null() {
        let (_, with_author) = mapped(ContentElement::Quote {
            content: Some(json!("To be")),
            author: Some(json!("Hamlet")),
        });
        assert_eq!(with_author, json!({"text": "To be", "author": "Hamlet"}));

        let (kind, without_author) = mapped(ContentElement::Quote {
            content: Some(json!("Anonymous")),
            author: None,
        });
        assert_eq!(kind, BlockKind::Quote);
        assert_eq!(without_author, json!({"text": "Anonymous", "author": null}));
    }

    #[test]
    fn test_list_is_never_ordered() {
        let (kind, settings) = mapped(ContentElement::List {
            items: Some(json!(["one", "two"])),
        });
        assert_eq!(kind, BlockKind::List);
        assert_eq!(settings, json!({"items": ["one", "two"], "ordered": false}));

        let (_, empty) = mapped(ContentElement::List { items: None });
        assert_eq!(empty, json!({"items": [], "ordered": false}));
    }

    #[test]
    fn test_values_pass_through_unchanged() {
        let (_, list) = mapped(ContentElement::List {
            items: Some(json!([1, {"k": "v"}])),
        });
        assert_eq!(list, json!({"items": [1, {"k": "v"}], "ordered": false}));

        let (_, paragraph) = mapped(ContentElement::Paragraph {
            content: Some(json!(42)),
        });
        assert_eq!(paragraph, json!({"text": 42, "align": "left"}));
    }

    #[test]
    fn test_video() {
        let (kind, settings) = mapped(ContentElement::Video {
            src: Some(json!("https://cdn.example.com/v.mp4")),
        });
        assert_eq!(kind, BlockKind::Video);
        assert_eq!(
            settings,
            json!({"src": "https://cdn.example.com/v.mp4", "provider": "custom"})
        );
    }

    #[test]
    fn test_iframe_becomes_code() {
        let (kind, settings) = mapped(ContentElement::Iframe {
            src: Some(json!("https://player.example.com/embed/1")),
        });
        assert_eq!(kind, BlockKind::Code);
        assert_eq!(
            settings["code"],
            "<iframe src=\"https://player.example.com/embed/1\" width=\"100%\" height=\"400\" style=\"border:0;\" allowfullscreen></iframe>"
        );
        assert_eq!(settings["language"], "html");
    }

    #[test]
    fn test_unsupported_is_explicit() {
        let outcome = map_element(&ContentElement::Unsupported {
            element_type: "widget".to_string(),
        });
        assert_eq!(
            outcome,
            MapOutcome::Unsupported {
                element_type: "widget".to_string()
            }
        );
        assert_eq!(outcome.into_block(0), None);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let element = ContentElement::Image {
            src: Some(json!("x.png")),
            alt: Some(json!("x")),
        };
        assert_eq!(map_element(&element), map_element(&element));
    }

    #[test]
    fn test_block_kind_names_match_serde() {
        for kind in BlockKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }
}
