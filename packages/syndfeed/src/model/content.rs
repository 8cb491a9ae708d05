//! Typed text values and small entry attachments.

use serde::Serialize;

/// Typed text: a value plus the media type that says how to read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Content {
    /// Media type, e.g. `text/plain`, `html` or `xhtml`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Raw value. Markup is kept as markup, not unescaped text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Atom 0.3 encoding mode: `xml`, `escaped` or `base64`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl Content {
    /// Create content with a type and value.
    #[must_use]
    pub fn new(content_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            value: Some(value.into()),
            mode: None,
        }
    }
}

/// An entry description has the same shape as its content.
pub type Description = Content;

/// A category or tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,

    /// RSS `domain` or Atom `scheme`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// A media file attached to an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Enclosure {
    pub url: String,

    /// Size in bytes, when the feed states one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}
