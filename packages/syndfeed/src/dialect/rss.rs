//! The `<rss>` channel family: RSS 0.91 through 2.0.
//!
//! Each revision wraps the parser of the revision it extends. Detection
//! is by the root `version` attribute, so every level carries the feed
//! type it reports and hands it down to the base it delegates to.

use roxmltree::{Document, Node};

use super::common::{
    child_date, encoded_content, parse_channel_common, parse_item_common, require_channel,
};
use super::context::ParseContext;
use super::feed_type::FeedType;
use super::parser::DialectParser;
use crate::config::NETSCAPE_PUBLIC_ID;
use crate::error::Result;
use crate::model::{Category, Content, Enclosure, Feed, Person};
use crate::xml::{child_text, find_children, get_attribute, get_text, is_element, prolog};

/// Get the `item` elements of an `<rss>` document in document order.
fn items<'a, 'input>(document: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
    let root = document.root_element();
    find_children(root, "channel", None)
        .next()
        .map(|channel| find_children(channel, "item", None).collect())
        .unwrap_or_default()
}

/// Check the root element and its `version` attribute.
fn version_matches(document: &Document<'_>, feed_type: FeedType) -> bool {
    let root = document.root_element();
    if !is_element(root, "rss", None) {
        return false;
    }
    let (Some(version), Some(expected)) = (get_attribute(root, "version", None), feed_type.rss_version())
    else {
        return false;
    };
    let version = version.trim();
    match feed_type {
        FeedType::Rss20 => version.starts_with(expected),
        _ => version == expected,
    }
}

/// Parser for RSS 0.91 (UserLand), and the base of the whole `<rss>` family.
#[derive(Debug, Clone)]
pub struct Rss091UserlandParser {
    feed_type: FeedType,
}

impl Rss091UserlandParser {
    #[must_use]
    pub fn new() -> Self {
        Self::with_type(FeedType::Rss091Userland)
    }

    /// Base parser reporting a later revision's feed type.
    #[must_use]
    pub fn with_type(feed_type: FeedType) -> Self {
        Self { feed_type }
    }
}

impl Default for Rss091UserlandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectParser for Rss091UserlandParser {
    fn feed_type(&self) -> FeedType {
        self.feed_type
    }

    fn detect(&self, document: &Document<'_>) -> bool {
        version_matches(document, self.feed_type)
    }

    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        let channel = require_channel(document.root_element(), None, self.feed_type)?;

        let mut feed = Feed::new(self.feed_type);
        parse_channel_common(channel, None, &mut feed, ctx)?;
        feed.language = child_text(channel, "language", None);
        feed.copyright = child_text(channel, "copyright", None);
        feed.published = child_date(channel, "pubDate", None, ctx);
        feed.updated = child_date(channel, "lastBuildDate", None, ctx);

        for item in find_children(channel, "item", None) {
            let mut entry = parse_item_common(item, None, ctx)?;
            entry.description =
                child_text(item, "description", None).map(|text| Content::new("text/plain", text));
            entry.content = encoded_content(item);
            feed.entries.push(entry);
        }
        Ok(feed)
    }
}

/// Parser for RSS 0.91 as published by Netscape.
///
/// Identical to UserLand 0.91 on the wire except for the Netscape DOCTYPE.
#[derive(Debug, Clone)]
pub struct Rss091NetscapeParser {
    base: Rss091UserlandParser,
}

impl Rss091NetscapeParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Rss091UserlandParser::with_type(FeedType::Rss091Netscape),
        }
    }
}

impl Default for Rss091NetscapeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectParser for Rss091NetscapeParser {
    fn feed_type(&self) -> FeedType {
        FeedType::Rss091Netscape
    }

    fn detect(&self, document: &Document<'_>) -> bool {
        self.base.detect(document) && prolog(document.root_element()).contains(NETSCAPE_PUBLIC_ID)
    }

    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        self.base.parse(document, ctx)
    }
}

/// Parser for RSS 0.92: adds item categories and enclosures.
#[derive(Debug, Clone)]
pub struct Rss092Parser {
    base: Rss091UserlandParser,
}

impl Rss092Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::with_type(FeedType::Rss092)
    }

    #[must_use]
    pub fn with_type(feed_type: FeedType) -> Self {
        Self {
            base: Rss091UserlandParser::with_type(feed_type),
        }
    }

    fn parse_enclosure(node: Node<'_, '_>) -> Option<Enclosure> {
        let url = get_attribute(node, "url", None)?;
        let length = get_attribute(node, "length", None).and_then(|text| {
            let length = text.trim().parse::<u64>().ok();
            if length.is_none() {
                tracing::debug!(value = text, "enclosure length is not a number");
            }
            length
        });
        Some(Enclosure {
            url: url.to_string(),
            length,
            mime_type: get_attribute(node, "type", None).map(String::from),
        })
    }
}

impl Default for Rss092Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectParser for Rss092Parser {
    fn feed_type(&self) -> FeedType {
        self.base.feed_type()
    }

    fn detect(&self, document: &Document<'_>) -> bool {
        self.base.detect(document)
    }

    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        let mut feed = self.base.parse(document, ctx)?;

        for (item, entry) in items(document).into_iter().zip(&mut feed.entries) {
            entry.categories = find_children(item, "category", None)
                .map(|node| Category {
                    name: get_text(node),
                    domain: get_attribute(node, "domain", None).map(String::from),
                })
                .collect();
            entry.enclosures = find_children(item, "enclosure", None)
                .filter_map(Self::parse_enclosure)
                .collect();
            if let Some(description) = entry.description.as_mut() {
                description.content_type = Some("text/html".to_string());
            }
        }
        Ok(feed)
    }
}

/// Parser for RSS 0.93: adds item publication dates.
#[derive(Debug, Clone)]
pub struct Rss093Parser {
    base: Rss092Parser,
}

impl Rss093Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::with_type(FeedType::Rss093)
    }

    #[must_use]
    pub fn with_type(feed_type: FeedType) -> Self {
        Self {
            base: Rss092Parser::with_type(feed_type),
        }
    }
}

impl Default for Rss093Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectParser for Rss093Parser {
    fn feed_type(&self) -> FeedType {
        self.base.feed_type()
    }

    fn detect(&self, document: &Document<'_>) -> bool {
        self.base.detect(document)
    }

    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        let mut feed = self.base.parse(document, ctx)?;
        for (item, entry) in items(document).into_iter().zip(&mut feed.entries) {
            entry.published = child_date(item, "pubDate", None, ctx);
        }
        Ok(feed)
    }
}

/// Parser for RSS 0.94: adds item `guid` and `author`.
#[derive(Debug, Clone)]
pub struct Rss094Parser {
    base: Rss093Parser,
}

impl Rss094Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::with_type(FeedType::Rss094)
    }

    #[must_use]
    pub fn with_type(feed_type: FeedType) -> Self {
        Self {
            base: Rss093Parser::with_type(feed_type),
        }
    }
}

impl Default for Rss094Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectParser for Rss094Parser {
    fn feed_type(&self) -> FeedType {
        self.base.feed_type()
    }

    fn detect(&self, document: &Document<'_>) -> bool {
        self.base.detect(document)
    }

    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        let mut feed = self.base.parse(document, ctx)?;
        for (item, entry) in items(document).into_iter().zip(&mut feed.entries) {
            entry.uri = child_text(item, "guid", None);
            if let Some(author) = child_text(item, "author", None) {
                entry.authors.push(Person::with_email(author));
            }
        }
        Ok(feed)
    }
}

/// Parser for RSS 2.0, which adds nothing the model carries over 0.94.
#[derive(Debug, Clone)]
pub struct Rss20Parser {
    base: Rss094Parser,
}

impl Rss20Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Rss094Parser::with_type(FeedType::Rss20),
        }
    }
}

impl Default for Rss20Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectParser for Rss20Parser {
    fn feed_type(&self) -> FeedType {
        FeedType::Rss20
    }

    fn detect(&self, document: &Document<'_>) -> bool {
        self.base.detect(document)
    }

    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        self.base.parse(document, ctx)
    }
}
