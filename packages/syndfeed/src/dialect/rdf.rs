//! RDF based dialects: RSS 0.90 and RSS 1.0.

use roxmltree::{Document, Node};

use super::common::{encoded_content, parse_channel_common, parse_item_common, require_channel};
use super::context::ParseContext;
use super::feed_type::FeedType;
use super::parser::DialectParser;
use crate::config::{RDF_NS, RSS090_NS, RSS10_NS};
use crate::error::Result;
use crate::model::{Content, Feed};
use crate::xml::{child_text, element_children, find_children, get_attribute, is_element};

/// Parser for RSS 0.90, and the RDF base every RDF dialect builds on.
///
/// Items are siblings of the channel under `rdf:RDF`, all in the dialect's
/// namespace.
#[derive(Debug, Clone)]
pub struct Rss090Parser {
    feed_type: FeedType,
    namespace: &'static str,
}

impl Rss090Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::with_namespace(FeedType::Rss090, RSS090_NS)
    }

    /// RDF base parser reading channel and items from another namespace.
    #[must_use]
    pub fn with_namespace(feed_type: FeedType, namespace: &'static str) -> Self {
        Self {
            feed_type,
            namespace,
        }
    }

    /// The `item` elements of a document, in document order.
    pub(crate) fn items<'a, 'input>(&self, document: &'a Document<'input>) -> Vec<Node<'a, 'input>> {
        find_children(document.root_element(), "item", Some(self.namespace)).collect()
    }
}

impl Default for Rss090Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectParser for Rss090Parser {
    fn feed_type(&self) -> FeedType {
        self.feed_type
    }

    fn detect(&self, document: &Document<'_>) -> bool {
        let root = document.root_element();
        is_element(root, "RDF", Some(RDF_NS))
            && element_children(root).any(|child| child.tag_name().name() == "channel")
    }

    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        let root = document.root_element();
        let ns = Some(self.namespace);
        let channel = require_channel(root, ns, self.feed_type)?;

        let mut feed = Feed::new(self.feed_type);
        parse_channel_common(channel, ns, &mut feed, ctx)?;

        for item in self.items(document) {
            feed.entries.push(parse_item_common(item, ns, ctx)?);
        }
        Ok(feed)
    }
}

/// Parser for RSS 1.0.
///
/// Same shape as RSS 0.90 in the RSS 1.0 namespace, plus item descriptions,
/// `content:encoded` bodies and `rdf:about` identifiers.
#[derive(Debug, Clone)]
pub struct Rss10Parser {
    base: Rss090Parser,
}

impl Rss10Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Rss090Parser::with_namespace(FeedType::Rss10, RSS10_NS),
        }
    }
}

impl Default for Rss10Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectParser for Rss10Parser {
    fn feed_type(&self) -> FeedType {
        FeedType::Rss10
    }

    fn detect(&self, document: &Document<'_>) -> bool {
        self.base.detect(document)
            && find_children(document.root_element(), "channel", Some(RSS10_NS))
                .next()
                .is_some()
    }

    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        let mut feed = self.base.parse(document, ctx)?;

        let root = document.root_element();
        if let Some(channel) = find_children(root, "channel", Some(RSS10_NS)).next() {
            feed.uri = get_attribute(channel, "about", Some(RDF_NS)).map(String::from);
        }

        for (item, entry) in self.base.items(document).into_iter().zip(&mut feed.entries) {
            entry.description = child_text(item, "description", Some(RSS10_NS))
                .map(|text| Content::new("text/plain", text));
            entry.content = encoded_content(item);
            entry.uri = get_attribute(item, "about", Some(RDF_NS)).map(String::from);
        }
        Ok(feed)
    }
}
