//! Generator for the RDF dialects, RSS 0.90 and RSS 1.0.

use super::{as_attributes, namespace_attributes, FeedGenerator};
use crate::config::{CONTENT_NS, RDF_NS, RSS090_NS, RSS10_NS};
use crate::dialect::FeedType;
use crate::error::Result;
use crate::model::{Entry, Feed};
use crate::module::{generate_modules, registry};
use crate::xml::XmlWriter;

/// Writes `rdf:RDF` documents with items as siblings of the channel.
#[derive(Debug, Clone, Copy)]
pub struct RdfGenerator {
    feed_type: FeedType,
}

impl RdfGenerator {
    /// Create a generator for RSS 0.90 or RSS 1.0.
    ///
    /// Any other feed type produces RSS 1.0.
    #[must_use]
    pub fn new(feed_type: FeedType) -> Self {
        let feed_type = match feed_type {
            FeedType::Rss090 => FeedType::Rss090,
            _ => FeedType::Rss10,
        };
        Self { feed_type }
    }

    fn is_rss10(&self) -> bool {
        self.feed_type == FeedType::Rss10
    }

    fn about(uri: Option<&str>) -> Vec<(&str, &str)> {
        uri.map(|uri| ("rdf:about", uri)).into_iter().collect()
    }

    fn write_item(&self, entry: &Entry, writer: &mut XmlWriter) -> Result<()> {
        let about = if self.is_rss10() {
            Self::about(entry.uri.as_deref())
        } else {
            Vec::new()
        };
        writer.start("item", &about)?;
        writer.optional_element("title", entry.title.as_deref())?;
        writer.optional_element("link", entry.link.as_deref())?;
        if self.is_rss10() {
            writer.optional_element(
                "description",
                entry.description.as_ref().and_then(|d| d.value.as_deref()),
            )?;
            writer.optional_element(
                "content:encoded",
                entry.content.as_ref().and_then(|c| c.value.as_deref()),
            )?;
        }
        generate_modules(&entry.modules, registry(), writer)?;
        writer.end("item")
    }

    /// The `items` table of contents RSS 1.0 requires in its channel.
    fn write_item_sequence(feed: &Feed, writer: &mut XmlWriter) -> Result<()> {
        writer.start("items", &[])?;
        writer.start("rdf:Seq", &[])?;
        for entry in &feed.entries {
            if let Some(resource) = entry.uri.as_deref().or(entry.link.as_deref()) {
                writer.empty("rdf:li", &[("rdf:resource", resource)])?;
            }
        }
        writer.end("rdf:Seq")?;
        writer.end("items")
    }
}

impl FeedGenerator for RdfGenerator {
    fn feed_type(&self) -> FeedType {
        self.feed_type
    }

    fn generate(&self, feed: &Feed) -> Result<String> {
        let own: &[(&str, &'static str)] = if self.is_rss10() {
            &[("rdf", RDF_NS), ("", RSS10_NS), ("content", CONTENT_NS)]
        } else {
            &[("rdf", RDF_NS), ("", RSS090_NS)]
        };
        let namespaces = namespace_attributes(own, registry());

        let mut writer = XmlWriter::new();
        writer.declaration()?;
        writer.start("rdf:RDF", &as_attributes(&namespaces))?;

        let about = if self.is_rss10() {
            Self::about(feed.uri.as_deref())
        } else {
            Vec::new()
        };
        writer.start("channel", &about)?;
        writer.optional_element("title", feed.title.as_deref())?;
        writer.optional_element("link", feed.link.as_deref())?;
        writer.optional_element("description", feed.description.as_deref())?;
        if self.is_rss10() {
            Self::write_item_sequence(feed, &mut writer)?;
        }
        generate_modules(&feed.modules, registry(), &mut writer)?;
        writer.end("channel")?;

        for entry in &feed.entries {
            self.write_item(entry, &mut writer)?;
        }

        writer.end("rdf:RDF")?;
        writer.finish()
    }
}
