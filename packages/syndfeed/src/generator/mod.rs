//! Feed generators: the model back to dialect XML.
//!
//! Each generator writes exactly the fields its parser reads, so parsing
//! generated output gives back an equal feed.

mod atom;
mod rdf;
mod rss;

use std::collections::BTreeMap;

pub use atom::{Atom03Generator, Atom10Generator};
pub use rdf::RdfGenerator;
pub use rss::RssGenerator;

use crate::dialect::FeedType;
use crate::error::Result;
use crate::model::Feed;
use crate::module::ModuleRegistry;

/// Serializes a feed into one dialect.
pub trait FeedGenerator: Send + Sync {
    /// The dialect this generator writes.
    fn feed_type(&self) -> FeedType;

    /// Write a feed as a complete XML document.
    ///
    /// The feed's own `feed_type` is ignored; the generator's dialect wins.
    ///
    /// # Errors
    /// `XmlWrite` if serialization fails.
    fn generate(&self, feed: &Feed) -> Result<String>;
}

/// Get the generator for a dialect.
#[must_use]
pub fn generator_for(feed_type: FeedType) -> Box<dyn FeedGenerator> {
    match feed_type {
        FeedType::Rss090 | FeedType::Rss10 => Box::new(RdfGenerator::new(feed_type)),
        FeedType::Atom10 => Box::new(Atom10Generator),
        FeedType::Atom03 => Box::new(Atom03Generator),
        FeedType::Rss091Netscape
        | FeedType::Rss091Userland
        | FeedType::Rss092
        | FeedType::Rss093
        | FeedType::Rss094
        | FeedType::Rss20 => Box::new(RssGenerator::new(feed_type)),
    }
}

/// `xmlns` attributes for a root element.
///
/// Starts from the dialect's own declarations and adds every module codec
/// namespace whose prefix is not already taken.
fn namespace_attributes(
    own: &[(&str, &'static str)],
    registry: &ModuleRegistry,
) -> Vec<(String, &'static str)> {
    let mut declared: BTreeMap<&str, &'static str> = BTreeMap::new();
    for &(prefix, uri) in own {
        declared.insert(prefix, uri);
    }
    for (prefix, uri) in registry.namespaces() {
        declared.entry(prefix).or_insert(uri);
    }
    declared
        .into_iter()
        .map(|(prefix, uri)| match prefix {
            "" => ("xmlns".to_string(), uri),
            prefix => (format!("xmlns:{prefix}"), uri),
        })
        .collect()
}

/// Borrow owned attribute pairs for the writer.
fn as_attributes<'a>(owned: &'a [(String, &'a str)]) -> Vec<(&'a str, &'a str)> {
    owned.iter().map(|(name, value)| (name.as_str(), *value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ATOM10_NS, DC_NS};
    use crate::module::registry;

    #[test]
    fn test_generator_for_every_type() {
        for feed_type in FeedType::ALL {
            assert_eq!(generator_for(feed_type).feed_type(), feed_type);
        }
    }

    #[test]
    fn test_namespace_attributes() {
        let attributes = namespace_attributes(&[("", ATOM10_NS)], registry());
        assert!(attributes.contains(&("xmlns".to_string(), ATOM10_NS)));
        assert!(attributes.contains(&("xmlns:dc".to_string(), DC_NS)));
    }

    #[test]
    fn test_own_prefix_is_not_redeclared() {
        let attributes = namespace_attributes(&[("rdf", "urn:own")], registry());
        let rdf: Vec<_> = attributes.iter().filter(|(name, _)| name == "xmlns:rdf").collect();
        assert_eq!(rdf.len(), 1);
        assert_eq!(rdf[0].1, "urn:own");
    }
}
