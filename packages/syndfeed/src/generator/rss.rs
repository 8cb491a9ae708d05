//! Generator for the `<rss>` channel family.

use super::{as_attributes, namespace_attributes, FeedGenerator};
use crate::config::{CONTENT_NS, NETSCAPE_PUBLIC_ID, NETSCAPE_SYSTEM_ID};
use crate::date::format_rfc822;
use crate::dialect::FeedType;
use crate::error::Result;
use crate::model::{Entry, Feed};
use crate::module::{generate_modules, registry};
use crate::xml::XmlWriter;

/// Writes RSS 0.91 through 2.0; later revisions add item elements.
#[derive(Debug, Clone, Copy)]
pub struct RssGenerator {
    feed_type: FeedType,
    revision: u8,
}

impl RssGenerator {
    /// Create a generator for one `<rss>` revision.
    ///
    /// Non-`<rss>` feed types fall back to RSS 2.0.
    #[must_use]
    pub fn new(feed_type: FeedType) -> Self {
        match feed_type.rss_revision() {
            Some(revision) => Self {
                feed_type,
                revision,
            },
            None => Self {
                feed_type: FeedType::Rss20,
                revision: 200,
            },
        }
    }

    fn write_item(&self, entry: &Entry, writer: &mut XmlWriter) -> Result<()> {
        writer.start("item", &[])?;
        writer.optional_element("title", entry.title.as_deref())?;
        writer.optional_element("link", entry.link.as_deref())?;
        writer.optional_element(
            "description",
            entry.description.as_ref().and_then(|d| d.value.as_deref()),
        )?;

        if self.revision >= 92 {
            for category in &entry.categories {
                let domain: Vec<(&str, &str)> = category
                    .domain
                    .as_deref()
                    .map(|domain| ("domain", domain))
                    .into_iter()
                    .collect();
                writer.text_element("category", &domain, &category.name)?;
            }
            for enclosure in &entry.enclosures {
                let length = enclosure.length.map(|length| length.to_string());
                let mut attributes = vec![("url", enclosure.url.as_str())];
                if let Some(length) = length.as_deref() {
                    attributes.push(("length", length));
                }
                if let Some(mime_type) = enclosure.mime_type.as_deref() {
                    attributes.push(("type", mime_type));
                }
                writer.empty("enclosure", &attributes)?;
            }
        }

        if self.revision >= 93 {
            if let Some(published) = &entry.published {
                writer.text_element("pubDate", &[], &format_rfc822(published))?;
            }
        }

        if self.revision >= 94 {
            writer.optional_element("guid", entry.uri.as_deref())?;
            let author = entry.authors.iter().find_map(|person| person.email.as_deref());
            writer.optional_element("author", author)?;
        }

        writer.optional_element(
            "content:encoded",
            entry.content.as_ref().and_then(|c| c.value.as_deref()),
        )?;
        generate_modules(&entry.modules, registry(), writer)?;
        writer.end("item")
    }
}

impl FeedGenerator for RssGenerator {
    fn feed_type(&self) -> FeedType {
        self.feed_type
    }

    fn generate(&self, feed: &Feed) -> Result<String> {
        let mut writer = XmlWriter::new();
        writer.declaration()?;
        if self.feed_type == FeedType::Rss091Netscape {
            writer.doctype(&format!(
                r#"rss PUBLIC "{NETSCAPE_PUBLIC_ID}" "{NETSCAPE_SYSTEM_ID}""#
            ))?;
        }

        let namespaces = namespace_attributes(&[("content", CONTENT_NS)], registry());
        let mut attributes = vec![("version", self.feed_type.rss_version().unwrap_or("2.0"))];
        attributes.extend(as_attributes(&namespaces));
        writer.start("rss", &attributes)?;
        writer.start("channel", &[])?;

        writer.optional_element("title", feed.title.as_deref())?;
        writer.optional_element("link", feed.link.as_deref())?;
        writer.optional_element("description", feed.description.as_deref())?;
        writer.optional_element("language", feed.language.as_deref())?;
        writer.optional_element("copyright", feed.copyright.as_deref())?;
        if let Some(published) = &feed.published {
            writer.text_element("pubDate", &[], &format_rfc822(published))?;
        }
        if let Some(updated) = &feed.updated {
            writer.text_element("lastBuildDate", &[], &format_rfc822(updated))?;
        }
        generate_modules(&feed.modules, registry(), &mut writer)?;

        for entry in &feed.entries {
            self.write_item(entry, &mut writer)?;
        }

        writer.end("channel")?;
        writer.end("rss")?;
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Content, Person};
    use chrono::{TimeZone, Utc};

    fn sample_feed() -> Feed {
        let mut feed = Feed::new(FeedType::Rss20);
        feed.title = Some("News & Views".to_string());
        feed.link = Some("http://example.org/".to_string());
        let mut entry = Entry::new();
        entry.title = Some("Story".to_string());
        entry.description = Some(Content::new("text/html", "<b>x</b>"));
        entry.categories.push(Category {
            name: "World".to_string(),
            domain: None,
        });
        entry.published = Some(Utc.with_ymd_and_hms(2002, 9, 7, 0, 0, 1).unwrap());
        entry.uri = Some("urn:1".to_string());
        entry.authors.push(Person::with_email("a@example.org"));
        feed.entries.push(entry);
        feed
    }

    #[test]
    fn test_rss20_output() {
        let xml = RssGenerator::new(FeedType::Rss20)
            .generate(&sample_feed())
            .unwrap();
        assert!(xml.contains(r#"<rss version="2.0""#));
        assert!(xml.contains("<title>News &amp; Views</title>"));
        assert!(xml.contains("<description>&lt;b&gt;x&lt;/b&gt;</description>"));
        assert!(xml.contains("<category>World</category>"));
        assert!(xml.contains("<pubDate>Sat, 7 Sep 2002 00:00:01 +0000</pubDate>"));
        assert!(xml.contains("<guid>urn:1</guid>"));
        assert!(xml.contains("<author>a@example.org</author>"));
        assert!(xml.contains(r#"xmlns:dc="http://purl.org/dc/elements/1.1/""#));
    }

    #[test]
    fn test_revision_gating() {
        let xml = RssGenerator::new(FeedType::Rss092)
            .generate(&sample_feed())
            .unwrap();
        assert!(xml.contains(r#"version="0.92""#));
        assert!(xml.contains("<category>"));
        assert!(!xml.contains("<pubDate>"));
        assert!(!xml.contains("<guid>"));
    }

    #[test]
    fn test_netscape_doctype() {
        let xml = RssGenerator::new(FeedType::Rss091Netscape)
            .generate(&sample_feed())
            .unwrap();
        assert!(xml.contains(NETSCAPE_PUBLIC_ID));
        assert!(xml.contains(r#"version="0.91""#));
        assert!(!xml.contains("<category>"));
    }
}
