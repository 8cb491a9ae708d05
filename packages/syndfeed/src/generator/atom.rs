//! Generators for Atom 1.0 and Atom 0.3.

use chrono::{DateTime, Utc};

use super::{as_attributes, namespace_attributes, FeedGenerator};
use crate::config::{ATOM03_NS, ATOM10_NS};
use crate::date::format_w3c;
use crate::dialect::atom::{is_inline_xml, is_xml_type};
use crate::dialect::FeedType;
use crate::error::Result;
use crate::model::{Content, Entry, Feed, Person};
use crate::module::{generate_modules, registry};
use crate::xml::XmlWriter;

fn write_date(writer: &mut XmlWriter, name: &str, date: Option<&DateTime<Utc>>) -> Result<()> {
    match date {
        Some(date) => writer.text_element(name, &[], &format_w3c(date)),
        None => Ok(()),
    }
}

fn write_person(
    writer: &mut XmlWriter,
    element: &str,
    uri_element: &str,
    person: &Person,
) -> Result<()> {
    writer.start(element, &[])?;
    writer.optional_element("name", person.name.as_deref())?;
    writer.optional_element("email", person.email.as_deref())?;
    writer.optional_element(uri_element, person.uri.as_deref())?;
    generate_modules(&person.modules, registry(), writer)?;
    writer.end(element)
}

fn write_alternate_link(writer: &mut XmlWriter, link: Option<&str>) -> Result<()> {
    match link {
        Some(href) => writer.empty("link", &[("rel", "alternate"), ("href", href)]),
        None => Ok(()),
    }
}

/// Root attributes shared by both versions.
fn root_attributes<'a>(
    namespaces: &'a [(String, &'a str)],
    feed: &'a Feed,
    version: Option<&'a str>,
) -> Vec<(&'a str, &'a str)> {
    let mut attributes = Vec::new();
    if let Some(version) = version {
        attributes.push(("version", version));
    }
    attributes.extend(as_attributes(namespaces));
    if let Some(language) = feed.language.as_deref() {
        attributes.push(("xml:lang", language));
    }
    attributes
}

/// Writes Atom 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Atom10Generator;

impl Atom10Generator {
    fn write_text(writer: &mut XmlWriter, name: &str, content: &Content) -> Result<()> {
        let content_type = content.content_type.as_deref().unwrap_or("text");
        let value = content.value.as_deref().unwrap_or_default();
        let attributes = [("type", content_type)];
        if is_xml_type(content_type) {
            writer.raw_element(name, &attributes, value)
        } else {
            writer.text_element(name, &attributes, value)
        }
    }

    fn write_entry(writer: &mut XmlWriter, entry: &Entry) -> Result<()> {
        writer.start("entry", &[])?;
        writer.optional_element("title", entry.title.as_deref())?;
        write_alternate_link(writer, entry.link.as_deref())?;
        for enclosure in &entry.enclosures {
            let length = enclosure.length.map(|length| length.to_string());
            let mut attributes = vec![("rel", "enclosure"), ("href", enclosure.url.as_str())];
            if let Some(mime_type) = enclosure.mime_type.as_deref() {
                attributes.push(("type", mime_type));
            }
            if let Some(length) = length.as_deref() {
                attributes.push(("length", length));
            }
            writer.empty("link", &attributes)?;
        }
        writer.optional_element("id", entry.uri.as_deref())?;
        write_date(writer, "published", entry.published.as_ref())?;
        write_date(writer, "updated", entry.updated.as_ref())?;
        for person in &entry.authors {
            write_person(writer, "author", "uri", person)?;
        }
        for person in &entry.contributors {
            write_person(writer, "contributor", "uri", person)?;
        }
        for category in &entry.categories {
            let mut attributes = vec![("term", category.name.as_str())];
            if let Some(scheme) = category.domain.as_deref() {
                attributes.push(("scheme", scheme));
            }
            writer.empty("category", &attributes)?;
        }
        if let Some(summary) = &entry.description {
            Self::write_text(writer, "summary", summary)?;
        }
        if let Some(content) = &entry.content {
            Self::write_text(writer, "content", content)?;
        }
        generate_modules(&entry.modules, registry(), writer)?;
        writer.end("entry")
    }
}

impl FeedGenerator for Atom10Generator {
    fn feed_type(&self) -> FeedType {
        FeedType::Atom10
    }

    fn generate(&self, feed: &Feed) -> Result<String> {
        let namespaces = namespace_attributes(&[("", ATOM10_NS)], registry());

        let mut writer = XmlWriter::new();
        writer.declaration()?;
        writer.start("feed", &root_attributes(&namespaces, feed, None))?;

        writer.optional_element("title", feed.title.as_deref())?;
        writer.optional_element("subtitle", feed.description.as_deref())?;
        write_alternate_link(&mut writer, feed.link.as_deref())?;
        writer.optional_element("id", feed.uri.as_deref())?;
        writer.optional_element("rights", feed.copyright.as_deref())?;
        write_date(&mut writer, "updated", feed.updated.as_ref())?;
        for person in &feed.authors {
            write_person(&mut writer, "author", "uri", person)?;
        }
        generate_modules(&feed.modules, registry(), &mut writer)?;

        for entry in &feed.entries {
            Self::write_entry(&mut writer, entry)?;
        }

        writer.end("feed")?;
        writer.finish()
    }
}

/// Writes Atom 0.3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Atom03Generator;

impl Atom03Generator {
    fn write_content(writer: &mut XmlWriter, name: &str, content: &Content) -> Result<()> {
        let content_type = content.content_type.as_deref().unwrap_or("text/plain");
        let value = content.value.as_deref().unwrap_or_default();
        let mut attributes = vec![("type", content_type)];
        if let Some(mode) = content.mode.as_deref() {
            attributes.push(("mode", mode));
        }
        if is_inline_xml(content_type, content.mode.as_deref()) {
            writer.raw_element(name, &attributes, value)
        } else {
            writer.text_element(name, &attributes, value)
        }
    }

    fn write_entry(writer: &mut XmlWriter, entry: &Entry) -> Result<()> {
        writer.start("entry", &[])?;
        writer.optional_element("title", entry.title.as_deref())?;
        write_alternate_link(writer, entry.link.as_deref())?;
        writer.optional_element("id", entry.uri.as_deref())?;
        write_date(writer, "issued", entry.published.as_ref())?;
        write_date(writer, "modified", entry.updated.as_ref())?;
        for person in &entry.authors {
            write_person(writer, "author", "url", person)?;
        }
        for person in &entry.contributors {
            write_person(writer, "contributor", "url", person)?;
        }
        if let Some(summary) = &entry.description {
            Self::write_content(writer, "summary", summary)?;
        }
        if let Some(content) = &entry.content {
            Self::write_content(writer, "content", content)?;
        }
        generate_modules(&entry.modules, registry(), writer)?;
        writer.end("entry")
    }
}

impl FeedGenerator for Atom03Generator {
    fn feed_type(&self) -> FeedType {
        FeedType::Atom03
    }

    fn generate(&self, feed: &Feed) -> Result<String> {
        let namespaces = namespace_attributes(&[("", ATOM03_NS)], registry());

        let mut writer = XmlWriter::new();
        writer.declaration()?;
        writer.start("feed", &root_attributes(&namespaces, feed, Some("0.3")))?;

        writer.optional_element("title", feed.title.as_deref())?;
        writer.optional_element("tagline", feed.description.as_deref())?;
        write_alternate_link(&mut writer, feed.link.as_deref())?;
        writer.optional_element("id", feed.uri.as_deref())?;
        writer.optional_element("copyright", feed.copyright.as_deref())?;
        write_date(&mut writer, "modified", feed.updated.as_ref())?;
        for person in &feed.authors {
            write_person(&mut writer, "author", "url", person)?;
        }
        generate_modules(&feed.modules, registry(), &mut writer)?;

        for entry in &feed.entries {
            Self::write_entry(&mut writer, entry)?;
        }

        writer.end("feed")?;
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom10_xhtml_content_is_raw() {
        let mut feed = Feed::new(FeedType::Atom10);
        let mut entry = Entry::new();
        entry.content = Some(Content::new(
            "xhtml",
            r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>Hi</p></div>"#,
        ));
        entry.description = Some(Content::new("html", "<p>escaped</p>"));
        feed.entries.push(entry);

        let xml = Atom10Generator.generate(&feed).unwrap();
        assert!(xml.contains(
            r#"<content type="xhtml"><div xmlns="http://www.w3.org/1999/xhtml"><p>Hi</p></div></content>"#
        ));
        assert!(xml.contains(r#"<summary type="html">&lt;p&gt;escaped&lt;/p&gt;</summary>"#));
    }

    #[test]
    fn test_atom10_language_and_links() {
        let mut feed = Feed::new(FeedType::Atom10);
        feed.language = Some("nl".to_string());
        feed.link = Some("http://example.org/".to_string());
        let xml = Atom10Generator.generate(&feed).unwrap();
        assert!(xml.contains(r#"xml:lang="nl""#));
        assert!(xml.contains(r#"<link rel="alternate" href="http://example.org/"/>"#));
    }

    #[test]
    fn test_atom03_escaped_mode() {
        let mut feed = Feed::new(FeedType::Atom03);
        let mut entry = Entry::new();
        entry.content = Some(Content {
            content_type: Some("text/html".to_string()),
            value: Some("<p>x</p>".to_string()),
            mode: Some("escaped".to_string()),
        });
        feed.entries.push(entry);

        let xml = Atom03Generator.generate(&feed).unwrap();
        assert!(xml.contains(r#"<feed version="0.3""#));
        assert!(xml.contains(
            r#"<content type="text/html" mode="escaped">&lt;p&gt;x&lt;/p&gt;</content>"#
        ));
    }
}
