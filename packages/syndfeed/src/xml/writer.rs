//! Indenting XML writer used by the feed generators.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{FeedError, Result};

/// Thin wrapper over `quick_xml::Writer` with element-level helpers.
pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    /// Create a writer that indents nested elements by two spaces.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        }
    }

    fn write(&mut self, event: Event<'_>, what: &str) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| FeedError::XmlWrite(format!("{what}: {e}")))
    }

    /// Write the `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub fn declaration(&mut self) -> Result<()> {
        self.write(
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
            "XML declaration",
        )
    }

    /// Write a DOCTYPE declaration; `content` is everything after `<!DOCTYPE `.
    pub fn doctype(&mut self, content: &str) -> Result<()> {
        self.write(
            Event::DocType(BytesText::from_escaped(content)),
            "DOCTYPE",
        )
    }

    /// Write a start tag with attributes.
    pub fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attribute in attributes {
            start.push_attribute(*attribute);
        }
        self.write(Event::Start(start), name)
    }

    /// Write an end tag.
    pub fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)), name)
    }

    /// Write an empty element with attributes.
    pub fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attribute in attributes {
            start.push_attribute(*attribute);
        }
        self.write(Event::Empty(start), name)
    }

    /// Write an element containing escaped text.
    pub fn text_element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attributes)?;
        self.write(Event::Text(BytesText::new(text)), name)?;
        self.end(name)
    }

    /// Write an element only if a value is present.
    pub fn optional_element(&mut self, name: &str, text: Option<&str>) -> Result<()> {
        match text {
            Some(text) => self.text_element(name, &[], text),
            None => Ok(()),
        }
    }

    /// Write an element whose content is already-serialized markup.
    pub fn raw_element(&mut self, name: &str, attributes: &[(&str, &str)], markup: &str) -> Result<()> {
        self.start(name, attributes)?;
        self.write(Event::Text(BytesText::from_escaped(markup)), name)?;
        self.end(name)
    }

    /// Finish writing and return the document text.
    pub fn finish(self) -> Result<String> {
        let bytes = self.writer.into_inner().into_inner();
        String::from_utf8(bytes)
            .map_err(|e| FeedError::XmlWrite(format!("generated document is not UTF-8: {e}")))
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element_escapes() {
        let mut writer = XmlWriter::new();
        writer.text_element("title", &[], "a < b & c").unwrap();
        assert_eq!(writer.finish().unwrap(), "<title>a &lt; b &amp; c</title>");
    }

    #[test]
    fn test_optional_element_skips_none() {
        let mut writer = XmlWriter::new();
        writer.optional_element("title", None).unwrap();
        assert_eq!(writer.finish().unwrap(), "");
    }

    #[test]
    fn test_raw_element_is_verbatim() {
        let mut writer = XmlWriter::new();
        writer
            .raw_element("content", &[("type", "xhtml")], "<div>x &amp; y</div>")
            .unwrap();
        assert_eq!(
            writer.finish().unwrap(),
            r#"<content type="xhtml"><div>x &amp; y</div></content>"#
        );
    }

    #[test]
    fn test_nested_output_parses_back() {
        let mut writer = XmlWriter::new();
        writer.declaration().unwrap();
        writer.start("rss", &[("version", "2.0")]).unwrap();
        writer.start("channel", &[]).unwrap();
        writer.text_element("title", &[], "Example").unwrap();
        writer.empty("enclosure", &[("url", "http://example.com/a.mp3")]).unwrap();
        writer.end("channel").unwrap();
        writer.end("rss").unwrap();
        let xml = writer.finish().unwrap();

        let doc = roxmltree::Document::parse(&xml).unwrap();
        assert_eq!(doc.root_element().attribute("version"), Some("2.0"));
        assert!(xml.contains("<title>Example</title>"));
    }
}
