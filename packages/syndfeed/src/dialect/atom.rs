//! Atom 1.0 and its predecessor Atom 0.3.
//!
//! Both versions share person, link and category handling; they differ
//! in element names for dates and descriptions and in how content is
//! encoded.

use roxmltree::{Document, Node};

use super::common::child_date;
use super::context::ParseContext;
use super::feed_type::FeedType;
use super::parser::DialectParser;
use crate::config::{ATOM03_NS, ATOM10_NS, XML_NS};
use crate::error::Result;
use crate::model::{Category, Content, Enclosure, Entry, Feed, Person};
use crate::module::parse_modules;
use crate::xml::{
    child_text, find_child, find_children, get_attribute, get_text, inner_xml, is_element,
};

/// Read the persons under elements named `name`.
///
/// Atom 1.0 calls the home page `uri`, Atom 0.3 calls it `url`.
fn parse_persons(
    parent: Node<'_, '_>,
    name: &'static str,
    ns: &'static str,
    uri_element: &str,
    ctx: &ParseContext<'_>,
) -> Result<Vec<Person>> {
    find_children(parent, name, Some(ns))
        .map(|node| {
            Ok(Person {
                name: child_text(node, "name", Some(ns)),
                email: child_text(node, "email", Some(ns)),
                uri: child_text(node, uri_element, Some(ns)),
                modules: parse_modules(node, ctx)?,
            })
        })
        .collect()
}

/// The `href` of the first alternate link; a link without `rel` is alternate.
fn alternate_link(parent: Node<'_, '_>, ns: &'static str) -> Option<String> {
    find_children(parent, "link", Some(ns))
        .find(|link| get_attribute(*link, "rel", None).is_none_or(|rel| rel == "alternate"))
        .and_then(|link| get_attribute(link, "href", None))
        .map(String::from)
}

/// Read an Atom 1.0 text construct or content element.
///
/// XHTML and XML media types are kept as markup; text and HTML are
/// unescaped text.
fn text_construct(node: Node<'_, '_>) -> Content {
    let content_type = get_attribute(node, "type", None).unwrap_or("text");
    let value = if is_xml_type(content_type) {
        inner_xml(node).to_string()
    } else {
        get_text(node)
    };
    Content {
        content_type: Some(content_type.to_string()),
        value: Some(value),
        mode: None,
    }
}

/// Check whether a media type names XML content carried inline.
pub(crate) fn is_xml_type(content_type: &str) -> bool {
    content_type == "xhtml" || content_type.ends_with("+xml") || content_type.ends_with("/xml")
}

/// Check whether Atom 0.3 content is carried as inline markup.
///
/// An explicit `mode` decides; without one the media type does.
pub(crate) fn is_inline_xml(content_type: &str, mode: Option<&str>) -> bool {
    match mode {
        Some(mode) => mode == "xml",
        None => is_xml_type(content_type),
    }
}

/// Read an Atom 0.3 content element, honouring its `mode`.
fn mode_content(node: Node<'_, '_>) -> Content {
    let content_type = get_attribute(node, "type", None).unwrap_or("text/plain");
    let mode = get_attribute(node, "mode", None);
    let value = if is_inline_xml(content_type, mode) {
        inner_xml(node).to_string()
    } else {
        get_text(node)
    };
    Content {
        content_type: Some(content_type.to_string()),
        value: Some(value),
        mode: mode.map(String::from),
    }
}

/// Parser for Atom 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Atom10Parser;

impl Atom10Parser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parse_entry(node: Node<'_, '_>, ctx: &ParseContext<'_>) -> Result<Entry> {
        let ns = Some(ATOM10_NS);
        Ok(Entry {
            title: child_text(node, "title", ns),
            link: alternate_link(node, ATOM10_NS),
            uri: child_text(node, "id", ns),
            description: find_child(node, "summary", ns).map(text_construct),
            content: find_child(node, "content", ns).map(text_construct),
            authors: parse_persons(node, "author", ATOM10_NS, "uri", ctx)?,
            contributors: parse_persons(node, "contributor", ATOM10_NS, "uri", ctx)?,
            categories: find_children(node, "category", ns)
                .filter_map(|category| {
                    Some(Category {
                        name: get_attribute(category, "term", None)?.to_string(),
                        domain: get_attribute(category, "scheme", None).map(String::from),
                    })
                })
                .collect(),
            enclosures: find_children(node, "link", ns)
                .filter(|link| get_attribute(*link, "rel", None) == Some("enclosure"))
                .filter_map(|link| {
                    Some(Enclosure {
                        url: get_attribute(link, "href", None)?.to_string(),
                        length: get_attribute(link, "length", None)
                            .and_then(|length| length.trim().parse().ok()),
                        mime_type: get_attribute(link, "type", None).map(String::from),
                    })
                })
                .collect(),
            published: child_date(node, "published", ns, ctx),
            updated: child_date(node, "updated", ns, ctx),
            modules: parse_modules(node, ctx)?,
        })
    }
}

impl DialectParser for Atom10Parser {
    fn feed_type(&self) -> FeedType {
        FeedType::Atom10
    }

    fn detect(&self, document: &Document<'_>) -> bool {
        is_element(document.root_element(), "feed", Some(ATOM10_NS))
    }

    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        let root = document.root_element();
        let ns = Some(ATOM10_NS);

        let mut feed = Feed::new(FeedType::Atom10);
        feed.title = child_text(root, "title", ns);
        feed.link = alternate_link(root, ATOM10_NS);
        feed.description = child_text(root, "subtitle", ns);
        feed.uri = child_text(root, "id", ns);
        feed.language = get_attribute(root, "lang", Some(XML_NS)).map(String::from);
        feed.copyright = child_text(root, "rights", ns);
        feed.updated = child_date(root, "updated", ns, ctx);
        feed.authors = parse_persons(root, "author", ATOM10_NS, "uri", ctx)?;
        feed.modules = parse_modules(root, ctx)?;

        for entry in find_children(root, "entry", ns) {
            feed.entries.push(Self::parse_entry(entry, ctx)?);
        }
        Ok(feed)
    }
}

/// Parser for Atom 0.3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Atom03Parser;

impl Atom03Parser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn parse_entry(node: Node<'_, '_>, ctx: &ParseContext<'_>) -> Result<Entry> {
        let ns = Some(ATOM03_NS);
        Ok(Entry {
            title: child_text(node, "title", ns),
            link: alternate_link(node, ATOM03_NS),
            uri: child_text(node, "id", ns),
            description: find_child(node, "summary", ns).map(mode_content),
            content: find_child(node, "content", ns).map(mode_content),
            authors: parse_persons(node, "author", ATOM03_NS, "url", ctx)?,
            contributors: parse_persons(node, "contributor", ATOM03_NS, "url", ctx)?,
            published: child_date(node, "issued", ns, ctx),
            updated: child_date(node, "modified", ns, ctx),
            modules: parse_modules(node, ctx)?,
            ..Entry::default()
        })
    }
}

impl DialectParser for Atom03Parser {
    fn feed_type(&self) -> FeedType {
        FeedType::Atom03
    }

    fn detect(&self, document: &Document<'_>) -> bool {
        is_element(document.root_element(), "feed", Some(ATOM03_NS))
    }

    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        let root = document.root_element();
        let ns = Some(ATOM03_NS);

        let mut feed = Feed::new(FeedType::Atom03);
        feed.title = child_text(root, "title", ns);
        feed.link = alternate_link(root, ATOM03_NS);
        feed.description = child_text(root, "tagline", ns);
        feed.uri = child_text(root, "id", ns);
        feed.language = get_attribute(root, "lang", Some(XML_NS)).map(String::from);
        feed.copyright = child_text(root, "copyright", ns);
        feed.updated = child_date(root, "modified", ns, ctx);
        feed.authors = parse_persons(root, "author", ATOM03_NS, "url", ctx)?;
        feed.modules = parse_modules(root, ctx)?;

        for entry in find_children(root, "entry", ns) {
            feed.entries.push(Self::parse_entry(entry, ctx)?);
        }
        Ok(feed)
    }
}
