//! Parsing operations shared by the channel based dialects.
//!
//! RDF and `<rss>` dialects differ in where items live and in which
//! namespace their elements sit, but read the same core fields. Each
//! dialect calls these with its own namespace and applies its deltas.

use chrono::{DateTime, Utc};
use roxmltree::Node;

use super::context::ParseContext;
use super::feed_type::FeedType;
use crate::config::CONTENT_NS;
use crate::date::parse_date;
use crate::error::{FeedError, Result};
use crate::model::{Content, Entry, Feed};
use crate::module::parse_modules;
use crate::xml::{child_text, find_child, get_text};

/// Find the required `channel` element or fail with its path.
pub(crate) fn require_channel<'a, 'input>(
    root: Node<'a, 'input>,
    ns: Option<&str>,
    feed_type: FeedType,
) -> Result<Node<'a, 'input>> {
    find_child(root, "channel", ns).ok_or_else(|| {
        FeedError::parse(
            feed_type,
            format!("{}/channel", root.tag_name().name()),
            "missing required element",
        )
    })
}

/// Read a child element as a date, ignoring text that is not a date.
pub(crate) fn child_date(
    node: Node<'_, '_>,
    name: &str,
    ns: Option<&str>,
    ctx: &ParseContext<'_>,
) -> Option<DateTime<Utc>> {
    let text = child_text(node, name, ns)?;
    let date = parse_date(&text, ctx.locale);
    if date.is_none() {
        tracing::debug!(element = name, value = %text, "unparseable date ignored");
    }
    date
}

/// Title, link, description and modules of a channel.
pub(crate) fn parse_channel_common(
    channel: Node<'_, '_>,
    ns: Option<&str>,
    feed: &mut Feed,
    ctx: &ParseContext<'_>,
) -> Result<()> {
    feed.title = child_text(channel, "title", ns);
    feed.link = child_text(channel, "link", ns);
    feed.description = child_text(channel, "description", ns);
    feed.modules = parse_modules(channel, ctx)?;
    Ok(())
}

/// Title, link and modules of an item.
pub(crate) fn parse_item_common(
    item: Node<'_, '_>,
    ns: Option<&str>,
    ctx: &ParseContext<'_>,
) -> Result<Entry> {
    Ok(Entry {
        title: child_text(item, "title", ns),
        link: child_text(item, "link", ns),
        modules: parse_modules(item, ctx)?,
        ..Entry::default()
    })
}

/// The `content:encoded` body of an item, as HTML.
pub(crate) fn encoded_content(item: Node<'_, '_>) -> Option<Content> {
    find_child(item, "encoded", Some(CONTENT_NS)).map(|node| Content::new("html", get_text(node)))
}
