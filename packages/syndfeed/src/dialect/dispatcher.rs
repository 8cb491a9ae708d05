//! Selects the parser for a document.

use std::sync::LazyLock;

use roxmltree::Document;

use super::atom::{Atom03Parser, Atom10Parser};
use super::context::ParseContext;
use super::feed_type::FeedType;
use super::parser::DialectParser;
use super::rdf::{Rss090Parser, Rss10Parser};
use super::rss::{
    Rss091NetscapeParser, Rss091UserlandParser, Rss092Parser, Rss093Parser, Rss094Parser,
    Rss20Parser,
};
use crate::error::{FeedError, Result};
use crate::model::Feed;
use crate::xml::{get_tag_name, namespace_of};

/// Ordered list of dialect parsers.
///
/// Parsers are tried in registration order and the first whose `detect`
/// succeeds parses the document. A specialized dialect must be registered
/// before the dialect it narrows.
pub struct FeedDispatcher {
    parsers: Vec<Box<dyn DialectParser>>,
}

impl FeedDispatcher {
    /// Create a dispatcher with no parsers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Append a parser at the lowest priority.
    pub fn register(&mut self, parser: impl DialectParser + 'static) {
        self.parsers.push(Box::new(parser));
    }

    /// Feed types in detection order.
    #[must_use]
    pub fn feed_types(&self) -> Vec<FeedType> {
        self.parsers.iter().map(|parser| parser.feed_type()).collect()
    }

    /// Get the registered parser for a dialect.
    #[must_use]
    pub fn parser(&self, feed_type: FeedType) -> Option<&dyn DialectParser> {
        self.parsers
            .iter()
            .find(|parser| parser.feed_type() == feed_type)
            .map(|parser| parser.as_ref())
    }

    /// Find the first parser that recognises the document.
    #[must_use]
    pub fn detect(&self, document: &Document<'_>) -> Option<&dyn DialectParser> {
        self.parsers
            .iter()
            .find(|parser| parser.detect(document))
            .map(|parser| parser.as_ref())
    }

    /// Parse a document with the first parser that recognises it.
    ///
    /// Once a parser has claimed the document its result is final: a parse
    /// failure is returned as is and no later parser is tried.
    ///
    /// # Errors
    /// `UnrecognizedFormat` if no parser claims the document, otherwise
    /// whatever the selected parser reports.
    pub fn resolve(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed> {
        let root = document.root_element();
        let Some(parser) = self.detect(document) else {
            tracing::debug!(
                root = get_tag_name(root),
                namespace = namespace_of(root).unwrap_or_default(),
                "no dialect parser matched"
            );
            return Err(FeedError::UnrecognizedFormat {
                root: get_tag_name(root).to_string(),
                namespace: namespace_of(root).map(String::from),
            });
        };

        tracing::debug!(feed_type = %parser.feed_type(), "dialect resolved");
        parser.parse(document, ctx)
    }
}

impl Default for FeedDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a dispatcher with every supported dialect in priority order.
#[must_use]
pub fn create_default_dispatcher() -> FeedDispatcher {
    let mut dispatcher = FeedDispatcher::new();

    // RDF: 1.0 narrows 0.90
    dispatcher.register(Rss10Parser::new());
    dispatcher.register(Rss090Parser::new());

    // <rss>: Netscape narrows UserLand 0.91
    dispatcher.register(Rss091NetscapeParser::new());
    dispatcher.register(Rss091UserlandParser::new());
    dispatcher.register(Rss092Parser::new());
    dispatcher.register(Rss093Parser::new());
    dispatcher.register(Rss094Parser::new());
    dispatcher.register(Rss20Parser::new());

    dispatcher.register(Atom10Parser::new());
    dispatcher.register(Atom03Parser::new());

    dispatcher
}

static DISPATCHER: LazyLock<FeedDispatcher> = LazyLock::new(create_default_dispatcher);

/// The process-wide dispatcher with every supported dialect.
#[must_use]
pub fn dispatcher() -> &'static FeedDispatcher {
    &DISPATCHER
}
