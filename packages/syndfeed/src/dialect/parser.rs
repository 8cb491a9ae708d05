//! Parser trait implemented by every dialect.

use roxmltree::Document;

use super::context::ParseContext;
use super::feed_type::FeedType;
use crate::error::Result;
use crate::model::Feed;

/// A parser for one concrete dialect.
///
/// Specialized dialects hold the parser of the dialect they extend and
/// call it for the shared fields before applying their own deltas.
pub trait DialectParser: Send + Sync {
    /// The dialect this parser produces.
    fn feed_type(&self) -> FeedType;

    /// Check whether the document is in this parser's dialect.
    ///
    /// Looks only at the root element, its namespace, its children and the
    /// prolog; never fails.
    fn detect(&self, document: &Document<'_>) -> bool;

    /// Build a feed from a document this parser detected.
    ///
    /// # Errors
    /// `Parse` if required structure is missing, or a module error raised
    /// by a module codec.
    fn parse(&self, document: &Document<'_>, ctx: &ParseContext<'_>) -> Result<Feed>;
}
