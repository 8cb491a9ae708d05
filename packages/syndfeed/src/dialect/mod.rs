//! Dialect detection and parsing.
//!
//! Every supported dialect has a [`DialectParser`]. Dialects that extend
//! another hold the parser they extend and layer their own fields on top
//! of its result. The [`FeedDispatcher`] tries the parsers in a fixed
//! priority order and hands the document to the first that claims it.

pub(crate) mod atom;
mod common;
mod context;
mod dispatcher;
mod feed_type;
mod parser;
mod rdf;
mod rss;

pub use atom::{Atom03Parser, Atom10Parser};
pub use context::ParseContext;
pub use dispatcher::{create_default_dispatcher, dispatcher, FeedDispatcher};
pub use feed_type::FeedType;
pub use parser::DialectParser;
pub use rdf::{Rss090Parser, Rss10Parser};
pub use rss::{
    Rss091NetscapeParser, Rss091UserlandParser, Rss092Parser, Rss093Parser, Rss094Parser,
    Rss20Parser,
};
