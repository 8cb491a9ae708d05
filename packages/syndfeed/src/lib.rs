//! syndfeed - Parse RSS and Atom feeds into one model and generate them back.
//!
//! Ten dialects are supported: RSS 0.90, 0.91 (Netscape and Userland),
//! 0.92, 0.93, 0.94, 1.0 and 2.0, plus Atom 0.3 and 1.0. Extension
//! namespaces such as Dublin Core and Syndication are handled by modules
//! attached to feeds, entries and persons.
//!
//! # Example
//!
//! ```
//! use syndfeed::{FeedInput, FeedOutput, FeedType};
//!
//! let xml = r#"<rss version="2.0"><channel><title>Example</title></channel></rss>"#;
//! let feed = FeedInput::default().parse_str(xml).unwrap();
//! assert_eq!(feed.feed_type, FeedType::Rss20);
//!
//! let atom = FeedOutput::new(FeedType::Atom10).output_string(&feed).unwrap();
//! assert!(atom.contains("<title>Example</title>"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespace constants, parser options and validation
//! - [`date`]: RFC 822 and W3C date-time parsing and formatting
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML navigation and writing utilities
//! - [`model`]: Feed, entry, person and content types
//! - [`module`]: Module contracts, registry, codecs and built-in modules
//! - [`dialect`]: Dialect parsers and the dispatcher that selects them
//! - [`generator`]: Dialect generators
//! - [`io`]: Whole-feed input and output
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod date;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod io;
pub mod model;
pub mod module;
pub mod xml;

// Re-export commonly used items
pub use date::Locale;
pub use dialect::{dispatcher, FeedType, ParseContext};
pub use error::{FeedError, Result};
pub use generator::{generator_for, FeedGenerator};
pub use io::{feed_to_yaml, FeedInput, FeedOutput};
pub use model::{Category, Content, Entry, Feed, Person};
pub use module::{registry, Extendable, Module, ModuleList, ModuleRegistry};
