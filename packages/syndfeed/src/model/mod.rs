//! The normalized feed model shared by every dialect.

mod content;
mod entry;
mod feed;
mod person;

pub use content::{Category, Content, Description, Enclosure};
pub use entry::Entry;
pub use feed::Feed;
pub use person::Person;
