use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Entry, Person};
use crate::dialect::FeedType;
use crate::module::{Extendable, ModuleList};

/// A parsed feed in any dialect.
///
/// `feed_type` records the dialect the feed was read from, or the dialect a
/// programmatically built feed is meant for. Entries keep document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feed {
    pub feed_type: FeedType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Channel description, or Atom subtitle / tagline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Resource identifier: channel `rdf:about` or Atom `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Copyright or Atom rights.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Person>,

    pub entries: Vec<Entry>,

    #[serde(skip_serializing_if = "ModuleList::is_empty")]
    pub modules: ModuleList,
}

impl Feed {
    /// Create an empty feed of the given dialect.
    #[must_use]
    pub fn new(feed_type: FeedType) -> Self {
        Self {
            feed_type,
            title: None,
            link: None,
            description: None,
            uri: None,
            language: None,
            copyright: None,
            published: None,
            updated: None,
            authors: Vec::new(),
            entries: Vec::new(),
            modules: ModuleList::new(),
        }
    }
}

impl Extendable for Feed {
    fn modules(&self) -> &ModuleList {
        &self.modules
    }

    fn modules_mut(&mut self) -> &mut ModuleList {
        &mut self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{DcModule, SyModule, DC_URI, SY_URI};
    use chrono::TimeZone;

    #[test]
    fn test_attach_and_lookup_modules() {
        let mut feed = Feed::new(FeedType::Rss10);

        let mut dc = DcModule::default();
        dc.date = Some(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap());
        feed.attach(Box::new(dc));

        let mut sy = SyModule::default();
        sy.set_update_period("hourly").unwrap();
        feed.attach(Box::new(sy));

        let dc = feed.module_as::<DcModule>(DC_URI).unwrap();
        assert_eq!(dc.date, Some(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap()));
        assert!(feed.module(SY_URI).is_some());
        assert!(feed.module("urn:absent").is_none());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut feed = Feed::new(FeedType::Atom10);
        feed.title = Some("Original".to_string());
        let mut entry = Entry::new();
        entry.authors.push(Person::named("Alice"));
        feed.entries.push(entry);
        feed.attach(Box::new(DcModule::default()));

        let mut copy = feed.clone();
        assert_eq!(copy, feed);

        copy.entries[0].authors[0].name = Some("Bob".to_string());
        copy.modules
            .find_mut(DC_URI)
            .unwrap()
            .set_property("creator", "Bob".into())
            .unwrap();

        assert_ne!(copy, feed);
        assert_eq!(feed.entries[0].authors[0].name.as_deref(), Some("Alice"));
        assert!(feed.module_as::<DcModule>(DC_URI).unwrap().creator.is_none());
    }

    #[test]
    fn test_date_values_are_not_aliased() {
        let mut feed = Feed::new(FeedType::Rss20);
        feed.published = Some(Utc.with_ymd_and_hms(2020, 5, 1, 8, 0, 0).unwrap());

        let mut taken = feed.published.unwrap();
        taken += chrono::Duration::days(1);

        assert_ne!(feed.published, Some(taken));
        assert_eq!(
            feed.published,
            Some(Utc.with_ymd_and_hms(2020, 5, 1, 8, 0, 0).unwrap())
        );
    }
}
