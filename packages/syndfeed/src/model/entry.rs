use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Category, Content, Description, Enclosure, Person};
use crate::module::{Extendable, ModuleList};

/// One item of a feed.
///
/// `description` is the summary and `content` the full body; dialects that
/// carry only one of them leave the other empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Resource identifier: `rdf:about`, RSS `guid` or Atom `id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Person>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Person>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enclosures: Vec<Enclosure>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "ModuleList::is_empty")]
    pub modules: ModuleList,
}

impl Entry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Extendable for Entry {
    fn modules(&self) -> &ModuleList {
        &self.modules
    }

    fn modules_mut(&mut self) -> &mut ModuleList {
        &mut self.modules
    }
}
