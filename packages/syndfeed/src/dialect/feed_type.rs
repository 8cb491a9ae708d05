//! The closed set of supported dialects.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::FeedError;

/// A concrete syndication dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeedType {
    /// RSS 0.90, RDF based (Netscape).
    #[serde(rename = "rss_0.9")]
    Rss090,

    /// RSS 1.0, RDF based (RSS-DEV).
    #[serde(rename = "rss_1.0")]
    Rss10,

    /// RSS 0.91 as published by Netscape, with its DOCTYPE.
    #[serde(rename = "rss_0.91N")]
    Rss091Netscape,

    /// RSS 0.91 as published by UserLand.
    #[serde(rename = "rss_0.91U")]
    Rss091Userland,

    #[serde(rename = "rss_0.92")]
    Rss092,

    #[serde(rename = "rss_0.93")]
    Rss093,

    #[serde(rename = "rss_0.94")]
    Rss094,

    #[serde(rename = "rss_2.0")]
    Rss20,

    #[serde(rename = "atom_1.0")]
    Atom10,

    #[serde(rename = "atom_0.3")]
    Atom03,
}

impl FeedType {
    /// Every dialect, in dispatch priority order.
    pub const ALL: [FeedType; 10] = [
        Self::Rss10,
        Self::Rss090,
        Self::Rss091Netscape,
        Self::Rss091Userland,
        Self::Rss092,
        Self::Rss093,
        Self::Rss094,
        Self::Rss20,
        Self::Atom10,
        Self::Atom03,
    ];

    /// Get the dialect tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rss090 => "rss_0.9",
            Self::Rss10 => "rss_1.0",
            Self::Rss091Netscape => "rss_0.91N",
            Self::Rss091Userland => "rss_0.91U",
            Self::Rss092 => "rss_0.92",
            Self::Rss093 => "rss_0.93",
            Self::Rss094 => "rss_0.94",
            Self::Rss20 => "rss_2.0",
            Self::Atom10 => "atom_1.0",
            Self::Atom03 => "atom_0.3",
        }
    }

    /// The dialect whose shape this dialect narrows, if any.
    ///
    /// A document detected as the specialized dialect is always also
    /// detected as its generalization.
    #[must_use]
    pub fn generalization(&self) -> Option<FeedType> {
        match self {
            Self::Rss10 => Some(Self::Rss090),
            Self::Rss091Netscape => Some(Self::Rss091Userland),
            _ => None,
        }
    }

    /// Value of the `version` attribute on an `<rss>` root.
    #[must_use]
    pub fn rss_version(&self) -> Option<&'static str> {
        match self {
            Self::Rss091Netscape | Self::Rss091Userland => Some("0.91"),
            Self::Rss092 => Some("0.92"),
            Self::Rss093 => Some("0.93"),
            Self::Rss094 => Some("0.94"),
            Self::Rss20 => Some("2.0"),
            _ => None,
        }
    }

    /// Position in the `<rss>` family, used to gate features by revision.
    #[must_use]
    pub(crate) fn rss_revision(&self) -> Option<u8> {
        match self {
            Self::Rss091Netscape | Self::Rss091Userland => Some(91),
            Self::Rss092 => Some(92),
            Self::Rss093 => Some(93),
            Self::Rss094 => Some(94),
            Self::Rss20 => Some(200),
            _ => None,
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedType {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|feed_type| feed_type.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FeedError::UnknownFeedType(s.to_string()))
    }
}
