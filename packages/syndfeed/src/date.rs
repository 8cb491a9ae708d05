//! Date handling for feed documents.
//!
//! RSS channel-family dialects use RFC 822 dates, while RSS 1.0 modules and
//! Atom use W3C date-time (a profile of ISO 8601). Instants are held as
//! `DateTime<Utc>` values, which are `Copy`, so no caller can alias the
//! instant stored in an entity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::config::{validate_locale, DEFAULT_LOCALE};
use crate::error::{FeedError, Result};

/// Locale used for locale-sensitive text parsing.
///
/// Only RFC 822 dates are affected: some producers emit localized month
/// and weekday abbreviations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
}

impl Locale {
    /// Create a locale from a language tag.
    pub fn new(tag: &str) -> Result<Self> {
        validate_locale(tag)?;
        Ok(Self {
            tag: tag.replace('_', "-"),
        })
    }

    /// The full language tag (e.g., "en-US").
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The primary language subtag, lower-cased (e.g., "en").
    #[must_use]
    pub fn language(&self) -> String {
        self.tag
            .split('-')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            tag: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl FromStr for Locale {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

/// Weekday and month abbreviations of one language, mapped to English.
///
/// Kept apart because some languages reuse an abbreviation for both, such
/// as Spanish "mar" for martes and marzo.
struct LocalizedNames {
    language: &'static str,
    days: &'static [(&'static str, &'static str)],
    months: &'static [(&'static str, &'static str)],
}

const LOCALIZED_NAMES: &[LocalizedNames] = &[
    LocalizedNames {
        language: "de",
        days: &[
            ("Mo", "Mon"),
            ("Di", "Tue"),
            ("Mi", "Wed"),
            ("Do", "Thu"),
            ("Fr", "Fri"),
            ("Sa", "Sat"),
            ("So", "Sun"),
        ],
        months: &[
            ("Mär", "Mar"),
            ("Mrz", "Mar"),
            ("Mai", "May"),
            ("Okt", "Oct"),
            ("Dez", "Dec"),
        ],
    },
    LocalizedNames {
        language: "fr",
        days: &[
            ("lun.", "Mon"),
            ("mar.", "Tue"),
            ("mer.", "Wed"),
            ("jeu.", "Thu"),
            ("ven.", "Fri"),
            ("sam.", "Sat"),
            ("dim.", "Sun"),
        ],
        months: &[
            ("janv.", "Jan"),
            ("févr.", "Feb"),
            ("mars", "Mar"),
            ("avr.", "Apr"),
            ("mai", "May"),
            ("juin", "Jun"),
            ("juil.", "Jul"),
            ("août", "Aug"),
            ("sept.", "Sep"),
            ("oct.", "Oct"),
            ("nov.", "Nov"),
            ("déc.", "Dec"),
        ],
    },
    LocalizedNames {
        language: "es",
        days: &[
            ("lun", "Mon"),
            ("mar", "Tue"),
            ("mié", "Wed"),
            ("jue", "Thu"),
            ("vie", "Fri"),
            ("sáb", "Sat"),
            ("dom", "Sun"),
        ],
        months: &[
            ("ene", "Jan"),
            ("mar", "Mar"),
            ("abr", "Apr"),
            ("ago", "Aug"),
            ("dic", "Dec"),
        ],
    },
    LocalizedNames {
        language: "nl",
        days: &[
            ("ma", "Mon"),
            ("di", "Tue"),
            ("wo", "Wed"),
            ("do", "Thu"),
            ("vr", "Fri"),
            ("za", "Sat"),
            ("zo", "Sun"),
        ],
        months: &[("mrt", "Mar"), ("mei", "May"), ("okt", "Oct")],
    },
];

/// RFC 822 variants chrono's strict RFC 2822 parser rejects.
const RFC822_FORMATS: &[&str] = &[
    "%a, %d %b %Y %H:%M %z",
    "%d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M %z",
    "%a, %d %b %y %H:%M:%S %z",
    "%d %b %y %H:%M:%S %z",
];

/// W3C-DTF forms with a time component and explicit offset.
const W3C_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

/// Parse an RFC 822 date, as used by the RSS channel family.
///
/// Returns `None` when the text is not a recognisable date.
///
/// # Examples
/// ```
/// use syndfeed::date::{parse_rfc822, Locale};
///
/// let date = parse_rfc822("Mon, 01 Jan 2001 00:00:00 GMT", &Locale::default());
/// assert!(date.is_some());
/// ```
pub fn parse_rfc822(text: &str, locale: &Locale) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(date) = try_rfc822(text) {
        return Some(date);
    }

    let translated = translate_names(text, locale)?;
    try_rfc822(&translated)
}

fn try_rfc822(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }

    RFC822_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
        .map(|date| date.with_timezone(&Utc))
}

/// Replace localized month and weekday names with their English form.
///
/// The weekday is the leading token ending in a comma and the month is the
/// token after the day of the month, so each is looked up in its own table.
/// Returns `None` when the locale has no table or nothing was replaced.
fn translate_names(text: &str, locale: &Locale) -> Option<String> {
    let language = locale.language();
    let names = LOCALIZED_NAMES.iter().find(|names| names.language == language)?;

    let mut tokens: Vec<String> = text.split_whitespace().map(String::from).collect();
    let mut changed = false;

    if let Some(first) = tokens.first_mut() {
        let english = first
            .strip_suffix(',')
            .and_then(|word| lookup_name(names.days, word));
        if let Some(english) = english {
            *first = format!("{english},");
            changed = true;
        }
    }

    let day_of_month = tokens
        .iter()
        .position(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()));
    if let Some(month) = day_of_month.and_then(|index| tokens.get_mut(index + 1)) {
        if let Some(english) = lookup_name(names.months, month.as_str()) {
            *month = english.to_string();
            changed = true;
        }
    }

    changed.then(|| tokens.join(" "))
}

fn lookup_name(table: &[(&'static str, &'static str)], word: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(local, _)| local.eq_ignore_ascii_case(word))
        .map(|(_, english)| *english)
}

/// Parse a W3C date-time, as used by Atom and the RSS 1.0 modules.
///
/// Accepts full RFC 3339 timestamps as well as the reduced W3C-DTF forms
/// (minutes precision, date only, year-month and year).
///
/// # Examples
/// ```
/// use syndfeed::date::parse_w3c;
///
/// assert!(parse_w3c("2001-01-01T00:00+00:00").is_some());
/// assert!(parse_w3c("2001-01-01").is_some());
/// assert!(parse_w3c("yesterday").is_none());
/// ```
pub fn parse_w3c(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }

    // chrono's %:z does not accept a literal "Z"
    let normalized = match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(base) => format!("{base}+00:00"),
        None => text.to_string(),
    };
    if let Some(date) = W3C_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&normalized, format).ok())
    {
        return Some(date.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("{text}-01-01"), "%Y-%m-%d"))
        .ok()?;
    midnight_utc(date)
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    let naive: NaiveDateTime = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Parse a date in either W3C or RFC 822 form.
pub fn parse_date(text: &str, locale: &Locale) -> Option<DateTime<Utc>> {
    parse_w3c(text).or_else(|| parse_rfc822(text, locale))
}

/// Format an instant as an RFC 822 date for RSS output.
#[must_use]
pub fn format_rfc822(date: &DateTime<Utc>) -> String {
    date.to_rfc2822()
}

/// Format an instant as a W3C date-time for Atom and module output.
#[must_use]
pub fn format_w3c(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
