//! Reading and writing whole feeds.
//!
//! [`FeedInput`] turns XML text into a [`Feed`] through the default
//! dispatcher; [`FeedOutput`] writes a feed in a chosen dialect.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use roxmltree::Document;

use crate::config::parsing_options;
use crate::date::Locale;
use crate::dialect::{dispatcher, FeedType, ParseContext};
use crate::error::{FeedError, Result};
use crate::generator::generator_for;
use crate::model::Feed;
use crate::xml::{get_tag_name, namespace_of};

/// Parses feed documents of any supported dialect.
#[derive(Debug, Clone, Default)]
pub struct FeedInput {
    locale: Locale,
}

impl FeedInput {
    /// Create an input using `locale` for date text.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// The locale dates are read with.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Parse XML text into a feed.
    ///
    /// # Errors
    /// `XmlParse` for malformed XML, `UnrecognizedFormat` when no dialect
    /// claims the document, `Parse` when the claiming dialect rejects it.
    pub fn parse_str(&self, xml: &str) -> Result<Feed> {
        let document = Document::parse_with_options(xml, parsing_options())?;
        self.parse_document(&document)
    }

    /// Parse an already-built document.
    ///
    /// # Errors
    /// Same as [`FeedInput::parse_str`], minus XML syntax errors.
    pub fn parse_document(&self, document: &Document<'_>) -> Result<Feed> {
        dispatcher().resolve(document, &ParseContext::new(&self.locale))
    }

    /// Read and parse a feed file.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`FeedInput::parse_str`].
    pub fn parse_file(&self, path: &Path) -> Result<Feed> {
        let xml = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = xml.len(), "read feed file");
        self.parse_str(&xml)
    }

    /// Name the dialect of a document without parsing it.
    ///
    /// # Errors
    /// `XmlParse` for malformed XML, `UnrecognizedFormat` when no dialect
    /// claims the document.
    pub fn detect(xml: &str) -> Result<FeedType> {
        let document = Document::parse_with_options(xml, parsing_options())?;
        match dispatcher().detect(&document) {
            Some(parser) => Ok(parser.feed_type()),
            None => {
                let root = document.root_element();
                Err(FeedError::UnrecognizedFormat {
                    root: get_tag_name(root).to_string(),
                    namespace: namespace_of(root).map(String::from),
                })
            }
        }
    }
}

/// Render a feed as a YAML document.
///
/// Module instances appear under their contract URI with their non-null
/// properties.
///
/// # Errors
/// `YamlSerialization` if the feed cannot be serialized.
pub fn feed_to_yaml(feed: &Feed) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(feed)?;
    let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Writes feeds in one dialect.
#[derive(Debug, Clone, Copy)]
pub struct FeedOutput {
    feed_type: FeedType,
}

impl FeedOutput {
    #[must_use]
    pub fn new(feed_type: FeedType) -> Self {
        Self { feed_type }
    }

    #[must_use]
    pub fn feed_type(&self) -> FeedType {
        self.feed_type
    }

    /// Serialize a feed as XML text.
    ///
    /// The feed is written in this output's dialect regardless of the
    /// dialect it was parsed from.
    ///
    /// # Errors
    /// `XmlWrite` if serialization fails.
    pub fn output_string(&self, feed: &Feed) -> Result<String> {
        if feed.feed_type != self.feed_type {
            tracing::debug!(
                from = %feed.feed_type,
                to = %self.feed_type,
                "converting feed between dialects"
            );
        }
        generator_for(self.feed_type).generate(feed)
    }

    /// Serialize a feed into a file.
    ///
    /// Writes to a temporary file next to `path` and renames it into place,
    /// so an existing file is never left half-written.
    ///
    /// # Errors
    /// `Io` if the file cannot be written, `XmlWrite` if serialization fails.
    pub fn output_file(&self, feed: &Feed, path: &Path) -> Result<PathBuf> {
        let content = self.output_string(feed)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "feed.xml".to_string());
        let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

        {
            let mut file = File::create(&temp_file)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        // On Windows, rename fails if the destination already exists
        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(path)?;
        }

        fs::rename(&temp_file, path)?;
        Ok(path.to_path_buf())
    }
}
