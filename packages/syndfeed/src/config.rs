//! Configuration constants and validation functions for syndfeed.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{FeedError, Result};

/// RDF syntax namespace, root namespace of RSS 0.90 and RSS 1.0 documents.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// RSS 0.90 element namespace.
pub const RSS090_NS: &str = "http://my.netscape.com/rdf/simple/0.9/";

/// RSS 1.0 element namespace.
pub const RSS10_NS: &str = "http://purl.org/rss/1.0/";

/// RSS 1.0 content module namespace (`content:encoded`).
pub const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";

/// Dublin Core element set namespace.
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// RSS 1.0 syndication module namespace.
pub const SY_NS: &str = "http://purl.org/rss/1.0/modules/syndication/";

/// RSS 1.0 taxonomy module namespace.
pub const TAXO_NS: &str = "http://purl.org/rss/1.0/modules/taxonomy/";

/// Atom 1.0 namespace (RFC 4287).
pub const ATOM10_NS: &str = "http://www.w3.org/2005/Atom";

/// Atom 0.3 namespace.
pub const ATOM03_NS: &str = "http://purl.org/atom/ns#";

/// XML namespace, used for `xml:lang`.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Public identifier of the Netscape RSS 0.91 DTD.
pub const NETSCAPE_PUBLIC_ID: &str = "-//Netscape Communications//DTD RSS 0.91//EN";

/// System identifier of the Netscape RSS 0.91 DTD.
pub const NETSCAPE_SYSTEM_ID: &str = "http://my.netscape.com/publish/formats/rss-0.91.dtd";

/// Locale used when the caller does not supply one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Maximum number of XML nodes accepted in a single document.
///
/// Bounds memory for hostile inputs; real feeds stay far below this.
pub const MAX_XML_NODES: u32 = 1_000_000;

/// Language tag pattern: primary language plus optional subtags (e.g., "en", "pt-BR").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOCALE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*$").expect("valid regex")
});

/// Options for `roxmltree`.
///
/// DTDs must be allowed because RSS 0.91 documents declare a DOCTYPE.
#[must_use]
pub fn parsing_options<'input>() -> roxmltree::ParsingOptions<'input> {
    roxmltree::ParsingOptions {
        allow_dtd: true,
        nodes_limit: MAX_XML_NODES,
        ..roxmltree::ParsingOptions::default()
    }
}

/// Validate a locale tag.
///
/// # Examples
/// ```
/// use syndfeed::config::validate_locale;
///
/// assert!(validate_locale("en-US").is_ok());
/// assert!(validate_locale("de").is_ok());
/// assert!(validate_locale("not a locale").is_err());
/// ```
pub fn validate_locale(tag: &str) -> Result<()> {
    if LOCALE_PATTERN.is_match(tag) {
        Ok(())
    } else {
        Err(FeedError::InvalidLocale(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_locale_valid() {
        assert!(validate_locale("en").is_ok());
        assert!(validate_locale("en-US").is_ok());
        assert!(validate_locale("pt_BR").is_ok());
        assert!(validate_locale("zh-Hant-TW").is_ok());
    }

    #[test]
    fn test_validate_locale_invalid() {
        assert!(validate_locale("").is_err());
        assert!(validate_locale("e").is_err());
        assert!(validate_locale("en US").is_err());
        assert!(validate_locale("en-").is_err());
    }

    #[test]
    fn test_parsing_options_allow_dtd() {
        let options = parsing_options();
        assert!(options.allow_dtd);
        assert_eq!(options.nodes_limit, MAX_XML_NODES);
    }

    #[test]
    fn test_parsing_options_accept_doctype() {
        let xml = r#"<!DOCTYPE rss PUBLIC "-//Netscape Communications//DTD RSS 0.91//EN"
  "http://my.netscape.com/publish/formats/rss-0.91.dtd">
<rss version="0.91"><channel><title>T</title></channel></rss>"#;
        let doc = roxmltree::Document::parse_with_options(xml, parsing_options()).unwrap();
        assert_eq!(doc.root_element().tag_name().name(), "rss");
    }
}
