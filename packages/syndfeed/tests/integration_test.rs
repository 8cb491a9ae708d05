//! Integration tests for syndfeed.
//!
//! These tests parse the XML fixtures in `tests/fixtures/` through the
//! public API and check dialect selection, field extraction, modules and
//! generation.

use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use roxmltree::Document;

use syndfeed::config::parsing_options;
use syndfeed::date::parse_w3c;
use syndfeed::dialect::{create_default_dispatcher, dispatcher, ParseContext};
use syndfeed::module::{
    registry, DcModule, DcSubject, Extendable, GenericModule, Module, ModuleRegistry,
    PropertyValue, SyCodec, SyModule, UpdatePeriod, DC_URI, SY_URI,
};
use syndfeed::{Feed, FeedError, FeedInput, FeedOutput, FeedType, Locale};

/// Every fixture with the dialect it is written in.
const FIXTURES: [(&str, FeedType); 10] = [
    ("rss090.xml", FeedType::Rss090),
    ("rss091n.xml", FeedType::Rss091Netscape),
    ("rss091u.xml", FeedType::Rss091Userland),
    ("rss092.xml", FeedType::Rss092),
    ("rss093.xml", FeedType::Rss093),
    ("rss094.xml", FeedType::Rss094),
    ("rss10.xml", FeedType::Rss10),
    ("rss20.xml", FeedType::Rss20),
    ("atom10.xml", FeedType::Atom10),
    ("atom03.xml", FeedType::Atom03),
];

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {e}", path.display()))
}

fn parse_fixture(name: &str) -> Feed {
    FeedInput::default()
        .parse_str(&load_fixture(name))
        .unwrap_or_else(|e| panic!("Failed to parse fixture {name}: {e}"))
}

fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap()
}

// =============================================================================
// Dialect detection
// =============================================================================

#[test]
fn test_every_fixture_detected_as_its_dialect() {
    for (name, expected) in FIXTURES {
        let detected = FeedInput::detect(&load_fixture(name))
            .unwrap_or_else(|e| panic!("Failed to detect {name}: {e}"));
        assert_eq!(detected, expected, "fixture {name}");

        let feed = parse_fixture(name);
        assert_eq!(feed.feed_type, expected, "fixture {name}");
    }
}

#[test]
fn test_specialized_detection_implies_general_detection() {
    let dispatcher = dispatcher();
    for (name, _) in FIXTURES {
        let xml = load_fixture(name);
        let doc = Document::parse_with_options(&xml, parsing_options()).unwrap();

        for feed_type in FeedType::ALL {
            let Some(general) = feed_type.generalization() else {
                continue;
            };
            let specialized_parser = dispatcher.parser(feed_type).unwrap();
            let general_parser = dispatcher.parser(general).unwrap();
            if specialized_parser.detect(&doc) {
                assert!(
                    general_parser.detect(&doc),
                    "{name}: {feed_type} detected but {general} did not"
                );
            }
        }
    }
}

#[test]
fn test_netscape_and_userland_agree_on_common_fields() {
    let netscape = parse_fixture("rss091n.xml");
    let xml = load_fixture("rss091n.xml");
    let doc = Document::parse_with_options(&xml, parsing_options()).unwrap();
    let locale = Locale::default();
    let userland = dispatcher()
        .parser(FeedType::Rss091Userland)
        .unwrap()
        .parse(&doc, &ParseContext::new(&locale))
        .unwrap();

    assert_eq!(userland.feed_type, FeedType::Rss091Userland);
    assert_eq!(netscape.title, userland.title);
    assert_eq!(netscape.language, userland.language);
    assert_eq!(netscape.copyright, userland.copyright);
    assert_eq!(netscape.entries, userland.entries);
}

#[test]
fn test_dispatch_is_deterministic() {
    let xml = load_fixture("rss10.xml");
    let doc = Document::parse_with_options(&xml, parsing_options()).unwrap();
    let locale = Locale::default();
    let ctx = ParseContext::new(&locale);

    let first = dispatcher().resolve(&doc, &ctx).unwrap();
    for _ in 0..5 {
        assert_eq!(dispatcher().resolve(&doc, &ctx).unwrap(), first);
    }

    let fresh = create_default_dispatcher();
    assert_eq!(fresh.feed_types(), dispatcher().feed_types());
    assert_eq!(fresh.resolve(&doc, &ctx).unwrap(), first);
}

#[test]
fn test_unrecognized_document() {
    let result = FeedInput::default().parse_str("<opml version=\"2.0\"><body/></opml>");
    match result {
        Err(FeedError::UnrecognizedFormat { root, namespace }) => {
            assert_eq!(root, "opml");
            assert_eq!(namespace, None);
        }
        other => panic!("expected UnrecognizedFormat, got {other:?}"),
    }
}

#[test]
fn test_claimed_document_that_fails_is_not_retried() {
    // Detected as RSS 2.0, rejected for its missing channel; no other
    // dialect gets a chance.
    let result = FeedInput::default().parse_str(r#"<rss version="2.0"/>"#);
    match result {
        Err(FeedError::Parse {
            feed_type, path, ..
        }) => {
            assert_eq!(feed_type, FeedType::Rss20);
            assert_eq!(path, "rss/channel");
        }
        other => panic!("expected Parse error, got {other:?}"),
    }
}

// =============================================================================
// Field extraction
// =============================================================================

#[test]
fn test_rss10_item_fields() {
    let feed = parse_fixture("rss10.xml");

    assert_eq!(feed.feed_type.as_str(), "rss_1.0");
    assert_eq!(
        feed.uri.as_deref(),
        Some("http://meerkat.oreillynet.com/?_fl=rss1.0")
    );
    assert_eq!(feed.entries.len(), 1);

    let entry = &feed.entries[0];
    let description = entry.description.as_ref().unwrap();
    assert_eq!(
        description.value.as_deref(),
        Some(
            "XML is placing increasingly heavy loads on the existing technical infrastructure of the Internet."
        )
    );
    let content = entry.content.as_ref().unwrap();
    assert_eq!(content.content_type.as_deref(), Some("html"));
    assert_eq!(
        content.value.as_deref(),
        Some("<p>XML is placing <em>increasingly</em> heavy loads.</p>")
    );
    assert_eq!(
        entry.uri.as_deref(),
        Some("http://c.moreover.com/click/here.pl?r123")
    );
}

#[test]
fn test_rss10_channel_modules() {
    let feed = parse_fixture("rss10.xml");

    let dc = feed.module_as::<DcModule>(DC_URI).unwrap();
    assert_eq!(dc.publisher.as_deref(), Some("The O'Reilly Network"));
    assert_eq!(
        dc.rights.as_deref(),
        Some("Copyright 2000 O'Reilly & Associates, Inc.")
    );
    assert_eq!(dc.date, parse_w3c("2001-01-01T00:00+00:00"));

    let sy = feed.module_as::<SyModule>(SY_URI).unwrap();
    assert_eq!(sy.update_period(), Some(UpdatePeriod::Hourly));
    assert_eq!(sy.update_frequency(), Some(100));
    assert_eq!(sy.update_base(), parse_w3c("2001-01-01T01:00+00:00"));
}

#[test]
fn test_rss10_item_subjects() {
    let feed = parse_fixture("rss10.xml");
    let dc = feed.entries[0].module_as::<DcModule>(DC_URI).unwrap();

    assert_eq!(
        dc.subjects,
        vec![
            DcSubject {
                taxonomy_uri: None,
                value: Some("XML".to_string()),
            },
            DcSubject {
                taxonomy_uri: Some("http://meerkat.oreillynet.com/?c=cat23".to_string()),
                value: Some("Data: XML".to_string()),
            },
        ]
    );
}

#[test]
fn test_rss090_ignores_non_item_siblings() {
    let feed = parse_fixture("rss090.xml");
    let titles: Vec<_> = feed
        .entries
        .iter()
        .map(|e| e.title.as_deref().unwrap())
        .collect();
    assert_eq!(titles, vec!["New Status Updates", "Bugzilla Reorganized"]);
    assert!(feed.entries.iter().all(|e| e.description.is_none()));
}

#[test]
fn test_rss091_channel_dates() {
    let feed = parse_fixture("rss091u.xml");
    assert_eq!(feed.published, Some(utc(2001, 1, 1, 0, 0, 0)));
    assert_eq!(feed.updated, Some(utc(2001, 1, 1, 12, 30, 0)));
    assert_eq!(
        feed.entries[0]
            .description
            .as_ref()
            .and_then(|d| d.value.as_deref()),
        Some("This is an item about stuff & things.")
    );
}

#[test]
fn test_rss092_categories_and_enclosures() {
    let feed = parse_fixture("rss092.xml");
    let first = &feed.entries[0];

    assert_eq!(first.categories.len(), 2);
    assert_eq!(first.categories[0].name, "Music/Rock");
    assert_eq!(
        first.categories[0].domain.as_deref(),
        Some("http://www.dmoz.org")
    );
    assert_eq!(first.categories[1].domain, None);

    assert_eq!(first.enclosures[0].length, Some(6_182_912));
    assert_eq!(first.enclosures[0].mime_type.as_deref(), Some("audio/mpeg"));
    assert_eq!(
        first.description.as_ref().unwrap().content_type.as_deref(),
        Some("text/html")
    );

    // A non-numeric length is dropped, the enclosure is kept
    let second = &feed.entries[1];
    assert_eq!(second.enclosures.len(), 1);
    assert_eq!(second.enclosures[0].length, None);
}

#[test]
fn test_rss093_unparseable_date_is_none() {
    let feed = parse_fixture("rss093.xml");
    assert_eq!(feed.entries[0].published, Some(utc(2002, 9, 7, 0, 0, 1)));
    assert_eq!(feed.entries[1].published, None);
}

#[test]
fn test_rss094_guid_and_author() {
    let feed = parse_fixture("rss094.xml");
    let entry = &feed.entries[0];
    assert_eq!(entry.uri.as_deref(), Some("http://example.org/094/1#guid"));
    assert_eq!(
        entry.authors[0].email.as_deref(),
        Some("editor@example.org")
    );
}

#[test]
fn test_rss20_item_modules() {
    let feed = parse_fixture("rss20.xml");
    assert_eq!(feed.entries.len(), 2);

    let dc = feed.entries[0].module_as::<DcModule>(DC_URI).unwrap();
    assert_eq!(dc.creator.as_deref(), Some("Jane Doe"));
    assert_eq!(dc.contributors, vec!["John Roe", "Ann Poe"]);
    assert!(feed.entries[1].module(DC_URI).is_none());
    assert!(feed.modules.is_empty());
}

#[test]
fn test_localized_rfc822_dates() {
    let xml = load_fixture("rss20_de.xml");

    let english = FeedInput::default().parse_str(&xml).unwrap();
    assert_eq!(english.published, None);

    let german = FeedInput::new(Locale::new("de-DE").unwrap())
        .parse_str(&xml)
        .unwrap();
    assert_eq!(german.published, Some(utc(2003, 6, 10, 4, 0, 0)));
    assert_eq!(german.entries[0].published, Some(utc(2003, 12, 1, 8, 0, 0)));
}

#[test]
fn test_atom10_fields() {
    let feed = parse_fixture("atom10.xml");

    assert_eq!(feed.link.as_deref(), Some("http://example.org/"));
    assert_eq!(feed.language.as_deref(), Some("en"));
    assert_eq!(feed.description.as_deref(), Some("A subtitle."));
    assert_eq!(feed.authors[0].uri.as_deref(), Some("http://example.org/~john"));
    assert!(feed.module(DC_URI).is_some());

    let entry = &feed.entries[0];
    assert_eq!(
        entry.link.as_deref(),
        Some("http://example.org/2003/12/13/atom03")
    );
    assert_eq!(entry.published, Some(utc(2003, 12, 13, 12, 29, 29)));
    assert_eq!(entry.enclosures[0].length, Some(1337));
    assert_eq!(entry.categories[0].name, "robots");
    assert_eq!(entry.contributors[0].name.as_deref(), Some("Sam Ruby"));

    let summary = entry.description.as_ref().unwrap();
    assert_eq!(summary.content_type.as_deref(), Some("html"));
    assert_eq!(summary.value.as_deref(), Some("<p>Some text.</p>"));

    let content = entry.content.as_ref().unwrap();
    assert_eq!(content.content_type.as_deref(), Some("xhtml"));
    assert_eq!(
        content.value.as_deref(),
        Some(r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>This is <b>XHTML</b> content.</p></div>"#)
    );

    let author_dc = entry.authors[0].module_as::<DcModule>(DC_URI).unwrap();
    assert_eq!(author_dc.creator.as_deref(), Some("jroe"));

    let plain = &feed.entries[1];
    assert_eq!(
        plain.description.as_ref().unwrap().content_type.as_deref(),
        Some("text")
    );
}

#[test]
fn test_atom03_content_modes() {
    let feed = parse_fixture("atom03.xml");

    assert_eq!(
        feed.description.as_deref(),
        Some("A lot of effort went into making this effortless")
    );
    assert_eq!(feed.authors[0].uri.as_deref(), Some("http://diveintomark.org/"));
    assert_eq!(feed.updated, Some(utc(2003, 12, 13, 18, 30, 2)));

    let escaped = feed.entries[0].content.as_ref().unwrap();
    assert_eq!(escaped.mode.as_deref(), Some("escaped"));
    assert_eq!(
        escaped.value.as_deref(),
        Some("<p>Escaped <em>markup</em>.</p>")
    );

    let inline = feed.entries[1].content.as_ref().unwrap();
    assert_eq!(inline.mode.as_deref(), Some("xml"));
    assert_eq!(
        inline.value.as_deref(),
        Some(r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>Inline</p></div>"#)
    );
}

#[test]
fn test_invalid_update_period_rejects_document() {
    let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                         xmlns="http://purl.org/rss/1.0/"
                         xmlns:sy="http://purl.org/rss/1.0/modules/syndication/">
        <channel rdf:about="http://example.org/">
          <title>Bad schedule</title>
          <sy:updatePeriod>fortnightly</sy:updatePeriod>
        </channel>
      </rdf:RDF>"#;
    assert!(matches!(
        FeedInput::default().parse_str(xml),
        Err(FeedError::InvalidValue { .. })
    ));
}

#[test]
fn test_zero_update_frequency_is_kept() {
    let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                         xmlns="http://purl.org/rss/1.0/"
                         xmlns:sy="http://purl.org/rss/1.0/modules/syndication/">
        <channel rdf:about="http://example.org/">
          <title>Paused</title>
          <sy:updateFrequency>0</sy:updateFrequency>
        </channel>
      </rdf:RDF>"#;
    let feed = FeedInput::default().parse_str(xml).unwrap();
    let sy = feed.module_as::<SyModule>(SY_URI).unwrap();
    assert_eq!(sy.update_frequency(), Some(0));
}

#[test]
fn test_parse_with_custom_registry() {
    let xml = load_fixture("rss10.xml");
    let doc = Document::parse_with_options(&xml, parsing_options()).unwrap();
    let locale = Locale::default();

    let empty = ModuleRegistry::new();
    let feed = dispatcher()
        .resolve(&doc, &ParseContext::with_registry(&locale, &empty))
        .unwrap();
    assert!(feed.modules().is_empty());
    assert!(feed.entries.iter().all(|entry| entry.modules().is_empty()));

    let mut sy_only = ModuleRegistry::new();
    sy_only.register_codec(Box::new(SyCodec));
    let feed = dispatcher()
        .resolve(&doc, &ParseContext::with_registry(&locale, &sy_only))
        .unwrap();
    assert!(feed.module(SY_URI).is_some());
    assert!(feed.module(DC_URI).is_none());
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_round_trip_every_dialect() {
    for (name, feed_type) in FIXTURES {
        let first = parse_fixture(name);
        let xml = FeedOutput::new(feed_type)
            .output_string(&first)
            .unwrap_or_else(|e| panic!("Failed to generate {name}: {e}"));
        let second = FeedInput::default()
            .parse_str(&xml)
            .unwrap_or_else(|e| panic!("Failed to reparse {name}: {e}\n{xml}"));
        assert_eq!(second, first, "round trip of {name}");
    }
}

#[test]
fn test_generated_output_is_stable() {
    for (name, feed_type) in FIXTURES {
        let output = FeedOutput::new(feed_type);
        let once = output.output_string(&parse_fixture(name)).unwrap();
        let reparsed = FeedInput::default().parse_str(&once).unwrap();
        let twice = output.output_string(&reparsed).unwrap();
        assert_eq!(twice, once, "generation of {name}");
    }
}

#[test]
fn test_convert_rss20_to_atom10() {
    let rss = parse_fixture("rss20.xml");
    let xml = FeedOutput::new(FeedType::Atom10).output_string(&rss).unwrap();
    let atom = FeedInput::default().parse_str(&xml).unwrap();

    assert_eq!(atom.feed_type, FeedType::Atom10);
    assert_eq!(atom.title, rss.title);
    assert_eq!(atom.link, rss.link);
    assert_eq!(atom.entries.len(), rss.entries.len());
    assert_eq!(atom.entries[0].uri, rss.entries[0].uri);
    assert_eq!(atom.entries[0].published, rss.entries[0].published);
    assert_eq!(atom.entries[0].modules, rss.entries[0].modules);
}

// =============================================================================
// Modules
// =============================================================================

#[test]
fn test_attach_and_lookup_modules() {
    let mut dc = DcModule::default();
    dc.date = parse_w3c("2001-01-01T00:00+00:00");

    let mut sy = SyModule::default();
    sy.set_update_period("hourly").unwrap();
    sy.set_update_frequency(Some(100));
    sy.set_update_base(parse_w3c("2001-01-01T01:00+00:00"));

    let mut feed = Feed::new(FeedType::Rss10);
    feed.attach(Box::new(dc));
    feed.attach(Box::new(sy));

    let dc = feed.module_as::<DcModule>(DC_URI).unwrap();
    assert_eq!(dc.date, Some(utc(2001, 1, 1, 0, 0, 0)));

    let sy = feed.module_as::<SyModule>(SY_URI).unwrap();
    assert_eq!(sy.update_period(), Some(UpdatePeriod::Hourly));
    assert_eq!(sy.update_frequency(), Some(100));
    assert_eq!(sy.update_base(), Some(utc(2001, 1, 1, 1, 0, 0)));
}

#[test]
fn test_invalid_update_period_keeps_previous_value() {
    let mut sy = SyModule::default();
    sy.set_update_period("daily").unwrap();

    let err = sy.set_update_period("fortnightly").unwrap_err();
    assert!(matches!(err, FeedError::InvalidValue { .. }));
    assert_eq!(sy.update_period(), Some(UpdatePeriod::Daily));

    let mut generic = registry().instantiate(SY_URI, Some("generic")).unwrap();
    generic
        .set_property("updatePeriod", PropertyValue::Text("weekly".to_string()))
        .unwrap();
    assert!(generic
        .set_property("updatePeriod", PropertyValue::Text("fortnightly".to_string()))
        .is_err());
    assert_eq!(
        generic.property("updatePeriod"),
        Some(PropertyValue::Text("weekly".to_string()))
    );
}

#[test]
fn test_module_copy_between_implementations() {
    let feed = parse_fixture("rss10.xml");
    let modules: Vec<&dyn Module> = feed
        .modules
        .iter()
        .chain(feed.entries[0].modules.iter())
        .collect();

    for typed in modules {
        let generic = registry().convert(typed, "generic").unwrap();
        assert!(generic.downcast_ref::<GenericModule>().is_some());
        assert_eq!(generic.properties(), typed.properties());

        let back = registry().convert(generic.as_ref(), "typed").unwrap();
        assert_eq!(back.properties(), typed.properties());
    }
}

#[test]
fn test_copied_module_is_independent() {
    let feed = parse_fixture("rss20.xml");
    let original = feed.entries[0].modules.find(DC_URI).unwrap();

    let mut copy = registry().convert(original, "generic").unwrap();
    copy.set_property(
        "contributors",
        PropertyValue::List(vec![PropertyValue::Text("Someone Else".to_string())]),
    )
    .unwrap();

    let dc = feed.entries[0].module_as::<DcModule>(DC_URI).unwrap();
    assert_eq!(dc.contributors, vec!["John Roe", "Ann Poe"]);
}

#[test]
fn test_cloned_feed_does_not_share_modules() {
    let feed = parse_fixture("rss10.xml");
    let mut cloned = feed.clone();
    cloned
        .modules
        .find_mut(SY_URI)
        .unwrap()
        .set_property("updateFrequency", PropertyValue::Integer(2))
        .unwrap();

    let sy = feed.module_as::<SyModule>(SY_URI).unwrap();
    assert_eq!(sy.update_frequency(), Some(100));
    assert_ne!(cloned, feed);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_parsing() {
    let expected: Vec<Feed> = FIXTURES.iter().map(|(name, _)| parse_fixture(name)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    FIXTURES
                        .iter()
                        .map(|(name, _)| parse_fixture(name))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
