//! Namespace-aware helpers for navigating parsed feed documents.
//!
//! Feed dialects are told apart by namespace, so every lookup here takes
//! an optional namespace URI: `None` matches elements and attributes that
//! are not in any namespace.

use roxmltree::Node;

/// Get the local tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use syndfeed::xml::get_tag_name;
///
/// let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "RDF");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get the namespace URI of an element, if it has one.
pub fn namespace_of<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.tag_name().namespace()
}

/// Check if a node is an element with the given local name and namespace.
pub fn is_element(node: Node<'_, '_>, name: &str, ns: Option<&str>) -> bool {
    node.is_element() && get_tag_name(node) == name && namespace_of(node) == ns
}

/// Find the first child element with the given local name and namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use syndfeed::xml::find_child;
///
/// let xml = r#"<rss><channel/></rss>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "channel", None).is_some());
/// assert!(find_child(root, "channel", Some("http://purl.org/rss/1.0/")).is_none());
/// ```
pub fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
    ns: Option<&str>,
) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_element(*child, name, ns))
}

/// Find all child elements with the given local name and namespace.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
    ns: Option<&'a str>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| is_element(*child, name, ns))
}

/// Get all element children of a node.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Get the text content of a node, trimmed.
///
/// Returns an empty string if the node has no text.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get the trimmed text of the first matching child element.
///
/// Returns `None` if the child is absent; an empty child yields `Some("")`.
pub fn child_text(node: Node<'_, '_>, name: &str, ns: Option<&str>) -> Option<String> {
    find_child(node, name, ns).map(get_text)
}

/// Get an attribute value by local name and namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use syndfeed::xml::get_attribute;
///
/// let rdf = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// let xml = r#"<item xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" rdf:about="urn:1" id="x"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// let item = doc.root_element();
///
/// assert_eq!(get_attribute(item, "about", Some(rdf)), Some("urn:1"));
/// assert_eq!(get_attribute(item, "id", None), Some("x"));
/// assert_eq!(get_attribute(item, "about", None), None);
/// ```
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str, ns: Option<&str>) -> Option<&'a str> {
    match ns {
        Some(uri) => node.attribute((uri, name)),
        None => node.attribute(name),
    }
}

/// Get the document text that precedes the given element.
///
/// Used to inspect the prolog (XML declaration, DOCTYPE) of a document.
pub fn prolog<'input>(node: Node<'_, 'input>) -> &'input str {
    let input = node.document().input_text();
    input.get(..node.range().start).unwrap_or_default()
}

/// Get the raw markup between an element's start and end tags.
///
/// Used for embedded XHTML/XML content, which must be carried verbatim
/// rather than as unescaped text.
pub fn inner_xml<'input>(node: Node<'_, 'input>) -> &'input str {
    let (Some(first), Some(last)) = (node.first_child(), node.last_child()) else {
        return "";
    };
    let input = node.document().input_text();
    input
        .get(first.range().start..last.range().end)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<ns:root xmlns:ns="http://example.com"><ns:child/></ns:root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "root");
        assert_eq!(namespace_of(doc.root_element()), Some("http://example.com"));
    }

    #[test]
    fn test_namespace_of_default_namespace() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"/>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            namespace_of(doc.root_element()),
            Some("http://www.w3.org/2005/Atom")
        );
    }

    #[test]
    fn test_find_child_respects_namespace() {
        let xml = r#"<root xmlns:a="urn:a"><a:title>ns</a:title><title>plain</title></root>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        assert_eq!(child_text(root, "title", Some("urn:a")), Some("ns".to_string()));
        assert_eq!(child_text(root, "title", None), Some("plain".to_string()));
        assert_eq!(child_text(root, "title", Some("urn:b")), None);
    }

    #[test]
    fn test_find_children() {
        let xml = r#"<channel><item>1</item><other/><item>2</item></channel>"#;
        let doc = Document::parse(xml).unwrap();
        let items: Vec<_> = find_children(doc.root_element(), "item", None).collect();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_element_children() {
        let xml = r#"<root>text<child1/>more<child2/></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(element_children(doc.root_element()).count(), 2);
    }

    #[test]
    fn test_child_text_empty_element() {
        let xml = r#"<root><title/></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(child_text(doc.root_element(), "title", None), Some(String::new()));
    }

    #[test]
    fn test_get_text_unescapes_and_trims() {
        let xml = r#"<root>  a &amp; b  </root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_text(doc.root_element()), "a & b");
    }

    #[test]
    fn test_inner_xml_is_verbatim() {
        let xml = r#"<content><div xmlns="http://www.w3.org/1999/xhtml">a &amp; <b>b</b></div></content>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            inner_xml(doc.root_element()),
            r#"<div xmlns="http://www.w3.org/1999/xhtml">a &amp; <b>b</b></div>"#
        );
    }

    #[test]
    fn test_inner_xml_empty() {
        let doc = Document::parse("<content/>").unwrap();
        assert_eq!(inner_xml(doc.root_element()), "");
    }

    #[test]
    fn test_prolog() {
        let xml = "<?xml version=\"1.0\"?>\n<rss/>";
        let doc = Document::parse(xml).unwrap();
        assert!(prolog(doc.root_element()).starts_with("<?xml"));
    }
}
