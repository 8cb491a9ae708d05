//! Dublin Core elements module.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use roxmltree::Node;

use super::base::Module;
use super::codec::ModuleCodec;
use super::contract::{Contract, PropertyKind, PropertySpec, PropertyValue};
use crate::config::{DC_NS, RDF_NS, TAXO_NS};
use crate::date::{format_w3c, parse_date};
use crate::dialect::ParseContext;
use crate::error::{FeedError, Result};
use crate::xml::{
    child_text, element_children, find_child, get_attribute, get_tag_name, get_text, namespace_of,
    XmlWriter,
};

/// Contract URI of the Dublin Core module.
pub const DC_URI: &str = DC_NS;

/// Single-valued text properties.
const TEXT_PROPERTIES: [&str; 12] = [
    "title",
    "creator",
    "description",
    "publisher",
    "type",
    "format",
    "identifier",
    "source",
    "language",
    "relation",
    "coverage",
    "rights",
];

static DC_CONTRACT: LazyLock<Contract> = LazyLock::new(|| {
    let subject = PropertyKind::Entity(vec![
        PropertySpec::new("taxonomyUri", PropertyKind::Text),
        PropertySpec::new("value", PropertyKind::Text),
    ]);
    Contract::new(DC_URI)
        .property("title", PropertyKind::Text)
        .property("creator", PropertyKind::Text)
        .property("subjects", PropertyKind::list_of(subject))
        .property("description", PropertyKind::Text)
        .property("publisher", PropertyKind::Text)
        .property("contributors", PropertyKind::list_of(PropertyKind::Text))
        .property("date", PropertyKind::Date)
        .property("type", PropertyKind::Text)
        .property("format", PropertyKind::Text)
        .property("identifier", PropertyKind::Text)
        .property("source", PropertyKind::Text)
        .property("language", PropertyKind::Text)
        .property("relation", PropertyKind::Text)
        .property("coverage", PropertyKind::Text)
        .property("rights", PropertyKind::Text)
});

/// The Dublin Core contract.
#[must_use]
pub fn dc_contract() -> Contract {
    DC_CONTRACT.clone()
}

/// A `dc:subject`, optionally qualified by a taxonomy topic URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DcSubject {
    pub taxonomy_uri: Option<String>,
    pub value: Option<String>,
}

impl DcSubject {
    fn to_value(&self) -> PropertyValue {
        let mut fields = BTreeMap::new();
        fields.insert("taxonomyUri".to_string(), self.taxonomy_uri.clone().into());
        fields.insert("value".to_string(), self.value.clone().into());
        PropertyValue::Entity(fields)
    }

    fn from_value(value: PropertyValue) -> Result<Self> {
        let mut fields = match value {
            PropertyValue::Entity(fields) => fields,
            other => return Err(FeedError::invalid_value("subjects", other.display_text())),
        };
        let mut take = |key: &str| {
            fields
                .remove(key)
                .unwrap_or(PropertyValue::Null)
                .into_text("subjects")
        };
        Ok(Self {
            taxonomy_uri: take("taxonomyUri")?,
            value: take("value")?,
        })
    }
}

/// Typed Dublin Core implementation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DcModule {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub subjects: Vec<DcSubject>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub contributors: Vec<String>,
    pub date: Option<DateTime<Utc>>,
    pub dc_type: Option<String>,
    pub format: Option<String>,
    pub identifier: Option<String>,
    pub source: Option<String>,
    pub language: Option<String>,
    pub relation: Option<String>,
    pub coverage: Option<String>,
    pub rights: Option<String>,
}

impl DcModule {
    fn text_field(&self, name: &str) -> Option<&Option<String>> {
        Some(match name {
            "title" => &self.title,
            "creator" => &self.creator,
            "description" => &self.description,
            "publisher" => &self.publisher,
            "type" => &self.dc_type,
            "format" => &self.format,
            "identifier" => &self.identifier,
            "source" => &self.source,
            "language" => &self.language,
            "relation" => &self.relation,
            "coverage" => &self.coverage,
            "rights" => &self.rights,
            _ => return None,
        })
    }

    fn text_field_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        Some(match name {
            "title" => &mut self.title,
            "creator" => &mut self.creator,
            "description" => &mut self.description,
            "publisher" => &mut self.publisher,
            "type" => &mut self.dc_type,
            "format" => &mut self.format,
            "identifier" => &mut self.identifier,
            "source" => &mut self.source,
            "language" => &mut self.language,
            "relation" => &mut self.relation,
            "coverage" => &mut self.coverage,
            "rights" => &mut self.rights,
            _ => return None,
        })
    }
}

impl Module for DcModule {
    fn uri(&self) -> &str {
        DC_URI
    }

    fn property_names(&self) -> Vec<&str> {
        DC_CONTRACT.property_names().collect()
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "subjects" => Some(PropertyValue::List(
                self.subjects.iter().map(DcSubject::to_value).collect(),
            )),
            "contributors" => Some(PropertyValue::List(
                self.contributors.iter().cloned().map(PropertyValue::Text).collect(),
            )),
            "date" => Some(self.date.into()),
            _ => self.text_field(name).map(|field| field.clone().into()),
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        match name {
            "subjects" => {
                self.subjects = value
                    .into_list(name)?
                    .into_iter()
                    .map(DcSubject::from_value)
                    .collect::<Result<_>>()?;
            }
            "contributors" => {
                self.contributors = value
                    .into_list(name)?
                    .into_iter()
                    .map(|item| {
                        item.into_text(name)?
                            .ok_or_else(|| FeedError::invalid_value(name, "null"))
                    })
                    .collect::<Result<_>>()?;
            }
            "date" => self.date = value.into_date(name)?,
            _ => {
                let field = self.text_field_mut(name).ok_or_else(|| FeedError::UnknownProperty {
                    contract: DC_URI.to_string(),
                    property: name.to_string(),
                })?;
                *field = value.into_text(name)?;
            }
        }
        Ok(())
    }

    fn clone_module(&self) -> Box<dyn Module> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Reads and writes `dc:*` elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct DcCodec;

impl DcCodec {
    fn parse_subject(node: Node<'_, '_>) -> DcSubject {
        match find_child(node, "Description", Some(RDF_NS)) {
            Some(description) => DcSubject {
                taxonomy_uri: find_child(description, "topic", Some(TAXO_NS))
                    .and_then(|topic| get_attribute(topic, "resource", Some(RDF_NS)))
                    .map(String::from),
                value: child_text(description, "value", Some(RDF_NS)),
            },
            None => DcSubject {
                taxonomy_uri: None,
                value: Some(get_text(node)),
            },
        }
    }

    fn write_subject(subject: &PropertyValue, writer: &mut XmlWriter) -> Result<()> {
        let Some(fields) = subject.as_entity() else {
            return Ok(());
        };
        let field = |key: &str| fields.get(key).and_then(PropertyValue::as_text);
        match field("taxonomyUri") {
            Some(taxonomy) => {
                writer.start("dc:subject", &[])?;
                writer.start("rdf:Description", &[])?;
                writer.empty("taxo:topic", &[("rdf:resource", taxonomy)])?;
                writer.optional_element("rdf:value", field("value"))?;
                writer.end("rdf:Description")?;
                writer.end("dc:subject")
            }
            None => writer.optional_element("dc:subject", field("value")),
        }
    }
}

impl ModuleCodec for DcCodec {
    fn namespace_uri(&self) -> &'static str {
        DC_URI
    }

    fn prefix(&self) -> &'static str {
        "dc"
    }

    fn namespaces(&self) -> Vec<(&'static str, &'static str)> {
        vec![("dc", DC_NS), ("rdf", RDF_NS), ("taxo", TAXO_NS)]
    }

    fn parse(&self, element: Node<'_, '_>, ctx: &ParseContext<'_>) -> Result<Option<Box<dyn Module>>> {
        let mut module = DcModule::default();
        let mut found = false;

        for child in element_children(element).filter(|c| namespace_of(*c) == Some(DC_NS)) {
            found = true;
            match get_tag_name(child) {
                "subject" => module.subjects.push(Self::parse_subject(child)),
                "contributor" => module.contributors.push(get_text(child)),
                "date" => {
                    let text = get_text(child);
                    module.date = parse_date(&text, ctx.locale);
                    if module.date.is_none() {
                        tracing::debug!(value = %text, "unparseable dc:date ignored");
                    }
                }
                name => match module.text_field_mut(name) {
                    Some(field) if field.is_none() => *field = Some(get_text(child)),
                    Some(_) => {}
                    None => tracing::debug!(element = name, "unknown Dublin Core element ignored"),
                },
            }
        }

        Ok(found.then(|| Box::new(module) as Box<dyn Module>))
    }

    fn generate(&self, module: &dyn Module, writer: &mut XmlWriter) -> Result<()> {
        for spec in DC_CONTRACT.properties() {
            let Some(value) = module.property(&spec.name) else {
                continue;
            };
            match spec.name.as_str() {
                "subjects" => {
                    for subject in value.as_list().unwrap_or_default() {
                        Self::write_subject(subject, writer)?;
                    }
                }
                "contributors" => {
                    for contributor in value.as_list().unwrap_or_default() {
                        writer.optional_element("dc:contributor", contributor.as_text())?;
                    }
                }
                "date" => {
                    if let Some(date) = value.as_date() {
                        writer.text_element("dc:date", &[], &format_w3c(&date))?;
                    }
                }
                name if TEXT_PROPERTIES.contains(&name) => {
                    writer.optional_element(&format!("dc:{name}"), value.as_text())?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}
