//! Module contracts: the declared, typed property sets modules expose.
//!
//! A contract is the unit of identity for modules. The generic copy
//! protocol consults the contract table instead of any concrete
//! implementation, so two unrelated implementations of one contract are
//! interchangeable.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{FeedError, Result};

/// Value type of a declared property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// Free text.
    Text,
    /// Text restricted to a fixed set of values.
    OneOf(Vec<String>),
    /// Signed integer.
    Integer,
    /// Calendar instant.
    Date,
    /// Nested entity with its own named properties.
    Entity(Vec<PropertySpec>),
    /// Ordered list of values of one kind.
    List(Box<PropertyKind>),
}

impl PropertyKind {
    /// Shorthand for `List(Box::new(kind))`.
    #[must_use]
    pub fn list_of(kind: PropertyKind) -> Self {
        Self::List(Box::new(kind))
    }

    /// Shorthand for a text property restricted to `values`.
    #[must_use]
    pub fn one_of(values: &[&str]) -> Self {
        Self::OneOf(values.iter().map(|v| (*v).to_string()).collect())
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::OneOf(values) => write!(f, "one of [{}]", values.join(", ")),
            Self::Integer => f.write_str("integer"),
            Self::Date => f.write_str("date"),
            Self::Entity(_) => f.write_str("entity"),
            Self::List(inner) => write!(f, "list of {inner}"),
        }
    }
}

/// A named, typed property of a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: String,
    pub kind: PropertyKind,
}

impl PropertySpec {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A property value read from or written to a module.
///
/// Values are owned, so reading a property always yields an independent
/// deep copy of nested entities and lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Text(String),
    Integer(i64),
    Date(DateTime<Utc>),
    Entity(BTreeMap<String, PropertyValue>),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Check that this value may be stored in a property of `kind`.
    ///
    /// `Null` conforms to every kind and means "unset".
    #[must_use]
    pub fn conforms_to(&self, kind: &PropertyKind) -> bool {
        match (self, kind) {
            (Self::Null, _) => true,
            (Self::Text(_), PropertyKind::Text) => true,
            (Self::Text(text), PropertyKind::OneOf(values)) => values.iter().any(|v| v == text),
            (Self::Integer(_), PropertyKind::Integer) => true,
            (Self::Date(_), PropertyKind::Date) => true,
            (Self::Entity(fields), PropertyKind::Entity(specs)) => {
                fields.iter().all(|(name, value)| {
                    specs
                        .iter()
                        .find(|spec| &spec.name == name)
                        .is_some_and(|spec| value.conforms_to(&spec.kind))
                })
            }
            (Self::List(items), PropertyKind::List(inner)) => {
                items.iter().all(|item| item.conforms_to(inner))
            }
            _ => false,
        }
    }

    /// Name of the value's kind, for error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Date(_) => "date",
            Self::Entity(_) => "entity",
            Self::List(_) => "list",
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_entity(&self) -> Option<&BTreeMap<String, PropertyValue>> {
        match self {
            Self::Entity(fields) => Some(fields),
            _ => None,
        }
    }

    /// Take an optional text value for a setter.
    ///
    /// # Errors
    /// `InvalidValue` if the value is neither text nor null.
    pub fn into_text(self, property: &str) -> Result<Option<String>> {
        match self {
            Self::Null => Ok(None),
            Self::Text(text) => Ok(Some(text)),
            other => Err(FeedError::invalid_value(property, other.display_text())),
        }
    }

    /// Take an optional integer value for a setter.
    ///
    /// # Errors
    /// `InvalidValue` if the value is neither an integer nor null.
    pub fn into_integer(self, property: &str) -> Result<Option<i64>> {
        match self {
            Self::Null => Ok(None),
            Self::Integer(value) => Ok(Some(value)),
            other => Err(FeedError::invalid_value(property, other.display_text())),
        }
    }

    /// Take an optional date value for a setter.
    ///
    /// # Errors
    /// `InvalidValue` if the value is neither a date nor null.
    pub fn into_date(self, property: &str) -> Result<Option<DateTime<Utc>>> {
        match self {
            Self::Null => Ok(None),
            Self::Date(date) => Ok(Some(date)),
            other => Err(FeedError::invalid_value(property, other.display_text())),
        }
    }

    /// Take a list value for a setter; null is the empty list.
    ///
    /// # Errors
    /// `InvalidValue` if the value is neither a list nor null.
    pub fn into_list(self, property: &str) -> Result<Vec<PropertyValue>> {
        match self {
            Self::Null => Ok(Vec::new()),
            Self::List(items) => Ok(items),
            other => Err(FeedError::invalid_value(property, other.display_text())),
        }
    }

    /// Text for display in error messages.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Text(text) => text.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Date(date) => date.to_rfc3339(),
            Self::Entity(_) | Self::List(_) => self.kind_name().to_string(),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// The declared property set of one module kind, keyed by namespace URI.
///
/// # Examples
/// ```
/// use syndfeed::module::{Contract, PropertyKind};
///
/// let contract = Contract::new("urn:example")
///     .property("label", PropertyKind::Text)
///     .property("count", PropertyKind::Integer);
///
/// assert_eq!(contract.uri(), "urn:example");
/// assert_eq!(contract.property_names().collect::<Vec<_>>(), ["label", "count"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    uri: String,
    properties: Vec<PropertySpec>,
}

impl Contract {
    /// Create a contract with no properties.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            properties: Vec::new(),
        }
    }

    /// Declare a property.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, kind: PropertyKind) -> Self {
        self.properties.push(PropertySpec::new(name, kind));
        self
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Declared properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    /// Look up a declared property by name.
    #[must_use]
    pub fn spec(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|spec| spec.name == name)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|spec| spec.name.as_str())
    }
}
