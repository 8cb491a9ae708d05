//! Map-backed module that implements any contract.

use std::any::Any;
use std::collections::BTreeMap;

use super::base::Module;
use super::contract::{Contract, PropertyKind, PropertyValue};
use crate::error::{FeedError, Result};

/// A module that stores its properties in a map keyed by property name.
///
/// Values are checked against the contract on every write, so a generic
/// module never holds a value its contract does not allow.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericModule {
    contract: Contract,
    values: BTreeMap<String, PropertyValue>,
}

impl GenericModule {
    /// Create an empty module for a contract.
    #[must_use]
    pub fn new(contract: Contract) -> Self {
        Self {
            contract,
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn contract(&self) -> &Contract {
        &self.contract
    }
}

impl Module for GenericModule {
    fn uri(&self) -> &str {
        self.contract.uri()
    }

    fn property_names(&self) -> Vec<&str> {
        self.contract.property_names().collect()
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        let spec = self.contract.spec(name)?;
        let value = self.values.get(&spec.name).cloned();
        Some(value.unwrap_or_else(|| match &spec.kind {
            PropertyKind::List(_) => PropertyValue::List(Vec::new()),
            _ => PropertyValue::Null,
        }))
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        let spec = self
            .contract
            .spec(name)
            .ok_or_else(|| FeedError::UnknownProperty {
                contract: self.contract.uri().to_string(),
                property: name.to_string(),
            })?;
        if !value.conforms_to(&spec.kind) {
            return Err(FeedError::invalid_value(name, value.display_text()));
        }
        if value.is_null() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value);
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
