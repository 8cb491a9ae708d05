//! Module attachment points for feeds, entries and persons.

use std::collections::BTreeMap;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::base::Module;
use super::contract::PropertyValue;

/// Ordered collection of modules attached to one entity.
///
/// Lookup by contract URI returns the first match; several modules with
/// the same URI may be stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleList {
    modules: Vec<Box<dyn Module>>,
}

impl ModuleList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a module.
    pub fn push(&mut self, module: Box<dyn Module>) {
        self.modules.push(module);
    }

    /// First module implementing the given contract.
    #[must_use]
    pub fn find(&self, uri: &str) -> Option<&dyn Module> {
        self.modules
            .iter()
            .find(|module| module.uri() == uri)
            .map(|module| module.as_ref())
    }

    /// First module implementing the given contract, mutably.
    pub fn find_mut(&mut self, uri: &str) -> Option<&mut (dyn Module + 'static)> {
        self.modules
            .iter_mut()
            .find(|module| module.uri() == uri)
            .map(|module| module.as_mut())
    }

    /// First module for the contract, downcast to a concrete implementation.
    ///
    /// Returns `None` if the first match is a different implementation.
    #[must_use]
    pub fn find_as<T: Module>(&self, uri: &str) -> Option<&T> {
        self.find(uri)?.downcast_ref::<T>()
    }

    /// Remove and return the first module implementing the contract.
    pub fn remove(&mut self, uri: &str) -> Option<Box<dyn Module>> {
        let index = self.modules.iter().position(|module| module.uri() == uri)?;
        Some(self.modules.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Module> {
        self.modules.iter().map(|module| module.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl FromIterator<Box<dyn Module>> for ModuleList {
    fn from_iter<I: IntoIterator<Item = Box<dyn Module>>>(iter: I) -> Self {
        Self {
            modules: iter.into_iter().collect(),
        }
    }
}

#[derive(Serialize)]
struct SerializedModule<'a> {
    uri: &'a str,
    properties: BTreeMap<String, PropertyValue>,
}

impl Serialize for ModuleList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.modules.len()))?;
        for module in self.iter() {
            let properties = module
                .properties()
                .into_iter()
                .filter(|(_, value)| !value.is_null())
                .collect();
            seq.serialize_element(&SerializedModule {
                uri: module.uri(),
                properties,
            })?;
        }
        seq.end()
    }
}

/// Entities that carry a module collection: feeds, entries and persons.
pub trait Extendable {
    fn modules(&self) -> &ModuleList;

    fn modules_mut(&mut self) -> &mut ModuleList;

    /// Attach a module to this entity.
    fn attach(&mut self, module: Box<dyn Module>) {
        self.modules_mut().push(module);
    }

    /// Look up the first attached module for a contract URI.
    ///
    /// Absence means the feature is not present on this entity.
    fn module(&self, uri: &str) -> Option<&dyn Module> {
        self.modules().find(uri)
    }

    /// Look up a module and downcast it to a concrete implementation.
    fn module_as<T: Module>(&self, uri: &str) -> Option<&T> {
        self.modules().find_as::<T>(uri)
    }
}
