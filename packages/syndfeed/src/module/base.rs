//! The `Module` trait implemented by every module instance.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use super::contract::PropertyValue;
use super::registry::registry;
use crate::error::Result;

/// A module instance: one implementation of a contract holding property values.
///
/// Properties are accessed by name so that the registry can copy values
/// between implementations that share nothing but a contract URI.
pub trait Module: fmt::Debug + Send + Sync + 'static {
    /// URI of the contract this module implements.
    fn uri(&self) -> &str;

    /// Names of the properties this implementation exposes.
    fn property_names(&self) -> Vec<&str>;

    /// Read a property.
    ///
    /// Returns `None` if the implementation does not expose the property and
    /// `Some(PropertyValue::Null)` if it is exposed but unset.
    fn property(&self, name: &str) -> Option<PropertyValue>;

    /// Write a property.
    ///
    /// # Errors
    /// `UnknownProperty` if the property is not exposed, `InvalidValue` if the
    /// value is outside the property's domain. The module is left unchanged
    /// on error.
    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<()>;

    /// Clone into a new boxed instance of the same implementation.
    fn clone_module(&self) -> Box<dyn Module>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Module {
    /// Downcast to a concrete implementation.
    pub fn downcast_ref<T: Module>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast to a concrete implementation, mutably.
    pub fn downcast_mut<T: Module>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Names of the properties that define this module's identity.
    ///
    /// Uses the registered contract when there is one, so equality does not
    /// depend on what a particular implementation happens to expose.
    fn identity_properties(&self) -> Vec<String> {
        match registry().contract(self.uri()) {
            Some(contract) => contract.property_names().map(String::from).collect(),
            None => self.property_names().into_iter().map(String::from).collect(),
        }
    }

    /// Snapshot of all exposed property values.
    #[must_use]
    pub fn properties(&self) -> BTreeMap<String, PropertyValue> {
        self.property_names()
            .into_iter()
            .filter_map(|name| self.property(name).map(|value| (name.to_string(), value)))
            .collect()
    }
}

impl Clone for Box<dyn Module> {
    fn clone(&self) -> Self {
        self.clone_module()
    }
}

/// Structural equality over the contract's declared properties.
///
/// Two modules are equal when they implement the same contract and every
/// declared property holds an equal value, whatever their implementations.
impl PartialEq for dyn Module {
    fn eq(&self, other: &Self) -> bool {
        self.uri() == other.uri()
            && self
                .identity_properties()
                .iter()
                .all(|name| self.property(name) == other.property(name))
    }
}
