//! Registry of module contracts, their implementations and their codecs.
//!
//! The registry is the single place where contract identity is resolved.
//! Generic copying walks the contract's declared properties, never the
//! properties a concrete type happens to expose.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::LazyLock;

use super::base::Module;
use super::codec::ModuleCodec;
use super::contract::Contract;
use super::dc::{dc_contract, DcCodec, DcModule};
use super::generic::GenericModule;
use super::sy::{sy_contract, SyCodec, SyModule};
use crate::error::{FeedError, Result};

type Factory = Box<dyn Fn() -> Box<dyn Module> + Send + Sync>;

/// A named constructor for one implementation of a contract.
pub struct Implementation {
    name: String,
    factory: Factory,
}

impl Implementation {
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Module> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(factory),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a fresh, empty instance.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Module> {
        (self.factory)()
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct RegisteredContract {
    contract: Contract,
    implementations: Vec<Implementation>,
}

/// Contracts, implementations and codecs known to the parsers and generators.
#[derive(Default)]
pub struct ModuleRegistry {
    contracts: HashMap<String, RegisteredContract>,
    codecs: Vec<Box<dyn ModuleCodec>>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the Dublin Core and Syndication modules.
    ///
    /// Each contract gets its typed implementation (the default) plus a
    /// property-map `generic` implementation.
    ///
    /// # Errors
    /// Returns an error if a built-in implementation violates its contract.
    pub fn with_builtin_modules() -> Result<Self> {
        let mut registry = Self::new();

        let dc = dc_contract();
        let dc_generic = dc.clone();
        registry.register(
            dc,
            Implementation::new("typed", || Box::new(DcModule::default())),
        )?;
        registry.register_implementation(
            super::DC_URI,
            Implementation::new("generic", move || {
                Box::new(GenericModule::new(dc_generic.clone()))
            }),
        )?;

        let sy = sy_contract();
        let sy_generic = sy.clone();
        registry.register(
            sy,
            Implementation::new("typed", || Box::new(SyModule::default())),
        )?;
        registry.register_implementation(
            super::SY_URI,
            Implementation::new("generic", move || {
                Box::new(GenericModule::new(sy_generic.clone()))
            }),
        )?;

        registry.register_codec(Box::new(DcCodec));
        registry.register_codec(Box::new(SyCodec));

        Ok(registry)
    }

    /// Register a contract with its default implementation.
    ///
    /// # Errors
    /// `DuplicateRegistration` if the URI is taken, `ModuleContract` if the
    /// implementation does not expose every declared property.
    pub fn register(&mut self, contract: Contract, implementation: Implementation) -> Result<()> {
        if self.contracts.contains_key(contract.uri()) {
            return Err(FeedError::DuplicateRegistration(format!(
                "contract {}",
                contract.uri()
            )));
        }
        validate_implementation(&contract, &implementation)?;
        tracing::debug!(
            contract = contract.uri(),
            implementation = implementation.name(),
            "registered module contract"
        );
        self.contracts.insert(
            contract.uri().to_string(),
            RegisteredContract {
                contract,
                implementations: vec![implementation],
            },
        );
        Ok(())
    }

    /// Register an alternate implementation of an existing contract.
    ///
    /// # Errors
    /// `UnknownContract`, `DuplicateRegistration` for a reused name, or
    /// `ModuleContract` if the implementation is incomplete.
    pub fn register_implementation(&mut self, uri: &str, implementation: Implementation) -> Result<()> {
        let entry = self
            .contracts
            .get_mut(uri)
            .ok_or_else(|| FeedError::UnknownContract(uri.to_string()))?;
        if entry
            .implementations
            .iter()
            .any(|existing| existing.name() == implementation.name())
        {
            return Err(FeedError::DuplicateRegistration(format!(
                "implementation '{}' of {uri}",
                implementation.name()
            )));
        }
        validate_implementation(&entry.contract, &implementation)?;
        entry.implementations.push(implementation);
        Ok(())
    }

    /// Register the XML codec for a contract namespace.
    pub fn register_codec(&mut self, codec: Box<dyn ModuleCodec>) {
        self.codecs.push(codec);
    }

    /// Look up a registered contract.
    #[must_use]
    pub fn contract(&self, uri: &str) -> Option<&Contract> {
        self.contracts.get(uri).map(|entry| &entry.contract)
    }

    /// URIs of all registered contracts, sorted.
    #[must_use]
    pub fn contract_uris(&self) -> Vec<&str> {
        let mut uris: Vec<&str> = self.contracts.keys().map(String::as_str).collect();
        uris.sort_unstable();
        uris
    }

    /// Names of the implementations registered for a contract, default first.
    #[must_use]
    pub fn implementation_names(&self, uri: &str) -> Vec<&str> {
        self.contracts
            .get(uri)
            .map(|entry| entry.implementations.iter().map(Implementation::name).collect())
            .unwrap_or_default()
    }

    /// Create an empty module instance.
    ///
    /// `implementation` selects a named implementation; `None` picks the default.
    ///
    /// # Errors
    /// `UnknownContract` if the URI or implementation name is not registered.
    pub fn instantiate(&self, uri: &str, implementation: Option<&str>) -> Result<Box<dyn Module>> {
        let entry = self
            .contracts
            .get(uri)
            .ok_or_else(|| FeedError::UnknownContract(uri.to_string()))?;
        let found = match implementation {
            Some(name) => entry.implementations.iter().find(|i| i.name() == name),
            None => entry.implementations.first(),
        };
        found.map(Implementation::instantiate).ok_or_else(|| {
            FeedError::UnknownContract(format!(
                "{uri} (implementation '{}')",
                implementation.unwrap_or("default")
            ))
        })
    }

    /// Registered codecs in registration order.
    pub fn codecs(&self) -> impl Iterator<Item = &dyn ModuleCodec> {
        self.codecs.iter().map(|codec| codec.as_ref())
    }

    /// Codec for a contract namespace.
    #[must_use]
    pub fn codec(&self, uri: &str) -> Option<&dyn ModuleCodec> {
        self.codecs()
            .find(|codec| codec.namespace_uri() == uri)
    }

    /// Prefix to URI mapping of every namespace the codecs write.
    #[must_use]
    pub fn namespaces(&self) -> BTreeMap<&'static str, &'static str> {
        self.codecs()
            .flat_map(|codec| codec.namespaces())
            .collect()
    }

    /// Copy every declared property of `source` into `target`.
    ///
    /// Both modules must implement the same contract. Values are deep
    /// copies, so later changes to either module do not affect the other.
    ///
    /// # Errors
    /// `UnknownContract` if the contract is not registered, `ModuleCopy` if
    /// the modules differ in contract or a property cannot be transferred.
    /// `target` is left unchanged on error.
    pub fn copy_into(&self, target: &mut dyn Module, source: &dyn Module) -> Result<()> {
        let contract = self
            .contract(source.uri())
            .ok_or_else(|| FeedError::UnknownContract(source.uri().to_string()))?;

        if target.uri() != source.uri() {
            return Err(FeedError::ModuleCopy {
                contract: source.uri().to_string(),
                property: String::new(),
                reason: format!("target implements {}", target.uri()),
            });
        }

        let copy_error = |property: &str, reason: String| FeedError::ModuleCopy {
            contract: contract.uri().to_string(),
            property: property.to_string(),
            reason,
        };

        let mut values = Vec::with_capacity(contract.properties().len());
        for spec in contract.properties() {
            let value = source.property(&spec.name).ok_or_else(|| {
                copy_error(&spec.name, "source does not expose the property".to_string())
            })?;
            if !value.conforms_to(&spec.kind) {
                return Err(copy_error(
                    &spec.name,
                    format!("{} value does not conform to {}", value.kind_name(), spec.kind),
                ));
            }
            values.push((spec.name.as_str(), value));
        }

        // Writes are staged on a clone so a rejected value leaves the target untouched.
        let mut staged = target.clone_module();
        for (name, value) in &values {
            staged
                .set_property(name, value.clone())
                .map_err(|e| copy_error(*name, e.to_string()))?;
        }
        for (name, value) in values {
            target
                .set_property(name, value)
                .map_err(|e| copy_error(name, e.to_string()))?;
        }
        Ok(())
    }

    /// Convert a module into another registered implementation of its contract.
    ///
    /// # Errors
    /// Returns an error if the implementation is unknown or copying fails.
    pub fn convert(&self, source: &dyn Module, implementation: &str) -> Result<Box<dyn Module>> {
        let mut target = self.instantiate(source.uri(), Some(implementation))?;
        self.copy_into(target.as_mut(), source)?;
        Ok(target)
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("contracts", &self.contract_uris())
            .field(
                "codecs",
                &self.codecs().map(|c| c.namespace_uri()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Check that an implementation can read and write every declared property.
fn validate_implementation(contract: &Contract, implementation: &Implementation) -> Result<()> {
    let mut instance = implementation.instantiate();
    let unsupported = |property: &str| FeedError::ModuleContract {
        contract: contract.uri().to_string(),
        implementation: implementation.name().to_string(),
        property: property.to_string(),
    };

    if instance.uri() != contract.uri() {
        return Err(unsupported("uri"));
    }
    for spec in contract.properties() {
        let value = instance.property(&spec.name).ok_or_else(|| unsupported(&spec.name))?;
        instance
            .set_property(&spec.name, value)
            .map_err(|_| unsupported(&spec.name))?;
    }
    Ok(())
}

#[allow(clippy::expect_used)] // Built-in modules are guaranteed to satisfy their contracts
static REGISTRY: LazyLock<ModuleRegistry> = LazyLock::new(|| {
    ModuleRegistry::with_builtin_modules().expect("built-in modules satisfy their contracts")
});

/// The process-wide registry with the built-in modules.
#[must_use]
pub fn registry() -> &'static ModuleRegistry {
    &REGISTRY
}
