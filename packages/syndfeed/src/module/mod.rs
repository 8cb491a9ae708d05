//! Extension modules attached to feeds, entries and persons.
//!
//! A module is identified by its contract URI. The [`ModuleRegistry`]
//! holds each contract's declared properties, its implementations and the
//! codec that maps it to XML. Copying between implementations goes through
//! the contract, so the typed [`DcModule`] and a [`GenericModule`] for the
//! same contract are interchangeable.

mod base;
mod codec;
mod contract;
mod dc;
mod generic;
mod list;
mod registry;
mod sy;

pub use base::Module;
pub use codec::{generate_modules, parse_modules, ModuleCodec};
pub use contract::{Contract, PropertyKind, PropertySpec, PropertyValue};
pub use dc::{dc_contract, DcCodec, DcModule, DcSubject, DC_URI};
pub use generic::GenericModule;
pub use list::{Extendable, ModuleList};
pub use registry::{registry, Implementation, ModuleRegistry};
pub use sy::{sy_contract, SyCodec, SyModule, UpdatePeriod, SY_URI};
