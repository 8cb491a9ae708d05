//! XML codecs that read and write module elements.

use roxmltree::Node;

use super::base::Module;
use super::list::ModuleList;
use super::registry::ModuleRegistry;
use crate::dialect::ParseContext;
use crate::error::Result;
use crate::xml::XmlWriter;

/// Reads and writes the elements of one module namespace.
///
/// Codecs are dialect independent: the same codec runs on RSS channels,
/// RDF items and Atom entries alike.
pub trait ModuleCodec: Send + Sync {
    /// Contract URI, which is also the element namespace.
    fn namespace_uri(&self) -> &'static str;

    /// Preferred namespace prefix for generated documents.
    fn prefix(&self) -> &'static str;

    /// Every `(prefix, uri)` pair the generated markup uses.
    fn namespaces(&self) -> Vec<(&'static str, &'static str)> {
        vec![(self.prefix(), self.namespace_uri())]
    }

    /// Build a module from the children of `element`.
    ///
    /// Returns `Ok(None)` when the element has no children in this namespace.
    fn parse(&self, element: Node<'_, '_>, ctx: &ParseContext<'_>) -> Result<Option<Box<dyn Module>>>;

    /// Write the module's properties as child elements.
    fn generate(&self, module: &dyn Module, writer: &mut XmlWriter) -> Result<()>;
}

/// Run every registered codec over an element.
pub fn parse_modules(element: Node<'_, '_>, ctx: &ParseContext<'_>) -> Result<ModuleList> {
    let mut modules = ModuleList::new();
    for codec in ctx.modules.codecs() {
        if let Some(module) = codec.parse(element, ctx)? {
            modules.push(module);
        }
    }
    Ok(modules)
}

/// Write every module that has a registered codec.
pub fn generate_modules(
    modules: &ModuleList,
    registry: &ModuleRegistry,
    writer: &mut XmlWriter,
) -> Result<()> {
    for module in modules.iter() {
        match registry.codec(module.uri()) {
            Some(codec) => codec.generate(module, writer)?,
            None => tracing::debug!(uri = module.uri(), "no codec registered, module not written"),
        }
    }
    Ok(())
}
