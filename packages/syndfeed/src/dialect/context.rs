use crate::date::Locale;
use crate::module::{registry, ModuleRegistry};

/// Everything a parse needs besides the document itself.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    /// Locale for date text; never affects structure.
    pub locale: &'a Locale,
    /// Registry whose codecs read module elements.
    pub modules: &'a ModuleRegistry,
}

impl<'a> ParseContext<'a> {
    /// Context using the process-wide module registry.
    #[must_use]
    pub fn new(locale: &'a Locale) -> Self {
        Self {
            locale,
            modules: registry(),
        }
    }

    /// Context using a caller-provided module registry.
    #[must_use]
    pub fn with_registry(locale: &'a Locale, modules: &'a ModuleRegistry) -> Self {
        Self { locale, modules }
    }
}
