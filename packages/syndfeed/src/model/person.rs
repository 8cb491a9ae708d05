use serde::Serialize;

use crate::module::{Extendable, ModuleList};

/// An author or contributor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(skip_serializing_if = "ModuleList::is_empty")]
    pub modules: ModuleList,
}

impl Person {
    /// Create a person with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create a person with only an e-mail address.
    #[must_use]
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }
}

impl Extendable for Person {
    fn modules(&self) -> &ModuleList {
        &self.modules
    }

    fn modules_mut(&mut self) -> &mut ModuleList {
        &mut self.modules
    }
}
