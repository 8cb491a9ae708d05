//! Error types for syndfeed.
//!
//! Uses the dual-error pattern: `FeedError` for library consumers with
//! detailed error context, and the `Result` alias for internal use.

use thiserror::Error;

use crate::dialect::FeedType;

/// Main error type for the syndfeed library.
#[derive(Debug, Error)]
pub enum FeedError {
    /// No registered dialect parser recognised the document.
    #[error("Unrecognized feed format: root element <{root}>{}", .namespace.as_ref().map(|ns| format!(" in namespace {ns}")).unwrap_or_default())]
    UnrecognizedFormat {
        root: String,
        namespace: Option<String>,
    },

    /// A dialect matched but its required structure is missing or malformed.
    #[error("Failed to parse {feed_type} feed at {path}: {message}")]
    Parse {
        feed_type: FeedType,
        path: String,
        message: String,
    },

    /// A module implementation does not expose a property its contract declares.
    #[error("Module implementation '{implementation}' of contract {contract} does not support property '{property}'")]
    ModuleContract {
        contract: String,
        implementation: String,
        property: String,
    },

    /// Copying a declared property between two module instances failed.
    #[error("Cannot copy property '{property}' of contract {contract}: {reason}")]
    ModuleCopy {
        contract: String,
        property: String,
        reason: String,
    },

    /// A setter received a value outside the property's domain.
    #[error("Invalid value '{value}' for property '{property}'")]
    InvalidValue { property: String, value: String },

    /// The property is not part of the module's contract.
    #[error("Contract {contract} has no property '{property}'")]
    UnknownProperty { contract: String, property: String },

    /// No contract is registered under the given URI.
    #[error("No module contract registered for {0}")]
    UnknownContract(String),

    /// A contract or implementation was registered twice.
    #[error("Already registered: {0}")]
    DuplicateRegistration(String),

    /// Unknown dialect tag.
    #[error("Unknown feed type: '{0}'")]
    UnknownFeedType(String),

    /// Invalid locale tag.
    #[error("Invalid locale: '{0}'. Expected a language tag (e.g., en-US)")]
    InvalidLocale(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// XML generation failed.
    #[error("XML generation failed: {0}")]
    XmlWrite(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

impl FeedError {
    /// Shorthand for a parse error raised by a dialect parser.
    pub fn parse(feed_type: FeedType, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            feed_type,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an invalid value rejected by a setter.
    pub fn invalid_value(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for syndfeed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
