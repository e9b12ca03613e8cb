//! Error types for the statute parser.
//!
//! Every structural problem is fatal: a document either parses completely or
//! yields no tree. Inline markup drift is not an error and is only logged by
//! the text flattener.

use thiserror::Error;

/// Main error type for the statute parser.
#[derive(Debug, Error)]
pub enum StatuteError {
    /// A structural child tag has no entry in its parent's registry.
    ///
    /// Carries the parent element's verbatim XML so the new element shape
    /// can be inspected and added to the registry.
    #[error("Unsupported tag <{tag}> in <{block}> at level {level}")]
    UnsupportedTag {
        tag: String,
        block: String,
        level: usize,
        parent_xml: String,
    },

    /// A required sub-element or attribute is missing or malformed.
    #[error("Malformed <{element}>: {reason}")]
    MalformedElement { element: String, reason: String },

    /// A heading jumps more than one level deeper than the open heading.
    #[error("Heading '{title}' at level {level} cannot follow an open level {current}")]
    HeadingLevelSkip {
        title: String,
        level: usize,
        current: usize,
    },

    /// A child block does not sit exactly one level below its parent.
    #[error("Block <{tag}> at level {child_level} cannot be a child of level {parent_level}")]
    LevelMismatch {
        tag: String,
        parent_level: usize,
        child_level: usize,
    },

    /// Input path is unusable.
    #[error("Invalid input path: {0}")]
    InvalidInput(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl StatuteError {
    /// Build a `MalformedElement` error.
    pub fn malformed(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedElement {
            element: element.into(),
            reason: reason.into(),
        }
    }

    /// Serialized XML of the element that rejected a child, if any.
    #[must_use]
    pub fn parent_content(&self) -> Option<&str> {
        match self {
            Self::UnsupportedTag { parent_xml, .. } => Some(parent_xml),
            _ => None,
        }
    }
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, StatuteError>;
