//! Text leaf blocks and their side-channels.

use std::fmt;

use serde::Serialize;

use super::kinds::LeafKind;

/// Whether a cross-reference points outside or inside the statute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// `<XRefExternal>`: another act or regulation.
    External,
    /// `<XRefInternal>`: a provision of the same statute.
    Internal,
}

impl ReferenceKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::External => "external",
            Self::Internal => "internal",
        }
    }
}

/// A cross-reference lifted out of inline markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub kind: ReferenceKind,

    /// Link target: the `link` attribute, or the reference text when absent.
    pub link: String,

    /// Flattened text of the reference element.
    pub text: String,

    /// The `reference-type` attribute (e.g. "act", "regulation").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({}", self.text, self.link, self.kind.as_str())?;
        if let Some(target_type) = &self.target_type {
            write!(f, ", {target_type}")?;
        }
        f.write_str(")")
    }
}

/// Structured data collected while flattening a leaf's inline markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SideChannels {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub defined_terms: Vec<String>,

    /// Verbatim repeal notice, e.g. "[Repealed, 2013, c. 34, s. 96]".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repealed: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub marginal_notes: Vec<TextLeaf>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub historical_notes: Vec<TextLeaf>,
}

impl SideChannels {
    /// True when no side-channel holds anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
            && self.defined_terms.is_empty()
            && self.repealed.is_none()
            && self.marginal_notes.is_empty()
            && self.historical_notes.is_empty()
    }
}

/// A leaf block: flattened prose plus side-channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextLeaf {
    kind: LeafKind,
    level: usize,
    text: String,
    #[serde(flatten)]
    channels: SideChannels,
}

impl TextLeaf {
    #[must_use]
    pub fn new(kind: LeafKind, level: usize, text: impl Into<String>, channels: SideChannels) -> Self {
        Self {
            kind,
            level,
            text: text.into(),
            channels,
        }
    }

    #[must_use]
    pub fn kind(&self) -> LeafKind {
        self.kind
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// The flattened, whitespace-collapsed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn channels(&self) -> &SideChannels {
        &self.channels
    }

    #[must_use]
    pub fn references(&self) -> &[Reference] {
        &self.channels.references
    }

    #[must_use]
    pub fn defined_terms(&self) -> &[String] {
        &self.channels.defined_terms
    }

    #[must_use]
    pub fn repealed(&self) -> Option<&str> {
        self.channels.repealed.as_deref()
    }

    #[must_use]
    pub fn marginal_notes(&self) -> &[TextLeaf] {
        &self.channels.marginal_notes
    }

    #[must_use]
    pub fn historical_notes(&self) -> &[TextLeaf] {
        &self.channels.historical_notes
    }

    /// The term a `TextDefinition` defines: its first defined term.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        match self.kind {
            LeafKind::TextDefinition => self.channels.defined_terms.first().map(String::as_str),
            _ => None,
        }
    }
}
