//! Block kinds and their source tag names.

use std::fmt;

use serde::Serialize;

/// Kinds of composite (child-owning) blocks.
///
/// Apart from `Heading`, `Definition` and the formula containers, every
/// kind is structurally the same section-level composite. They differ only in
/// the set of child tags their registry accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CompositeKind {
    /// The document element. Only used for registry lookups, never built.
    Statute,
    /// Synthetic root of the assembled tree.
    Body,
    Heading,
    Section,
    Subsection,
    Paragraph,
    Subparagraph,
    Clause,
    Subclause,
    Subsubclause,
    Provision,
    ReadAsText,
    SectionPiece,
    AmendedText,
    Definition,
    FormulaGroup,
    Formula,
    FormulaDefinition,
    FormulaParagraph,
    ContinuedSectionSubsection,
    ContinuedParagraph,
    ContinuedSubparagraph,
    ContinuedClause,
    ContinuedSubclause,
    ContinuedDefinition,
}

impl CompositeKind {
    /// Every composite kind, in declaration order.
    pub const ALL: [CompositeKind; 25] = [
        Self::Statute,
        Self::Body,
        Self::Heading,
        Self::Section,
        Self::Subsection,
        Self::Paragraph,
        Self::Subparagraph,
        Self::Clause,
        Self::Subclause,
        Self::Subsubclause,
        Self::Provision,
        Self::ReadAsText,
        Self::SectionPiece,
        Self::AmendedText,
        Self::Definition,
        Self::FormulaGroup,
        Self::Formula,
        Self::FormulaDefinition,
        Self::FormulaParagraph,
        Self::ContinuedSectionSubsection,
        Self::ContinuedParagraph,
        Self::ContinuedSubparagraph,
        Self::ContinuedClause,
        Self::ContinuedSubclause,
        Self::ContinuedDefinition,
    ];

    /// XML tag name of this kind.
    #[must_use]
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Statute => "Statute",
            Self::Body => "Body",
            Self::Heading => "Heading",
            Self::Section => "Section",
            Self::Subsection => "Subsection",
            Self::Paragraph => "Paragraph",
            Self::Subparagraph => "Subparagraph",
            Self::Clause => "Clause",
            Self::Subclause => "Subclause",
            Self::Subsubclause => "Subsubclause",
            Self::Provision => "Provision",
            Self::ReadAsText => "ReadAsText",
            Self::SectionPiece => "SectionPiece",
            Self::AmendedText => "AmendedText",
            Self::Definition => "Definition",
            Self::FormulaGroup => "FormulaGroup",
            Self::Formula => "Formula",
            Self::FormulaDefinition => "FormulaDefinition",
            Self::FormulaParagraph => "FormulaParagraph",
            Self::ContinuedSectionSubsection => "ContinuedSectionSubsection",
            Self::ContinuedParagraph => "ContinuedParagraph",
            Self::ContinuedSubparagraph => "ContinuedSubparagraph",
            Self::ContinuedClause => "ContinuedClause",
            Self::ContinuedSubclause => "ContinuedSubclause",
            Self::ContinuedDefinition => "ContinuedDefinition",
        }
    }

    /// Look up the kind for an XML tag name.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_tag() == tag)
    }

    /// Whether this kind is one of the generic numbered section levels.
    #[must_use]
    pub fn is_section_level(&self) -> bool {
        !matches!(
            self,
            Self::Statute
                | Self::Body
                | Self::Heading
                | Self::Definition
                | Self::FormulaGroup
                | Self::Formula
                | Self::FormulaDefinition
                | Self::FormulaParagraph
        )
    }
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Kinds of text leaf blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LeafKind {
    Text,
    /// A `Text` directly inside a `Definition`, opening with the defined term.
    TextDefinition,
    MarginalNote,
    HistoricalNote,
    FormulaText,
    FormulaTerm,
    FormulaConnector,
}

impl LeafKind {
    /// XML tag name of this kind.
    #[must_use]
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Text | Self::TextDefinition => "Text",
            Self::MarginalNote => "MarginalNote",
            Self::HistoricalNote => "HistoricalNote",
            Self::FormulaText => "FormulaText",
            Self::FormulaTerm => "FormulaTerm",
            Self::FormulaConnector => "FormulaConnector",
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Any block kind; the target of a registry `Construct` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Composite(CompositeKind),
    Leaf(LeafKind),
}

impl From<CompositeKind> for BlockKind {
    fn from(kind: CompositeKind) -> Self {
        Self::Composite(kind)
    }
}

impl From<LeafKind> for BlockKind {
    fn from(kind: LeafKind) -> Self {
        Self::Leaf(kind)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite(kind) => fmt::Display::fmt(kind, f),
            Self::Leaf(kind) => fmt::Display::fmt(kind, f),
        }
    }
}
