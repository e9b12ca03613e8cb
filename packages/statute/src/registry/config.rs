//! Registry configuration for statute XML.

use super::core::InlineRegistry;
use super::handlers::{DefinedTermHandler, NoteHandler, ReferenceHandler, RepealedHandler, TransparentHandler};
use super::structure::{StructureRegistry, TagRegistry};
use crate::model::{CompositeKind, LeafKind};

/// Create the text-context registry used for every leaf.
#[must_use]
pub fn create_inline_registry() -> InlineRegistry {
    let mut registry = InlineRegistry::new();

    // Presentational markup
    for tag in [
        "Emphasis",
        "Sup",
        "Sub",
        "Language",
        "LeaderRightJustified",
        "HistoricalNoteSubItem",
        // Definition text nested inside <DefinitionRef>
        "Text",
    ] {
        registry.register(tag, TransparentHandler);
    }

    // Side-channel markup
    registry.register("XRefExternal", ReferenceHandler::external());
    registry.register("XRefInternal", ReferenceHandler::internal());
    registry.register("DefinedTermEn", DefinedTermHandler);
    registry.register("DefinedTermFr", DefinedTermHandler);
    registry.register("DefinitionRef", DefinedTermHandler);
    registry.register("MarginalNote", NoteHandler::marginal());
    registry.register("HistoricalNote", NoteHandler::historical());
    registry.register("Repealed", RepealedHandler);

    registry
}

/// Create the structural grammar of every composite kind.
///
/// ```text
/// Statute
/// └── Body
///     ├── Heading (level="1".."n", nesting rebuilt from levels)
///     └── Section
///         ├── Subsection
///         │   └── Paragraph
///         │       └── Subparagraph
///         │           └── Clause
///         │               └── Subclause
///         │                   └── Subsubclause
///         ├── Definition
///         └── FormulaGroup
/// ```
#[must_use]
pub fn create_structure_registry() -> StructureRegistry {
    use CompositeKind as C;
    use LeafKind as L;

    let mut registry = StructureRegistry::new();

    // Document element: only the Body carries legal text
    registry.register(
        TagRegistry::new(C::Statute)
            .construct("Body", C::Body)
            .discard(["Identification", "RecentAmendments", "Schedule"]),
    );

    // Body: flat run of headings and sections, assembled by heading level
    registry.register(
        TagRegistry::new(C::Body)
            .construct("Heading", C::Heading)
            .construct("Section", C::Section),
    );

    // Heading: children are read directly as label and title
    registry.register(TagRegistry::new(C::Heading).discard(["Label", "TitleText"]));

    registry.register(
        labelled(C::Section)
            .construct("Subsection", C::Subsection)
            .construct("Paragraph", C::Paragraph)
            .construct("Definition", C::Definition)
            .construct("Text", L::Text)
            .construct("MarginalNote", L::MarginalNote)
            .construct("HistoricalNote", L::HistoricalNote)
            .construct("FormulaGroup", C::FormulaGroup)
            .construct("FormulaDefinition", C::FormulaDefinition)
            .construct("Provision", C::Provision)
            .construct("ReadAsText", C::ReadAsText)
            .construct("AmendedText", C::AmendedText)
            .construct("ContinuedSectionSubsection", C::ContinuedSectionSubsection),
    );

    registry.register(
        labelled(C::Subsection)
            .construct("Paragraph", C::Paragraph)
            .construct("Definition", C::Definition)
            .construct("Text", L::Text)
            .construct("MarginalNote", L::MarginalNote)
            .construct("HistoricalNote", L::HistoricalNote)
            .construct("FormulaGroup", C::FormulaGroup)
            .construct("FormulaDefinition", C::FormulaDefinition)
            .construct("Provision", C::Provision)
            .construct("ReadAsText", C::ReadAsText)
            .construct("ContinuedSectionSubsection", C::ContinuedSectionSubsection),
    );

    registry.register(
        labelled(C::Paragraph)
            .construct("Subparagraph", C::Subparagraph)
            .construct("Text", L::Text)
            .construct("MarginalNote", L::MarginalNote)
            .construct("FormulaGroup", C::FormulaGroup)
            .construct("FormulaDefinition", C::FormulaDefinition)
            .construct("ReadAsText", C::ReadAsText)
            .construct("ContinuedParagraph", C::ContinuedParagraph),
    );

    registry.register(
        labelled(C::Subparagraph)
            .construct("Clause", C::Clause)
            .construct("Text", L::Text)
            .construct("MarginalNote", L::MarginalNote)
            .construct("FormulaGroup", C::FormulaGroup)
            .construct("ReadAsText", C::ReadAsText)
            .construct("ContinuedSubparagraph", C::ContinuedSubparagraph),
    );

    registry.register(
        labelled(C::Clause)
            .construct("Subclause", C::Subclause)
            .construct("Text", L::Text)
            .construct("MarginalNote", L::MarginalNote)
            .construct("FormulaGroup", C::FormulaGroup)
            .construct("ReadAsText", C::ReadAsText)
            .construct("ContinuedClause", C::ContinuedClause),
    );

    registry.register(
        labelled(C::Subclause)
            .construct("Subsubclause", C::Subsubclause)
            .construct("Text", L::Text)
            .construct("FormulaGroup", C::FormulaGroup)
            .construct("ContinuedSubclause", C::ContinuedSubclause),
    );

    registry.register(
        labelled(C::Subsubclause)
            .construct("Text", L::Text)
            .construct("FormulaGroup", C::FormulaGroup),
    );

    registry.register(
        labelled(C::Provision)
            .construct("Provision", C::Provision)
            .construct("Text", L::Text)
            .construct("MarginalNote", L::MarginalNote)
            .construct("HistoricalNote", L::HistoricalNote)
            .construct("FormulaGroup", C::FormulaGroup),
    );

    registry.register(
        labelled(C::Definition)
            .construct("Text", L::TextDefinition)
            .construct("Paragraph", C::Paragraph)
            .construct("MarginalNote", L::MarginalNote)
            .construct("HistoricalNote", L::HistoricalNote)
            .construct("ContinuedDefinition", C::ContinuedDefinition)
            .construct("FormulaGroup", C::FormulaGroup),
    );

    // Amending text quotes provisions of other statutes
    for kind in [C::ReadAsText, C::AmendedText] {
        registry.register(
            labelled(kind)
                .construct("Section", C::Section)
                .construct("SectionPiece", C::SectionPiece)
                .construct("Subsection", C::Subsection)
                .construct("Paragraph", C::Paragraph)
                .construct("Subparagraph", C::Subparagraph)
                .construct("Definition", C::Definition)
                .construct("Text", L::Text)
                .construct("MarginalNote", L::MarginalNote)
                .construct("Provision", C::Provision)
                .construct("FormulaGroup", C::FormulaGroup),
        );
    }

    registry.register(
        labelled(C::SectionPiece)
            .construct("Section", C::Section)
            .construct("Subsection", C::Subsection)
            .construct("Paragraph", C::Paragraph)
            .construct("Definition", C::Definition)
            .construct("Text", L::Text)
            .construct("MarginalNote", L::MarginalNote),
    );

    // Formulas
    registry.register(
        labelled(C::FormulaGroup)
            .construct("Formula", C::Formula)
            .construct("FormulaConnector", L::FormulaConnector)
            .construct("FormulaDefinition", C::FormulaDefinition)
            .construct("FormulaParagraph", C::FormulaParagraph),
    );

    registry.register(TagRegistry::new(C::Formula).construct("FormulaText", L::FormulaText));

    registry.register(
        labelled(C::FormulaDefinition)
            .construct("FormulaTerm", L::FormulaTerm)
            .construct("Text", L::Text)
            .construct("FormulaParagraph", C::FormulaParagraph)
            .construct("FormulaGroup", C::FormulaGroup),
    );

    registry.register(
        labelled(C::FormulaParagraph)
            .construct("Text", L::Text)
            .construct("FormulaParagraph", C::FormulaParagraph)
            .construct("FormulaDefinition", C::FormulaDefinition)
            .construct("FormulaGroup", C::FormulaGroup),
    );

    // Continuation text after a run of sub-levels
    for kind in [
        C::ContinuedSectionSubsection,
        C::ContinuedParagraph,
        C::ContinuedSubparagraph,
        C::ContinuedClause,
        C::ContinuedSubclause,
        C::ContinuedDefinition,
    ] {
        registry.register(
            labelled(kind)
                .construct("Text", L::Text)
                .construct("FormulaGroup", C::FormulaGroup),
        );
    }

    registry
}

/// Grammar for a kind whose `Label` child is consumed as its label.
fn labelled(kind: CompositeKind) -> TagRegistry {
    TagRegistry::new(kind).discard(["Label"])
}
