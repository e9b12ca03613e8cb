//! Inline element handlers for text-level markup.
//!
//! Transparent handlers keep text only. Reference and defined-term handlers
//! also record what they saw in the owning leaf's side-channels, while still
//! returning the element's text for the prose.

use roxmltree::Node;

use crate::error::Result;
use crate::model::{Reference, ReferenceKind};
use crate::registry::handler::{FlattenFn, InlineHandler};
use crate::registry::types::{InlineClass, TextContext};

/// Handler that reads through an element without side effects.
///
/// Used for `<Emphasis>`, `<Sup>`, `<Language>`, `<LeaderRightJustified>`
/// and similar presentational markup.
pub struct TransparentHandler;

impl InlineHandler for TransparentHandler {
    fn class(&self) -> InlineClass {
        InlineClass::Transparent
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut TextContext,
        flatten: &FlattenFn<'a, 'input>,
    ) -> Result<String> {
        flatten(node, context)
    }
}

/// Handler for `<XRefExternal>` and `<XRefInternal>` cross-references.
///
/// The link is the `link` attribute; internal references usually have none
/// and point at the section number they display.
pub struct ReferenceHandler {
    kind: ReferenceKind,
}

impl ReferenceHandler {
    #[must_use]
    pub fn external() -> Self {
        Self {
            kind: ReferenceKind::External,
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self {
            kind: ReferenceKind::Internal,
        }
    }
}

impl InlineHandler for ReferenceHandler {
    fn class(&self) -> InlineClass {
        InlineClass::Diverting
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut TextContext,
        flatten: &FlattenFn<'a, 'input>,
    ) -> Result<String> {
        let text = flatten(node, context)?;
        let link = node
            .attribute("link")
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map_or_else(|| text.clone(), String::from);

        context.add_reference(Reference {
            kind: self.kind,
            link,
            text: text.clone(),
            target_type: node.attribute("reference-type").map(String::from),
        });

        Ok(text)
    }
}

/// Handler for `<DefinedTermEn>`, `<DefinedTermFr>` and `<DefinitionRef>`.
pub struct DefinedTermHandler;

impl InlineHandler for DefinedTermHandler {
    fn class(&self) -> InlineClass {
        InlineClass::Diverting
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut TextContext,
        flatten: &FlattenFn<'a, 'input>,
    ) -> Result<String> {
        let text = flatten(node, context)?;
        if !text.is_empty() {
            context.add_defined_term(text.clone());
        }
        Ok(text)
    }
}
