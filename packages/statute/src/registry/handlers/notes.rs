//! Handlers for notes and repeal notices embedded in text.

use roxmltree::Node;

use crate::error::{Result, StatuteError};
use crate::model::LeafKind;
use crate::registry::handler::{FlattenFn, InlineHandler};
use crate::registry::types::{InlineClass, TextContext};
use crate::xml::{element_children, get_tag_name};

/// Handler for `<MarginalNote>` and `<HistoricalNote>` inside text.
///
/// The note is flattened into its own leaf one level below the owner and
/// attached to the owner's side-channels.
pub struct NoteHandler {
    kind: LeafKind,
}

impl NoteHandler {
    #[must_use]
    pub fn marginal() -> Self {
        Self {
            kind: LeafKind::MarginalNote,
        }
    }

    #[must_use]
    pub fn historical() -> Self {
        Self {
            kind: LeafKind::HistoricalNote,
        }
    }
}

impl InlineHandler for NoteHandler {
    fn class(&self) -> InlineClass {
        InlineClass::Diverting
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut TextContext,
        flatten: &FlattenFn<'a, 'input>,
    ) -> Result<String> {
        let mut nested = TextContext::new(context.level + 1);
        let text = flatten(node, &mut nested)?;
        let note = nested.into_leaf(self.kind, text.clone());

        match self.kind {
            LeafKind::HistoricalNote => context.add_historical_note(note),
            _ => context.add_marginal_note(note),
        }

        Ok(text)
    }
}

/// Handler for `<Repealed>` notices.
///
/// A repeal notice is plain text; nested markup means the source has an
/// element shape this parser does not understand.
pub struct RepealedHandler;

impl InlineHandler for RepealedHandler {
    fn class(&self) -> InlineClass {
        InlineClass::Diverting
    }

    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut TextContext,
        _flatten: &FlattenFn<'a, 'input>,
    ) -> Result<String> {
        if let Some(child) = element_children(node).next() {
            return Err(StatuteError::malformed(
                "Repealed",
                format!("unexpected child element <{}>", get_tag_name(child)),
            ));
        }

        let notice = node.text().unwrap_or_default().trim().to_string();
        context.set_repealed(notice.clone())?;
        Ok(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::get_text;
    use roxmltree::Document;

    fn handle<H: InlineHandler>(handler: &H, xml: &str, context: &mut TextContext) -> Result<String> {
        let doc = Document::parse(xml).unwrap();
        let flatten = |n: Node<'_, '_>, _: &mut TextContext| -> Result<String> { Ok(get_text(n)) };
        handler.handle(doc.root_element(), context, &flatten)
    }

    #[test]
    fn test_marginal_note_nested_leaf() {
        let mut context = TextContext::new(3);
        let text = handle(
            &NoteHandler::marginal(),
            "<MarginalNote>Tax payable by persons resident in Canada</MarginalNote>",
            &mut context,
        )
        .unwrap();

        assert_eq!(text, "Tax payable by persons resident in Canada");
        let notes = &context.channels.marginal_notes;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind(), LeafKind::MarginalNote);
        assert_eq!(notes[0].level(), 4);
        assert_eq!(notes[0].text(), text);
        assert!(context.channels.historical_notes.is_empty());
    }

    #[test]
    fn test_historical_note() {
        let mut context = TextContext::new(1);
        handle(
            &NoteHandler::historical(),
            "<HistoricalNote>R.S., 1985, c. 1 (5th Supp.), s. 2</HistoricalNote>",
            &mut context,
        )
        .unwrap();
        assert_eq!(context.channels.historical_notes.len(), 1);
        assert_eq!(context.channels.historical_notes[0].level(), 2);
    }

    #[test]
    fn test_repealed_trimmed_verbatim() {
        let mut context = TextContext::new(2);
        let text = handle(
            &RepealedHandler,
            "<Repealed>  [Repealed,\n 2013, c. 34, s. 96]  </Repealed>",
            &mut context,
        )
        .unwrap();
        assert_eq!(text, "[Repealed,\n 2013, c. 34, s. 96]");
        assert_eq!(
            context.channels.repealed.as_deref(),
            Some("[Repealed,\n 2013, c. 34, s. 96]")
        );
    }

    #[test]
    fn test_repealed_with_child_is_malformed() {
        let mut context = TextContext::new(2);
        let err = handle(
            &RepealedHandler,
            "<Repealed>[Repealed, <Emphasis>1994</Emphasis>]</Repealed>",
            &mut context,
        )
        .unwrap_err();
        assert!(matches!(err, StatuteError::MalformedElement { .. }));
        assert!(err.to_string().contains("<Emphasis>"));
        assert!(context.channels.repealed.is_none());
    }
}
