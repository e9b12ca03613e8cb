//! Text flattener that walks inline markup using the inline registry.

use roxmltree::Node;

use super::core::InlineRegistry;
use super::types::TextContext;
use crate::error::Result;
use crate::xml::{clean_text, get_tag_name};

/// Engine that flattens an element's inline content into a single string.
///
/// Text nodes are kept in document order and every child element is
/// dispatched to its registered handler. Elements without a handler are
/// logged and read through, so inline markup drift never loses text.
pub struct TextFlattener {
    registry: InlineRegistry,
}

impl TextFlattener {
    /// Create a new flattener with the given registry.
    #[must_use]
    pub fn new(registry: InlineRegistry) -> Self {
        Self { registry }
    }

    /// Get a reference to the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &InlineRegistry {
        &self.registry
    }

    /// Flatten an element's text, children and tails.
    ///
    /// Fragments are joined by single spaces, whitespace runs are collapsed
    /// and the result is trimmed.
    ///
    /// # Errors
    /// Propagates errors from diverting handlers (e.g. a malformed `Repealed`).
    pub fn flatten(&self, node: Node<'_, '_>, context: &mut TextContext) -> Result<String> {
        let mut parts: Vec<String> = Vec::new();

        for child in node.children() {
            if child.is_text() {
                if let Some(text) = child.text() {
                    parts.push(text.to_string());
                }
            } else if child.is_element() {
                let text = self.dispatch(child, context)?;
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }

        Ok(clean_text(&parts.join(" ")))
    }

    /// Run the handler for one inline element.
    fn dispatch(&self, node: Node<'_, '_>, context: &mut TextContext) -> Result<String> {
        let tag_name = get_tag_name(node);
        let flatten = |child: Node<'_, '_>, ctx: &mut TextContext| -> Result<String> {
            self.flatten(child, ctx)
        };

        match self.registry.get_handler(tag_name) {
            Some(handler) => {
                tracing::trace!(tag = %tag_name, class = ?handler.class(), "Flattening inline element");
                handler.handle(node, context, &flatten)
            }
            None => {
                tracing::warn!(
                    tag = %tag_name,
                    parent = %node.parent_element().map(get_tag_name).unwrap_or_default(),
                    level = context.level,
                    "Unsupported inline tag, keeping its text"
                );
                self.flatten(node, context)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::create_inline_registry;
    use crate::test_utils::capture_logs;
    use roxmltree::Document;

    fn flatten(xml: &str) -> (String, TextContext) {
        let doc = Document::parse(xml).unwrap();
        let flattener = TextFlattener::new(create_inline_registry());
        let mut context = TextContext::new(3);
        let text = flattener.flatten(doc.root_element(), &mut context).unwrap();
        (text, context)
    }

    #[test]
    fn test_flatten_nested_inline_markup() {
        let xml = "<Text>begin<DefinedTermFr>defined_fr</DefinedTermFr>middle<Sup>sup<Language>lang</Language></Sup><DefinitionRef>defined_en<Text>defined_en_inner</Text></DefinitionRef>end</Text>";
        let (text, context) = flatten(xml);
        assert_eq!(
            text,
            "begin defined_fr middle sup lang defined_en defined_en_inner end"
        );
        assert_eq!(
            context.channels.defined_terms,
            vec!["defined_fr", "defined_en defined_en_inner"]
        );
    }

    #[test]
    fn test_flatten_collapses_whitespace() {
        let (text, _) = flatten("<Text>\n   Every   person\n\tresident <Emphasis> in </Emphasis>  Canada  </Text>");
        assert_eq!(text, "Every person resident in Canada");
    }

    #[test]
    fn test_flatten_unknown_tag_keeps_text() {
        let ((text, context), logs) =
            capture_logs(|| flatten("<Text>see <FootnoteRef>note <Sup>1</Sup></FootnoteRef> below</Text>"));
        assert_eq!(text, "see note 1 below");
        assert!(context.channels.is_empty());
        assert!(logs.has_warning("Unsupported inline tag"));
        assert!(logs.contents().contains("tag=FootnoteRef"));
    }

    #[test]
    fn test_flatten_joins_fragments_with_space() {
        let (text, _) = flatten("<Text>the <Emphasis>Act</Emphasis>.</Text>");
        assert_eq!(text, "the Act .");
    }

    #[test]
    fn test_flatten_empty() {
        let (text, _) = flatten("<Text/>");
        assert_eq!(text, "");
    }

    #[test]
    fn test_flatten_ignores_comments() {
        let (text, _) = flatten("<Text>a<!-- editorial -->b</Text>");
        assert_eq!(text, "a b");
    }
}
