//! Inline handler trait definition.

use roxmltree::Node;

use super::types::{InlineClass, TextContext};
use crate::error::Result;

/// Function type for flattening an element's own content (text, children
/// and tails) into a context.
pub type FlattenFn<'a, 'input> =
    dyn Fn(Node<'a, 'input>, &mut TextContext) -> Result<String> + 'a;

/// Trait for inline (text-context) handlers.
///
/// Handlers return the text the element contributes to the flattened prose.
/// They receive a `flatten` function for the element's content, and may
/// call it with a different context to build a nested note.
pub trait InlineHandler: Send + Sync {
    /// Return the classification of this handler.
    fn class(&self) -> InlineClass;

    /// Process the element and return its inline text.
    ///
    /// # Arguments
    /// * `node` - The inline element
    /// * `context` - Side-channels of the owning leaf
    /// * `flatten` - Flattens an element's content
    fn handle<'a, 'input>(
        &self,
        node: Node<'a, 'input>,
        context: &mut TextContext,
        flatten: &FlattenFn<'a, 'input>,
    ) -> Result<String>;
}
