//! Inline registry mapping text-context tag names to handlers.

use std::collections::{HashMap, HashSet};

use super::handler::InlineHandler;

/// Registry mapping inline element names to handlers.
///
/// Unlike the structural registries, a missing entry is not an error: the
/// flattener logs it and keeps the element's text.
pub struct InlineRegistry {
    handlers: HashMap<String, Box<dyn InlineHandler>>,
}

impl InlineRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for a specific tag name.
    pub fn register(
        &mut self,
        tag_name: impl Into<String>,
        handler: impl InlineHandler + 'static,
    ) {
        self.handlers.insert(tag_name.into(), Box::new(handler));
    }

    /// Get the handler for a tag, if one is registered.
    #[must_use]
    pub fn get_handler(&self, tag_name: &str) -> Option<&dyn InlineHandler> {
        self.handlers.get(tag_name).map(|h| h.as_ref())
    }

    /// Check if a handler is registered for a tag.
    #[must_use]
    pub fn has_handler(&self, tag_name: &str) -> bool {
        self.handlers.contains_key(tag_name)
    }

    /// Return set of all registered tag names.
    #[must_use]
    pub fn registered_tags(&self) -> HashSet<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for InlineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
