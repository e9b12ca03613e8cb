//! Structural registries: one closed child-tag grammar per block kind.

use std::collections::{BTreeSet, HashMap};

use super::types::TagRule;
use crate::model::{BlockKind, CompositeKind};

/// Child-tag grammar of a single composite kind.
///
/// Tags without an explicit rule resolve to the registry's default, which is
/// `Unsupported` unless changed.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    block: CompositeKind,
    rules: HashMap<String, TagRule>,
    default: TagRule,
}

impl TagRegistry {
    /// Create an empty grammar for a block kind.
    #[must_use]
    pub fn new(block: CompositeKind) -> Self {
        Self {
            block,
            rules: HashMap::new(),
            default: TagRule::Unsupported,
        }
    }

    /// Map a child tag to a block constructor.
    #[must_use]
    pub fn construct(mut self, tag: impl Into<String>, kind: impl Into<BlockKind>) -> Self {
        self.rules.insert(tag.into(), TagRule::Construct(kind.into()));
        self
    }

    /// Mark child tags as structurally irrelevant.
    #[must_use]
    pub fn discard(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for tag in tags {
            self.rules.insert(tag.into(), TagRule::Discard);
        }
        self
    }

    /// Set the rule for tags without an entry.
    #[must_use]
    pub fn with_default(mut self, rule: TagRule) -> Self {
        self.default = rule;
        self
    }

    /// The kind this grammar belongs to.
    #[must_use]
    pub fn block(&self) -> CompositeKind {
        self.block
    }

    /// Resolve a child tag.
    #[must_use]
    pub fn resolve(&self, tag: &str) -> TagRule {
        self.rules.get(tag).copied().unwrap_or(self.default)
    }

    /// Tags accepted here, either constructed or discarded.
    #[must_use]
    pub fn known_tags(&self) -> BTreeSet<&str> {
        self.rules
            .iter()
            .filter(|(_, rule)| **rule != TagRule::Unsupported)
            .map(|(tag, _)| tag.as_str())
            .collect()
    }
}

/// All structural grammars, keyed by block kind.
#[derive(Debug, Clone, Default)]
pub struct StructureRegistry {
    registries: HashMap<CompositeKind, TagRegistry>,
}

impl StructureRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grammar, replacing any previous one for the same kind.
    pub fn register(&mut self, registry: TagRegistry) {
        self.registries.insert(registry.block(), registry);
    }

    /// Get the grammar for a kind.
    #[must_use]
    pub fn get(&self, kind: CompositeKind) -> Option<&TagRegistry> {
        self.registries.get(&kind)
    }

    /// Resolve a child tag of a given parent kind.
    ///
    /// Kinds without a grammar accept nothing.
    #[must_use]
    pub fn resolve(&self, parent: CompositeKind, tag: &str) -> TagRule {
        self.get(parent)
            .map_or(TagRule::Unsupported, |registry| registry.resolve(tag))
    }
}
