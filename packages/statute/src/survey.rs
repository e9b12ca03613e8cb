//! Tag survey: which child tags occur under which tags.
//!
//! Used to extend the structural registries when a new element shape shows
//! up in source documents. Children that the registry of a known block kind
//! would reject are flagged in the report.

use std::collections::{BTreeMap, BTreeSet};

use roxmltree::{Document, Node};

use crate::model::CompositeKind;
use crate::registry::{StructureRegistry, TagRule};
use crate::xml::{element_children, get_tag_name};

/// Marker appended to children a registry would reject.
const UNSUPPORTED_MARKER: &str = "[unsupported]";

/// Observed child tags per tag, in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSurvey {
    tags: BTreeMap<String, BTreeSet<String>>,
}

impl TagSurvey {
    /// Survey every element of a document.
    #[must_use]
    pub fn from_document(doc: &Document<'_>) -> Self {
        Self::from_node(doc.root_element())
    }

    /// Survey an element and its descendants.
    #[must_use]
    pub fn from_node(node: Node<'_, '_>) -> Self {
        let mut tags: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for element in node.descendants().filter(Node::is_element) {
            let children = tags.entry(get_tag_name(element).to_string()).or_default();
            children.extend(element_children(element).map(|child| get_tag_name(child).to_string()));
        }
        Self { tags }
    }

    /// All surveyed tags with their child tags.
    #[must_use]
    pub fn tags(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.tags
    }

    /// Child tags observed under a tag.
    #[must_use]
    pub fn child_tags(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.tags.get(tag)
    }

    /// Tags that carry a `<Label>` child somewhere in the document.
    pub fn labelled_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .filter(|(_, children)| children.contains("Label"))
            .map(|(tag, _)| tag.as_str())
    }

    /// `(parent, child)` pairs the registries would reject.
    ///
    /// Only parents that are block kinds with a grammar are checked; inline
    /// and discarded content is not structural.
    #[must_use]
    pub fn unsupported<'s>(&'s self, registry: &StructureRegistry) -> Vec<(&'s str, &'s str)> {
        let mut pairs = Vec::new();
        for (tag, children) in &self.tags {
            let Some(kind) = CompositeKind::from_tag(tag).filter(|kind| registry.get(*kind).is_some()) else {
                continue;
            };
            for child in children {
                if registry.resolve(kind, child) == TagRule::Unsupported {
                    pairs.push((tag.as_str(), child.as_str()));
                }
            }
        }
        pairs
    }

    /// Human-readable report: each tag with its children, then the tags
    /// that carry labels.
    #[must_use]
    pub fn report(&self, registry: &StructureRegistry) -> Vec<String> {
        let rejected: BTreeSet<(&str, &str)> = self.unsupported(registry).into_iter().collect();
        let mut lines = Vec::new();

        for (tag, children) in &self.tags {
            lines.push(tag.clone());
            for child in children {
                if rejected.contains(&(tag.as_str(), child.as_str())) {
                    lines.push(format!("   {child} {UNSUPPORTED_MARKER}"));
                } else {
                    lines.push(format!("   {child}"));
                }
            }
            lines.push(String::new());
        }

        lines.push("Tags with a Label child:".to_string());
        lines.extend(self.labelled_tags().map(|tag| format!("   {tag}")));
        lines
    }
}
