//! The block tree.

use serde::Serialize;

use super::kinds::{BlockKind, CompositeKind};
use super::leaf::TextLeaf;
use crate::error::{Result, StatuteError};

/// A node of the parsed statute.
///
/// The tree is built once and never mutated afterwards. Each composite owns
/// its children outright; there are no parent links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Block {
    Composite(CompositeBlock),
    Leaf(TextLeaf),
}

impl Block {
    /// Nesting depth; the root is level 0.
    #[must_use]
    pub fn level(&self) -> usize {
        match self {
            Self::Composite(block) => block.level(),
            Self::Leaf(leaf) => leaf.level(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Composite(block) => BlockKind::Composite(block.kind()),
            Self::Leaf(leaf) => BlockKind::Leaf(leaf.kind()),
        }
    }

    #[must_use]
    pub fn as_composite(&self) -> Option<&CompositeBlock> {
        match self {
            Self::Composite(block) => Some(block),
            Self::Leaf(_) => None,
        }
    }

    #[must_use]
    pub fn as_leaf(&self) -> Option<&TextLeaf> {
        match self {
            Self::Composite(_) => None,
            Self::Leaf(leaf) => Some(leaf),
        }
    }

    /// Visit this block and every descendant, depth-first, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Block)) {
        visit(self);
        if let Self::Composite(block) = self {
            for child in block.children() {
                child.walk(visit);
            }
        }
    }

    /// Number of blocks in this subtree, including itself.
    #[must_use]
    pub fn count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }
}

/// A block that owns an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeBlock {
    kind: CompositeKind,
    level: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Block>,
}

impl CompositeBlock {
    #[must_use]
    pub fn new(kind: CompositeKind, level: usize) -> Self {
        Self {
            kind,
            level,
            label: None,
            title: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a child, enforcing that it sits exactly one level deeper.
    pub fn push_child(&mut self, child: Block) -> Result<()> {
        if child.level() != self.level + 1 {
            return Err(StatuteError::LevelMismatch {
                tag: child.kind().to_string(),
                parent_level: self.level,
                child_level: child.level(),
            });
        }
        self.children.push(child);
        Ok(())
    }

    #[must_use]
    pub fn kind(&self) -> CompositeKind {
        self.kind
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Numbering such as "3", "(1)" or "(a)".
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Heading title; `None` for every other kind.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn children(&self) -> &[Block] {
        &self.children
    }

    /// Direct composite children of the given kind.
    pub fn children_of_kind(&self, kind: CompositeKind) -> impl Iterator<Item = &CompositeBlock> {
        self.children
            .iter()
            .filter_map(Block::as_composite)
            .filter(move |child| child.kind == kind)
    }

    /// Consume into a `Block`.
    #[must_use]
    pub fn into_block(self) -> Block {
        Block::Composite(self)
    }
}
