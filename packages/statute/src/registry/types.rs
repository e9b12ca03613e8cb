//! Types for the tag registry system.

use std::fmt;

use crate::error::{Result, StatuteError};
use crate::model::{BlockKind, LeafKind, Reference, SideChannels, TextLeaf};

/// What a structural registry does with a child tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRule {
    /// Build a block of this kind one level below the parent.
    Construct(BlockKind),
    /// Structurally irrelevant here (e.g. a `Label` consumed by the parent).
    Discard,
    /// Must not appear here; fatal.
    Unsupported,
}

/// Classification of inline handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineClass {
    /// Keeps inline text, no side effect (Emphasis, Sup).
    Transparent,
    /// Records side-channel data and keeps inline text (XRefExternal, Repealed).
    Diverting,
}

/// Context passed through text flattening of one leaf.
///
/// Diverting handlers record into the side-channels of the leaf being built.
#[derive(Default)]
pub struct TextContext {
    /// Level of the leaf that owns these side-channels.
    pub level: usize,

    /// Collected side-channel data.
    pub channels: SideChannels,
}

impl TextContext {
    /// Create a context for a leaf at the given level.
    #[must_use]
    pub fn new(level: usize) -> Self {
        Self {
            level,
            channels: SideChannels::default(),
        }
    }

    pub fn add_reference(&mut self, reference: Reference) {
        self.channels.references.push(reference);
    }

    pub fn add_defined_term(&mut self, term: impl Into<String>) {
        self.channels.defined_terms.push(term.into());
    }

    /// Record the repeal notice; a leaf carries at most one.
    pub fn set_repealed(&mut self, notice: impl Into<String>) -> Result<()> {
        let notice = notice.into();
        if let Some(existing) = &self.channels.repealed {
            return Err(StatuteError::malformed(
                "Repealed",
                format!("second repeal notice '{notice}' after '{existing}'"),
            ));
        }
        self.channels.repealed = Some(notice);
        Ok(())
    }

    pub fn add_marginal_note(&mut self, note: TextLeaf) {
        self.channels.marginal_notes.push(note);
    }

    pub fn add_historical_note(&mut self, note: TextLeaf) {
        self.channels.historical_notes.push(note);
    }

    /// Finish the leaf with its flattened text.
    #[must_use]
    pub fn into_leaf(self, kind: LeafKind, text: impl Into<String>) -> TextLeaf {
        TextLeaf::new(kind, self.level, text, self.channels)
    }
}

impl fmt::Debug for TextContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextContext")
            .field("level", &self.level)
            .field("references", &self.channels.references.len())
            .field("defined_terms", &self.channels.defined_terms)
            .field("repealed", &self.channels.repealed)
            .finish()
    }
}
