//! In-memory document model for parsed statutes.
//!
//! A statute becomes a tree of [`Block`]s: composites that own ordered
//! children (headings, sections and their sub-levels, definitions, formula
//! containers) and text leaves holding flattened prose plus the side-channel
//! data lifted out of inline markup.

mod block;
mod kinds;
mod leaf;

pub use block::{Block, CompositeBlock};
pub use kinds::{BlockKind, CompositeKind, LeafKind};
pub use leaf::{Reference, ReferenceKind, SideChannels, TextLeaf};
