//! Inline element handlers for statute text.

mod inline;
mod notes;

pub use inline::*;
pub use notes::*;
