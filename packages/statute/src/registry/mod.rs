//! Tag registries for statute XML.
//!
//! Two kinds of registry drive parsing. Structural registries give every
//! composite block kind a closed grammar of child tags (construct, discard
//! or reject). The inline registry maps markup found inside text to handlers
//! that either read through it or divert it into side-channels.

mod config;
mod core;
mod engine;
mod handler;
pub mod handlers;
mod structure;
mod types;

pub use config::{create_inline_registry, create_structure_registry};
pub use core::InlineRegistry;
pub use engine::TextFlattener;
pub use handler::{FlattenFn, InlineHandler};
pub use structure::{StructureRegistry, TagRegistry};
pub use types::{InlineClass, TagRule, TextContext};
