//! LegalCodex statute parser - Structural extraction of legislative XML.
//!
//! This crate turns a statute XML document into an immutable tree of
//! blocks. Headings are nested by their explicit levels, sections descend
//! through per-kind tag grammars, and inline markup is flattened into clean
//! prose while cross-references, defined terms, notes and repeal notices are
//! kept in side-channels.
//!
//! # Example
//!
//! ```
//! use legalcodex_statute::{parse_statute_str, Renderable};
//!
//! let xml = r#"<Statute><Body>
//!     <Heading level="1"><Label>PART I</Label><TitleText>Income Tax</TitleText></Heading>
//!     <Section><Label>2</Label><Text>An income tax shall be paid.</Text></Section>
//! </Body></Statute>"#;
//!
//! let root = parse_statute_str(xml).unwrap();
//! assert_eq!(
//!     root.to_lines(),
//!     vec!["  PART I Income Tax", "    2", "      An income tax shall be paid."]
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`error`]: Error types and Result alias
//! - [`model`]: Block tree (composites, text leaves, side-channels)
//! - [`xml`]: XML utilities
//! - [`registry`]: Structural tag grammars and inline handlers
//! - [`parser`]: Heading assembly and block construction
//! - [`render`]: Indented plain-text rendering
//! - [`output`]: Text, YAML and JSON export
//! - [`survey`]: Tag survey for extending the registries
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod registry;
pub mod render;
pub mod survey;
pub mod xml;

#[cfg(test)]
mod test_utils;

// Re-export main functions
pub use parser::{parse_statute_file, parse_statute_str, StatuteParser};

// Re-export commonly used items
pub use error::{Result, StatuteError};
pub use model::{Block, CompositeBlock, CompositeKind, LeafKind, Reference, ReferenceKind, TextLeaf};
pub use output::ExportFormat;
pub use render::Renderable;
