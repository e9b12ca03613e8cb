//! Statute parser: XML document to block tree.
//!
//! The document element must be `<Statute>`. Front matter is discarded and
//! the single `<Body>` is handed to the heading assembler, which rebuilds
//! the heading nesting from explicit levels while the block builder descends
//! into each section through the structural registries.

mod assembler;
mod builder;

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::config::{validate_input_path, BODY_TAG, STATUTE_TAG};
use crate::error::{Result, StatuteError};
use crate::model::{Block, BlockKind, CompositeKind};
use crate::registry::{
    create_inline_registry, create_structure_registry, StructureRegistry, TagRule, TextFlattener,
};
use crate::xml::{direct_text, element_children, get_tag_name, parse_xml, serialize_element};

/// Parser holding the structural grammars and the text flattener.
///
/// Registries are built once; a parser can be reused for any number of
/// documents. Each call to [`StatuteParser::parse_str`] owns its own
/// assembler state.
pub struct StatuteParser {
    structure: StructureRegistry,
    flattener: TextFlattener,
}

impl StatuteParser {
    /// Create a parser with the standard statute registries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registries(create_structure_registry(), TextFlattener::new(create_inline_registry()))
    }

    /// Create a parser with custom registries.
    #[must_use]
    pub fn with_registries(structure: StructureRegistry, flattener: TextFlattener) -> Self {
        Self {
            structure,
            flattener,
        }
    }

    /// Parse a statute from an XML string.
    ///
    /// # Errors
    /// Returns `XmlParse` for malformed XML, and the structural errors of
    /// [`StatuteParser::parse_document`].
    pub fn parse_str(&self, xml: &str) -> Result<Block> {
        let doc = parse_xml(xml)?;
        self.parse_document(&doc)
    }

    /// Parse a statute from a file.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the path is not a readable file, `Io` on
    /// read failure, and any parse error.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Block> {
        let path = path.as_ref();
        validate_input_path(path)?;
        let xml = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = xml.len(), "Parsing statute file");
        self.parse_str(&xml)
    }

    /// Parse an already loaded document.
    ///
    /// Returns the synthetic `Body` root at level 0.
    ///
    /// # Errors
    /// - `MalformedElement` if the document element is not `<Statute>` or
    ///   does not contain exactly one `<Body>`
    /// - `UnsupportedTag` for any child outside a registry
    /// - `HeadingLevelSkip` / `LevelMismatch` for broken nesting
    pub fn parse_document(&self, doc: &Document<'_>) -> Result<Block> {
        let root = doc.root_element();
        let tag = get_tag_name(root);
        if tag != STATUTE_TAG {
            return Err(StatuteError::malformed(
                STATUTE_TAG,
                format!("document element is <{tag}>"),
            ));
        }

        let body = self.find_body(root)?;
        let tree = self.assemble_body(body)?;
        Ok(tree.into_block())
    }

    /// Locate the single `<Body>`, checking every other child against the
    /// document grammar.
    fn find_body<'a, 'input>(&self, statute: Node<'a, 'input>) -> Result<Node<'a, 'input>> {
        let text = direct_text(statute);
        if !text.is_empty() {
            return Err(StatuteError::malformed(
                STATUTE_TAG,
                format!("unexpected text '{text}'"),
            ));
        }

        let mut bodies = Vec::new();
        for child in element_children(statute) {
            let tag = get_tag_name(child);
            match self.structure.resolve(CompositeKind::Statute, tag) {
                TagRule::Construct(BlockKind::Composite(CompositeKind::Body)) => bodies.push(child),
                TagRule::Discard => {
                    tracing::debug!(tag = %tag, "Skipping front matter");
                }
                TagRule::Construct(_) | TagRule::Unsupported => {
                    return Err(StatuteError::UnsupportedTag {
                        tag: tag.to_string(),
                        block: STATUTE_TAG.to_string(),
                        level: 0,
                        parent_xml: serialize_element(statute).to_string(),
                    });
                }
            }
        }

        match bodies.as_slice() {
            [body] => Ok(*body),
            [] => Err(StatuteError::malformed(STATUTE_TAG, format!("missing <{BODY_TAG}>"))),
            _ => Err(StatuteError::malformed(
                STATUTE_TAG,
                format!("{} <{BODY_TAG}> elements, expected one", bodies.len()),
            )),
        }
    }
}

impl Default for StatuteParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a statute XML string with the standard registries.
///
/// # Examples
/// ```
/// use legalcodex_statute::parse_statute_str;
///
/// let xml = r#"<Statute><Body><Section><Label>1</Label><Text>Short title.</Text></Section></Body></Statute>"#;
/// let root = parse_statute_str(xml).unwrap();
/// assert_eq!(root.level(), 0);
/// assert_eq!(root.count(), 3);
/// ```
///
/// # Errors
/// See [`StatuteParser::parse_document`].
pub fn parse_statute_str(xml: &str) -> Result<Block> {
    StatuteParser::new().parse_str(xml)
}

/// Parse a statute XML file with the standard registries.
///
/// # Errors
/// See [`StatuteParser::parse_file`].
pub fn parse_statute_file(path: impl AsRef<Path>) -> Result<Block> {
    StatuteParser::new().parse_file(path)
}
