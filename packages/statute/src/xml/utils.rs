//! XML utility functions for navigating and extracting data from DOM trees.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};

/// Matches any run of whitespace, including embedded newlines.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Parse an XML document, accepting a `<!DOCTYPE>` declaration.
///
/// External DTDs and entities are never fetched; only internal entity
/// declarations are expanded.
///
/// # Errors
/// Returns the `roxmltree` error for malformed input.
pub fn parse_xml(xml: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(xml, options)
}

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use legalcodex_statute::xml::get_tag_name;
///
/// let xml = r#"<Section><Label>3</Label></Section>"#;
/// let doc = Document::parse(xml).unwrap();
/// let label = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(label), "Label");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find all child elements with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use legalcodex_statute::xml::find_children;
///
/// let xml = r#"<Statute><Schedule/><Body/><Schedule/></Statute>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let schedules: Vec<_> = find_children(doc.root_element(), "Schedule").collect();
/// assert_eq!(schedules.len(), 2);
/// ```
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Get all element children of a node.
///
/// Text nodes, comments and processing instructions are excluded.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Collapse whitespace runs to single spaces and trim the result.
///
/// # Examples
/// ```
/// use legalcodex_statute::xml::clean_text;
///
/// assert_eq!(clean_text("  Income\n   Tax   Act "), "Income Tax Act");
/// ```
pub fn clean_text(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// All descendant text of a node, cleaned.
///
/// Used for short labels and titles where inline markup carries no
/// side-channel meaning.
pub fn get_text(node: Node<'_, '_>) -> String {
    let parts: Vec<&str> = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    clean_text(&parts.join(" "))
}

/// Direct (non-descendant) text of an element: its leading text and the
/// tails of its children, cleaned.
pub fn direct_text(node: Node<'_, '_>) -> String {
    let parts: Vec<&str> = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    clean_text(&parts.join(" "))
}

/// Verbatim source XML of an element.
///
/// Used for diagnostics: the slice is taken from the original input so it
/// shows the element exactly as it appears in the document.
pub fn serialize_element<'input>(node: Node<'_, 'input>) -> &'input str {
    let input = node.document().input_text();
    input.get(node.range()).unwrap_or_default()
}
