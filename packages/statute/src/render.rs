//! Plain-text rendering of the block tree.
//!
//! Rendering is a pure depth-first traversal. A composite yields its header
//! line and then its children one indentation step deeper; a leaf yields its
//! word-wrapped text followed by any non-empty side-channel sections.

use textwrap::{wrap, Options, WordSeparator, WrapAlgorithm};

use crate::config::{wrap_width_at, INDENT_WIDTH};
use crate::model::{Block, CompositeBlock, CompositeKind, TextLeaf};

/// Lazily produced rendered lines.
pub type Lines<'a> = Box<dyn Iterator<Item = String> + 'a>;

/// Anything that renders to indented lines.
pub trait Renderable {
    /// Nesting depth of the block.
    fn level(&self) -> usize;

    /// Render at the given indentation. Calling this again yields the same
    /// lines.
    fn render(&self, indent: usize) -> Lines<'_>;

    /// Collect the rendering from indentation 0.
    fn to_lines(&self) -> Vec<String> {
        self.render(0).collect()
    }
}

impl Renderable for Block {
    fn level(&self) -> usize {
        Block::level(self)
    }

    fn render(&self, indent: usize) -> Lines<'_> {
        match self {
            Self::Composite(block) => block.render(indent),
            Self::Leaf(leaf) => leaf.render(indent),
        }
    }
}

impl Renderable for CompositeBlock {
    fn level(&self) -> usize {
        CompositeBlock::level(self)
    }

    fn render(&self, indent: usize) -> Lines<'_> {
        let header = header(self).map(|header| format!("{}{header}", indent_str(indent)));
        let children = self
            .children()
            .iter()
            .flat_map(move |child| child.render(indent + 1));
        Box::new(header.into_iter().chain(children))
    }
}

impl Renderable for TextLeaf {
    fn level(&self) -> usize {
        TextLeaf::level(self)
    }

    fn render(&self, indent: usize) -> Lines<'_> {
        let pad = indent_str(indent);
        let mut lines: Vec<String> = wrap_text(self.text(), wrap_width_at(indent))
            .into_iter()
            .map(|line| format!("{pad}{line}"))
            .collect();

        let section = indent_str(indent + 1);
        let item = indent_str(indent + 2);

        if !self.references().is_empty() {
            lines.push(format!("{section}References:"));
            lines.extend(self.references().iter().map(|r| format!("{item}{r}")));
        }
        if !self.defined_terms().is_empty() {
            lines.push(format!("{section}Defined Terms:"));
            lines.extend(self.defined_terms().iter().map(|term| format!("{item}{term}")));
        }
        if !self.marginal_notes().is_empty() {
            lines.push(format!("{section}Marginal Notes:"));
            for note in self.marginal_notes() {
                lines.extend(note.render(indent + 2));
            }
        }
        if !self.historical_notes().is_empty() {
            lines.push(format!("{section}Historical Notes:"));
            for note in self.historical_notes() {
                lines.extend(note.render(indent + 2));
            }
        }
        if let Some(notice) = self.repealed() {
            lines.push(format!("{section}REPEALED: {notice}"));
        }

        Box::new(lines.into_iter())
    }
}

/// Header line of a composite, if it has a label or title.
fn header(block: &CompositeBlock) -> Option<String> {
    match (block.kind(), block.label(), block.title()) {
        (CompositeKind::Heading, Some(label), Some(title)) => Some(format!("{label} {title}")),
        (CompositeKind::Heading, None, Some(title)) => Some(title.to_string()),
        (_, label, _) => label.map(String::from),
    }
}

fn indent_str(indent: usize) -> String {
    " ".repeat(indent * INDENT_WIDTH)
}

/// Greedy word-wrap at a fixed width.
///
/// Breaks only at ASCII spaces and splits words longer than the width, so
/// the result does not depend on the locale. Empty text yields no lines.
///
/// # Examples
/// ```
/// use legalcodex_statute::render::wrap_text;
///
/// assert_eq!(wrap_text("shall be paid", 9), vec!["shall be", "paid"]);
/// assert!(wrap_text("", 80).is_empty());
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let options = Options::new(width)
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .break_words(true);

    wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TEXT_WRAP_WIDTH;
    use crate::model::{LeafKind, Reference, ReferenceKind, SideChannels};
    use pretty_assertions::assert_eq;

    fn leaf(level: usize, text: &str, channels: SideChannels) -> TextLeaf {
        TextLeaf::new(LeafKind::Text, level, text, channels)
    }

    #[test]
    fn test_wrap_exact_width_does_not_split() {
        let text = format!("{} {}", "a".repeat(39), "b".repeat(40));
        assert_eq!(text.len(), TEXT_WRAP_WIDTH);
        assert_eq!(wrap_text(&text, TEXT_WRAP_WIDTH), vec![text.clone()]);

        let longer = format!("{text}c");
        assert_eq!(
            wrap_text(&longer, TEXT_WRAP_WIDTH),
            vec!["a".repeat(39), format!("{}c", "b".repeat(40))]
        );
    }

    #[test]
    fn test_wrap_is_idempotent() {
        let text = "The amount determined under this paragraph for a taxpayer for a taxation year is the total of all amounts each of which is an amount described below";
        let once = wrap_text(text, 40);
        let again: Vec<String> = once.iter().flat_map(|line| wrap_text(line, 40)).collect();
        assert_eq!(once, again);
        assert!(once.iter().all(|line| line.len() <= 40));
    }

    #[test]
    fn test_wrap_long_word() {
        let lines = wrap_text(&"x".repeat(25), 10);
        assert_eq!(lines, vec!["x".repeat(10), "x".repeat(10), "x".repeat(5)]);
    }

    #[test]
    fn test_render_composite_headers() {
        let mut root = CompositeBlock::new(CompositeKind::Body, 0);
        let mut part = CompositeBlock::new(CompositeKind::Heading, 1)
            .with_label(Some("PART I".to_string()))
            .with_title("Income Tax");
        let mut section = CompositeBlock::new(CompositeKind::Section, 2).with_label(Some("2".to_string()));
        section
            .push_child(Block::Leaf(leaf(3, "An income tax shall be paid.", SideChannels::default())))
            .unwrap();
        part.push_child(section.into_block()).unwrap();
        root.push_child(part.into_block()).unwrap();
        root.push_child(
            CompositeBlock::new(CompositeKind::Heading, 1)
                .with_title("Interpretation")
                .into_block(),
        )
        .unwrap();

        assert_eq!(
            root.to_lines(),
            vec![
                "  PART I Income Tax",
                "    2",
                "      An income tax shall be paid.",
                "  Interpretation",
            ]
        );
    }

    #[test]
    fn test_render_side_channels() {
        let note = leaf(4, "Definitions", SideChannels::default());
        let channels = SideChannels {
            references: vec![Reference {
                kind: ReferenceKind::External,
                link: "C-8".to_string(),
                text: "Canada Pension Plan".to_string(),
                target_type: Some("act".to_string()),
            }],
            defined_terms: vec!["contribution".to_string()],
            repealed: Some("[Repealed, 1994, c. 7, s. 1]".to_string()),
            marginal_notes: vec![note],
            historical_notes: Vec::new(),
        };
        let text = leaf(3, "contribution means a contribution under the Canada Pension Plan", channels);

        assert_eq!(
            text.to_lines(),
            vec![
                "contribution means a contribution under the Canada Pension Plan",
                "  References:",
                "    Canada Pension Plan -> C-8 (external, act)",
                "  Defined Terms:",
                "    contribution",
                "  Marginal Notes:",
                "    Definitions",
                "  REPEALED: [Repealed, 1994, c. 7, s. 1]",
            ]
        );
    }

    #[test]
    fn test_render_empty_leaf_has_no_lines() {
        assert!(leaf(2, "", SideChannels::default()).to_lines().is_empty());
    }

    #[test]
    fn test_render_wraps_at_indent() {
        let text = "word ".repeat(30);
        let leaf = leaf(5, text.trim(), SideChannels::default());
        let lines: Vec<String> = leaf.render(5).collect();
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.starts_with("          word")));
        assert!(lines.iter().all(|line| line.len() <= 10 + wrap_width_at(5)));
    }

    #[test]
    fn test_render_twice_identical() {
        let mut section = CompositeBlock::new(CompositeKind::Section, 1).with_label(Some("7".to_string()));
        section
            .push_child(Block::Leaf(leaf(2, "Text of section seven.", SideChannels::default())))
            .unwrap();
        let block = section.into_block();
        assert_eq!(block.to_lines(), block.to_lines());
        assert_eq!(Renderable::level(&block), 1);
    }
}
