//! Heading assembly for the statute body.
//!
//! `<Body>` is a flat run of `<Heading level="n">` and `<Section>` elements.
//! Nesting exists only in the heading levels, so it is rebuilt with a stack
//! of open headings: a heading closes every open heading at its level or
//! deeper, and each section attaches to the innermost open heading.

use roxmltree::Node;

use super::builder::{read_label, reject_direct_text};
use super::StatuteParser;
use crate::config::HEADING_LEVEL_ATTR;
use crate::error::{Result, StatuteError};
use crate::model::{Block, BlockKind, CompositeBlock, CompositeKind};
use crate::registry::TagRule;
use crate::xml::{element_children, find_children, get_tag_name, get_text, serialize_element};

/// Stack of open headings above the synthetic root.
///
/// Levels along the stack increase by exactly one. A heading is attached to
/// its parent when it is closed.
#[derive(Debug)]
struct HeadingStack {
    root: CompositeBlock,
    open: Vec<CompositeBlock>,
}

impl HeadingStack {
    fn new(root: CompositeBlock) -> Self {
        Self {
            root,
            open: Vec::new(),
        }
    }

    fn top_mut(&mut self) -> &mut CompositeBlock {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    /// Level of the innermost open block.
    fn current_level(&self) -> usize {
        self.open.last().unwrap_or(&self.root).level()
    }

    /// Open a heading, closing open headings at its level or deeper.
    fn open_heading(&mut self, heading: CompositeBlock) -> Result<()> {
        let level = heading.level();
        let current = self.current_level();
        if level > current + 1 {
            return Err(StatuteError::HeadingLevelSkip {
                title: heading.title().unwrap_or_default().to_string(),
                level,
                current,
            });
        }

        while !self.open.is_empty() && self.current_level() >= level {
            self.close_heading()?;
        }

        tracing::debug!(
            level,
            title = heading.title().unwrap_or_default(),
            "Opening heading"
        );
        self.open.push(heading);
        Ok(())
    }

    /// Close the innermost open heading into its parent.
    fn close_heading(&mut self) -> Result<()> {
        if let Some(heading) = self.open.pop() {
            tracing::debug!(
                level = heading.level(),
                title = heading.title().unwrap_or_default(),
                children = heading.children().len(),
                "Closing heading"
            );
            self.top_mut().push_child(heading.into_block())?;
        }
        Ok(())
    }

    /// Attach a block to the innermost open heading.
    fn attach(&mut self, block: Block) -> Result<()> {
        self.top_mut().push_child(block)
    }

    /// Close every open heading and return the root.
    fn finish(mut self) -> Result<CompositeBlock> {
        while !self.open.is_empty() {
            self.close_heading()?;
        }
        Ok(self.root)
    }
}

impl StatuteParser {
    /// Assemble `<Body>` into the root block at level 0.
    pub(super) fn assemble_body(&self, body: Node<'_, '_>) -> Result<CompositeBlock> {
        reject_direct_text(body, CompositeKind::Body)?;

        let mut stack = HeadingStack::new(CompositeBlock::new(CompositeKind::Body, 0));

        for child in element_children(body) {
            let tag = get_tag_name(child);
            match self.structure.resolve(CompositeKind::Body, tag) {
                TagRule::Construct(BlockKind::Composite(CompositeKind::Heading)) => {
                    stack.open_heading(self.build_heading(child)?)?;
                }
                TagRule::Construct(kind) => {
                    let block = self.build_block(child, kind, stack.current_level() + 1)?;
                    stack.attach(block)?;
                }
                TagRule::Discard => {}
                TagRule::Unsupported => {
                    return Err(StatuteError::UnsupportedTag {
                        tag: tag.to_string(),
                        block: CompositeKind::Body.to_string(),
                        level: 0,
                        parent_xml: serialize_element(body).to_string(),
                    });
                }
            }
        }

        stack.finish()
    }

    /// Build a childless heading from its level attribute, label and title.
    fn build_heading(&self, node: Node<'_, '_>) -> Result<CompositeBlock> {
        let kind = CompositeKind::Heading;
        reject_direct_text(node, kind)?;

        let level = heading_level(node)?;

        for child in element_children(node) {
            let tag = get_tag_name(child);
            if self.structure.resolve(kind, tag) != TagRule::Discard {
                return Err(StatuteError::UnsupportedTag {
                    tag: tag.to_string(),
                    block: kind.to_string(),
                    level,
                    parent_xml: serialize_element(node).to_string(),
                });
            }
        }

        let mut titles = find_children(node, "TitleText");
        let title = match (titles.next(), titles.next()) {
            (Some(title), None) => get_text(title),
            (None, _) => return Err(StatuteError::malformed(kind.as_tag(), "missing <TitleText>")),
            (Some(_), Some(_)) => {
                return Err(StatuteError::malformed(kind.as_tag(), "more than one <TitleText>"));
            }
        };

        let label = read_label(node)?;
        if title.is_empty() && label.is_none() {
            return Err(StatuteError::malformed(kind.as_tag(), "empty <TitleText> and no <Label>"));
        }

        let heading = CompositeBlock::new(kind, level).with_label(label);
        if title.is_empty() {
            return Ok(heading);
        }
        Ok(heading.with_title(title))
    }
}

/// The explicit `level` attribute of a heading; levels start at 1.
fn heading_level(node: Node<'_, '_>) -> Result<usize> {
    let raw = node
        .attribute(HEADING_LEVEL_ATTR)
        .ok_or_else(|| StatuteError::malformed("Heading", "missing level attribute"))?;

    let level: usize = raw
        .trim()
        .parse()
        .map_err(|_| StatuteError::malformed("Heading", format!("non-numeric level '{raw}'")))?;

    if level == 0 {
        return Err(StatuteError::malformed("Heading", "level must be at least 1"));
    }
    Ok(level)
}
