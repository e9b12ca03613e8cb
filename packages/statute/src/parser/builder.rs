//! Recursive block construction driven by the structural registries.

use roxmltree::Node;

use super::StatuteParser;
use crate::error::{Result, StatuteError};
use crate::model::{Block, BlockKind, CompositeBlock, CompositeKind, LeafKind, TextLeaf};
use crate::registry::{TagRule, TextContext};
use crate::xml::{direct_text, element_children, find_children, get_tag_name, get_text, serialize_element};

/// Tags a definition's text may open with.
const DEFINED_TERM_TAGS: [&str; 2] = ["DefinedTermEn", "DefinedTermFr"];

impl StatuteParser {
    /// Build a block of the given kind from an element.
    pub(super) fn build_block(&self, node: Node<'_, '_>, kind: BlockKind, level: usize) -> Result<Block> {
        match kind {
            BlockKind::Composite(kind) => self.build_composite(node, kind, level).map(CompositeBlock::into_block),
            BlockKind::Leaf(kind) => self.build_leaf(node, kind, level).map(Block::Leaf),
        }
    }

    /// Build a composite and all of its descendants.
    ///
    /// Every element child is resolved against the kind's grammar. The first
    /// unsupported child aborts the parse with the parent's source XML.
    pub(super) fn build_composite(
        &self,
        node: Node<'_, '_>,
        kind: CompositeKind,
        level: usize,
    ) -> Result<CompositeBlock> {
        reject_direct_text(node, kind)?;

        let mut block = CompositeBlock::new(kind, level).with_label(read_label(node)?);

        for child in element_children(node) {
            let tag = get_tag_name(child);
            match self.structure.resolve(kind, tag) {
                TagRule::Construct(child_kind) => {
                    block.push_child(self.build_block(child, child_kind, level + 1)?)?;
                }
                TagRule::Discard => {}
                TagRule::Unsupported => {
                    return Err(StatuteError::UnsupportedTag {
                        tag: tag.to_string(),
                        block: kind.to_string(),
                        level,
                        parent_xml: serialize_element(node).to_string(),
                    });
                }
            }
        }

        if kind == CompositeKind::Definition && !has_text_definition(&block) {
            return Err(StatuteError::malformed(
                kind.as_tag(),
                format!("no definition text in {}", serialize_element(node)),
            ));
        }

        if kind.is_section_level() {
            tracing::debug!(
                kind = %kind,
                label = block.label().unwrap_or_default(),
                level,
                children = block.children().len(),
                "Built block"
            );
        }

        Ok(block)
    }

    /// Flatten a text element into a leaf.
    pub(super) fn build_leaf(&self, node: Node<'_, '_>, kind: LeafKind, level: usize) -> Result<TextLeaf> {
        if kind == LeafKind::TextDefinition && !starts_with_defined_term(node) {
            return Err(StatuteError::malformed(
                kind.as_tag(),
                format!(
                    "definition does not start with a defined term: {}",
                    serialize_element(node)
                ),
            ));
        }

        let mut context = TextContext::new(level);
        let text = self.flattener.flatten(node, &mut context)?;

        if text.is_empty() {
            tracing::warn!(tag = %get_tag_name(node), level, "Empty text block");
        }

        Ok(context.into_leaf(kind, text))
    }
}

/// Read the single `<Label>` child, if any.
pub(super) fn read_label(node: Node<'_, '_>) -> Result<Option<String>> {
    let mut labels = find_children(node, "Label");
    let Some(label) = labels.next() else {
        return Ok(None);
    };
    if labels.next().is_some() {
        return Err(StatuteError::malformed(
            get_tag_name(node),
            "more than one <Label>",
        ));
    }

    let text = get_text(label);
    Ok((!text.is_empty()).then_some(text))
}

/// Composites hold structure only; loose text would be dropped legal text.
pub(super) fn reject_direct_text(node: Node<'_, '_>, kind: CompositeKind) -> Result<()> {
    let text = direct_text(node);
    if text.is_empty() {
        return Ok(());
    }
    Err(StatuteError::malformed(
        kind.as_tag(),
        format!("unexpected text '{text}'"),
    ))
}

fn has_text_definition(block: &CompositeBlock) -> bool {
    block
        .children()
        .iter()
        .filter_map(Block::as_leaf)
        .any(|leaf| leaf.kind() == LeafKind::TextDefinition)
}

/// True if the first non-blank content of a definition text is a defined term.
fn starts_with_defined_term(node: Node<'_, '_>) -> bool {
    let first = node.children().find(|child| {
        child.is_element() || (child.is_text() && !child.text().unwrap_or_default().trim().is_empty())
    });
    first.is_some_and(|child| child.is_element() && DEFINED_TERM_TAGS.contains(&get_tag_name(child)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReferenceKind;
    use crate::test_utils::capture_logs;
    use roxmltree::Document;

    fn build(xml: &str, kind: CompositeKind, level: usize) -> Result<CompositeBlock> {
        let doc = Document::parse(xml).unwrap();
        StatuteParser::new().build_composite(doc.root_element(), kind, level)
    }

    #[test]
    fn test_section_levels_and_labels() {
        let xml = r#"<Section>
            <Label>3</Label>
            <Subsection>
                <Label>(1)</Label>
                <Text>The income of a taxpayer for a taxation year is</Text>
                <Paragraph><Label>(a)</Label><Text>the total of all amounts</Text></Paragraph>
            </Subsection>
        </Section>"#;
        let section = build(xml, CompositeKind::Section, 1).unwrap();

        assert_eq!(section.label(), Some("3"));
        let subsection = section.children()[0].as_composite().unwrap();
        assert_eq!(subsection.kind(), CompositeKind::Subsection);
        assert_eq!(subsection.level(), 2);
        assert_eq!(subsection.label(), Some("(1)"));

        let text = subsection.children()[0].as_leaf().unwrap();
        assert_eq!(text.level(), 3);
        assert_eq!(text.text(), "The income of a taxpayer for a taxation year is");

        let paragraph = subsection.children()[1].as_composite().unwrap();
        assert_eq!(paragraph.level(), 3);
        assert_eq!(paragraph.children()[0].level(), 4);
    }

    #[test]
    fn test_section_in_paragraph_is_unsupported() {
        let xml = "<Paragraph><Label>(b)</Label><Section><Text>misplaced</Text></Section></Paragraph>";
        let err = build(xml, CompositeKind::Paragraph, 4).unwrap_err();

        match &err {
            StatuteError::UnsupportedTag {
                tag, block, level, parent_xml,
            } => {
                assert_eq!(tag, "Section");
                assert_eq!(block, "Paragraph");
                assert_eq!(*level, 4);
                assert_eq!(parent_xml, xml);
            }
            other => panic!("expected UnsupportedTag, got {other:?}"),
        }
        assert_eq!(err.parent_content(), Some(xml));
    }

    #[test]
    fn test_nested_unsupported_reports_innermost_parent() {
        let xml = "<Section><Subsection><Paragraph><Schedule/></Paragraph></Subsection></Section>";
        let err = build(xml, CompositeKind::Section, 1).unwrap_err();
        assert_eq!(err.parent_content(), Some("<Paragraph><Schedule/></Paragraph>"));
    }

    #[test]
    fn test_duplicate_label_is_malformed() {
        let err = build(
            "<Section><Label>1</Label><Label>2</Label></Section>",
            CompositeKind::Section,
            1,
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than one <Label>"));
    }

    #[test]
    fn test_stray_text_is_malformed() {
        let err = build(
            "<Subsection>loose words<Text>kept</Text></Subsection>",
            CompositeKind::Subsection,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, StatuteError::MalformedElement { .. }));
        assert!(err.to_string().contains("loose words"));
    }

    #[test]
    fn test_text_side_channels() {
        let xml = r#"<Section><Text>as defined in <XRefExternal reference-type="act" link="C-8">Canada Pension Plan</XRefExternal> and section <XRefInternal>146</XRefInternal></Text></Section>"#;
        let section = build(xml, CompositeKind::Section, 1).unwrap();
        let leaf = section.children()[0].as_leaf().unwrap();

        assert_eq!(leaf.text(), "as defined in Canada Pension Plan and section 146");
        let kinds: Vec<_> = leaf.references().iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ReferenceKind::External, ReferenceKind::Internal]);
    }

    #[test]
    fn test_repealed_text() {
        let xml = "<Section><Label>5</Label><Text><Repealed>[Repealed, 2001, c. 17, s. 1]</Repealed></Text></Section>";
        let section = build(xml, CompositeKind::Section, 1).unwrap();
        let leaf = section.children()[0].as_leaf().unwrap();
        assert_eq!(leaf.repealed(), Some("[Repealed, 2001, c. 17, s. 1]"));
    }

    #[test]
    fn test_repealed_notice_keeps_inner_whitespace() {
        let xml = "<Section><Text><Repealed> [Repealed,\n   2001] </Repealed></Text></Section>";
        let section = build(xml, CompositeKind::Section, 1).unwrap();
        let leaf = section.children()[0].as_leaf().unwrap();
        assert_eq!(leaf.repealed(), Some("[Repealed,\n   2001]"));
        assert_eq!(leaf.text(), "[Repealed, 2001]");
    }

    #[test]
    fn test_second_repealed_is_fatal() {
        let xml = "<Section><Text><Repealed>[Repealed, 1994]</Repealed><Repealed>[Repealed, 1995]</Repealed></Text></Section>";
        let err = build(xml, CompositeKind::Section, 1).unwrap_err();
        assert!(matches!(err, StatuteError::MalformedElement { .. }));
    }

    #[test]
    fn test_definition_term() {
        let xml = r#"<Definition>
            <Text><DefinedTermEn>spouse</DefinedTermEn> includes a common-law partner;
            (<DefinedTermFr>époux</DefinedTermFr>)</Text>
        </Definition>"#;
        let definition = build(xml, CompositeKind::Definition, 3).unwrap();
        let leaf = definition.children()[0].as_leaf().unwrap();

        assert_eq!(leaf.kind(), LeafKind::TextDefinition);
        assert_eq!(leaf.term(), Some("spouse"));
        assert_eq!(leaf.defined_terms(), ["spouse".to_string(), "époux".to_string()]);
    }

    #[test]
    fn test_definition_without_term_is_malformed() {
        let err = build(
            "<Definition><Text>spouse includes a common-law partner</Text></Definition>",
            CompositeKind::Definition,
            3,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not start with a defined term"));
    }

    #[test]
    fn test_definition_without_text_is_malformed() {
        let err = build(
            "<Definition><MarginalNote>Spouse</MarginalNote></Definition>",
            CompositeKind::Definition,
            3,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no definition text"));
    }

    #[test]
    fn test_empty_text_is_permitted() {
        let (section, logs) =
            capture_logs(|| build("<Section><Text/></Section>", CompositeKind::Section, 1));
        assert_eq!(section.unwrap().children()[0].as_leaf().unwrap().text(), "");
        assert!(logs.has_warning("Empty text block"));
    }

    #[test]
    fn test_empty_text_with_side_channel_is_logged() {
        let xml = r#"<Section><Text><XRefInternal link="248"/></Text></Section>"#;
        let (section, logs) = capture_logs(|| build(xml, CompositeKind::Section, 1));
        let section = section.unwrap();
        let leaf = section.children()[0].as_leaf().unwrap();
        assert_eq!(leaf.text(), "");
        assert_eq!(leaf.references().len(), 1);
        assert!(logs.has_warning("Empty text block"));
    }

    #[test]
    fn test_formula_group() {
        let xml = r#"<FormulaGroup>
            <Formula><FormulaText>A - B</FormulaText></Formula>
            <FormulaConnector>where</FormulaConnector>
            <FormulaDefinition>
                <FormulaTerm>A</FormulaTerm>
                <Text>is the total of the amounts</Text>
            </FormulaDefinition>
        </FormulaGroup>"#;
        let group = build(xml, CompositeKind::FormulaGroup, 3).unwrap();

        let kinds: Vec<String> = group.children().iter().map(|c| c.kind().to_string()).collect();
        assert_eq!(kinds, vec!["Formula", "FormulaConnector", "FormulaDefinition"]);

        let formula = group.children()[0].as_composite().unwrap();
        let text = formula.children()[0].as_leaf().unwrap();
        assert_eq!(text.kind(), LeafKind::FormulaText);
        assert_eq!(text.level(), 5);
        assert_eq!(text.text(), "A - B");
    }

    #[test]
    fn test_read_label_empty() {
        let doc = Document::parse("<Section><Label> </Label></Section>").unwrap();
        assert_eq!(read_label(doc.root_element()).unwrap(), None);
    }
}
