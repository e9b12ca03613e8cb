//! Export writers for parsed statutes.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::model::Block;
use crate::render::Renderable;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Indented plain-text dump.
    #[default]
    Text,
    Yaml,
    Json,
}

impl ExportFormat {
    /// Conventional file extension.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

/// Render the tree as plain text, one line per rendered line.
#[must_use]
pub fn render_text(block: &Block) -> String {
    let mut content = String::new();
    for line in block.render(0) {
        content.push_str(&line);
        content.push('\n');
    }
    content
}

/// Serialize the tree as a YAML document.
///
/// # Errors
/// Returns `YamlSerialization` if serialization fails.
pub fn generate_yaml(block: &Block) -> Result<String> {
    let yaml_string = serde_yaml_ng::to_string(block)?;
    let lines: Vec<&str> = yaml_string.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Serialize the tree as pretty-printed JSON.
///
/// # Errors
/// Returns `JsonSerialization` if serialization fails.
pub fn generate_json(block: &Block) -> Result<String> {
    let mut json = serde_json::to_string_pretty(block)?;
    json.push('\n');
    Ok(json)
}

/// Produce the export content in the given format.
///
/// # Errors
/// Returns a serialization error for YAML or JSON output.
pub fn export(block: &Block, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(render_text(block)),
        ExportFormat::Yaml => generate_yaml(block),
        ExportFormat::Json => generate_json(block),
    }
}

/// Write an export to a file.
///
/// Content is written to a temporary file next to the target and renamed
/// into place, so a failed export never leaves a truncated file.
///
/// # Errors
/// Returns `Io` on any filesystem failure.
pub fn save_export(block: &Block, format: ExportFormat, path: &Path) -> Result<()> {
    let content = export(block, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("export.{}", format.extension()));
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompositeBlock, CompositeKind, LeafKind, Reference, ReferenceKind, SideChannels, TextLeaf};
    use tempfile::tempdir;

    fn create_test_tree() -> Block {
        let channels = SideChannels {
            references: vec![Reference {
                kind: ReferenceKind::Internal,
                link: "248".to_string(),
                text: "248".to_string(),
                target_type: None,
            }],
            ..SideChannels::default()
        };
        let mut section = CompositeBlock::new(CompositeKind::Section, 1).with_label(Some("3".to_string()));
        section
            .push_child(Block::Leaf(TextLeaf::new(
                LeafKind::Text,
                2,
                "as defined in section 248",
                channels,
            )))
            .unwrap();
        let mut root = CompositeBlock::new(CompositeKind::Body, 0);
        root.push_child(section.into_block()).unwrap();
        root.into_block()
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&create_test_tree());
        assert_eq!(
            text,
            "  3\n    as defined in section 248\n      References:\n        248 -> 248 (internal)\n"
        );
    }

    #[test]
    fn test_generate_yaml() {
        let yaml = generate_yaml(&create_test_tree()).unwrap();

        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("kind: Body"));
        assert!(yaml.contains("kind: Section"));
        assert!(yaml.contains("label: '3'"));
        assert!(yaml.contains("text: as defined in section 248"));
        assert!(yaml.contains("kind: internal"));
        assert!(!yaml.contains("title:"));
        assert!(!yaml.contains("repealed:"));
    }

    #[test]
    fn test_generate_json() {
        let json = generate_json(&create_test_tree()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["kind"], "Body");
        assert_eq!(value["level"], 0);
        let section = &value["children"][0];
        assert_eq!(section["label"], "3");
        let leaf = &section["children"][0];
        assert_eq!(leaf["kind"], "Text");
        assert_eq!(leaf["references"][0]["link"], "248");
        assert!(leaf.get("defined_terms").is_none());
    }

    #[test]
    fn test_save_export() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("out").join("statute.json");

        save_export(&create_test_tree(), ExportFormat::Json, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"kind\": \"Section\""));
        assert!(!temp_dir.path().join("out").join(".statute.json.tmp").exists());
    }

    #[test]
    fn test_export_dispatch() {
        let tree = create_test_tree();
        assert_eq!(export(&tree, ExportFormat::Text).unwrap(), render_text(&tree));
        assert_eq!(ExportFormat::default(), ExportFormat::Text);
        assert_eq!(ExportFormat::Yaml.extension(), "yaml");
    }
}
