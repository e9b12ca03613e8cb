//! Export of parsed statutes as text, YAML or JSON.

mod writer;

pub use writer::{export, generate_json, generate_yaml, render_text, save_export, ExportFormat};
