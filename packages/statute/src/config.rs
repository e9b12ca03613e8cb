//! Configuration constants and validation functions for the parser.

use std::path::Path;

use crate::error::{Result, StatuteError};

/// Column width for word-wrapped leaf text in the plain-text dump.
pub const TEXT_WRAP_WIDTH: usize = 80;

/// Spaces per indentation level in rendered output.
pub const INDENT_WIDTH: usize = 2;

/// Lower bound for the wrap width once indentation is subtracted.
///
/// Keeps deeply nested clauses readable instead of wrapping one word per line.
pub const MIN_WRAP_WIDTH: usize = 20;

/// Root element of a statute document.
pub const STATUTE_TAG: &str = "Statute";

/// The only top-level child that carries legal text.
pub const BODY_TAG: &str = "Body";

/// Attribute holding a heading's outline depth.
pub const HEADING_LEVEL_ATTR: &str = "level";

/// Validate that an input path points to an existing regular file.
///
/// # Examples
/// ```
/// use legalcodex_statute::config::validate_input_path;
///
/// assert!(validate_input_path("/definitely/not/here.xml").is_err());
/// ```
pub fn validate_input_path(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StatuteError::InvalidInput(format!(
            "{} does not exist",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(StatuteError::InvalidInput(format!(
            "{} is not a file",
            path.display()
        )));
    }
    Ok(())
}

/// Wrap width available to text rendered at the given indentation level.
#[must_use]
pub fn wrap_width_at(indent: usize) -> usize {
    TEXT_WRAP_WIDTH
        .saturating_sub(indent * INDENT_WIDTH)
        .max(MIN_WRAP_WIDTH)
}
