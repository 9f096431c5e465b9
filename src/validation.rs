//! Input validation for identifiers and note text.

use crate::error::{AsanaError, Result};

/// Maximum allowed length for a single note.
pub const MAX_NOTE_LENGTH: usize = 2_000;

/// Maximum allowed length for a project or task ID.
pub const MAX_ID_LENGTH: usize = 50;

/// Characters forbidden in IDs, since IDs become URL path segments.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '\\', '?', '#', '%', '\0'];

/// Validates a project or task ID.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(AsanaError::Validation("ID cannot be empty".to_string()));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(AsanaError::Validation(format!(
            "ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }
    if id.contains("..") {
        return Err(AsanaError::Validation(
            "ID cannot contain '..' (path traversal)".to_string(),
        ));
    }
    for c in FORBIDDEN_ID_CHARS {
        if id.contains(*c) {
            return Err(AsanaError::Validation(format!("ID cannot contain '{}'", c)));
        }
    }
    if id.chars().any(char::is_whitespace) {
        return Err(AsanaError::Validation(
            "ID cannot contain whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Validates note text. Notes are single lines: a line break would read back
/// as a separate note, and a blank one as a separator.
pub fn validate_note(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(AsanaError::Validation("Note cannot be empty".to_string()));
    }
    if text.contains(['\n', '\r']) {
        return Err(AsanaError::Validation(
            "Note must be a single line".to_string(),
        ));
    }
    if text.len() > MAX_NOTE_LENGTH {
        return Err(AsanaError::Validation(format!(
            "Note exceeds maximum length of {} characters",
            MAX_NOTE_LENGTH
        )));
    }
    Ok(())
}
