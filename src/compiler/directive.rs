//! Values interpolated into unit directives
//!
//! systemd reads a unit line by line and expands `%` specifiers in most
//! settings. Recipe text that reaches the unit is checked so it cannot start
//! a new line, and `%` is doubled so it stays literal.

use std::borrow::Cow;

use crate::error::{CompileError, Result};

/// Double every `%` so systemd does not expand it as a specifier.
pub fn escape_specifiers(s: &str) -> Cow<'_, str> {
    if s.contains('%') {
        Cow::Owned(s.replace('%', "%%"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Text placed on a single directive line: no line breaks, no NUL.
pub fn check_single_line(field: &str, value: &str) -> Result<()> {
    if let Some(c) = value.chars().find(|c| matches!(c, '\n' | '\r' | '\0')) {
        return Err(CompileError::format(format!(
            "'{}' must be a single line, found {:?}",
            field, c
        )));
    }
    Ok(())
}

/// A name used both as a unit word and as part of a file name.
///
/// Rejects path separators, whitespace and control characters.
pub fn check_identifier(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CompileError::format(format!("'{}' is empty", field)));
    }
    if let Some(c) = value
        .chars()
        .find(|c| *c == '/' || c.is_whitespace() || c.is_control())
    {
        return Err(CompileError::format(format!(
            "'{}' contains invalid character {:?}: {}",
            field, c, value
        )));
    }
    Ok(())
}
