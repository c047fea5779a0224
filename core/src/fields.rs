//! Line-level CSV handling shared by the dataset loaders.
//!
//! Splitting is a plain comma split: quoted fields containing commas are not
//! supported. Everything that knows about the wire shape of a line lives here
//! so a real CSV reader can replace it without touching the loaders.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },
    #[error("invalid integer {value:?}")]
    InvalidInt { value: String },
}

/// Data lines of a CSV document: the text is trimmed, the first line is
/// treated as the header and dropped, blank lines are skipped.
pub fn non_blank_data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.trim()
        .split('\n')
        .skip(1)
        .filter(|line| !line.trim().is_empty())
}

/// Splits `line` on commas and checks it carries at least `min` fields.
pub fn split_fields(line: &str, min: usize) -> Result<Vec<&str>, FieldError> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < min {
        return Err(FieldError::TooFewFields { expected: min, found: parts.len() });
    }
    Ok(parts)
}

/// Trims whitespace, then any run of `"` at either end.
pub fn clean_text(raw: &str) -> &str {
    raw.trim().trim_matches('"')
}

/// Parses a whitespace-trimmed integer. Quotes are not stripped. Single
/// underscores between digits are accepted as separators (`1_000`).
pub fn parse_int(raw: &str) -> Result<i64, FieldError> {
    let t = raw.trim();
    let invalid = || FieldError::InvalidInt { value: t.to_string() };
    let digits = t.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(t);
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(invalid());
    }
    t.replace('_', "").parse::<i64>().map_err(|_| invalid())
}
