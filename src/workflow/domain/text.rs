//! Shared text validation for entity fields.

use super::GtdDomainError;

/// Validates a required text field, returning the trimmed value.
pub(crate) fn required(
    field: &'static str,
    value: impl Into<String>,
    max: Option<usize>,
) -> Result<String, GtdDomainError> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GtdDomainError::BlankField { field });
    }
    check_length(field, trimmed, max)?;
    Ok(trimmed.to_owned())
}

/// Validates an optional text field, returning the trimmed value.
///
/// Whitespace-only text is treated as absent.
pub(crate) fn optional(
    field: &'static str,
    value: Option<String>,
    max: Option<usize>,
) -> Result<Option<String>, GtdDomainError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    check_length(field, trimmed, max)?;
    Ok(Some(trimmed.to_owned()))
}

/// Rejects values below `min`.
pub(crate) const fn at_least(
    field: &'static str,
    value: Option<i32>,
    min: i32,
) -> Result<Option<i32>, GtdDomainError> {
    match value {
        Some(v) if v < min => Err(GtdDomainError::BelowMinimum {
            field,
            min,
            value: v,
        }),
        other => Ok(other),
    }
}

fn check_length(field: &'static str, value: &str, max: Option<usize>) -> Result<(), GtdDomainError> {
    match max {
        Some(limit) if value.chars().count() > limit => Err(GtdDomainError::FieldTooLong {
            field,
            max: limit,
        }),
        _ => Ok(()),
    }
}
