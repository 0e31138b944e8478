//! Field-level validation failures raised by entity constructors.

use std::fmt;

use serde::Serialize;
use serde_json::json;

use super::Error;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// Required field absent from the payload.
    Missing,
    /// Text field empty once trimmed.
    Blank,
    /// Text field longer than its bound.
    TooLong,
}

impl ViolationCode {
    /// Stable wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Blank => "blank",
            Self::TooLong => "too_long",
        }
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the field.
    pub field: &'static str,
    /// Rejection reason.
    pub code: ViolationCode,
}

/// Every field a payload failed on, in declaration order.
///
/// # Examples
/// ```
/// use roster::domain::{PersonDraft, ViolationCode};
///
/// let err = PersonDraft::try_new(Some("  ".to_owned()), None).expect_err("invalid");
/// let codes: Vec<_> = err.violations().iter().map(|v| (v.field, v.code)).collect();
/// assert_eq!(
///     codes,
///     vec![("name", ViolationCode::Blank), ("dob", ViolationCode::Missing)]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub(crate) fn push(&mut self, field: &'static str, code: ViolationCode) {
        self.violations.push(FieldViolation { field, code });
    }

    /// Convert into `Ok(value)` when nothing was recorded.
    pub(crate) fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.violations.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    /// Rejected fields.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fields:")?;
        for (index, violation) in self.violations.iter().enumerate() {
            let separator = if index == 0 { " " } else { ", " };
            write!(
                f,
                "{separator}{} ({})",
                violation.field,
                violation.code.as_str()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Self::invalid_request(value.to_string())
            .with_details(json!({ "violations": value.violations }))
    }
}

/// Trim-aware text checks shared by entity constructors.
pub(crate) fn check_text(
    errors: &mut ValidationError,
    field: &'static str,
    raw: Option<String>,
    max_chars: usize,
) -> Option<String> {
    let Some(value) = raw else {
        errors.push(field, ViolationCode::Missing);
        return None;
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, ViolationCode::Blank);
        return None;
    }
    if trimmed.chars().count() > max_chars {
        errors.push(field, ViolationCode::TooLong);
        return None;
    }
    Some(trimmed.to_owned())
}

/// Presence check for non-text required fields.
pub(crate) fn check_present<T>(
    errors: &mut ValidationError,
    field: &'static str,
    raw: Option<T>,
) -> Option<T> {
    if raw.is_none() {
        errors.push(field, ViolationCode::Missing);
    }
    raw
}
