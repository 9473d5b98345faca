//! Field-scoped validation errors.
//!
//! A submission is rejected as a whole: every violated field is
//! reported in one ordered list, never just the first failure.

use std::fmt;

use serde::Serialize;

/// What went wrong with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Empty value or first character not uppercase
    InvalidCasing,
    /// Character outside the allowed name alphabet
    InvalidAlphabet,
    /// Character outside the allowed phone character set
    InvalidCharacters,
    /// Value length outside the allowed bounds
    InvalidLength,
    /// Not a syntactically valid email address
    InvalidEmail,
    /// Reason not in the closed set
    UnknownReason,
    /// Not parseable as a calendar date
    MalformedDate,
    /// Not parseable as a timestamp
    MalformedTimestamp,
}

impl FieldErrorKind {
    /// Returns the stable string code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorKind::InvalidCasing => "INVALID_CASING",
            FieldErrorKind::InvalidAlphabet => "INVALID_ALPHABET",
            FieldErrorKind::InvalidCharacters => "INVALID_CHARACTERS",
            FieldErrorKind::InvalidLength => "INVALID_LENGTH",
            FieldErrorKind::InvalidEmail => "INVALID_EMAIL",
            FieldErrorKind::UnknownReason => "UNKNOWN_REASON",
            FieldErrorKind::MalformedDate => "MALFORMED_DATE",
            FieldErrorKind::MalformedTimestamp => "MALFORMED_TIMESTAMP",
        }
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One violated field: which field, what kind of violation, and a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        kind: FieldErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.field, self.kind.code(), self.message)
    }
}

/// Ordered collection of field errors for one rejected submission.
///
/// Order follows field declaration order in the record schema, so the
/// caller sees errors in a stable, predictable sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation for a field.
    pub fn push(
        &mut self,
        field: impl Into<String>,
        kind: FieldErrorKind,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError::new(field, kind, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Returns whether some error was recorded against `field`.
    pub fn contains_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Returns the error kind recorded against `field`, if any.
    pub fn kind_for(&self, field: &str) -> Option<FieldErrorKind> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.kind)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_stable() {
        assert_eq!(FieldErrorKind::InvalidCasing.code(), "INVALID_CASING");
        assert_eq!(FieldErrorKind::InvalidAlphabet.code(), "INVALID_ALPHABET");
        assert_eq!(
            FieldErrorKind::InvalidCharacters.code(),
            "INVALID_CHARACTERS"
        );
        assert_eq!(FieldErrorKind::InvalidLength.code(), "INVALID_LENGTH");
        assert_eq!(FieldErrorKind::InvalidEmail.code(), "INVALID_EMAIL");
        assert_eq!(FieldErrorKind::UnknownReason.code(), "UNKNOWN_REASON");
        assert_eq!(FieldErrorKind::MalformedDate.code(), "MALFORMED_DATE");
        assert_eq!(
            FieldErrorKind::MalformedTimestamp.code(),
            "MALFORMED_TIMESTAMP"
        );
    }

    #[test]
    fn test_errors_preserve_insertion_order() {
        let mut errors = FieldErrors::new();
        errors.push("surname", FieldErrorKind::InvalidCasing, "first");
        errors.push("phone", FieldErrorKind::InvalidLength, "second");
        errors.push("email", FieldErrorKind::InvalidEmail, "third");

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["surname", "phone", "email"]);
    }

    #[test]
    fn test_contains_and_kind_lookup() {
        let mut errors = FieldErrors::new();
        errors.push("phone", FieldErrorKind::InvalidLength, "too short");

        assert!(errors.contains_field("phone"));
        assert!(!errors.contains_field("email"));
        assert_eq!(errors.kind_for("phone"), Some(FieldErrorKind::InvalidLength));
        assert_eq!(errors.kind_for("email"), None);
    }

    #[test]
    fn test_display_joins_entries() {
        let mut errors = FieldErrors::new();
        errors.push("surname", FieldErrorKind::InvalidCasing, "must be uppercase");
        errors.push("phone", FieldErrorKind::InvalidLength, "too short");

        let display = errors.to_string();
        assert!(display.contains("surname [INVALID_CASING]"));
        assert!(display.contains("; phone [INVALID_LENGTH]"));
    }

    #[test]
    fn test_serializes_as_flat_list() {
        let mut errors = FieldErrors::new();
        errors.push("email", FieldErrorKind::InvalidEmail, "bad address");

        let json = serde_json::to_value(&errors).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["field"], "email");
        assert_eq!(json[0]["kind"], "invalid_email");
        assert_eq!(json[0]["message"], "bad address");
    }
}
