//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared across QR Pass. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Profile validation errors carry the exact user-facing message the
//!   registration form shows, so the CLI can print them verbatim.
//! - Canonicalization errors name the offending field.
//! - Verification failures are *not* errors: the verifier reports them as
//!   verdicts (see `qrpass-credential`).

use thiserror::Error;

use crate::profile::ProfileField;

/// Top-level error type for QR Pass core operations.
#[derive(Error, Debug)]
pub enum QrpassError {
    /// Profile or timestamp validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Canonical signing string could not be built.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A registrant profile is already stored.
    #[error("already registered as {id}")]
    AlreadyRegistered {
        /// Identifier of the stored profile.
        id: String,
    },

    /// I/O error (profile store filesystem operations).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Registrant profile validation failures.
///
/// `Display` yields the message shown to the registrant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty or absent.
    #[error("{} is required", .0.label())]
    MissingField(ProfileField),

    /// Student identifier does not match `xx-xxxxx`.
    #[error("ID must be in format xx-xxxxx (numbers only)")]
    InvalidStudentId(String),

    /// Email does not match `local@domain.tld`.
    #[error("Valid email is required")]
    InvalidEmail(String),

    /// Phone number has fewer than ten digits.
    #[error("Valid phone number is required (at least 10 digits)")]
    InvalidPhoneNumber(String),

    /// An enumerated field still holds its "Select ..." placeholder.
    #[error("{}", .0.unselected_message())]
    Unselected(ProfileField),

    /// A field contains the canonical-string delimiter.
    #[error("{} must not contain '|'", .0.label())]
    ReservedDelimiter(ProfileField),

    /// `expiresAt` is not strictly after `issuedAt`.
    #[error("expiry {expires_at} is not after issuance {issued_at}")]
    ExpiryNotAfterIssuance {
        /// Issuance time, ms since epoch.
        issued_at: i64,
        /// Expiry time, ms since epoch.
        expires_at: i64,
    },

    /// A millisecond timestamp is outside chrono's representable range.
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

/// Errors building the canonical signing string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalizationError {
    /// A field value contains the `|` delimiter, which would make the
    /// canonical string ambiguous.
    #[error("field {0} contains the canonical delimiter '|'")]
    DelimiterInField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_uses_form_label() {
        let err = ValidationError::MissingField(ProfileField::Name);
        assert_eq!(err.to_string(), "Name is required");
        let err = ValidationError::MissingField(ProfileField::Id);
        assert_eq!(err.to_string(), "Student ID is required");
    }

    #[test]
    fn unselected_messages_match_form() {
        assert_eq!(
            ValidationError::Unselected(ProfileField::Section).to_string(),
            "Please select your section"
        );
        assert_eq!(
            ValidationError::Unselected(ProfileField::ParticipationNature).to_string(),
            "Please select nature of participation"
        );
    }

    #[test]
    fn reserved_delimiter_names_field() {
        let err = ValidationError::ReservedDelimiter(ProfileField::Section);
        assert!(err.to_string().contains("Section"));
        assert!(err.to_string().contains('|'));
    }

    #[test]
    fn validation_converts_into_top_level() {
        let err: QrpassError = ValidationError::InvalidEmail("x".into()).into();
        assert!(matches!(err, QrpassError::Validation(_)));
        assert!(err.to_string().contains("Valid email is required"));
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = QrpassError::from(io_err);
        assert!(format!("{err}").contains("file missing"));
    }

    #[test]
    fn delimiter_error_display() {
        let err = CanonicalizationError::DelimiterInField("name");
        assert_eq!(
            err.to_string(),
            "field name contains the canonical delimiter '|'"
        );
    }
}
