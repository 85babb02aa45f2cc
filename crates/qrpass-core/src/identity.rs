//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the identifiers carried in a registrant
//! profile and credential payload. Each identifier is a distinct type,
//! so a [`StudentId`] cannot be passed where an [`Email`] is expected.
//!
//! ## Validation
//!
//! String-based identifiers ([`StudentId`], [`Email`], [`PhoneNumber`])
//! validate format at construction time. [`Nonce`] is always valid by
//! construction.
//!
//! - Student ID: two digits, hyphen, five digits (`21-00123`).
//! - Email: minimal `local@domain.tld` shape, no whitespace.
//! - Phone number: at least ten digits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// Per-issuance random token.
///
/// Distinguishes two credentials issued for the same profile in the same
/// millisecond. It is never tracked or checked for reuse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nonce(Uuid);

impl Nonce {
    /// Generate a fresh random (v4) nonce.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a nonce from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for Nonce {
    fn default() -> Self {
        Self::generate()
    }
}

impl std::fmt::Display for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// String-based identifiers (validated at construction)
// ---------------------------------------------------------------------------

/// Student identifier in `xx-xxxxx` form.
///
/// # Validation
///
/// - Exactly 8 characters
/// - Two ASCII digits, `-`, five ASCII digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(String);

impl StudentId {
    /// Create a student ID, validating the `xx-xxxxx` format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStudentId`] if the format does not
    /// match.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !Self::is_well_formed(&s) {
            return Err(ValidationError::InvalidStudentId(s));
        }
        Ok(Self(s))
    }

    fn is_well_formed(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 8
            && bytes[2] == b'-'
            && bytes[..2].iter().all(u8::is_ascii_digit)
            && bytes[3..].iter().all(u8::is_ascii_digit)
    }

    /// Normalize free-form keyboard input toward the `xx-xxxxx` shape.
    ///
    /// Drops everything but digits, keeps at most seven digits and inserts
    /// the dash after the second digit once a third digit is present. The
    /// result is not guaranteed to be valid (it may be too short).
    pub fn format_input(raw: &str) -> String {
        let digits: String = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(7)
            .collect();
        if digits.len() <= 2 {
            digits
        } else {
            format!("{}-{}", &digits[..2], &digits[2..])
        }
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address with the minimal `local@domain.tld` shape.
///
/// # Validation
///
/// - No whitespace
/// - Exactly one `@` with a non-empty local part
/// - The domain contains a `.` with at least one character on each side
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create an email, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] if the shape is wrong.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !Self::is_well_formed(&s) {
            return Err(ValidationError::InvalidEmail(s));
        }
        Ok(Self(s))
    }

    fn is_well_formed(s: &str) -> bool {
        if s.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = s.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        let last = domain.len().saturating_sub(1);
        domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i < last)
    }

    /// Access the email string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Phone number with at least ten digits.
///
/// Separators (`+`, spaces, dashes) are kept as entered; only the digit
/// count is checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 10;

    /// Create a phone number, validating the digit count.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPhoneNumber`] if fewer than
    /// [`Self::MIN_DIGITS`] digits are present.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.chars().filter(char::is_ascii_digit).count() < Self::MIN_DIGITS {
            return Err(ValidationError::InvalidPhoneNumber(s));
        }
        Ok(Self(s))
    }

    /// Access the phone number string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
