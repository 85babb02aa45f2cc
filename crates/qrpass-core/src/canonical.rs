//! # Canonical Signing String
//!
//! This module defines [`SigningString`], the sole construction path for
//! the bytes an authentication tag is computed over.
//!
//! ## Layout
//!
//! Every unsigned payload field, coerced to text, joined with `|` in a
//! fixed order:
//!
//! ```text
//! id|name|section|email|gender|phoneNumber|designation|participationNature|issuedAt|expiresAt|nonce
//! ```
//!
//! Timestamps render as base-10 integers. An absent optional profile field
//! contributes an empty segment, the same as `Some("")`. Profile validation
//! and payload decoding both refuse an empty optional field, so only the
//! absent form ever reaches this module. Issuer and verifier both go through
//! [`SigningString::new()`], so their field order cannot drift apart.
//!
//! ## Security Invariant
//!
//! The inner `String` is private and the constructor rejects any field that
//! contains the delimiter. Two different field tuples therefore never share
//! a signing string, and never share a valid tag.

use crate::error::CanonicalizationError;
use crate::profile::{Profile, ProfileField};
use crate::temporal::EpochMillis;

/// Field separator in the signing string.
pub const DELIMITER: char = '|';

/// The canonical text an authentication tag covers.
///
/// # Invariants
///
/// - The only constructor is [`SigningString::new()`].
/// - Exactly eleven segments, in the documented order.
/// - No segment contains [`DELIMITER`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SigningString(String);

impl SigningString {
    /// Build the signing string for a profile and issuance metadata.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::DelimiterInField`] if any profile
    /// field or the nonce contains `|`.
    pub fn new(
        profile: &Profile,
        issued_at: EpochMillis,
        expires_at: EpochMillis,
        nonce: &str,
    ) -> Result<Self, CanonicalizationError> {
        let mut out = String::with_capacity(160);
        for field in ProfileField::ALL {
            let value = profile.get(field).unwrap_or_default();
            push_segment(&mut out, field.wire_name(), value)?;
        }
        out.push_str(&issued_at.to_string());
        out.push(DELIMITER);
        out.push_str(&expires_at.to_string());
        out.push(DELIMITER);
        if nonce.contains(DELIMITER) {
            return Err(CanonicalizationError::DelimiterInField("nonce"));
        }
        out.push_str(nonce);
        Ok(Self(out))
    }

    /// The signing string as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The UTF-8 bytes fed to the keyed hash.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the string is empty (never, for a built value).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for SigningString {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

fn push_segment(
    out: &mut String,
    name: &'static str,
    value: &str,
) -> Result<(), CanonicalizationError> {
    if value.contains(DELIMITER) {
        return Err(CanonicalizationError::DelimiterInField(name));
    }
    out.push_str(value);
    out.push(DELIMITER);
    Ok(())
}
