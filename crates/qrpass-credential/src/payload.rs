//! # Credential Payload
//!
//! The JSON object carried inside the QR code. Field order is part of the
//! wire format and matches the signing-string order:
//!
//! ```text
//! id, name, section, email, gender, phoneNumber, [designation],
//! [participationNature], issuedAt, expiresAt, nonce, sig
//! ```
//!
//! ## Security Invariants
//!
//! - Decoding is strict: unknown fields, duplicate fields, missing fields
//!   and wrong types are all rejected, so the verifier reports them as a
//!   malformed payload rather than guessing.
//! - An optional field is either absent or a non-empty string. `null` and
//!   `""` would sign the same as an absent field, so both are rejected.
//! - `sig` is kept as received text. It is compared against the recomputed
//!   tag's hex in constant time; a badly formed `sig` is a signature
//!   failure, not a decoding failure.

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

use qrpass_core::{CanonicalizationError, EpochMillis, Profile, SigningString};

/// A signed, time-boxed credential as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CredentialPayload {
    /// Student identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Section or organization.
    pub section: String,
    /// Email address.
    pub email: String,
    /// Gender.
    pub gender: String,
    /// Phone number.
    pub phone_number: String,
    /// Designation (richer variant only).
    #[serde(
        default,
        deserialize_with = "present_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub designation: Option<String>,
    /// Nature of participation (richer variant only).
    #[serde(
        default,
        deserialize_with = "present_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub participation_nature: Option<String>,
    /// Issuance instant.
    pub issued_at: EpochMillis,
    /// Expiry instant.
    pub expires_at: EpochMillis,
    /// Per-issuance random value.
    pub nonce: String,
    /// Lowercase hex HMAC-SHA-256 tag over the other fields.
    pub sig: String,
}

impl CredentialPayload {
    /// Assemble a payload from its parts.
    pub(crate) fn assemble(
        profile: &Profile,
        issued_at: EpochMillis,
        expires_at: EpochMillis,
        nonce: String,
        sig: String,
    ) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            section: profile.section.clone(),
            email: profile.email.clone(),
            gender: profile.gender.clone(),
            phone_number: profile.phone_number.clone(),
            designation: profile.designation.clone(),
            participation_nature: profile.participation_nature.clone(),
            issued_at,
            expires_at,
            nonce,
            sig,
        }
    }

    /// Decode a scanned payload string.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for anything that is not exactly a
    /// payload object.
    pub fn from_json(serialized: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(serialized)
    }

    /// The profile attributes embedded in this payload.
    pub fn profile(&self) -> Profile {
        Profile {
            name: self.name.clone(),
            id: self.id.clone(),
            section: self.section.clone(),
            email: self.email.clone(),
            gender: self.gender.clone(),
            phone_number: self.phone_number.clone(),
            designation: self.designation.clone(),
            participation_nature: self.participation_nature.clone(),
        }
    }

    /// Rebuild the signing string covering every field except `sig`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::DelimiterInField`] if any field
    /// contains the delimiter.
    pub fn signing_string(&self) -> Result<SigningString, CanonicalizationError> {
        SigningString::new(&self.profile(), self.issued_at, self.expires_at, &self.nonce)
    }
}

/// Decode a present optional field, refusing `null` and the empty string.
fn present_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(D::Error::invalid_value(
            Unexpected::Str(&value),
            &"a non-empty string",
        ));
    }
    Ok(Some(value))
}
