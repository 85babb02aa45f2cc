//! # Validation Verdict
//!
//! The verifier's answer for a scanned payload. Serializes to the JSON
//! shape scanners expect:
//!
//! ```json
//! {"valid": false, "reason": "QR expired"}
//! {"valid": true, "data": {"id": "21-00123", "name": "Ana", ...}}
//! ```
//!
//! `reason` appears only on rejection and `data` only on acceptance.
//! `data` never carries `sig` or `nonce`.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use qrpass_core::{EpochMillis, Profile};

use crate::payload::CredentialPayload;

/// Why a payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Not a well-formed payload object.
    MalformedPayload,
    /// The tag does not match the recomputed tag.
    InvalidSignature,
    /// The current instant is past `expiresAt`.
    Expired,
}

impl RejectReason {
    /// The reason text shown to the scanner operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedPayload => "Malformed QR payload",
            Self::InvalidSignature => "Invalid signature",
            Self::Expired => "QR expired",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RejectReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Attributes released by an accepted credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedData {
    /// The holder's profile.
    #[serde(flatten)]
    pub profile: Profile,
    /// Issuance instant.
    pub issued_at: EpochMillis,
    /// Expiry instant.
    pub expires_at: EpochMillis,
}

impl From<CredentialPayload> for VerifiedData {
    fn from(payload: CredentialPayload) -> Self {
        Self {
            profile: payload.profile(),
            issued_at: payload.issued_at,
            expires_at: payload.expires_at,
        }
    }
}

/// Outcome of validating a scanned payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Authentic and unexpired.
    Valid(VerifiedData),
    /// Rejected for the given reason.
    Rejected(RejectReason),
}

impl Verdict {
    /// Whether the credential was accepted.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The rejection reason, if rejected.
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Valid(_) => None,
            Self::Rejected(r) => Some(*r),
        }
    }

    /// The released data, if accepted.
    pub fn data(&self) -> Option<&VerifiedData> {
        match self {
            Self::Valid(d) => Some(d),
            Self::Rejected(_) => None,
        }
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Verdict", 2)?;
        s.serialize_field("valid", &self.is_valid())?;
        match self {
            Self::Valid(data) => s.serialize_field("data", data)?,
            Self::Rejected(reason) => s.serialize_field("reason", reason)?,
        }
        s.end()
    }
}
