//! # Credential Verifier
//!
//! Decides whether a scanned payload string is authentic and unexpired.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. decode: not exactly a payload object → `Malformed QR payload`
//! 2. tag: recomputed tag differs from `sig` → `Invalid signature`
//! 3. expiry: `now > expiresAt` → `QR expired`
//!
//! ## Security Invariants
//!
//! - Never panics and never returns `Err`; every input maps to a
//!   [`Verdict`].
//! - Tag comparison is constant-time.
//! - Stateless: the same input at the same instant always yields the same
//!   verdict. Replays within the validity window are accepted.

use qrpass_core::EpochMillis;
use qrpass_crypto::KeyProvider;

use crate::payload::CredentialPayload;
use crate::verdict::{RejectReason, Verdict};

/// Validates scanned payloads against a shared key.
#[derive(Debug, Clone)]
pub struct Verifier<K> {
    keys: K,
}

impl<K: KeyProvider> Verifier<K> {
    /// Create a verifier.
    pub fn new(keys: K) -> Self {
        Self { keys }
    }

    /// Validate a payload against the current instant.
    pub fn validate(&self, serialized: &str) -> Verdict {
        self.validate_at(serialized, EpochMillis::now())
    }

    /// Validate a payload as of `now`.
    pub fn validate_at(&self, serialized: &str, now: EpochMillis) -> Verdict {
        let payload = match CredentialPayload::from_json(serialized) {
            Ok(p) => p,
            Err(e) => {
                tracing::info!(error = %e, "rejecting undecodable payload");
                return Verdict::Rejected(RejectReason::MalformedPayload);
            }
        };

        let canonical = match payload.signing_string() {
            Ok(c) => c,
            Err(e) => {
                tracing::info!(error = %e, "rejecting payload with reserved delimiter");
                return Verdict::Rejected(RejectReason::MalformedPayload);
            }
        };

        let authentic = match self.keys.tag(&canonical) {
            Ok(expected) => expected.matches_hex(&payload.sig),
            Err(e) => {
                tracing::error!(error = %e, provider = self.keys.provider_name(), "tag computation failed");
                false
            }
        };
        if !authentic {
            tracing::warn!(id = %payload.id, "signature mismatch");
            return Verdict::Rejected(RejectReason::InvalidSignature);
        }

        if now > payload.expires_at {
            tracing::info!(
                id = %payload.id,
                expires_at = %payload.expires_at,
                now = %now,
                "credential expired"
            );
            return Verdict::Rejected(RejectReason::Expired);
        }

        tracing::debug!(id = %payload.id, "credential accepted");
        Verdict::Valid(payload.into())
    }
}
