//! # Credential Issuer
//!
//! Turns a registrant profile into a signed, time-boxed payload string.
//!
//! ## Security Invariants
//!
//! - The profile is validated before any cryptographic work. An invalid
//!   profile is never signed.
//! - `expiresAt` is strictly later than `issuedAt`.
//! - The tag covers every payload field except `sig`, via
//!   [`SigningString`](qrpass_core::SigningString).
//! - Each call draws a fresh UUID v4 nonce. Nonces are not tracked.

use chrono::{DateTime, Local, TimeZone};

use qrpass_core::{EpochMillis, ExpiryPolicy, Nonce, Profile, SigningString, ValidationError};
use qrpass_crypto::KeyProvider;

use crate::error::IssueError;
use crate::payload::CredentialPayload;

/// The result of one issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    /// Compact JSON handed to the QR encoder.
    pub serialized: String,
    /// Expiry instant, for the countdown display.
    pub expires_at: EpochMillis,
    /// The decoded payload.
    pub payload: CredentialPayload,
}

/// Signs credential payloads with a shared key.
#[derive(Debug, Clone)]
pub struct Issuer<K> {
    keys: K,
    policy: ExpiryPolicy,
}

impl<K: KeyProvider> Issuer<K> {
    /// Create an issuer with the default expiry policy.
    pub fn new(keys: K) -> Self {
        Self {
            keys,
            policy: ExpiryPolicy::default(),
        }
    }

    /// Set the expiry policy.
    pub fn with_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The configured expiry policy.
    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// Issue a credential valid until the policy cutoff of the host's local
    /// calendar day.
    ///
    /// # Errors
    ///
    /// See [`Issuer::sign()`].
    pub fn issue(&self, profile: &Profile) -> Result<IssuedCredential, IssueError> {
        self.issue_at(profile, &Local::now())
    }

    /// Issue a credential as of `now`, using `now`'s time zone for the
    /// calendar day.
    ///
    /// # Errors
    ///
    /// See [`Issuer::sign()`].
    pub fn issue_at<Tz: TimeZone>(
        &self,
        profile: &Profile,
        now: &DateTime<Tz>,
    ) -> Result<IssuedCredential, IssueError> {
        profile.validate()?;
        let issued_at = EpochMillis::from_datetime(now);
        let expires_at = self
            .policy
            .expires_at(now)
            .map_err(IssueError::InvalidTimestamps)?;
        self.sign_validated(profile, issued_at, expires_at, &Nonce::generate())
    }

    /// Sign a payload with explicit timestamps and nonce.
    ///
    /// Deterministic: identical inputs yield an identical payload.
    ///
    /// # Errors
    ///
    /// - [`IssueError::InvalidProfile`] if the profile fails validation.
    /// - [`IssueError::InvalidTimestamps`] if `expires_at <= issued_at`.
    /// - [`IssueError::Crypto`] if the key provider fails.
    pub fn sign(
        &self,
        profile: &Profile,
        issued_at: EpochMillis,
        expires_at: EpochMillis,
        nonce: &Nonce,
    ) -> Result<IssuedCredential, IssueError> {
        profile.validate()?;
        self.sign_validated(profile, issued_at, expires_at, nonce)
    }

    /// Sign a profile that has already passed [`Profile::validate()`].
    fn sign_validated(
        &self,
        profile: &Profile,
        issued_at: EpochMillis,
        expires_at: EpochMillis,
        nonce: &Nonce,
    ) -> Result<IssuedCredential, IssueError> {
        if expires_at <= issued_at {
            return Err(IssueError::InvalidTimestamps(
                ValidationError::ExpiryNotAfterIssuance {
                    issued_at: issued_at.as_i64(),
                    expires_at: expires_at.as_i64(),
                },
            ));
        }

        let nonce = nonce.to_string();
        let canonical = SigningString::new(profile, issued_at, expires_at, &nonce)?;
        let sig = self.keys.tag(&canonical)?.to_hex();

        let payload = CredentialPayload::assemble(profile, issued_at, expires_at, nonce, sig);
        let serialized = serde_json::to_string(&payload)?;

        tracing::info!(
            id = %profile.id,
            expires_at = %expires_at,
            policy = %self.policy,
            "credential issued"
        );
        tracing::debug!(
            canonical_len = canonical.len(),
            payload_len = serialized.len(),
            provider = self.keys.provider_name(),
            "payload signed"
        );

        Ok(IssuedCredential {
            serialized,
            expires_at,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use qrpass_core::ProfileField;
    use qrpass_crypto::StaticKeyProvider;

    fn ana() -> Profile {
        Profile {
            name: "Ana".into(),
            id: "21-00123".into(),
            section: "BSCS-1".into(),
            email: "ana@x.com".into(),
            gender: "F".into(),
            phone_number: "09171234567".into(),
            designation: None,
            participation_nature: None,
        }
    }

    fn issuer() -> Issuer<StaticKeyProvider> {
        Issuer::new(StaticKeyProvider::embedded())
    }

    fn utc_now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .timestamp_millis_opt(1_700_000_000_000)
            .unwrap()
    }

    #[test]
    fn issue_at_uses_end_of_day_by_default() {
        let issued = issuer().issue_at(&ana(), &utc_now()).unwrap();
        assert_eq!(issued.payload.issued_at, EpochMillis::new(1_700_000_000_000));
        assert_eq!(issued.expires_at, EpochMillis::new(1_700_006_399_999));
        assert_eq!(issued.payload.expires_at, issued.expires_at);
    }

    #[test]
    fn next_midnight_policy() {
        let i = issuer().with_policy(ExpiryPolicy::NextMidnight);
        assert_eq!(i.policy(), ExpiryPolicy::NextMidnight);
        let issued = i.issue_at(&ana(), &utc_now()).unwrap();
        assert_eq!(issued.expires_at, EpochMillis::new(1_700_006_400_000));
    }

    #[test]
    fn issue_uses_fresh_nonce() {
        let a = issuer().issue(&ana()).unwrap();
        let b = issuer().issue(&ana()).unwrap();
        assert_ne!(a.payload.nonce, b.payload.nonce);
        assert_ne!(a.payload.sig, b.payload.sig);
        assert!(a.expires_at > a.payload.issued_at);
    }

    #[test]
    fn serialized_matches_payload() {
        let issued = issuer().issue_at(&ana(), &utc_now()).unwrap();
        let decoded = CredentialPayload::from_json(&issued.serialized).unwrap();
        assert_eq!(decoded, issued.payload);
        assert_eq!(issued.payload.sig.len(), 64);
    }

    #[test]
    fn invalid_profile_rejected() {
        let mut p = ana();
        p.name = String::new();
        let err = issuer().issue(&p).unwrap_err();
        assert!(matches!(
            err,
            IssueError::InvalidProfile(ValidationError::MissingField(ProfileField::Name))
        ));
    }

    #[test]
    fn sign_validates_profile() {
        let mut p = ana();
        p.designation = Some(String::new());
        let err = issuer()
            .sign(&p, EpochMillis::new(1), EpochMillis::new(2), &Nonce::generate())
            .unwrap_err();
        assert!(matches!(
            err,
            IssueError::InvalidProfile(ValidationError::MissingField(ProfileField::Designation))
        ));
    }

    #[test]
    fn issue_at_checks_profile_before_signing() {
        let mut p = ana();
        p.email = "ana@x".into();
        let err = issuer().issue_at(&p, &utc_now()).unwrap_err();
        assert!(matches!(err, IssueError::InvalidProfile(_)));
    }

    #[test]
    fn delimiter_in_profile_rejected_as_invalid_profile() {
        let mut p = ana();
        p.section = "BSCS|1".into();
        let err = issuer().issue(&p).unwrap_err();
        assert!(matches!(
            err,
            IssueError::InvalidProfile(ValidationError::ReservedDelimiter(ProfileField::Section))
        ));
    }

    #[test]
    fn expiry_must_follow_issuance() {
        let err = issuer()
            .sign(&ana(), EpochMillis::new(10), EpochMillis::new(10), &Nonce::generate())
            .unwrap_err();
        assert!(matches!(
            err,
            IssueError::InvalidTimestamps(ValidationError::ExpiryNotAfterIssuance {
                issued_at: 10,
                expires_at: 10
            })
        ));
    }

    #[test]
    fn sign_is_deterministic() {
        let nonce = Nonce::generate();
        let a = issuer()
            .sign(&ana(), EpochMillis::new(1), EpochMillis::new(2), &nonce)
            .unwrap();
        let b = issuer()
            .sign(&ana(), EpochMillis::new(1), EpochMillis::new(2), &nonce)
            .unwrap();
        assert_eq!(a, b);
    }
}
