//! # Issuance Errors
//!
//! Verification never fails with an error: every outcome is a
//! [`Verdict`](crate::Verdict). Only the issuer returns `Err`.

use thiserror::Error;

use qrpass_core::{CanonicalizationError, ValidationError};
use qrpass_crypto::CryptoError;

/// Errors from credential issuance.
#[derive(Error, Debug)]
pub enum IssueError {
    /// The profile failed validation. Raised before any cryptographic work.
    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] ValidationError),

    /// Issuance or expiry timestamps are unusable.
    #[error("invalid timestamps: {0}")]
    InvalidTimestamps(ValidationError),

    /// The signing string could not be built.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The key provider failed to produce a tag.
    #[error("tag computation failed: {0}")]
    Crypto(#[from] CryptoError),

    /// The payload could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
