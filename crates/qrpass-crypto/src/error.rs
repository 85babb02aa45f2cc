//! # Cryptographic Error Types
//!
//! Structured errors for all cryptographic operations in `qrpass-crypto`.
//! Uses `thiserror` for ergonomic error definitions with diagnostic context.

use thiserror::Error;

/// Errors from cryptographic operations in QR Pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The shared key is empty.
    #[error("shared key must not be empty")]
    EmptyKey,

    /// The HMAC primitive rejected the key.
    #[error("invalid HMAC key: {0}")]
    InvalidKey(String),

    /// A key source is not configured.
    #[error("key not configured: {0}")]
    KeyNotConfigured(String),

    /// Invalid authentication tag length.
    #[error("invalid tag length: expected 32 bytes, got {0}")]
    InvalidTagLength(usize),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),
}
