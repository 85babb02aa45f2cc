//! # qrpass-crypto — Cryptographic Primitives for QR Pass
//!
//! Provides the keyed-hash layer of the credential protocol:
//!
//! - **Authentication tags** (`tag.rs`): HMAC-SHA-256 over a
//!   [`SigningString`](qrpass_core::SigningString), rendered as lowercase
//!   hex, with constant-time comparison.
//!
//! - **Key providers** (`key_provider.rs`): where the shared key comes
//!   from. The embedded key keeps interoperability with deployed clients;
//!   an environment variable can override it.
//!
//! ## Crate Policy
//!
//! - Depends only on `qrpass-core` internally.
//! - Key material is zeroized on drop.
//! - Tags are only ever computed over `SigningString`.

pub mod error;
pub mod key_provider;
pub mod tag;

pub use error::CryptoError;
pub use key_provider::{
    env_or_embedded, EnvKeyProvider, KeyProvider, StaticKeyProvider, DEFAULT_KEY_ENV,
    EMBEDDED_KEY,
};
pub use tag::{AuthTag, SharedKey, TAG_LEN};
