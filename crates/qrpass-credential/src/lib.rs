//! # qrpass-credential — Signed, Time-Boxed QR Credentials
//!
//! The issuer and verifier sides of the QR Pass protocol.
//!
//! - [`Issuer`] validates a registrant profile, stamps it with issuance
//!   and expiry instants and a fresh nonce, tags it with HMAC-SHA-256 and
//!   serializes it to the compact JSON the QR code carries.
//! - [`Verifier`] takes the decoded QR text and answers with a
//!   [`Verdict`]: malformed, invalid signature, expired, or valid with the
//!   holder's attributes.
//!
//! Both sides share one symmetric key through a
//! [`KeyProvider`](qrpass_crypto::KeyProvider). Neither keeps state
//! between calls, so both are safe to share across threads.
//!
//! ## Example
//!
//! ```
//! use qrpass_core::Profile;
//! use qrpass_credential::{Issuer, Verifier};
//! use qrpass_crypto::StaticKeyProvider;
//!
//! let profile = Profile {
//!     name: "Ana".into(),
//!     id: "21-00123".into(),
//!     section: "BSCS-1".into(),
//!     email: "ana@x.com".into(),
//!     gender: "F".into(),
//!     phone_number: "09171234567".into(),
//!     designation: None,
//!     participation_nature: None,
//! };
//!
//! let issued = Issuer::new(StaticKeyProvider::embedded()).issue(&profile)?;
//! let verdict = Verifier::new(StaticKeyProvider::embedded()).validate(&issued.serialized);
//! assert!(verdict.is_valid());
//! # Ok::<(), qrpass_credential::IssueError>(())
//! ```

pub mod error;
pub mod issuer;
pub mod payload;
pub mod verdict;
pub mod verifier;

pub use error::IssueError;
pub use issuer::{IssuedCredential, Issuer};
pub use payload::CredentialPayload;
pub use verdict::{RejectReason, Verdict, VerifiedData};
pub use verifier::Verifier;
