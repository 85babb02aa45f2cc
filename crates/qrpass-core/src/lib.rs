//! # qrpass-core — Foundational Types for QR Pass
//!
//! This crate defines the primitives the credential protocol is built
//! from. Every other crate in the workspace depends on `qrpass-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `StudentId`, `Email`,
//!    `PhoneNumber`, `Nonce` and `EpochMillis` are newtypes with validated
//!    constructors.
//!
//! 2. **`SigningString` newtype.** All tag computation flows through
//!    `SigningString::new()`. Issuer and verifier cannot disagree on field
//!    order, and a field containing the delimiter cannot be signed.
//!
//! 3. **Explicit expiry policy.** The end-of-day and next-midnight cutoffs
//!    are both first-class `ExpiryPolicy` variants computed against the
//!    holder's local calendar day.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `qrpass-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod identity;
pub mod profile;
pub mod store;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::{SigningString, DELIMITER};
pub use error::{CanonicalizationError, QrpassError, ValidationError};
pub use identity::{Email, Nonce, PhoneNumber, StudentId};
pub use profile::{Profile, ProfileField};
pub use store::{register, FileProfileStore, MemoryProfileStore, ProfileStore, STORAGE_KEY};
pub use temporal::{EpochMillis, ExpiryPolicy};
