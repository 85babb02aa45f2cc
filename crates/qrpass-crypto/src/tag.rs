//! # HMAC-SHA-256 Authentication Tags
//!
//! Computes the `sig` field of a credential payload: HMAC-SHA-256 keyed
//! with the shared key, over the UTF-8 bytes of a
//! [`SigningString`](qrpass_core::SigningString), rendered as lowercase hex.
//!
//! ## Security Invariants
//!
//! - Tag input MUST be `&SigningString`. Raw bytes cannot be tagged, so the
//!   issuer and verifier always agree on field order and delimiter.
//! - [`SharedKey`] zeroizes its bytes on drop and never prints them.
//! - [`AuthTag::matches_hex()`] compares in constant time and treats a
//!   candidate of the wrong length as a mismatch, not an error.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use qrpass_core::SigningString;

use crate::error::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HMAC-SHA-256 tag in bytes.
pub const TAG_LEN: usize = 32;

// ---------------------------------------------------------------------------
// SharedKey
// ---------------------------------------------------------------------------

/// The pre-shared symmetric key used by both issuer and verifier.
///
/// Key bytes are zeroized when the value is dropped. `Debug` is redacted.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedKey(Vec<u8>);

impl SharedKey {
    /// Create a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EmptyKey`] for an empty key.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, CryptoError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CryptoError::EmptyKey);
        }
        Ok(Self(bytes))
    }

    /// Key from a compile-time constant. Caller guarantees it is non-empty.
    pub(crate) fn from_static(bytes: &'static [u8]) -> Self {
        debug_assert!(!bytes.is_empty());
        Self(bytes.to_vec())
    }

    /// Create a key from a passphrase; the UTF-8 bytes are the key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EmptyKey`] for an empty passphrase.
    pub fn from_passphrase(passphrase: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(passphrase.as_bytes())
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compute the authentication tag for a signing string.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if the HMAC primitive rejects
    /// the key. HMAC accepts keys of any length, so this does not occur for
    /// keys built through the constructors.
    pub fn tag(&self, data: &SigningString) -> Result<AuthTag, CryptoError> {
        mac_bytes(&self.0, data.as_bytes())
    }
}

impl std::fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SharedKey(<{} bytes redacted>)", self.0.len())
    }
}

fn mac_bytes(key: &[u8], data: &[u8]) -> Result<AuthTag, CryptoError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    mac.update(data);
    let out = mac.finalize().into_bytes();
    let mut bytes = [0u8; TAG_LEN];
    bytes.copy_from_slice(&out);
    Ok(AuthTag(bytes))
}

// ---------------------------------------------------------------------------
// AuthTag
// ---------------------------------------------------------------------------

/// A 32-byte HMAC-SHA-256 authentication tag.
///
/// Serializes as a lowercase hex string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthTag([u8; TAG_LEN]);

impl AuthTag {
    /// Wrap raw tag bytes.
    pub fn from_bytes(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }

    /// The raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; TAG_LEN] {
        &self.0
    }

    /// Render the tag as a lowercase hex string (64 chars).
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a tag from a 64-character hex string.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::HexDecode`] for non-hex input and
    /// [`CryptoError::InvalidTagLength`] for the wrong length.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex_to_bytes(hex)?;
        let arr: [u8; TAG_LEN] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| CryptoError::InvalidTagLength(b.len()))?;
        Ok(Self(arr))
    }

    /// Constant-time comparison against the hex text carried in a payload.
    ///
    /// The expected hex is lowercase, so an uppercase or truncated
    /// candidate does not match.
    pub fn matches_hex(&self, candidate: &str) -> bool {
        let expected = self.to_hex();
        bool::from(expected.as_bytes().ct_eq(candidate.as_bytes()))
    }
}

impl ConstantTimeEq for AuthTag {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl Serialize for AuthTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AuthTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for AuthTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthTag({}...)", &self.to_hex()[..16])
    }
}

impl std::fmt::Display for AuthTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Decode a hex string into bytes.
fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, CryptoError> {
    if hex.len() % 2 != 0 {
        return Err(CryptoError::HexDecode(format!(
            "hex string has odd length: {}",
            hex.len()
        )));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .filter(|pair| pair.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| CryptoError::HexDecode(format!("invalid hex at position {i}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrpass_core::{EpochMillis, Profile};

    const NONCE: &str = "6f1c2a8e-3b7d-4e5f-9a0b-1c2d3e4f5a6b";

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

    fn scenario_string() -> SigningString {
        SigningString::new(
            &ana(),
            EpochMillis::new(1_700_000_000_000),
            EpochMillis::new(1_700_003_599_999),
            NONCE,
        )
        .unwrap()
    }

    #[test]
    fn hmac_sha256_known_vector() {
        let tag = mac_bytes(b"key", b"The quick brown fox jumps over the lazy dog").unwrap();
        assert_eq!(
            tag.to_hex(),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn tag_matches_empty_segment_layout() {
        let key = SharedKey::from_passphrase("ang_magfoforge_ipapako_sa_krus").unwrap();
        let tag = key.tag(&scenario_string()).unwrap();
        assert_eq!(
            tag.to_hex(),
            "4d75eb298e76735b6212257ef9cc426fd55c596f23ecd3ddae3b09468ae9d389"
        );
    }

    #[test]
    fn different_keys_produce_different_tags() {
        let a = SharedKey::from_passphrase("alpha").unwrap();
        let b = SharedKey::from_passphrase("beta").unwrap();
        let s = scenario_string();
        assert_ne!(a.tag(&s).unwrap(), b.tag(&s).unwrap());
    }

    #[test]
    fn empty_key_rejected() {
        assert_eq!(SharedKey::from_passphrase("").unwrap_err(), CryptoError::EmptyKey);
        assert_eq!(
            SharedKey::from_bytes(Vec::new()).unwrap_err(),
            CryptoError::EmptyKey
        );
    }

    #[test]
    fn shared_key_debug_is_redacted() {
        let key = SharedKey::from_passphrase("super-secret").unwrap();
        let dbg = format!("{key:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("12 bytes"));
        assert_eq!(key.len(), 12);
        assert!(!key.is_empty());
    }

    #[test]
    fn hex_roundtrip_and_lowercase() {
        let key = SharedKey::from_passphrase("k").unwrap();
        let tag = key.tag(&scenario_string()).unwrap();
        let hex = tag.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(AuthTag::from_hex(&hex).unwrap(), tag);
        assert_eq!(format!("{tag}"), hex);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(matches!(
            AuthTag::from_hex("abc"),
            Err(CryptoError::HexDecode(_))
        ));
        assert!(matches!(
            AuthTag::from_hex("zz"),
            Err(CryptoError::HexDecode(_))
        ));
        assert_eq!(
            AuthTag::from_hex("abcd").unwrap_err(),
            CryptoError::InvalidTagLength(2)
        );
        assert!(matches!(
            AuthTag::from_hex("é0"),
            Err(CryptoError::HexDecode(_))
        ));
        assert!(matches!(
            AuthTag::from_hex("+a"),
            Err(CryptoError::HexDecode(_))
        ));
    }

    #[test]
    fn matches_hex_exact_only() {
        let key = SharedKey::from_passphrase("k").unwrap();
        let tag = key.tag(&scenario_string()).unwrap();
        let hex = tag.to_hex();
        assert!(tag.matches_hex(&hex));
        assert!(!tag.matches_hex(&hex[..63]));
        assert!(!tag.matches_hex(&format!("{hex}0")));
        assert!(!tag.matches_hex(&hex.to_uppercase()));
        assert!(!tag.matches_hex(""));
    }

    #[test]
    fn constant_time_eq() {
        let key = SharedKey::from_passphrase("k").unwrap();
        let a = key.tag(&scenario_string()).unwrap();
        let b = AuthTag::from_bytes(*a.as_bytes());
        assert!(bool::from(a.ct_eq(&b)));
        assert!(!bool::from(a.ct_eq(&AuthTag::from_bytes([0u8; TAG_LEN]))));
    }

    #[test]
    fn serde_as_hex_string() {
        let tag = AuthTag::from_bytes([0xab; TAG_LEN]);
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: AuthTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tag);
    }

    #[test]
    fn debug_shows_prefix_only() {
        let tag = AuthTag::from_bytes([0x11; TAG_LEN]);
        assert_eq!(format!("{tag:?}"), "AuthTag(1111111111111111...)");
    }
}
