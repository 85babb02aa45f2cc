//! # Key Provider Abstraction
//!
//! Abstracts where the shared HMAC key comes from behind a trait:
//!
//! - [`StaticKeyProvider`]: a key held in memory. [`StaticKeyProvider::embedded()`]
//!   returns the key compiled into every deployed issuer and verifier, which
//!   is required to accept credentials already in circulation.
//! - [`EnvKeyProvider`]: reads the key passphrase from an environment
//!   variable at construction.
//!
//! The embedded key is readable by anyone holding the binary. Deployments
//! that do not need to interoperate with existing credentials should supply
//! their own key through the environment.
//!
//! ## Security Invariants
//!
//! - Key material lives in [`SharedKey`], which zeroizes on drop.
//! - `KeyProvider` is `Send + Sync` so one provider can serve concurrent
//!   issue/validate calls.
//! - Tag input is `&SigningString` (never raw bytes).

use qrpass_core::SigningString;

use crate::error::CryptoError;
use crate::tag::{AuthTag, SharedKey};

/// Passphrase embedded in the deployed clients.
pub const EMBEDDED_KEY: &str = "ang_magfoforge_ipapako_sa_krus";

/// Default environment variable consulted for an overriding key.
pub const DEFAULT_KEY_ENV: &str = "QRPASS_HMAC_KEY";

/// Trait for shared-key backends.
pub trait KeyProvider: Send + Sync {
    /// Compute the authentication tag for a signing string.
    fn tag(&self, data: &SigningString) -> Result<AuthTag, CryptoError>;

    /// Human-readable name for this provider (for diagnostics/logging).
    fn provider_name(&self) -> &str;
}

impl<P: KeyProvider + ?Sized> KeyProvider for Box<P> {
    fn tag(&self, data: &SigningString) -> Result<AuthTag, CryptoError> {
        (**self).tag(data)
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

// ─── StaticKeyProvider ───────────────────────────────────────────────────

/// In-memory shared key.
#[derive(Debug, Clone)]
pub struct StaticKeyProvider {
    key: SharedKey,
}

impl StaticKeyProvider {
    /// Create from an existing key.
    pub fn new(key: SharedKey) -> Self {
        Self { key }
    }

    /// The key embedded in deployed clients.
    pub fn embedded() -> Self {
        Self {
            key: SharedKey::from_static(EMBEDDED_KEY.as_bytes()),
        }
    }

    /// Create from a passphrase.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EmptyKey`] for an empty passphrase.
    pub fn from_passphrase(passphrase: &str) -> Result<Self, CryptoError> {
        Ok(Self {
            key: SharedKey::from_passphrase(passphrase)?,
        })
    }
}

impl KeyProvider for StaticKeyProvider {
    fn tag(&self, data: &SigningString) -> Result<AuthTag, CryptoError> {
        self.key.tag(data)
    }

    fn provider_name(&self) -> &str {
        "StaticKeyProvider"
    }
}

// ─── EnvKeyProvider ──────────────────────────────────────────────────────

/// Loads the shared key passphrase from an environment variable.
///
/// The variable holds the passphrase text; its UTF-8 bytes are the key.
///
/// ```bash
/// export QRPASS_HMAC_KEY="correct horse battery staple"
/// ```
#[derive(Debug)]
pub struct EnvKeyProvider {
    key: SharedKey,
    var_name: String,
}

impl EnvKeyProvider {
    /// Load the key from the named environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::KeyNotConfigured`] if the variable is unset
    /// or not valid UTF-8, and [`CryptoError::EmptyKey`] if it is empty.
    pub fn from_env(var_name: &str) -> Result<Self, CryptoError> {
        let passphrase = std::env::var(var_name).map_err(|_| {
            CryptoError::KeyNotConfigured(format!("environment variable {var_name} not set"))
        })?;
        Ok(Self {
            key: SharedKey::from_passphrase(&passphrase)?,
            var_name: var_name.to_string(),
        })
    }

    /// Return the environment variable name this provider was loaded from.
    pub fn var_name(&self) -> &str {
        &self.var_name
    }
}

impl KeyProvider for EnvKeyProvider {
    fn tag(&self, data: &SigningString) -> Result<AuthTag, CryptoError> {
        self.key.tag(data)
    }

    fn provider_name(&self) -> &str {
        "EnvKeyProvider"
    }
}

/// Use the key from `var_name` if set, otherwise the embedded key.
///
/// # Errors
///
/// Returns [`CryptoError::EmptyKey`] if the variable is set but empty.
pub fn env_or_embedded(var_name: &str) -> Result<Box<dyn KeyProvider>, CryptoError> {
    match EnvKeyProvider::from_env(var_name) {
        Ok(provider) => {
            tracing::debug!(var = var_name, "using shared key from environment");
            Ok(Box::new(provider))
        }
        Err(CryptoError::KeyNotConfigured(_)) => {
            tracing::debug!(var = var_name, "key variable unset; using embedded key");
            Ok(Box::new(StaticKeyProvider::embedded()))
        }
        Err(e) => Err(e),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use qrpass_core::{EpochMillis, Profile};

    fn signing_string() -> SigningString {
        let profile = Profile {
            name: "Ana".into(),
            id: "21-00123".into(),
            section: "BSCS-1".into(),
            email: "ana@x.com".into(),
            gender: "F".into(),
            phone_number: "09171234567".into(),
            designation: None,
            participation_nature: None,
        };
        SigningString::new(&profile, EpochMillis::new(1), EpochMillis::new(2), "n").unwrap()
    }

    #[test]
    fn embedded_matches_passphrase() {
        let a = StaticKeyProvider::embedded();
        let b = StaticKeyProvider::from_passphrase(EMBEDDED_KEY).unwrap();
        let s = signing_string();
        assert_eq!(a.tag(&s).unwrap(), b.tag(&s).unwrap());
        assert_eq!(a.provider_name(), "StaticKeyProvider");
    }

    #[test]
    fn env_provider_reads_variable() {
        let var = "QRPASS_TEST_KEY_READS_VARIABLE";
        std::env::set_var(var, "from-env");
        let provider = EnvKeyProvider::from_env(var).unwrap();
        std::env::remove_var(var);

        let expected = StaticKeyProvider::from_passphrase("from-env").unwrap();
        let s = signing_string();
        assert_eq!(provider.tag(&s).unwrap(), expected.tag(&s).unwrap());
        assert_eq!(provider.var_name(), var);
        assert_eq!(provider.provider_name(), "EnvKeyProvider");
    }

    #[test]
    fn env_provider_missing_variable() {
        let err = EnvKeyProvider::from_env("QRPASS_TEST_KEY_NEVER_SET").unwrap_err();
        assert!(matches!(err, CryptoError::KeyNotConfigured(_)));
    }

    #[test]
    fn env_provider_empty_variable() {
        let var = "QRPASS_TEST_KEY_EMPTY";
        std::env::set_var(var, "");
        let err = EnvKeyProvider::from_env(var).unwrap_err();
        std::env::remove_var(var);
        assert_eq!(err, CryptoError::EmptyKey);
    }

    #[test]
    fn env_or_embedded_falls_back() {
        let provider = env_or_embedded("QRPASS_TEST_KEY_FALLBACK_UNSET").unwrap();
        assert_eq!(provider.provider_name(), "StaticKeyProvider");
        let s = signing_string();
        assert_eq!(
            provider.tag(&s).unwrap(),
            StaticKeyProvider::embedded().tag(&s).unwrap()
        );
    }

    #[test]
    fn env_or_embedded_prefers_env() {
        let var = "QRPASS_TEST_KEY_PREFERS_ENV";
        std::env::set_var(var, "override");
        let provider = env_or_embedded(var).unwrap();
        std::env::remove_var(var);
        assert_eq!(provider.provider_name(), "EnvKeyProvider");
    }

    #[test]
    fn boxed_provider_delegates() {
        let boxed: Box<dyn KeyProvider> = Box::new(StaticKeyProvider::embedded());
        let s = signing_string();
        assert_eq!(
            KeyProvider::tag(&boxed, &s).unwrap(),
            StaticKeyProvider::embedded().tag(&s).unwrap()
        );
    }
}
