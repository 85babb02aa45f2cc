//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every key has a default, so
//! an empty file and no file behave the same:
//!
//! ```yaml
//! profile_store: ./qrpass-profile.json
//! expiry_policy: end-of-day      # or next-midnight
//! key_env: QRPASS_HMAC_KEY       # unset variable => embedded key
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use qrpass_core::{ExpiryPolicy, FileProfileStore};
use qrpass_crypto::{env_or_embedded, KeyProvider, DEFAULT_KEY_ENV};

/// Default profile store location, relative to the working directory.
pub const DEFAULT_PROFILE_STORE: &str = "qrpass-profile.json";

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON file holding the registrant profile.
    pub profile_store: PathBuf,
    /// Expiry cutoff applied at issuance.
    pub expiry_policy: ExpiryPolicy,
    /// Environment variable holding the shared key passphrase.
    pub key_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile_store: PathBuf::from(DEFAULT_PROFILE_STORE),
            expiry_policy: ExpiryPolicy::default(),
            key_env: DEFAULT_KEY_ENV.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("parsing config file: {}", path.display()))
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Open the configured profile store.
    pub fn store(&self) -> FileProfileStore {
        FileProfileStore::new(&self.profile_store)
    }

    /// Resolve the shared key: the configured variable if set, else the
    /// embedded key.
    pub fn key_provider(&self) -> Result<Box<dyn KeyProvider>> {
        let provider = env_or_embedded(&self.key_env)
            .with_context(|| format!("loading shared key from ${}", self.key_env))?;
        tracing::debug!(provider = provider.provider_name(), "shared key resolved");
        Ok(provider)
    }
}
