//! # Profile Store
//!
//! Persistence boundary for the registrant profile. A store holds at most
//! one profile under the fixed key [`STORAGE_KEY`]; the issuer reads it,
//! the verifier never touches it.
//!
//! - [`FileProfileStore`] keeps a JSON document on disk, shaped like a
//!   browser key/value store: `{"studentData": {...}}`. Other keys in the
//!   document are preserved on write.
//! - [`MemoryProfileStore`] is for tests and embedding.
//!
//! A stored entry that no longer decodes as a [`Profile`] is discarded on
//! load and reported as absent, so a corrupt store never blocks
//! re-registration.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::QrpassError;
use crate::profile::Profile;

/// Key under which the profile is stored.
pub const STORAGE_KEY: &str = "studentData";

/// Storage backend for the single registrant profile.
pub trait ProfileStore {
    /// Load the stored profile, if any.
    fn load(&mut self) -> Result<Option<Profile>, QrpassError>;

    /// Store a profile, replacing any existing one.
    fn save(&mut self, profile: &Profile) -> Result<(), QrpassError>;

    /// Remove the stored profile.
    fn clear(&mut self) -> Result<(), QrpassError>;
}

/// Register a profile: trim, validate, and store it.
///
/// Registration is one-shot. If a profile is already stored the call fails
/// with [`QrpassError::AlreadyRegistered`] unless `force` is set.
///
/// # Errors
///
/// Returns [`QrpassError::Validation`] for an invalid profile and
/// [`QrpassError::AlreadyRegistered`] for a repeat registration.
pub fn register(
    store: &mut dyn ProfileStore,
    profile: Profile,
    force: bool,
) -> Result<Profile, QrpassError> {
    let profile = profile.trimmed();
    profile.validate()?;

    if !force {
        if let Some(existing) = store.load()? {
            return Err(QrpassError::AlreadyRegistered { id: existing.id });
        }
    }

    store.save(&profile)?;
    tracing::info!(id = %profile.id, "registrant profile stored");
    Ok(profile)
}

// ---------------------------------------------------------------------------
// FileProfileStore
// ---------------------------------------------------------------------------

/// JSON-file-backed profile store.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    /// Create a store backed by the file at `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, QrpassError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            _ => {
                tracing::warn!(path = %self.path.display(), "profile store is not a JSON object; starting empty");
                Ok(Map::new())
            }
        }
    }

    fn write_document(&self, doc: &Map<String, Value>) -> Result<(), QrpassError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(doc)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&mut self) -> Result<Option<Profile>, QrpassError> {
        let mut doc = self.read_document()?;
        let Some(entry) = doc.get(STORAGE_KEY).cloned() else {
            return Ok(None);
        };
        match serde_json::from_value::<Profile>(entry) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable stored profile");
                doc.remove(STORAGE_KEY);
                self.write_document(&doc)?;
                Ok(None)
            }
        }
    }

    fn save(&mut self, profile: &Profile) -> Result<(), QrpassError> {
        let mut doc = self.read_document()?;
        doc.insert(STORAGE_KEY.to_string(), serde_json::to_value(profile)?);
        self.write_document(&doc)
    }

    fn clear(&mut self) -> Result<(), QrpassError> {
        let mut doc = self.read_document()?;
        if doc.remove(STORAGE_KEY).is_some() {
            self.write_document(&doc)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryProfileStore
// ---------------------------------------------------------------------------

/// In-memory profile store.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profile: Option<Profile>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&mut self) -> Result<Option<Profile>, QrpassError> {
        Ok(self.profile.clone())
    }

    fn save(&mut self, profile: &Profile) -> Result<(), QrpassError> {
        self.profile = Some(profile.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), QrpassError> {
        self.profile = None;
        Ok(())
    }
}
