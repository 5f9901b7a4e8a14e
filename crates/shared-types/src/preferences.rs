//! # Preference Store
//!
//! Small string key/value persistence that survives restarts until a key is
//! explicitly removed. Two adapters are provided:
//!
//! - [`MemoryPreferences`]: process-local, used by tests and `--ephemeral`.
//! - [`FilePreferences`]: a JSON object on disk, rewritten on every change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::errors::PreferenceError;

/// Fixed key names.
pub mod keys {
    /// Persisted savings goal in won.
    pub const SAVING_GOAL_WON: &str = "saving-goal-won";
    /// Last known LAN address of this machine.
    pub const LAN_IP: &str = "my-lan-ip";
    /// API origin override.
    pub const API_ORIGIN: &str = "API_ORIGIN";
    /// User id override.
    pub const USER_ID: &str = "USER_ID";
    /// Area label override.
    pub const AREA: &str = "AREA";
}

/// Port for persisted key/value preferences.
pub trait PreferenceStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Remove a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}

/// In-memory preferences.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with initial values.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: RwLock::new(
                values
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.values.write().remove(key);
        Ok(())
    }
}

/// Preferences persisted as a JSON object of strings.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FilePreferences {
    /// Open (or lazily create) the preference file at `path`.
    ///
    /// A missing file starts empty; a corrupt file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Preference file absent, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, raw).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to persist preferences");
            PreferenceError::Io(e)
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.write();
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.write();
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.get(keys::LAN_IP), None);

        prefs.set(keys::LAN_IP, "10.0.0.7").unwrap();
        assert_eq!(prefs.get(keys::LAN_IP).as_deref(), Some("10.0.0.7"));

        prefs.remove(keys::LAN_IP).unwrap();
        prefs.remove(keys::LAN_IP).unwrap();
        assert_eq!(prefs.get(keys::LAN_IP), None);
    }

    #[test]
    fn test_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let prefs = FilePreferences::open(&path).unwrap();
        prefs.set(keys::SAVING_GOAL_WON, "10000").unwrap();
        drop(prefs);

        let reopened = FilePreferences::open(&path).unwrap();
        assert_eq!(reopened.get(keys::SAVING_GOAL_WON).as_deref(), Some("10000"));

        reopened.remove(keys::SAVING_GOAL_WON).unwrap();
        let again = FilePreferences::open(&path).unwrap();
        assert_eq!(again.get(keys::SAVING_GOAL_WON), None);
    }

    #[test]
    fn test_file_corrupt_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FilePreferences::open(&path),
            Err(PreferenceError::Corrupt(_))
        ));
    }
}
