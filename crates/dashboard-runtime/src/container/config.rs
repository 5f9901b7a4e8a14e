//! # Dashboard Configuration
//!
//! Layered settings. Each field is taken from the first layer that supplies
//! a usable value:
//!
//! 1. command line
//! 2. environment (`UD_*`)
//! 3. persisted preferences (`API_ORIGIN`, `USER_ID`, `AREA`)
//! 4. defaults
//!
//! A value that does not parse is logged and the next layer is consulted.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use shared_types::entities::{Page, Period};
use shared_types::errors::PreferenceError;
use shared_types::preferences::{keys, FilePreferences, MemoryPreferences, PreferenceStore};
use thiserror::Error;
use tracing::warn;
use ud_02_feature_registry::RegistryError;
use ud_03_api_client::ClientError;

/// Default port shown in the connection toast.
pub const DEFAULT_PORT: u16 = 5500;
/// Default preferences file.
pub const DEFAULT_PREFS_PATH: &str = "dashboard-prefs.json";

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Backend origin; empty selects the mock usage source.
    pub api_origin: String,
    pub user_id: u64,
    /// Area label shown in the header.
    pub area: String,
    pub page: Page,
    /// Port of the local web server, used in the connection toast.
    pub port: u16,
    /// Preferences file; `None` keeps preferences in memory.
    pub prefs_path: Option<PathBuf>,
    /// Billing period to load; `None` means the current month.
    pub period: Option<Period>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_origin: String::new(),
            user_id: 1,
            area: "Anseo-dong".to_string(),
            page: Page::Home,
            port: DEFAULT_PORT,
            prefs_path: Some(PathBuf::from(DEFAULT_PREFS_PATH)),
            period: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The preferences file could not be opened.
    #[error("Failed to open preferences: {0}")]
    Preferences(#[from] PreferenceError),

    /// The API origin is not an absolute http(s) URL.
    #[error("Invalid API origin: {0}")]
    ApiOrigin(#[from] ClientError),

    /// Two features were registered under the same id.
    #[error("Failed to register features: {0}")]
    Registration(#[from] RegistryError),
}

/// Raw values from one configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub api_origin: Option<String>,
    pub user_id: Option<String>,
    pub area: Option<String>,
    pub page: Option<String>,
    pub port: Option<String>,
    pub prefs_path: Option<String>,
    pub period: Option<String>,
}

impl ConfigLayer {
    /// The `UD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_origin: lookup("UD_API_ORIGIN"),
            user_id: lookup("UD_USER_ID"),
            area: lookup("UD_AREA"),
            page: lookup("UD_PAGE"),
            port: lookup("UD_PORT"),
            prefs_path: lookup("UD_PREFS_PATH"),
            period: lookup("UD_PERIOD"),
        }
    }

    /// Overrides persisted by an earlier session.
    pub fn from_preferences(preferences: &dyn PreferenceStore) -> Self {
        Self {
            api_origin: preferences.get(keys::API_ORIGIN),
            user_id: preferences.get(keys::USER_ID),
            area: preferences.get(keys::AREA),
            ..Self::default()
        }
    }
}

/// First parseable value for one field across `layers`.
fn pick<T, F>(field: &str, layers: &[&ConfigLayer], get: F) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&ConfigLayer) -> Option<&String>,
{
    for layer in layers {
        let Some(raw) = get(layer) else { continue };
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match raw.parse::<T>() {
            Ok(value) => return Some(value),
            Err(e) => warn!(field, value = raw, error = %e, "Ignoring invalid configuration value"),
        }
    }
    None
}

impl DashboardConfig {
    /// Merge layers, highest precedence first, over the defaults.
    pub fn resolve(layers: &[&ConfigLayer]) -> Self {
        let defaults = Self::default();

        let api_origin = pick::<String, _>("api_origin", layers, |l| l.api_origin.as_ref())
            .unwrap_or(defaults.api_origin);

        Self {
            api_origin: api_origin.trim_end_matches('/').to_string(),
            user_id: pick("user_id", layers, |l| l.user_id.as_ref()).unwrap_or(defaults.user_id),
            area: pick("area", layers, |l| l.area.as_ref()).unwrap_or(defaults.area),
            page: pick("page", layers, |l| l.page.as_ref()).unwrap_or(defaults.page),
            port: pick("port", layers, |l| l.port.as_ref()).unwrap_or(defaults.port),
            prefs_path: pick("prefs_path", layers, |l| l.prefs_path.as_ref())
                .or(defaults.prefs_path),
            period: pick("period", layers, |l| l.period.as_ref()),
        }
    }

    /// Period to load, defaulting to the current month.
    pub fn period_or_current(&self) -> Period {
        self.period.unwrap_or_else(Period::current)
    }

    /// Whether a backend is configured.
    pub fn has_backend(&self) -> bool {
        !self.api_origin.is_empty()
    }

    /// Open the preference store named by `prefs_path`.
    pub fn open_preferences(&self) -> Result<Arc<dyn PreferenceStore>, ConfigError> {
        match &self.prefs_path {
            Some(path) => Ok(Arc::new(FilePreferences::open(path.clone())?)),
            None => Ok(Arc::new(MemoryPreferences::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(pairs: &[(&str, &str)]) -> ConfigLayer {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigLayer::from_lookup(move |key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::resolve(&[]);
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.user_id, 1);
        assert_eq!(config.area, "Anseo-dong");
        assert_eq!(config.port, 5500);
        assert!(!config.has_backend());
    }

    #[test]
    fn test_precedence_cli_env_prefs() {
        let cli = ConfigLayer {
            user_id: Some("7".into()),
            ..ConfigLayer::default()
        };
        let env = layer(&[("UD_USER_ID", "8"), ("UD_AREA", "Mapo")]);
        let prefs = MemoryPreferences::with_values([
            (keys::USER_ID, "9"),
            (keys::AREA, "Jongno"),
            (keys::API_ORIGIN, "http://10.0.0.2:8080/"),
        ]);
        let prefs = ConfigLayer::from_preferences(&prefs);

        let config = DashboardConfig::resolve(&[&cli, &env, &prefs]);
        assert_eq!(config.user_id, 7);
        assert_eq!(config.area, "Mapo");
        assert_eq!(config.api_origin, "http://10.0.0.2:8080");
        assert!(config.has_backend());
    }

    #[test]
    fn test_invalid_numbers_fall_through() {
        let env = layer(&[("UD_PORT", "eighty"), ("UD_USER_ID", "-3")]);
        let prefs = ConfigLayer {
            user_id: Some("42".into()),
            ..ConfigLayer::default()
        };
        let config = DashboardConfig::resolve(&[&env, &prefs]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.user_id, 42);
    }

    #[test]
    fn test_page_and_period() {
        let env = layer(&[("UD_PAGE", "alerts"), ("UD_PERIOD", "2025-08")]);
        let config = DashboardConfig::resolve(&[&env]);
        assert_eq!(config.page, Page::Alerts);
        assert_eq!(config.period_or_current().to_string(), "2025-08");

        let bad = layer(&[("UD_PAGE", "nowhere"), ("UD_PERIOD", "2025-13")]);
        let config = DashboardConfig::resolve(&[&bad]);
        assert_eq!(config.page, Page::Home);
        assert_eq!(config.period, None);
    }

    #[test]
    fn test_prefs_path_layers() {
        let env = layer(&[("UD_PREFS_PATH", "/tmp/ud.json")]);
        assert_eq!(
            DashboardConfig::resolve(&[&env]).prefs_path,
            Some(PathBuf::from("/tmp/ud.json"))
        );
        assert_eq!(
            DashboardConfig::resolve(&[]).prefs_path,
            Some(PathBuf::from(DEFAULT_PREFS_PATH))
        );
    }

    #[test]
    fn test_open_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            prefs_path: Some(dir.path().join("prefs.json")),
            ..DashboardConfig::default()
        };
        let prefs = config.open_preferences().unwrap();
        prefs.set(keys::AREA, "Mapo").unwrap();

        let reopened = config.open_preferences().unwrap();
        assert_eq!(reopened.get(keys::AREA).as_deref(), Some("Mapo"));

        std::fs::write(dir.path().join("prefs.json"), "{not json").unwrap();
        assert!(matches!(
            config.open_preferences(),
            Err(ConfigError::Preferences(_))
        ));
    }
}
