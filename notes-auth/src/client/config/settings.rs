use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::client::kv_store::{FileStore, KeyValueStore, MemoryStore};
use crate::error::AuthError;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Remote service root, e.g. `https://host/api/v1`. Absent or empty forces mock mode.
    #[serde(default)]
    pub api_base_url: Option<String>,

    #[serde(default)]
    pub use_mock: bool,

    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,

    #[serde(default)]
    pub storage: StorageKind,

    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    Mock,
    Remote { base_url: String },
}

fn default_mock_delay_ms() -> u64 {
    400
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            use_mock: false,
            mock_delay_ms: default_mock_delay_ms(),
            storage: StorageKind::default(),
            data_dir: None,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("NOTES_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        Self::from_sources(
            &config_path,
            Environment::with_prefix("NOTES")
                .separator("__")
                .try_parsing(true),
        )
    }

    fn from_sources(config_path: &str, environment: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        match self.api_base_url.as_deref() {
            Some(url) if !url.is_empty() && !url.starts_with("http") => {
                Err("api_base_url must be a valid HTTP(S) URL".to_string())
            }
            _ => Ok(()),
        }
    }

    pub fn backend_mode(&self) -> BackendMode {
        match self.api_base_url.as_deref() {
            Some(url) if !url.is_empty() && !self.use_mock => BackendMode::Remote {
                base_url: url.to_string(),
            },
            _ => BackendMode::Mock,
        }
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    pub fn data_dir(&self) -> Result<PathBuf, AuthError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::cache_dir()
                .map(|dir| dir.join("notes"))
                .ok_or_else(|| {
                    AuthError::Configuration("Could not find cache directory".to_string())
                }),
        }
    }

    /// Open the key-value store that holds the token and the mock notes.
    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>, AuthError> {
        match self.storage {
            StorageKind::Memory => Ok(Arc::new(MemoryStore::new())),
            StorageKind::File => Ok(Arc::new(FileStore::open(&self.data_dir()?)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("NOTES")
            .separator("__")
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn test_defaults_select_mock_mode() {
        let settings = Settings::from_sources("does-not-exist.toml", env(&[])).unwrap();
        assert_eq!(settings.backend_mode(), BackendMode::Mock);
        assert_eq!(settings.mock_delay(), Duration::from_millis(400));
        assert_eq!(settings.storage, StorageKind::File);
    }

    #[test]
    fn test_base_url_selects_remote_mode() {
        let settings = Settings::from_sources(
            "does-not-exist.toml",
            env(&[("NOTES_API_BASE_URL", "https://notes.example.com/api/v1")]),
        )
        .unwrap();
        assert_eq!(
            settings.backend_mode(),
            BackendMode::Remote {
                base_url: "https://notes.example.com/api/v1".to_string()
            }
        );
    }

    #[test]
    fn test_use_mock_overrides_base_url() {
        let settings = Settings::from_sources(
            "does-not-exist.toml",
            env(&[
                ("NOTES_API_BASE_URL", "https://notes.example.com"),
                ("NOTES_USE_MOCK", "true"),
                ("NOTES_MOCK_DELAY_MS", "5"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.backend_mode(), BackendMode::Mock);
        assert_eq!(settings.mock_delay(), Duration::from_millis(5));
    }

    #[test]
    fn test_empty_base_url_is_mock() {
        let settings = Settings {
            api_base_url: Some(String::new()),
            ..Settings::default()
        };
        assert_eq!(settings.backend_mode(), BackendMode::Mock);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_source_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_base_url = \"http://localhost:3000\"\nstorage = \"memory\"\n",
        )
        .unwrap();

        let settings = Settings::from_sources(path.to_str().unwrap(), env(&[])).unwrap();
        assert_eq!(settings.storage, StorageKind::Memory);
        assert!(matches!(settings.backend_mode(), BackendMode::Remote { .. }));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let settings = Settings {
            api_base_url: Some("ftp://notes".to_string()),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
