//! JSON settings file store
//!
//! The file mirrors the editor's `devtracker.*` settings keys. It is re-read on
//! every access so edits made outside the process take effect on the next
//! report.

use std::fs::{self, OpenOptions};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use devtracker_core::SettingsStore;
use devtracker_domain::constants::{SETTINGS_DIR_NAME, SETTINGS_FILE_NAME};
use devtracker_domain::{Config, DevTrackerError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// On-disk shape of the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSettings {
    #[serde(rename = "devtracker.apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(rename = "devtracker.serverUrl", default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
}

/// Settings persisted as JSON with owner-only permissions
pub struct FileSettingsStore {
    path: PathBuf,
    default_server_url: String,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>, default_server_url: impl Into<String>) -> Self {
        Self { path: path.into(), default_server_url: default_server_url.into() }
    }

    /// Store at the configured path, or `~/.devtracker/settings.json`.
    ///
    /// # Errors
    /// `DevTrackerError::Settings` when no path is configured and the home
    /// directory cannot be determined.
    pub fn from_config(config: &Config) -> Result<Self> {
        let path = match &config.settings_path {
            Some(path) => path.clone(),
            None => default_settings_path().ok_or_else(|| {
                DevTrackerError::Settings("cannot determine home directory".into())
            })?,
        };
        Ok(Self::new(path, config.server_url.clone()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file. A missing file reads as empty settings.
    pub fn load(&self) -> Result<PersistedSettings> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PersistedSettings::default());
            }
            Err(err) => return Err(InfraError::from(err).into()),
        };

        if contents.trim().is_empty() {
            return Ok(PersistedSettings::default());
        }

        serde_json::from_str(&contents).map_err(|err| InfraError::from(err).into())
    }

    /// Write the whole file with `0600` permissions, via a temp file and rename.
    pub fn save(&self, settings: &PersistedSettings) -> Result<()> {
        let json = serde_json::to_vec_pretty(settings).map_err(InfraError::from)?;
        write_secure(&self.path, &json).map_err(InfraError::from)?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    fn load_or_warn(&self) -> PersistedSettings {
        self.load().unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "failed to read settings; using defaults");
            PersistedSettings::default()
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn api_key(&self) -> Option<String> {
        self.load_or_warn().api_key.filter(|key| !key.trim().is_empty())
    }

    fn server_url(&self) -> String {
        self.load_or_warn()
            .server_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.default_server_url.clone())
    }

    fn set_api_key(&self, api_key: &str) -> Result<()> {
        let mut settings = self.load()?;
        settings.api_key = Some(api_key.to_string());
        self.save(&settings)
    }
}

/// `~/.devtracker/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}

fn write_secure(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_file_name(format!(
        ".{}.tmp.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id()
    ));

    {
        let mut opts = OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        opts.mode(0o600);

        let mut file = opts.open(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_reads_as_unset() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::new(dir.path().join("settings.json"), "http://default");

        assert_eq!(store.api_key(), None);
        assert_eq!(store.server_url(), "http://default");
        assert!(store.credentials().is_none());
    }

    #[test]
    fn set_api_key_persists_and_keeps_server_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/settings.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"devtracker.serverUrl":"https://collector.example.com"}"#)
            .unwrap();

        let store = FileSettingsStore::new(&path, "http://default");
        store.set_api_key("abc123").unwrap();

        let reopened = FileSettingsStore::new(&path, "http://default");
        assert_eq!(reopened.api_key().as_deref(), Some("abc123"));
        assert_eq!(reopened.server_url(), "https://collector.example.com");

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"devtracker.apiKey\""));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".devtracker/settings.json");
        let store = FileSettingsStore::new(&path, "http://default");

        store.set_api_key("k").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn external_edits_are_seen_on_next_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = FileSettingsStore::new(&path, "http://default");
        store.set_api_key("first").unwrap();

        std::fs::write(&path, r#"{"devtracker.apiKey":""}"#).unwrap();
        assert_eq!(store.api_key(), None);
    }

    #[test]
    fn corrupt_file_reads_as_unset_but_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = FileSettingsStore::new(&path, "http://default");

        assert_eq!(store.api_key(), None);
        let err = store.set_api_key("k").unwrap_err();
        assert!(matches!(err, DevTrackerError::Settings(_)));
    }

    #[test]
    fn from_config_uses_configured_path() {
        let dir = tempdir().unwrap();
        let config = Config {
            settings_path: Some(dir.path().join("s.json")),
            server_url: "https://configured.example.com".into(),
            ..Config::default()
        };

        let store = FileSettingsStore::from_config(&config).unwrap();
        assert_eq!(store.path(), dir.path().join("s.json"));
        assert_eq!(store.server_url(), "https://configured.example.com");
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        FileSettingsStore::new(&path, "http://default").set_api_key("secret").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
