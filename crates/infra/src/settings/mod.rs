//! Persisted user settings (API key and collector URL)

pub mod file;
pub mod keychain;

use std::sync::Arc;

use devtracker_core::SettingsStore;
use devtracker_domain::{Config, Result};

pub use file::{default_settings_path, FileSettingsStore, PersistedSettings};
pub use keychain::KeychainSettingsStore;

/// Settings store selected by `config.use_keychain`
pub fn open_settings_store(config: &Config) -> Result<Arc<dyn SettingsStore>> {
    let file = FileSettingsStore::from_config(config)?;
    if config.use_keychain {
        Ok(Arc::new(KeychainSettingsStore::new(file)?))
    } else {
        Ok(Arc::new(file))
    }
}
