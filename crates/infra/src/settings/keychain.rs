//! API key storage in the system keyring
//!
//! Only the key lives in the keychain; the collector URL still comes from the
//! settings file. The platform store is picked by `keyring`'s native features
//! (Keychain on macOS, Credential Manager on Windows, Secret Service on Linux).

use devtracker_core::SettingsStore;
use devtracker_domain::constants::{KEYCHAIN_API_KEY_NAME, KEYCHAIN_SERVICE_NAME};
use devtracker_domain::{DevTrackerError, Result};
use keyring::credential::{CredentialBuilderApi, CredentialPersistence};
use keyring::Entry;
use tracing::warn;

use super::file::FileSettingsStore;
use crate::errors::InfraError;

/// Settings store that keeps the API key in the OS keychain
pub struct KeychainSettingsStore {
    entry: Entry,
    file: FileSettingsStore,
}

impl KeychainSettingsStore {
    /// Open the DevTracker keychain entry
    ///
    /// # Errors
    /// `DevTrackerError::Security` when this platform has no credential store
    /// that outlives the process.
    pub fn new(file: FileSettingsStore) -> Result<Self> {
        require_persistent(keyring::default::default_credential_builder().persistence())?;
        Self::with_entry(KEYCHAIN_SERVICE_NAME, KEYCHAIN_API_KEY_NAME, file)
    }

    /// Open a specific keychain entry
    pub fn with_entry(service: &str, name: &str, file: FileSettingsStore) -> Result<Self> {
        let entry = Entry::new(service, name).map_err(|e| {
            DevTrackerError::Security(format!("Failed to access keyring: {}", e))
        })?;
        Ok(Self { entry, file })
    }

    /// Remove the stored API key. A missing entry is not an error.
    pub fn delete_api_key(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

impl SettingsStore for KeychainSettingsStore {
    fn api_key(&self) -> Option<String> {
        match self.entry.get_password() {
            Ok(key) => Some(key).filter(|key| !key.trim().is_empty()),
            Err(keyring::Error::NoEntry) => None,
            Err(err) => {
                let err: DevTrackerError = InfraError::from(err).into();
                warn!(error = %err, "failed to read API key from keychain");
                None
            }
        }
    }

    fn server_url(&self) -> String {
        self.file.server_url()
    }

    fn set_api_key(&self, api_key: &str) -> Result<()> {
        self.entry.set_password(api_key).map_err(|err| InfraError::from(err).into())
    }
}

fn require_persistent(persistence: CredentialPersistence) -> Result<()> {
    match persistence {
        CredentialPersistence::EntryOnly | CredentialPersistence::ProcessOnly => {
            Err(DevTrackerError::Security(
                "no persistent keychain on this platform; disable use_keychain".into(),
            ))
        }
        _ => Ok(()),
    }
}
