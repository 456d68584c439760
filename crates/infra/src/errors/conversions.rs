//! Conversions from external infrastructure errors into domain errors.

use devtracker_domain::DevTrackerError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DevTrackerError);

impl From<InfraError> for DevTrackerError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DevTrackerError> for InfraError {
    fn from(value: DevTrackerError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoDevTrackerError {
    fn into_devtracker(self) -> DevTrackerError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → DevTrackerError */
/* -------------------------------------------------------------------------- */

impl IntoDevTrackerError for KeyringError {
    fn into_devtracker(self) -> DevTrackerError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => DevTrackerError::Settings("keychain entry not found".into()),
            BadEncoding(_) => {
                DevTrackerError::Security("credential in keychain is not valid UTF-8".into())
            }
            TooLong(name, limit) => DevTrackerError::Security(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            Invalid(attr, reason) => DevTrackerError::Security(format!(
                "keychain attribute '{attr}' is invalid: {reason}"
            )),
            Ambiguous(entries) => DevTrackerError::Security(format!(
                "multiple keychain entries matched request ({} results)",
                entries.len()
            )),
            PlatformFailure(err) => {
                DevTrackerError::Security(format!("keychain platform error: {err}"))
            }
            NoStorageAccess(err) => {
                DevTrackerError::Security(format!("unable to access secure storage: {err}"))
            }
            _ => DevTrackerError::Security(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_devtracker())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DevTrackerError */
/* -------------------------------------------------------------------------- */

impl IntoDevTrackerError for HttpError {
    fn into_devtracker(self) -> DevTrackerError {
        if self.is_builder() {
            return DevTrackerError::Config(format!("invalid HTTP client setup: {self}"));
        }

        if self.is_timeout() {
            return DevTrackerError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return DevTrackerError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => DevTrackerError::Auth(message),
                _ => DevTrackerError::Transport(message),
            };
        }

        DevTrackerError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_devtracker())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → DevTrackerError */
/* -------------------------------------------------------------------------- */

impl IntoDevTrackerError for std::io::Error {
    fn into_devtracker(self) -> DevTrackerError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::PermissionDenied => {
                DevTrackerError::Security(format!("settings file access denied: {self}"))
            }
            _ => DevTrackerError::Settings(format!("settings file I/O failed: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_devtracker())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml → DevTrackerError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(DevTrackerError::Settings(format!("invalid JSON: {value}")))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(DevTrackerError::Config(format!("Invalid TOML format: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
