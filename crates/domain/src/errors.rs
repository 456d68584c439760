//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for DevTracker
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DevTrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tracking was requested but no API key is configured.
    #[error("API key not configured")]
    MissingCredential,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// The collector answered with a non-success status.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DevTrackerError {
    /// Whether this error came from delivering a report to the collector.
    ///
    /// Transport failures are always recoverable: the snapshot is dropped and
    /// the next tick proceeds normally.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Auth(_) | Self::Transport(_))
    }
}

/// Result type alias for DevTracker operations
pub type Result<T> = std::result::Result<T, DevTrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_classification() {
        assert!(DevTrackerError::Network("refused".into()).is_transport());
        assert!(DevTrackerError::Auth("401".into()).is_transport());
        assert!(DevTrackerError::Transport("500".into()).is_transport());
        assert!(!DevTrackerError::MissingCredential.is_transport());
        assert!(!DevTrackerError::Config("bad url".into()).is_transport());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(DevTrackerError::Network("timeout".into())).unwrap();
        assert_eq!(json["type"], "Network");
        assert_eq!(json["message"], "timeout");

        let json = serde_json::to_value(DevTrackerError::MissingCredential).unwrap();
        assert_eq!(json["type"], "MissingCredential");
    }
}
