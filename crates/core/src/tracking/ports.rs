//! Port interfaces for activity tracking
//!
//! These traits define the boundaries between core business logic
//! and the host editor, the settings store and the HTTP transport.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use devtracker_domain::{ActivitySnapshot, Credentials, EditorContext, Result, TrackerStatus};

/// Wall-clock source for session timestamps
pub trait Clock: Send + Sync {
    /// Current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// Persisted user settings (API key and collector URL)
///
/// Implementations are read on every report, so a key or URL changed while a
/// session is running takes effect on the next send.
pub trait SettingsStore: Send + Sync {
    /// Configured API key, `None` when unset or empty
    fn api_key(&self) -> Option<String>;

    /// Collector base URL
    fn server_url(&self) -> String;

    /// Persist a new API key
    fn set_api_key(&self, api_key: &str) -> Result<()>;

    /// Current credentials, `None` when no API key is configured
    fn credentials(&self) -> Option<Credentials> {
        self.api_key().map(|api_key| Credentials::new(api_key, self.server_url()))
    }
}

/// Read access to the host editor's focused document
pub trait EditorContextProvider: Send + Sync {
    /// The focused document, `None` when no file editor is active
    fn current_file(&self) -> Option<EditorContext>;

    /// Root folder of the open workspace, if any
    fn workspace_root(&self) -> Option<String>;
}

/// User-facing notifications and prompts
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show an informational message
    fn show_info(&self, message: &str);

    /// Show a warning with action buttons and wait for the user's choice
    async fn show_warning(&self, message: &str, actions: &[&str]) -> Option<String>;

    /// Ask for a secret value (input is masked by the host)
    async fn prompt_secret(&self, prompt: &str, placeholder: &str) -> Option<String>;
}

/// Host status bar item
pub trait StatusIndicator: Send + Sync {
    /// Replace the displayed status
    fn show(&self, status: TrackerStatus);
}

/// Transport for delivering one snapshot to the collector
#[async_trait]
pub trait ActivityReporter: Send + Sync {
    /// Send exactly one request carrying `snapshot`.
    ///
    /// Implementations must not retry or buffer; a failure is final for this
    /// snapshot.
    async fn send(&self, snapshot: &ActivitySnapshot, credentials: &Credentials) -> Result<()>;
}
