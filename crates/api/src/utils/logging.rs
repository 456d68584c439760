use std::sync::Once;
use std::time::Duration;

use devtracker_domain::DevTrackerError;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (the configured
/// `log_filter`) applies. Safe to call more than once, and a no-op when the
/// host already installed a subscriber.
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init()
            .is_ok();

        if !installed {
            tracing::debug!("tracing subscriber already installed; keeping it");
        }
    });
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"tracking::start_tracking"`).
/// * `elapsed` - Duration the command execution took.
/// * `error_type` - [`error_label`] of the failure, `None` on success.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error_type: Option<&'static str>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error_type {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(error_type) => {
            warn!(command, duration_ms, error_type, "command_execution_failure");
        }
    }
}

/// Convert a `DevTrackerError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &DevTrackerError) -> &'static str {
    match error {
        DevTrackerError::Config(_) => "config",
        DevTrackerError::MissingCredential => "missing_credential",
        DevTrackerError::Network(_) => "network",
        DevTrackerError::Auth(_) => "auth",
        DevTrackerError::Transport(_) => "transport",
        DevTrackerError::Settings(_) => "settings",
        DevTrackerError::Security(_) => "security",
        DevTrackerError::InvalidInput(_) => "invalid_input",
        DevTrackerError::Internal(_) => "internal",
    }
}
