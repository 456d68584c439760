//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Reporting cadence
pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 5 * 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Collector wire contract
pub const ACTIVITY_ENDPOINT_PATH: &str = "/api/v1/ide/activity";
pub const API_KEY_HEADER: &str = "X-API-Key";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

// Settings persistence
pub const SETTINGS_DIR_NAME: &str = ".devtracker";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const KEYCHAIN_SERVICE_NAME: &str = "com.devtracker.extension";
pub const KEYCHAIN_API_KEY_NAME: &str = "api_key";

// User-facing messages
pub const MSG_TRACKING_STARTED: &str = "DevTracker: Time tracking started!";
pub const MSG_TRACKING_STOPPED: &str = "DevTracker: Time tracking stopped!";
pub const MSG_API_KEY_MISSING: &str = "API key not configured. Click to configure.";
pub const MSG_API_KEY_SAVED: &str = "API key saved! Starting time tracking...";
pub const ACTION_CONFIGURE: &str = "Configure";
pub const PROMPT_API_KEY: &str = "Enter your DevTracker API key";
pub const PROMPT_API_KEY_PLACEHOLDER: &str = "Get API key from DevTracker mobile app";
