//! Configuration loader
//!
//! Loads application configuration from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Probes multiple paths for a config file (JSON or TOML)
//! 2. Falls back to built-in defaults when none is found
//! 3. Applies `DEVTRACKER_*` environment variables on top
//!
//! ## Environment Variables
//! - `DEVTRACKER_SERVER_URL`: Collector base URL
//! - `DEVTRACKER_REPORT_INTERVAL`: Report interval in seconds
//! - `DEVTRACKER_REQUEST_TIMEOUT`: HTTP request timeout in seconds
//! - `DEVTRACKER_SETTINGS_PATH`: Settings file location
//! - `DEVTRACKER_USE_KEYCHAIN`: Keep the API key in the OS keychain (true/false)
//! - `DEVTRACKER_IDE_TYPE`: Editor family reported as `ideType` (case-insensitive)
//! - `DEVTRACKER_LOG`: Log filter used when `RUST_LOG` is unset
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./devtracker.json` or `./devtracker.toml` (current working directory)
//! 2. The same names in the parent and grandparent directories
//! 3. Relative to executable location
//!
//! Generic names such as `config.json` are never probed: a project's own
//! config file must not be able to redirect the API key to another host.

use std::path::{Path, PathBuf};

use devtracker_domain::{Config, DevTrackerError, IdeType, Result};

use crate::errors::InfraError;

const CONFIG_FILE_NAMES: [&str; 2] = ["devtracker.json", "devtracker.toml"];

/// Load configuration with automatic fallback strategy
///
/// A probed config file (or the defaults) provides the base; environment
/// variables override individual fields.
///
/// # Errors
/// Returns `DevTrackerError::Config` if a config file exists but cannot be
/// parsed, or an environment variable has an invalid value.
pub fn load() -> Result<Config> {
    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found; using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from environment variables over the defaults
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `DevTrackerError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
/// Missing fields take their default values.
///
/// # Errors
/// Returns `DevTrackerError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DevTrackerError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DevTrackerError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DevTrackerError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DevTrackerError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(DevTrackerError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory and its two parents, then the
/// executable's directory and its two parents.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots.iter().find_map(|root| probe_config_paths_from(root))
}

/// Probe `root`, `root/..` and `root/../..` for the known config file names
pub fn probe_config_paths_from(root: &Path) -> Option<PathBuf> {
    ["", "..", "../.."]
        .iter()
        .map(|relative| root.join(relative))
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(url) = env_opt("DEVTRACKER_SERVER_URL") {
        config.server_url = url;
    }
    if let Some(secs) = env_u64("DEVTRACKER_REPORT_INTERVAL")? {
        config.report_interval_seconds = secs;
    }
    if let Some(secs) = env_u64("DEVTRACKER_REQUEST_TIMEOUT")? {
        config.request_timeout_seconds = secs;
    }
    if let Some(path) = env_opt("DEVTRACKER_SETTINGS_PATH") {
        config.settings_path = Some(PathBuf::from(path));
    }
    config.use_keychain = env_bool("DEVTRACKER_USE_KEYCHAIN", config.use_keychain);
    if let Some(ide) = env_opt("DEVTRACKER_IDE_TYPE") {
        config.ide_type = ide.parse::<IdeType>().map_err(DevTrackerError::Config)?;
    }
    if let Some(filter) = env_opt("DEVTRACKER_LOG") {
        config.log_filter = filter;
    }
    Ok(())
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse an optional integer environment variable
///
/// # Errors
/// Returns `DevTrackerError::Config` if the variable is set but not a number.
fn env_u64(key: &str) -> Result<Option<u64>> {
    env_opt(key)
        .map(|s| {
            s.parse::<u64>()
                .map_err(|e| DevTrackerError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
