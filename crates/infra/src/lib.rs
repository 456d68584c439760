//! # DevTracker Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The HTTP activity reporter and its client
//! - Settings stores (JSON file, OS keychain)
//! - Configuration loading
//! - The system clock
//!
//! ## Architecture
//! - Implements traits defined in `devtracker-core`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod api;
pub mod clock;
pub mod config;
pub mod errors;
pub mod http;
pub mod settings;

// Re-export commonly used items
pub use api::{HttpActivityReporter, ReportError, ReportErrorCategory};
pub use clock::SystemClock;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use settings::{open_settings_store, FileSettingsStore, KeychainSettingsStore};
