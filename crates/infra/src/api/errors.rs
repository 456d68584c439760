//! Collector-specific error types
//!
//! Classifies failed activity reports. Every category is handled the same
//! way by the tracker (log and discard); the classification exists for logs.

use devtracker_domain::DevTrackerError;
use reqwest::StatusCode;
use thiserror::Error;

/// Categories of report failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportErrorCategory {
    /// Authentication errors (401, 403)
    Authentication,
    /// Client errors (4xx, including 429)
    Client,
    /// Server errors (5xx)
    Server,
    /// Network/connection errors and timeouts
    Network,
    /// Configuration errors (bad server URL, unusable API key)
    Config,
}

/// Activity report errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReportError {
    /// Get the error category for this error
    pub fn category(&self) -> ReportErrorCategory {
        match self {
            Self::Auth(_) => ReportErrorCategory::Authentication,
            Self::RateLimit(_) | Self::Client(_) => ReportErrorCategory::Client,
            Self::Server(_) => ReportErrorCategory::Server,
            Self::Network(_) | Self::Timeout(_) => ReportErrorCategory::Network,
            Self::Config(_) => ReportErrorCategory::Config,
        }
    }

    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let mut message =
            format!("HTTP {} {}", status.as_u16(), status.canonical_reason().unwrap_or("unknown"));
        let body = body.trim();
        if !body.is_empty() {
            message.push_str(": ");
            message.extend(body.chars().take(200));
        }

        match status.as_u16() {
            401 | 403 => Self::Auth(message),
            429 => Self::RateLimit(message),
            400..=499 => Self::Client(message),
            500..=599 => Self::Server(message),
            _ => Self::Client(message),
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::Config(err.to_string());
        }
        if err.is_timeout() {
            return Self::Timeout(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::from_status(status, "");
        }
        Self::Network(err.to_string())
    }
}

impl From<ReportError> for DevTrackerError {
    fn from(err: ReportError) -> Self {
        let message = err.to_string();
        match err.category() {
            ReportErrorCategory::Authentication => DevTrackerError::Auth(message),
            ReportErrorCategory::Client | ReportErrorCategory::Server => {
                DevTrackerError::Transport(message)
            }
            ReportErrorCategory::Network => DevTrackerError::Network(message),
            ReportErrorCategory::Config => DevTrackerError::Config(message),
        }
    }
}
